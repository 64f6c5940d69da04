//! # Script Grader (`grader`)
//!
//! ## Purpose
//!
//! `grader` sits on top of the canonical unit layer (`canonical`) and the
//! aligner (`align`). It turns an edit script between a reference script and a
//! speech-to-text transcript into per-unit verdicts, accuracy figures and
//! highlighted paragraph markup for human review.
//!
//! ## Core Types
//!
//! - [`Label`]: verdict for one aligned word:
//!   - `Correct`: equal, or a substitution at or above the threshold.
//!   - `Wrong`: a substitution below the threshold.
//!   - `Missing`: a script word with no transcript counterpart.
//!   - `Extra`: a transcript word with no script counterpart.
//! - [`ClassificationRecord`]: one aligned position with both units, the
//!   reference index, similarity and label.
//! - [`AccuracyReport`]: label tallies, accuracy and the ordered records, with
//!   pagination and text reconstruction helpers.
//! - [`ParagraphDiffResult`]: highlighted markup for one paragraph pair.
//! - [`GradeConfig`] / [`MarkupConfig`]: threshold, page size and markers.
//! - [`Grader`]: validated configs plus the word and paragraph passes.
//!
//! ## Example Usage
//!
//! ```
//! use grader::{Grader, Label, ParagraphOptions, ParagraphStatus};
//!
//! let grader = Grader::default();
//!
//! let report = grader.analyze_words("Alpha beta.", "alpha");
//! assert_eq!(report.accuracy_percentage, 50.0);
//! assert_eq!(report.records[1].label, Label::Missing);
//!
//! let paragraphs = grader.analyze_paragraphs(
//!     "First part. Second part",
//!     "First part",
//!     None,
//!     &ParagraphOptions::default(),
//! );
//! assert_eq!(paragraphs[1].status, ParagraphStatus::Missing);
//! ```

mod classify;
mod engine;
mod highlight;
mod stats;
mod types;

pub use crate::classify::classify;
pub use crate::engine::Grader;
pub use crate::highlight::highlight;
pub use crate::stats::aggregate;
pub use crate::types::{
    AccuracyReport, ClassificationRecord, GradeConfig, GradeError, Label, MarkupConfig,
    ParagraphDiffResult, ParagraphOptions, ParagraphStatus, RecordPage,
    DEFAULT_CORRECTNESS_THRESHOLD, DEFAULT_PAGE_SIZE,
};
