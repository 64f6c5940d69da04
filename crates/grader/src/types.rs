use std::fmt;

use canonical::CanonicalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default similarity at or above which a substituted word still counts as
/// read correctly.
pub const DEFAULT_CORRECTNESS_THRESHOLD: f64 = 80.0;

/// Default number of records per review page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Outcome for one aligned word position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Read as written, or close enough to clear the correctness threshold.
    Correct,
    /// Present in the script but not heard.
    Missing,
    /// Heard in place of a script word and too dissimilar to it.
    Wrong,
    /// Heard with no script word to pair with.
    Extra,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Correct => "correct",
            Label::Missing => "missing",
            Label::Wrong => "wrong",
            Label::Extra => "extra",
        }
    }

    /// Whether this label stands for a reference unit. `Extra` records do
    /// not.
    pub fn is_reference_backed(&self) -> bool {
        !matches!(self, Label::Extra)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One aligned position of a word-level comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationRecord {
    /// Script word, absent for `Extra` records.
    pub reference_unit: Option<String>,
    /// Transcript word, absent for `Missing` records.
    pub candidate_unit: Option<String>,
    /// Position in the reference sequence. `Extra` records carry the
    /// insertion point instead of a position of their own.
    pub reference_index: usize,
    pub is_correct: bool,
    /// Similarity in `[0, 100]`.
    pub similarity: f64,
    pub label: Label,
}

/// Aggregated word-level accuracy plus every classification record in
/// alignment order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccuracyReport {
    /// Length of the reference word sequence.
    pub total_reference_units: usize,
    pub correct_count: usize,
    pub missing_count: usize,
    pub wrong_count: usize,
    /// Extra transcript words. Informational only; not part of accuracy.
    pub extra_count: usize,
    /// `correct_count / total_reference_units * 100`, or `0` for an empty
    /// reference.
    pub accuracy_percentage: f64,
    pub records: Vec<ClassificationRecord>,
    /// Page size served by [`AccuracyReport::page`] when the caller passes 0.
    #[serde(default = "GradeConfig::default_page_size")]
    pub page_size: usize,
}

/// One page of classification records ordered by reference index.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage<'a> {
    /// 1-based page number actually served.
    pub number: usize,
    pub num_pages: usize,
    pub page_size: usize,
    pub total_records: usize,
    pub records: Vec<&'a ClassificationRecord>,
}

impl RecordPage<'_> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

/// Review status of a paired paragraph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ParagraphStatus {
    Correct,
    Wrong,
    Missing,
    Extra,
}

/// Highlighted comparison of one aligned paragraph position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParagraphDiffResult {
    /// Script paragraph with mismatched words wrapped in markers. Empty for
    /// `Extra` paragraphs.
    pub highlighted_reference_markup: String,
    /// Transcript paragraph with mismatched words wrapped in markers. Empty
    /// for `Missing` paragraphs.
    pub highlighted_candidate_markup: String,
    pub similarity: f64,
    pub status: ParagraphStatus,
    /// Reference paragraph index, pinned to the insertion point for `Extra`.
    pub index: usize,
}

/// Grading policy shared by the word-level and paragraph-level passes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeConfig {
    /// Minimum similarity for a replaced pair to count as `Correct`.
    #[serde(default = "GradeConfig::default_correctness_threshold")]
    pub correctness_threshold: f64,
    /// Records per page of the reports built with this config. Copied onto
    /// each [`AccuracyReport`] and served when `page` is called with size 0.
    #[serde(default = "GradeConfig::default_page_size")]
    pub page_size: usize,
}

impl GradeConfig {
    pub(crate) fn default_correctness_threshold() -> f64 {
        DEFAULT_CORRECTNESS_THRESHOLD
    }

    pub(crate) fn default_page_size() -> usize {
        DEFAULT_PAGE_SIZE
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.correctness_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), GradeError> {
        if !(0.0..=100.0).contains(&self.correctness_threshold) {
            return Err(GradeError::InvalidConfig(format!(
                "correctness_threshold must be within [0, 100], got {}",
                self.correctness_threshold
            )));
        }
        if self.page_size == 0 {
            return Err(GradeError::InvalidConfig(
                "page_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for GradeConfig {
    fn default() -> Self {
        Self {
            correctness_threshold: Self::default_correctness_threshold(),
            page_size: Self::default_page_size(),
        }
    }
}

/// Markers used by the paragraph highlighter.
///
/// Each marked word is rendered as `<span class="{class}">{word}</span>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkupConfig {
    #[serde(default = "MarkupConfig::default_wrong_class")]
    pub wrong_class: String,
    #[serde(default = "MarkupConfig::default_missing_class")]
    pub missing_class: String,
    #[serde(default = "MarkupConfig::default_extra_class")]
    pub extra_class: String,
    /// Escape `&`, `<`, `>`, `"` and `'` in words before emitting them.
    #[serde(default = "MarkupConfig::default_escape_html")]
    pub escape_html: bool,
}

impl MarkupConfig {
    fn default_wrong_class() -> String {
        "wrong-word".into()
    }

    fn default_missing_class() -> String {
        "missing-word".into()
    }

    fn default_extra_class() -> String {
        "extra-word".into()
    }

    fn default_escape_html() -> bool {
        true
    }

    pub fn validate(&self) -> Result<(), GradeError> {
        for (name, class) in [
            ("wrong_class", &self.wrong_class),
            ("missing_class", &self.missing_class),
            ("extra_class", &self.extra_class),
        ] {
            if class.trim().is_empty() {
                return Err(GradeError::InvalidConfig(format!(
                    "{name} must not be empty"
                )));
            }
            if class.contains(['"', '<', '>']) {
                return Err(GradeError::InvalidConfig(format!(
                    "{name} must not contain quotes or angle brackets"
                )));
            }
        }
        Ok(())
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            wrong_class: Self::default_wrong_class(),
            missing_class: Self::default_missing_class(),
            extra_class: Self::default_extra_class(),
            escape_html: Self::default_escape_html(),
        }
    }
}

/// How paragraphs are cut for the paragraph-level pass.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParagraphOptions {
    /// Compare each side's whole text as a single paragraph, ignoring
    /// punctuation boundaries and any reference paragraph hint.
    #[serde(default)]
    pub force_single_paragraph: bool,
}

/// Errors produced by the grading layer.
///
/// Well-formed text never fails; only absent input or a bad policy does, and
/// both are rejected before any alignment work starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GradeError {
    /// Required text was absent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Grading or markup policy is out of range.
    #[error("invalid grade config: {0}")]
    InvalidConfig(String),
    /// Normalization config was rejected.
    #[error("canonical config error: {0}")]
    Canonical(#[from] CanonicalError),
}
