//! Canonical unit layer for script-versus-transcript comparison.
//!
//! This crate turns raw text into the ordered unit sequences that the aligner
//! compares. A script document and a speech-to-text transcript go through the
//! same rule, so any difference left afterwards is a real reading difference
//! and not a formatting one.
//!
//! ## What we do
//!
//! - Word units: lowercase, collapse whitespace, strip everything except
//!   alphanumerics, `_`, whitespace and apostrophes, split on whitespace
//! - Paragraph units: cut at `.`/`!`/`?` followed by whitespace or at newline
//!   runs, trim, drop blanks
//! - Paragraphs read from a document's native structure via
//!   [`UnitSequence::from_paragraphs`]
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text and config give the
//! same sequence on any machine. Empty input is not an error; it produces an
//! empty sequence.

mod config;
mod error;
mod pipeline;
mod sequence;
mod whitespace;

pub use crate::config::CanonicalizeConfig;
pub use crate::error::CanonicalError;
pub use crate::pipeline::normalize_and_split;
pub use crate::sequence::{Granularity, UnitSequence};
pub use crate::whitespace::collapse_whitespace;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_and_transcript_fold_to_same_words() {
        let cfg = CanonicalizeConfig::default();
        let script = normalize_and_split("The quick, brown fox.", Granularity::Word, &cfg);
        let transcript = normalize_and_split("the Quick brown  fox", Granularity::Word, &cfg);
        assert_eq!(script.units(), transcript.units());
    }

    #[test]
    fn word_and_paragraph_views_of_same_text() {
        let cfg = CanonicalizeConfig::default();
        let text = "Good morning. Welcome back!\nLet's begin";

        let words = normalize_and_split(text, Granularity::Word, &cfg);
        assert_eq!(
            words.units(),
            ["good", "morning", "welcome", "back", "let's", "begin"]
        );

        let paragraphs = normalize_and_split(text, Granularity::Paragraph, &cfg);
        assert_eq!(
            paragraphs.units(),
            ["Good morning", "Welcome back", "Let's begin"]
        );
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        let cfg = CanonicalizeConfig::default();
        for granularity in [Granularity::Word, Granularity::Paragraph] {
            let seq = normalize_and_split("   ", granularity, &cfg);
            assert!(seq.is_empty());
            assert_eq!(seq.granularity(), granularity);
        }
    }

    #[test]
    fn normalization_is_deterministic() {
        let cfg = CanonicalizeConfig::default();
        let text = "Repeat: the same   text, twice!";
        let first = normalize_and_split(text, Granularity::Word, &cfg);
        let second = normalize_and_split(text, Granularity::Word, &cfg);
        assert_eq!(first, second);
    }
}
