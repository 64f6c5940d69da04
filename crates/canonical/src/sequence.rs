//! Unit sequences produced by the normalization pipeline.
//!
//! A [`UnitSequence`] is the ordered, 0-indexed list of comparable units
//! (words or paragraphs) built once per input text. It exposes read-only
//! accessors only; aligners and classifiers borrow the units as a slice.
//!
//! ```rust
//! use canonical::{normalize_and_split, CanonicalizeConfig, Granularity};
//!
//! let cfg = CanonicalizeConfig::default();
//! let words = normalize_and_split("The quick, brown fox!", Granularity::Word, &cfg);
//!
//! assert_eq!(words.granularity(), Granularity::Word);
//! assert_eq!(words.units(), ["the", "quick", "brown", "fox"]);
//! assert_eq!(words.get(1), Some("quick"));
//! ```

use serde::{Deserialize, Serialize};

/// Unit size of a comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Case-folded, punctuation-stripped words.
    Word,
    /// Trimmed sentence or paragraph pieces.
    Paragraph,
}

/// Ordered list of comparable units for one side of a comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitSequence {
    granularity: Granularity,
    units: Vec<String>,
}

impl UnitSequence {
    pub(crate) fn new(granularity: Granularity, units: Vec<String>) -> Self {
        Self { granularity, units }
    }

    /// Build a paragraph sequence from paragraphs read out of a document's
    /// native structure. Each entry is trimmed; blank entries are dropped.
    ///
    /// ```rust
    /// use canonical::UnitSequence;
    ///
    /// let seq = UnitSequence::from_paragraphs(["  First line. ", "", "Second"]);
    /// assert_eq!(seq.units(), ["First line.", "Second"]);
    /// ```
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let units = paragraphs
            .into_iter()
            .filter_map(|p| {
                let trimmed = p.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();
        Self::new(Granularity::Paragraph, units)
    }

    /// Treat the whole trimmed text as a single paragraph. Blank text yields
    /// an empty sequence.
    pub fn single_paragraph(text: &str) -> Self {
        Self::from_paragraphs(std::iter::once(text))
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.units.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.units.iter().map(String::as_str)
    }
}

impl AsRef<[String]> for UnitSequence {
    fn as_ref(&self) -> &[String] {
        &self.units
    }
}
