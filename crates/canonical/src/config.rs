//! Configuration types for unit normalization.
//!
//! [`CanonicalizeConfig`] controls how raw script or transcript text is folded
//! into comparable word units. Paragraph units are only trimmed and are not
//! affected by these settings.
//!
//! # Versioning
//!
//! The `version` field tracks normalization behavior. Any change that alters
//! which words compare equal must come with a version bump so stored reports
//! can be traced back to the rule that produced them.
//!
//! # Examples
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(!config.normalize_unicode);
//! assert!(config.lowercase);
//! ```
//!
//! Folding compatibility characters before comparison:
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig {
//!     normalize_unicode: true,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for word-level normalization.
///
/// # Serialization
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": false,
///   "lowercase": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanonicalizeConfig {
    /// Version of the normalization rule. Must be >= 1; version 0 is reserved.
    pub version: u32,

    /// If true, apply Unicode NFKC normalization before case folding.
    ///
    /// Off by default: transcripts and extracted scripts are compared with
    /// plain lowercasing and punctuation stripping only. Enable it when the
    /// script source mixes composed and decomposed accents, e.g.
    ///
    /// ```text
    /// "Café" (U+00E9) and "Cafe" + U+0301 → "café"
    /// ```
    pub normalize_unicode: bool,

    /// If true, apply locale-free Unicode lowercasing.
    ///
    /// Transcription engines capitalize sentence starts on their own, so
    /// comparisons are case-insensitive unless this is turned off.
    pub lowercase: bool,
}

impl CanonicalizeConfig {
    /// Validate the configuration before any text is processed.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: false,
            lowercase: true,
        }
    }
}
