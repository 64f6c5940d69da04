use thiserror::Error;

/// Errors that can occur while validating a normalization configuration.
///
/// Normalization itself never fails: empty or whitespace-only text simply
/// produces an empty [`UnitSequence`](crate::UnitSequence).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
