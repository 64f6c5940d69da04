//! Whitespace normalization utilities.
//!
//! # Examples
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! let normalized = collapse_whitespace("  hello   world  ");
//! assert_eq!(normalized, "hello world");
//! ```

/// Collapses repeated whitespace, trims edges, and normalizes newlines to
/// single spaces.
///
/// All Unicode whitespace counts as a delimiter, including tabs, carriage
/// returns and non-breaking spaces. Returns an empty string for empty or
/// whitespace-only input.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("hello\r\n\tworld"), "hello world");
/// assert_eq!(collapse_whitespace("   \n\t   "), "");
/// assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
