use crate::matcher::SequenceMatcher;

/// Score of two identical strings.
pub const MAX_SIMILARITY: f64 = 100.0;

/// Case-insensitive fuzzy similarity between two strings, in `[0, 100]`.
///
/// The score is `2 * M / T * 100` rounded to the nearest whole number, where
/// `M` is the number of characters in matching blocks of the lowercased
/// strings and `T` their combined length in characters.
///
/// If either string is empty the score is `0`; callers decide separately what
/// an empty-versus-empty pair means.
///
/// ```rust
/// use align::similarity;
///
/// assert_eq!(similarity("Fox", "fox"), 100.0);
/// assert_eq!(similarity("quick", "slow"), 0.0);
/// assert_eq!(similarity("colour", "color"), 91.0);
/// assert_eq!(similarity("", ""), 0.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let ratio = SequenceMatcher::new(&a, &b).ratio();
    (ratio * MAX_SIMILARITY).round()
}
