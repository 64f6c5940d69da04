use std::borrow::Cow;
use std::iter::Peekable;
use std::str::CharIndices;

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::CanonicalizeConfig;
use crate::sequence::{Granularity, UnitSequence};
use crate::whitespace::collapse_whitespace;

/// Main entry point. Turns raw text into the ordered unit sequence for the
/// requested granularity.
///
/// Word units are lowercased and stripped of every character that is not
/// alphanumeric, `_`, whitespace or an apostrophe. Stripping never splits a
/// word: `"don't-stop"` becomes the single unit `"don'tstop"`.
///
/// Paragraph units are pieces of the text cut at a `.`, `!` or `?` followed by
/// whitespace, or at a run of newlines, then trimmed. `cfg` does not apply to
/// paragraphs.
///
/// ```rust
/// use canonical::{normalize_and_split, CanonicalizeConfig, Granularity};
///
/// let cfg = CanonicalizeConfig::default();
/// let paragraphs = normalize_and_split(
///     "Hello there. How are you?\n\nFine",
///     Granularity::Paragraph,
///     &cfg,
/// );
/// assert_eq!(paragraphs.units(), ["Hello there", "How are you", "Fine"]);
/// ```
pub fn normalize_and_split(
    text: &str,
    granularity: Granularity,
    cfg: &CanonicalizeConfig,
) -> UnitSequence {
    match granularity {
        Granularity::Word => UnitSequence::new(Granularity::Word, split_words(text, cfg)),
        Granularity::Paragraph => UnitSequence::new(Granularity::Paragraph, split_paragraphs(text)),
    }
}

fn split_words(text: &str, cfg: &CanonicalizeConfig) -> Vec<String> {
    // NFKC can change grapheme boundaries, so it runs before anything else.
    let normalized: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(text.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(text)
    };
    let collapsed = collapse_whitespace(&normalized);
    // Whole-string lowercasing keeps context rules such as word-final sigma.
    let folded = if cfg.lowercase {
        collapsed.to_lowercase()
    } else {
        collapsed
    };

    let mut words: Vec<String> = Vec::with_capacity((folded.len() / 5).saturating_add(1));
    let mut current = String::new();

    for grapheme in folded.graphemes(true) {
        for ch in grapheme.chars() {
            dispatch_char(ch, &mut current, &mut words);
        }
    }
    finalize_word(&mut current, &mut words);

    words
}

fn dispatch_char(ch: char, current: &mut String, words: &mut Vec<String>) {
    if ch.is_whitespace() {
        finalize_word(current, words);
    } else if is_word_char(ch) {
        current.push(ch);
    }
    // Anything else is punctuation or a symbol and is dropped in place.
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '\''
}

fn finalize_word(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut piece_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let boundary_end = if is_sentence_terminal(ch)
            && matches!(chars.peek(), Some(&(_, next)) if next.is_whitespace())
        {
            Some(skip_while(&mut chars, text.len(), char::is_whitespace))
        } else if ch == '\n' {
            Some(skip_while(&mut chars, text.len(), |c| c == '\n'))
        } else {
            None
        };

        if let Some(end) = boundary_end {
            push_piece(&text[piece_start..idx], &mut paragraphs);
            piece_start = end;
        }
    }
    push_piece(&text[piece_start..], &mut paragraphs);

    paragraphs
}

fn is_sentence_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Consumes the run of characters matching `pred` and returns the byte offset
/// just past it.
fn skip_while(
    chars: &mut Peekable<CharIndices<'_>>,
    text_len: usize,
    pred: impl Fn(char) -> bool,
) -> usize {
    while let Some(&(idx, ch)) = chars.peek() {
        if !pred(ch) {
            return idx;
        }
        chars.next();
    }
    text_len
}

fn push_piece(piece: &str, paragraphs: &mut Vec<String>) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        paragraphs.push(trimmed.to_string());
    }
}
