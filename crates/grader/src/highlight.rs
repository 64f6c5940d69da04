use std::borrow::Cow;

use align::{align, OpTag};

use crate::types::MarkupConfig;

/// Word-level diff markup for one pair of paragraphs.
///
/// Both paragraphs are split on whitespace as-is (no case folding, no
/// punctuation stripping) and aligned. Equal words are copied through, every
/// replaced word is wrapped in the wrong marker on its own side, deleted words
/// get the missing marker on the reference side and inserted words the extra
/// marker on the candidate side. Each side is joined with single spaces.
///
/// Replaced words are marked whatever their similarity; the threshold only
/// applies to word-level grading.
///
/// ```rust
/// use grader::{highlight, MarkupConfig};
///
/// let (reference, candidate) = highlight("the quick fox", "the slow fox", &MarkupConfig::default());
/// assert_eq!(reference, r#"the <span class="wrong-word">quick</span> fox"#);
/// assert_eq!(candidate, r#"the <span class="wrong-word">slow</span> fox"#);
/// ```
pub fn highlight(
    reference_paragraph: &str,
    candidate_paragraph: &str,
    cfg: &MarkupConfig,
) -> (String, String) {
    let reference: Vec<&str> = reference_paragraph.split_whitespace().collect();
    let candidate: Vec<&str> = candidate_paragraph.split_whitespace().collect();

    let mut reference_out: Vec<String> = Vec::with_capacity(reference.len());
    let mut candidate_out: Vec<String> = Vec::with_capacity(candidate.len());

    for op in align(&reference, &candidate) {
        let ref_words = &reference[op.reference_range()];
        let cand_words = &candidate[op.candidate_range()];
        match op.tag {
            OpTag::Equal => {
                reference_out.extend(ref_words.iter().map(|w| plain(w, cfg)));
                candidate_out.extend(cand_words.iter().map(|w| plain(w, cfg)));
            }
            OpTag::Replace => {
                reference_out.extend(ref_words.iter().map(|w| marked(w, &cfg.wrong_class, cfg)));
                candidate_out.extend(cand_words.iter().map(|w| marked(w, &cfg.wrong_class, cfg)));
            }
            OpTag::Delete => {
                reference_out.extend(ref_words.iter().map(|w| marked(w, &cfg.missing_class, cfg)));
            }
            OpTag::Insert => {
                candidate_out.extend(cand_words.iter().map(|w| marked(w, &cfg.extra_class, cfg)));
            }
        }
    }

    (reference_out.join(" "), candidate_out.join(" "))
}

fn plain(word: &str, cfg: &MarkupConfig) -> String {
    escaped(word, cfg).into_owned()
}

fn marked(word: &str, class: &str, cfg: &MarkupConfig) -> String {
    format!(r#"<span class="{class}">{}</span>"#, escaped(word, cfg))
}

fn escaped<'a>(word: &'a str, cfg: &MarkupConfig) -> Cow<'a, str> {
    if cfg.escape_html {
        escape_html(word)
    } else {
        Cow::Borrowed(word)
    }
}

/// Escapes the characters that are significant in HTML text and attributes.
pub(crate) fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}
