//! Text Normalizer
//!
//! Canonical form of a comment used only for similarity comparison.

/// Lower-case, collapse every run of non-word characters into a single
/// space, trim.
///
/// Word characters are alphanumerics and `_`, matching the `\w` class the
/// similarity tokenizer uses.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if is_word_char(c) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Normalize a batch of comments, preserving order
pub fn normalize_all<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    texts.iter().map(|t| normalize(t.as_ref())).collect()
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
