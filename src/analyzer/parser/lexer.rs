//! Comment Scanners
//!
//! Lexical pass over raw source text. Runs independently of the syntax tree
//! so that comments are still reported for files that do not parse. Each
//! scanner understands just enough of its language's literals to avoid
//! mistaking `#` or `//` inside a string for a comment.

use super::traits::LexOutcome;
use crate::types::LexError;

/// Scan Python source for `#` comments.
///
/// Comment text has its leading `#`/space run stripped and is trimmed.
pub fn scan_python_comments(content: &str) -> LexOutcome {
    let chars: Vec<char> = content.chars().collect();
    let mut comments = Vec::new();
    let mut line = 1u32;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\n' => {
                line += 1;
                i += 1;
            }
            '#' => {
                let start = i;
                while i < chars.len() && !matches!(chars[i], '\n' | '\r') {
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                comments.push(clean_python_comment(&token));
            }
            '"' | '\'' => match skip_python_string(&chars, i, &mut line) {
                Ok(next) => i = next,
                Err(e) => return (comments, Some(e)),
            },
            _ => i += 1,
        }
    }

    (comments, None)
}

fn clean_python_comment(token: &str) -> String {
    token.trim_start_matches(['#', ' ']).trim().to_string()
}

/// Skip a string literal starting at `start`; returns the index after it.
fn skip_python_string(chars: &[char], start: usize, line: &mut u32) -> Result<usize, LexError> {
    let quote = chars[start];
    let start_line = *line;
    let triple = chars.get(start + 1) == Some(&quote) && chars.get(start + 2) == Some(&quote);

    if triple {
        let mut i = start + 3;
        loop {
            match chars.get(i) {
                None => return Err(LexError::UnterminatedMultilineString { line: start_line }),
                Some('\\') => {
                    if chars.get(i + 1) == Some(&'\n') {
                        *line += 1;
                    }
                    i += 2;
                }
                Some('\n') => {
                    *line += 1;
                    i += 1;
                }
                Some(&c)
                    if c == quote
                        && chars.get(i + 1) == Some(&quote)
                        && chars.get(i + 2) == Some(&quote) =>
                {
                    return Ok(i + 3);
                }
                Some(_) => i += 1,
            }
        }
    }

    let mut i = start + 1;
    loop {
        match chars.get(i) {
            None | Some('\n') => return Err(LexError::UnterminatedString { line: start_line }),
            Some('\\') => {
                if chars.get(i + 1) == Some(&'\n') {
                    *line += 1;
                }
                i += 2;
            }
            Some(&c) if c == quote => return Ok(i + 1),
            Some(_) => i += 1,
        }
    }
}

/// Scan Java source for `//` and `/* */` comments (Javadoc included).
pub fn scan_java_comments(content: &str) -> LexOutcome {
    let chars: Vec<char> = content.chars().collect();
    let mut comments = Vec::new();
    let mut line = 1u32;
    let mut i = 0;

    while i < chars.len() {
        match (chars[i], chars.get(i + 1)) {
            ('\n', _) => {
                line += 1;
                i += 1;
            }
            ('/', Some('/')) => {
                let start = i;
                while i < chars.len() && !matches!(chars[i], '\n' | '\r') {
                    i += 1;
                }
                let token: String = chars[start..i].iter().collect();
                comments.push(token.trim_start_matches('/').trim().to_string());
            }
            ('/', Some('*')) => {
                let start_line = line;
                let start = i;
                i += 2;
                loop {
                    match (chars.get(i), chars.get(i + 1)) {
                        (None, _) => {
                            return (
                                comments,
                                Some(LexError::UnterminatedBlockComment { line: start_line }),
                            );
                        }
                        (Some('*'), Some('/')) => {
                            i += 2;
                            break;
                        }
                        (Some('\n'), _) => {
                            line += 1;
                            i += 1;
                        }
                        _ => i += 1,
                    }
                }
                let token: String = chars[start..i].iter().collect();
                comments.push(clean_block_comment(&token));
            }
            ('"', _) | ('\'', _) => match skip_java_literal(&chars, i, &mut line) {
                Ok(next) => i = next,
                Err(e) => return (comments, Some(e)),
            },
            _ => i += 1,
        }
    }

    (comments, None)
}

/// Skip a string, char literal or text block; returns the index after it.
fn skip_java_literal(chars: &[char], start: usize, line: &mut u32) -> Result<usize, LexError> {
    let quote = chars[start];
    let start_line = *line;
    let text_block =
        quote == '"' && chars.get(start + 1) == Some(&'"') && chars.get(start + 2) == Some(&'"');

    if text_block {
        let mut i = start + 3;
        loop {
            match chars.get(i) {
                None => return Err(LexError::UnterminatedMultilineString { line: start_line }),
                Some('\\') => i += 2,
                Some('\n') => {
                    *line += 1;
                    i += 1;
                }
                Some('"') if chars.get(i + 1) == Some(&'"') && chars.get(i + 2) == Some(&'"') => {
                    return Ok(i + 3);
                }
                Some(_) => i += 1,
            }
        }
    }

    let mut i = start + 1;
    loop {
        match chars.get(i) {
            None | Some('\n') => return Err(LexError::UnterminatedString { line: start_line }),
            Some('\\') => i += 2,
            Some(&c) if c == quote => return Ok(i + 1),
            Some(_) => i += 1,
        }
    }
}

/// Strip block comment delimiters and per-line `*` decoration.
pub fn clean_block_comment(token: &str) -> String {
    let inner = token.strip_suffix("*/").unwrap_or(token);
    let inner = inner.strip_prefix("/*").unwrap_or(inner).trim_start_matches('*');

    let lines: Vec<&str> = inner
        .lines()
        .map(|l| {
            let l = l.trim();
            l.strip_prefix('*').unwrap_or(l).trim()
        })
        .collect();

    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());

    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_inline_comments() {
        let src = "# header\nx = 1  # set x\n\ndef f():\n    ## twice\n    pass\n";
        let (comments, err) = scan_python_comments(src);
        assert!(err.is_none());
        assert_eq!(comments, vec!["header", "set x", "twice"]);
    }

    #[test]
    fn test_python_hash_inside_strings_is_not_comment() {
        let src = "a = \"# not\"\nb = '#nope'\nc = \"\"\"\n# still string\n\"\"\"  # real\n";
        let (comments, err) = scan_python_comments(src);
        assert!(err.is_none());
        assert_eq!(comments, vec!["real"]);
    }

    #[test]
    fn test_python_escaped_quote() {
        let src = "s = 'it\\'s # fine'  # after\n";
        let (comments, _) = scan_python_comments(src);
        assert_eq!(comments, vec!["after"]);
    }

    #[test]
    fn test_python_empty_comment_is_kept() {
        let (comments, _) = scan_python_comments("x = 1 #\n");
        assert_eq!(comments, vec![""]);
    }

    #[test]
    fn test_python_unterminated_triple_quote_keeps_earlier_comments() {
        let src = "# before\nx = \"\"\"never closed\n# swallowed\n";
        let (comments, err) = scan_python_comments(src);
        assert_eq!(comments, vec!["before"]);
        assert_eq!(
            err,
            Some(LexError::UnterminatedMultilineString { line: 2 })
        );
    }

    #[test]
    fn test_python_unterminated_string() {
        let (comments, err) = scan_python_comments("# one\ns = 'open\n# two\n");
        assert_eq!(comments, vec!["one"]);
        assert_eq!(err, Some(LexError::UnterminatedString { line: 2 }));
    }

    #[test]
    fn test_python_empty_source() {
        let (comments, err) = scan_python_comments("");
        assert!(comments.is_empty());
        assert!(err.is_none());
    }

    #[test]
    fn test_java_line_and_block_comments() {
        let src = r#"
// line one
/**
 * Adds numbers.
 *
 * @param a first
 */
int add(int a, int b) { return a + b; /* inline block */ }
"#;
        let (comments, err) = scan_java_comments(src);
        assert!(err.is_none());
        assert_eq!(
            comments,
            vec![
                "line one".to_string(),
                "Adds numbers.\n\n@param a first".to_string(),
                "inline block".to_string(),
            ]
        );
    }

    #[test]
    fn test_java_markers_inside_literals() {
        let src = "String s = \"// no\"; char c = '/'; String t = \"\"\"\n/* no */\n\"\"\"; // yes\n";
        let (comments, err) = scan_java_comments(src);
        assert!(err.is_none());
        assert_eq!(comments, vec!["yes"]);
    }

    #[test]
    fn test_java_unterminated_block_comment() {
        let (comments, err) = scan_java_comments("// ok\nclass A {}\n/* open\n");
        assert_eq!(comments, vec!["ok"]);
        assert_eq!(err, Some(LexError::UnterminatedBlockComment { line: 3 }));
    }

    #[test]
    fn test_clean_block_comment() {
        assert_eq!(clean_block_comment("/* simple */"), "simple");
        assert_eq!(clean_block_comment("/***/"), "");
        assert_eq!(
            clean_block_comment("/**\n * First\n * Second\n */"),
            "First\nSecond"
        );
    }
}
