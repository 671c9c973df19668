use tracing::debug;

use super::lexer::scan_python_comments;
use super::{
    Declaration, Language, ParsedSource, SourceParser, get_node_lines, get_node_text,
    parse_clean_tree, walk_breadth_first,
};
use crate::constants::python::TAB_SIZE;

/// Wrapper nodes with no counterpart in Python's own AST. Their children are
/// walked as if they belonged to the enclosing node, so a decorated function
/// sits at the same depth as a plain one.
const TRANSPARENT_KINDS: &[&str] = &["block", "decorated_definition"];

pub struct PythonParser;

impl SourceParser for PythonParser {
    fn parse(&self, content: &str) -> ParsedSource {
        let parsed = extract_structure(content);
        let (comments, lex_error) = scan_python_comments(content);
        parsed.with_comments(comments, lex_error)
    }

    fn language(&self) -> Language {
        Language::Python
    }
}

fn extract_structure(content: &str) -> ParsedSource {
    let mut parsed = ParsedSource::new();

    let Some(tree) = parse_clean_tree(tree_sitter_python::LANGUAGE, "Python", content) else {
        parsed.diagnostics.syntax_error = true;
        return parsed;
    };

    let source = content.as_bytes();
    let root = tree.root_node();
    parsed.file_doc = block_docstring(root, source);

    walk_breadth_first(root, TRANSPARENT_KINDS, |node| match node.kind() {
        // Coroutine bodies are still walked; the coroutine itself is not a
        // callable
        "function_definition" if is_async(node) => {
            debug!("Skipping async def at line {}", get_node_lines(node).0);
        }
        "function_definition" => {
            if let Some(decl) = declaration(node, source) {
                parsed.declared_callables.push(decl);
            }
        }
        "class_definition" => {
            if let Some(decl) = declaration(node, source) {
                parsed.declared_types.push(decl);
            }
        }
        _ => {}
    });

    parsed
}

fn is_async(node: tree_sitter::Node) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

fn declaration(node: tree_sitter::Node, source: &[u8]) -> Option<Declaration> {
    let name = get_node_text(node.child_by_field_name("name")?, source);
    if name.is_empty() {
        return None;
    }

    let (start_line, end_line) = get_node_lines(node);
    let doc = node
        .child_by_field_name("body")
        .and_then(|body| block_docstring(body, source));

    Some(Declaration::new(name, start_line, Some(end_line)).with_doc(doc))
}

/// Docstring of a module or block: its first statement, if that statement
/// is a lone string literal.
fn block_docstring(block: tree_sitter::Node, source: &[u8]) -> Option<String> {
    let mut cursor = block.walk();
    let first = block
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment")?;

    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }

    let mut cursor = first.walk();
    let expr = first.named_children(&mut cursor).next()?;
    let text = string_literal_value(expr, source)?;

    let cleaned = clean_docstring(&text);
    (!cleaned.is_empty()).then_some(cleaned)
}

fn string_literal_value(node: tree_sitter::Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => decode_string_literal(get_node_text(node, source)),
        "concatenated_string" => {
            let mut cursor = node.walk();
            let parts: Option<Vec<String>> = node
                .named_children(&mut cursor)
                .filter(|n| n.kind() != "comment")
                .map(|n| string_literal_value(n, source))
                .collect();
            parts.map(|p| p.concat())
        }
        _ => None,
    }
}

/// Value of a plain string literal. Byte strings and f-strings are not
/// docstrings and yield `None`.
fn decode_string_literal(raw: &str) -> Option<String> {
    let quote_pos = raw.find(['"', '\''])?;
    let prefix = raw[..quote_pos].to_ascii_lowercase();
    if prefix.contains(['b', 'f', 't']) {
        return None;
    }

    let body = &raw[quote_pos..];
    let delim = if body.starts_with("\"\"\"") || body.starts_with("'''") {
        &body[..3]
    } else {
        &body[..1]
    };
    let inner = body.strip_prefix(delim)?.strip_suffix(delim)?;

    if prefix.contains('r') {
        Some(inner.to_string())
    } else {
        Some(unescape(inner))
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('\n') => {}
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Clean docstring indentation: tabs expanded, first line stripped on the
/// left, the common indentation of the remaining lines removed, blank edge
/// lines dropped. Trailing spaces on lines with content are kept.
pub fn clean_docstring(doc: &str) -> String {
    let lines: Vec<String> = doc.split('\n').map(expand_tabs).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim_start().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let cleaned: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if line.trim().is_empty() {
                String::new()
            } else if idx == 0 {
                line.trim_start().to_string()
            } else {
                line.chars().skip(margin).collect()
            }
        })
        .collect();

    let first = cleaned.iter().position(|l| !l.is_empty());
    let last = cleaned.iter().rposition(|l| !l.is_empty());

    match (first, last) {
        (Some(first), Some(last)) => cleaned[first..=last].join("\n"),
        _ => String::new(),
    }
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;

    for c in line.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\r' => {}
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }

    out
}
