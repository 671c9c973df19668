use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tree_sitter::Tree;

use crate::types::{LensError, LexError, Result};

/// A declared type or callable with its source span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub start_line: u32,
    pub end_line: Option<u32>,
    /// Docstring or doc comment attached directly to the declaration
    pub doc: Option<String>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, start_line: u32, end_line: Option<u32>) -> Self {
        Self {
            name: name.into(),
            start_line,
            end_line,
            doc: None,
        }
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }
}

/// What went wrong while parsing, if anything. Purely informational.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseDiagnostics {
    /// The structural pass hit a syntax error and dropped its facts
    pub syntax_error: bool,
    /// The lexical pass stopped early
    pub lex_error: Option<LexError>,
}

impl ParseDiagnostics {
    pub fn is_clean(&self) -> bool {
        !self.syntax_error && self.lex_error.is_none()
    }
}

/// Structural facts extracted from one source file.
///
/// Always well-formed: a file that fails to parse yields empty declaration
/// lists, and a file that fails to tokenize keeps the comments found before
/// the failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSource {
    pub declared_types: Vec<Declaration>,
    pub declared_callables: Vec<Declaration>,
    /// Module-level docstring (Python only)
    pub file_doc: Option<String>,
    /// Comment tokens from the lexical pass, markers stripped, in source order
    pub comments: Vec<String>,
    pub diagnostics: ParseDiagnostics,
}

impl ParsedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the lexical pass into this structural result
    pub fn with_comments(mut self, comments: Vec<String>, lex_error: Option<LexError>) -> Self {
        self.comments = comments;
        self.diagnostics.lex_error = lex_error;
        self
    }
}

/// Source parser for one language.
///
/// Parsing is infallible by contract: structural and lexical failures are
/// recovered inside the parser.
pub trait SourceParser: Send + Sync {
    fn parse(&self, content: &str) -> ParsedSource;
    fn language(&self) -> super::Language;
}

/// Comment scanner result: comments found so far plus the error that
/// stopped the scan, if any.
pub type LexOutcome = (Vec<String>, Option<LexError>);

/// Extract text content from a tree-sitter node.
/// Returns empty string if extraction fails (with debug logging).
#[inline]
pub fn get_node_text<'a>(node: tree_sitter::Node, content: &'a [u8]) -> &'a str {
    node.utf8_text(content).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}-{}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            node.end_position().row + 1,
            node.end_position().column,
            e
        );
        ""
    })
}

/// 1-based start and end lines of a node.
pub fn get_node_lines(node: tree_sitter::Node) -> (u32, u32) {
    (
        node.start_position().row as u32 + 1,
        node.end_position().row as u32 + 1,
    )
}

/// Create a tree-sitter parser for the given language.
pub fn create_ts_parser<L: Into<tree_sitter::Language>>(
    language: L,
    lang_name: &str,
) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.into())
        .map_err(|e| LensError::parse(format!("Failed to set {} language: {}", lang_name, e), ""))?;
    Ok(parser)
}

/// Parse `content` into a syntax tree that is free of errors.
///
/// Returns `None` when the grammar cannot be loaded, parsing is aborted,
/// or the tree contains any error or missing node.
pub fn parse_clean_tree<L: Into<tree_sitter::Language>>(
    language: L,
    lang_name: &str,
    content: &str,
) -> Option<Tree> {
    let mut parser = match create_ts_parser(language, lang_name) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("{}", e);
            return None;
        }
    };

    let tree = parser.parse(content, None)?;
    if tree.root_node().has_error() {
        tracing::debug!("{} syntax error, structural facts dropped", lang_name);
        return None;
    }
    Some(tree)
}

/// Visit every node of the tree in breadth-first order.
///
/// Nodes whose kind is in `transparent` are not visited; their children take
/// their place at the same level.
pub fn walk_breadth_first<'t, F>(root: tree_sitter::Node<'t>, transparent: &[&str], mut visit: F)
where
    F: FnMut(tree_sitter::Node<'t>),
{
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        visit(node);
        spliced_children(node, transparent, &mut queue);
    }
}

fn spliced_children<'t>(
    node: tree_sitter::Node<'t>,
    transparent: &[&str],
    out: &mut VecDeque<tree_sitter::Node<'t>>,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if transparent.contains(&child.kind()) {
            spliced_children(child, transparent, out);
        } else {
            out.push_back(child);
        }
    }
}

/// Visit every node of the tree in depth-first pre-order (source order).
pub fn walk_depth_first<'t, F>(root: tree_sitter::Node<'t>, mut visit: F)
where
    F: FnMut(tree_sitter::Node<'t>),
{
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        visit(node);
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_builder() {
        let decl = Declaration::new("run", 3, Some(9)).with_doc(Some("Runs.".to_string()));
        assert_eq!(decl.name, "run");
        assert_eq!(decl.start_line, 3);
        assert_eq!(decl.end_line, Some(9));
        assert_eq!(decl.doc.as_deref(), Some("Runs."));
    }

    #[test]
    fn test_with_comments_records_lex_error() {
        let parsed = ParsedSource::new().with_comments(
            vec!["first".to_string()],
            Some(LexError::UnterminatedString { line: 2 }),
        );
        assert_eq!(parsed.comments, vec!["first"]);
        assert!(!parsed.diagnostics.is_clean());
    }

    #[test]
    fn test_parse_clean_tree_rejects_errors() {
        assert!(parse_clean_tree(tree_sitter_python::LANGUAGE, "Python", "x = 1\n").is_some());
        assert!(parse_clean_tree(tree_sitter_python::LANGUAGE, "Python", "def (:\n").is_none());
    }

    #[test]
    fn test_walk_breadth_first_visits_root_first() {
        let tree = parse_clean_tree(tree_sitter_python::LANGUAGE, "Python", "a = 1\nb = 2\n")
            .unwrap();
        let mut kinds = Vec::new();
        walk_breadth_first(tree.root_node(), &[], |node| kinds.push(node.kind().to_string()));

        assert_eq!(kinds[0], "module");
        assert_eq!(kinds[1], "expression_statement");
        assert_eq!(kinds[2], "expression_statement");
    }

    #[test]
    fn test_walk_breadth_first_splices_transparent_nodes() {
        let src = "@wrap\ndef f():\n    pass\n";
        let tree = parse_clean_tree(tree_sitter_python::LANGUAGE, "Python", src).unwrap();

        let mut kinds = Vec::new();
        walk_breadth_first(tree.root_node(), &["decorated_definition"], |node| {
            kinds.push(node.kind().to_string())
        });

        assert!(!kinds.contains(&"decorated_definition".to_string()));
        assert_eq!(kinds[1], "decorator");
        assert_eq!(kinds[2], "function_definition");
    }
}
