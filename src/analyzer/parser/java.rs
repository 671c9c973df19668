use super::lexer::{clean_block_comment, scan_java_comments};
use super::{
    Declaration, Language, ParsedSource, SourceParser, get_node_lines, get_node_text,
    parse_clean_tree, walk_depth_first,
};

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
];

pub struct JavaParser;

impl SourceParser for JavaParser {
    fn parse(&self, content: &str) -> ParsedSource {
        let parsed = extract_structure(content);
        let (comments, lex_error) = scan_java_comments(content);
        parsed.with_comments(comments, lex_error)
    }

    fn language(&self) -> Language {
        Language::Java
    }
}

fn extract_structure(content: &str) -> ParsedSource {
    let mut parsed = ParsedSource::new();

    let Some(tree) = parse_clean_tree(tree_sitter_java::LANGUAGE, "Java", content) else {
        parsed.diagnostics.syntax_error = true;
        return parsed;
    };

    let source = content.as_bytes();

    walk_depth_first(tree.root_node(), |node| {
        let kind = node.kind();
        if TYPE_DECLARATIONS.contains(&kind) {
            if let Some(decl) = declaration(node, source) {
                parsed.declared_types.push(decl);
            }
        } else if kind == "method_declaration"
            && let Some(decl) = declaration(node, source)
        {
            parsed.declared_callables.push(decl);
        }
    });

    parsed
}

fn declaration(node: tree_sitter::Node, source: &[u8]) -> Option<Declaration> {
    let name = get_node_text(node.child_by_field_name("name")?, source);
    if name.is_empty() {
        return None;
    }

    let (start_line, end_line) = get_node_lines(node);
    Some(Declaration::new(name, start_line, Some(end_line)).with_doc(javadoc(node, source)))
}

/// Javadoc block directly preceding a declaration
fn javadoc(node: tree_sitter::Node, source: &[u8]) -> Option<String> {
    let prev = node.prev_named_sibling()?;
    if prev.kind() != "block_comment" {
        return None;
    }

    let text = get_node_text(prev, source);
    if !text.starts_with("/**") || text == "/**/" {
        return None;
    }

    let cleaned = clean_block_comment(text);
    (!cleaned.is_empty()).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> ParsedSource {
        JavaParser.parse(src)
    }

    const SAMPLE: &str = r#"package demo;

/**
 * Account holder.
 */
public class Account {
    // running balance
    private int balance;

    /** Deposit money. */
    @Override
    public void deposit(int amount) {
        balance += amount; /* no overflow check */
    }

    public Account() {}

    interface Listener {
        void changed();
    }
}

enum Kind { A, B }
"#;

    #[test]
    fn test_extracts_types_and_methods() {
        let parsed = parse(SAMPLE);
        assert!(parsed.diagnostics.is_clean());

        let types: Vec<_> = parsed
            .declared_types
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(types, vec!["Account", "Listener", "Kind"]);

        let methods: Vec<_> = parsed
            .declared_callables
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        // Constructors are not methods
        assert_eq!(methods, vec!["deposit", "changed"]);
    }

    #[test]
    fn test_attaches_javadoc() {
        let parsed = parse(SAMPLE);

        let account = &parsed.declared_types[0];
        assert_eq!(account.doc.as_deref(), Some("Account holder."));
        assert_eq!(account.start_line, 6);

        let deposit = &parsed.declared_callables[0];
        assert_eq!(deposit.doc.as_deref(), Some("Deposit money."));
        assert_eq!(deposit.start_line, 11);
        assert_eq!(deposit.end_line, Some(14));

        assert_eq!(parsed.declared_callables[1].doc, None);
    }

    #[test]
    fn test_collects_all_comments() {
        let parsed = parse(SAMPLE);
        assert_eq!(
            parsed.comments,
            vec![
                "Account holder.",
                "running balance",
                "Deposit money.",
                "no overflow check",
            ]
        );
    }

    #[test]
    fn test_syntax_error_keeps_comments() {
        let parsed = parse("// header\npublic class Broken {\n    void m( {\n}\n");

        assert!(parsed.diagnostics.syntax_error);
        assert!(parsed.declared_types.is_empty());
        assert!(parsed.declared_callables.is_empty());
        assert_eq!(parsed.comments, vec!["header"]);
    }

    #[test]
    fn test_empty_source() {
        let parsed = parse("");
        assert!(parsed.declared_types.is_empty());
        assert!(parsed.declared_callables.is_empty());
        assert!(parsed.comments.is_empty());
    }
}
