//! Per-Language Comment Analyzers
//!
//! Each analyzer composes the pipeline for one language:
//! parsed source → comment texts → normalization → duplicate detection →
//! metrics and verdict. Analyzers hold only their thresholds and are safe to
//! share across threads.
//!
//! The two languages differ on purpose:
//! - Python comments are scope-tagged and reported with a per-scope
//!   breakdown; the density denominator is every non-async `def`.
//! - Java comments are bare strings with no breakdown; the denominator is
//!   method declarations.

use tracing::debug;

use super::metrics::{CommentMetrics, Thresholds};
use super::normalize::normalize_all;
use super::parser::{Language, ParsedSource, create_parser};
use super::similarity::find_duplicates;
use crate::types::{AnalysisResult, LexError, Scope, ScopeBreakdown, ScopedComment};

pub trait CommentAnalyzer: Send + Sync {
    fn language(&self) -> Language;
    fn analyze(&self, parsed: &ParsedSource) -> AnalysisResult;
}

/// Analyzer for scope-tagged Python comments
#[derive(Debug, Clone, Default)]
pub struct PythonCommentAnalyzer {
    thresholds: Thresholds,
}

impl PythonCommentAnalyzer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl CommentAnalyzer for PythonCommentAnalyzer {
    fn language(&self) -> Language {
        Language::Python
    }

    fn analyze(&self, parsed: &ParsedSource) -> AnalysisResult {
        let comments = scoped_comments(parsed);
        let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();

        let mut result = assemble(
            Language::Python,
            &texts,
            parsed.declared_callables.len(),
            &self.thresholds,
        );
        result.scope_breakdown = Some(ScopeBreakdown::from_comments(&comments));
        result
    }
}

/// Analyzer for bare Java comment strings
#[derive(Debug, Clone, Default)]
pub struct JavaCommentAnalyzer {
    thresholds: Thresholds,
}

impl JavaCommentAnalyzer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl CommentAnalyzer for JavaCommentAnalyzer {
    fn language(&self) -> Language {
        Language::Java
    }

    fn analyze(&self, parsed: &ParsedSource) -> AnalysisResult {
        assemble(
            Language::Java,
            &parsed.comments,
            parsed.declared_callables.len(),
            &self.thresholds,
        )
    }
}

/// Scope-tagged comments in reporting order: file docstring, callable
/// docstrings, type docstrings, inline comments.
pub fn scoped_comments(parsed: &ParsedSource) -> Vec<ScopedComment> {
    let mut comments = Vec::new();

    if let Some(doc) = &parsed.file_doc {
        comments.push(ScopedComment::file(doc.clone()));
    }

    for callable in &parsed.declared_callables {
        if let Some(doc) = &callable.doc {
            comments.push(ScopedComment::owned(Scope::Callable, &callable.name, doc.clone()));
        }
    }

    for ty in &parsed.declared_types {
        if let Some(doc) = &ty.doc {
            comments.push(ScopedComment::owned(Scope::Type, &ty.name, doc.clone()));
        }
    }

    comments.extend(parsed.comments.iter().cloned().map(ScopedComment::inline));
    comments
}

fn assemble<S: AsRef<str>>(
    language: Language,
    texts: &[S],
    denominator: usize,
    thresholds: &Thresholds,
) -> AnalysisResult {
    let normalized = normalize_all(texts);
    let duplicate_pairs = find_duplicates(texts, &normalized, thresholds.duplicate_similarity);
    let metrics = CommentMetrics::compute(
        texts.len(),
        denominator,
        duplicate_pairs.len(),
        thresholds,
    );

    debug!(
        "{} comments: {} total, {} duplicate pairs, verdict {:?}",
        language,
        texts.len(),
        duplicate_pairs.len(),
        metrics.verdict
    );

    AnalysisResult {
        language,
        total_comments: texts.len(),
        density: metrics.rounded_density(),
        scope_breakdown: None,
        duplicate_pairs,
        over_commented: metrics.over_commented,
        verdict: metrics.verdict,
        conclusion: metrics.verdict.message(language).to_string(),
    }
}

/// Create the analyzer for a language
pub fn create_analyzer(language: Language, thresholds: Thresholds) -> Box<dyn CommentAnalyzer> {
    match language {
        Language::Python => Box::new(PythonCommentAnalyzer::new(thresholds)),
        Language::Java => Box::new(JavaCommentAnalyzer::new(thresholds)),
    }
}

/// Parse and analyze one file's text.
///
/// Total over all inputs: malformed or empty text still yields a result.
pub fn analyze_source(language: Language, content: &str, thresholds: &Thresholds) -> AnalysisResult {
    let parsed = create_parser(language).parse(content);

    let diagnostics = &parsed.diagnostics;
    if !diagnostics.is_clean() {
        debug!(
            "{} source recovered: syntax_error={}, tokenizer stopped at line {:?}",
            language,
            diagnostics.syntax_error,
            diagnostics.lex_error.as_ref().map(LexError::line)
        );
    }

    create_analyzer(language, *thresholds).analyze(&parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::metrics::Verdict;
    use crate::analyzer::parser::Declaration;
    use crate::types::DuplicatePair;

    fn analyze(language: Language, src: &str) -> AnalysisResult {
        analyze_source(language, src, &Thresholds::default())
    }

    #[test]
    fn test_empty_python_source() {
        let result = analyze(Language::Python, "");
        assert_eq!(result.total_comments, 0);
        assert_eq!(result.density, 0.0);
        assert!(!result.over_commented);
        assert!(result.duplicate_pairs.is_empty());
        assert_eq!(result.verdict, Verdict::Undocumented);
        assert_eq!(
            result.conclusion,
            "No comments found. Documentation may be insufficient."
        );
        assert_eq!(result.scope_breakdown, Some(ScopeBreakdown::default()));
    }

    #[test]
    fn test_empty_java_source() {
        let result = analyze(Language::Java, "");
        assert_eq!(result.total_comments, 0);
        assert!(!result.over_commented);
        assert_eq!(
            result.conclusion,
            "No comments found. Java code may lack documentation."
        );
        assert_eq!(result.scope_breakdown, None);
    }

    #[test]
    fn test_near_identical_docstrings_are_redundant() {
        let src = r#"
def load():
    """Load the data."""


def reload():
    """Load the data!"""
    # load -- the DATA
"#;
        let result = analyze(Language::Python, src);

        assert_eq!(result.total_comments, 3);
        assert_eq!(result.density, 1.5);
        assert!(result.duplicate_count() >= 1);
        assert!(!result.over_commented);
        assert_eq!(result.verdict, Verdict::Redundant);
        assert_eq!(
            result.conclusion,
            "Redundant comments detected. Consider removing duplicated explanations."
        );
        assert_eq!(
            result.duplicate_pairs[0],
            DuplicatePair::new("Load the data.", "Load the data!")
        );
    }

    #[test]
    fn test_dense_and_duplicated_python_is_over_commented() {
        let src = r#""""Compute totals."""
# compute totals
# Compute totals!


def total(xs):
    """Compute totals."""
    return sum(xs)
"#;
        let result = analyze(Language::Python, src);

        assert_eq!(result.total_comments, 4);
        assert_eq!(result.density, 4.0);
        assert!(result.over_commented);
        assert_eq!(result.verdict, Verdict::OverCommented);
        let breakdown = result.scope_breakdown.unwrap();
        assert_eq!(breakdown.file, 1);
        assert_eq!(breakdown.callables, 1);
        assert_eq!(breakdown.types, 0);
        assert_eq!(breakdown.inline, 2);
    }

    #[test]
    fn test_zero_callables_floor_density() {
        let result = analyze(Language::Python, "# one\n# two\n# three\n");
        assert_eq!(result.total_comments, 3);
        assert_eq!(result.density, 3.0);
        assert_eq!(result.verdict, Verdict::Clean);
    }

    #[test]
    fn test_reported_density_rounds_ties_to_even() {
        let defs: String = (0..8).map(|i| format!("def f{}():\n    pass\n", i)).collect();
        let src = format!("# one note\n{}", defs);
        let result = analyze(Language::Python, &src);

        assert_eq!(result.total_comments, 1);
        assert_eq!(result.density, 0.12);
    }

    #[test]
    fn test_async_docstrings_are_not_counted() {
        let src = "async def fetch():\n    \"\"\"Fetch rows.\"\"\"\n\n\nasync def refetch():\n    \"\"\"Fetch rows!\"\"\"\n";
        let result = analyze(Language::Python, src);

        assert_eq!(result.total_comments, 0);
        assert!(result.duplicate_pairs.is_empty());
        assert_eq!(result.verdict, Verdict::Undocumented);
        assert_eq!(
            result.conclusion,
            "No comments found. Documentation may be insufficient."
        );
    }

    #[test]
    fn test_java_clean_comments() {
        let src = r#"
/** Bank account. */
class Account {
    /** Adds funds to the balance. */
    void deposit(int amount) {}

    // Removes funds when available
    void withdraw(int amount) {}
}
"#;
        let result = analyze(Language::Java, src);

        assert_eq!(result.total_comments, 3);
        assert_eq!(result.density, 1.5);
        assert!(result.duplicate_pairs.is_empty());
        assert_eq!(result.verdict, Verdict::Clean);
        assert_eq!(
            result.conclusion,
            "Java comments appear concise and well-placed."
        );
    }

    #[test]
    fn test_java_over_commented() {
        let src = r#"
class Counter {
    // increment the counter
    // Increment the counter.
    /* increment THE counter */
    void inc() {}
}
"#;
        let result = analyze(Language::Java, src);

        assert_eq!(result.total_comments, 3);
        assert_eq!(result.density, 3.0);
        assert_eq!(result.duplicate_count(), 3);
        assert!(result.over_commented);
        assert_eq!(result.verdict, Verdict::OverCommented);
    }

    #[test]
    fn test_invalid_source_still_yields_result() {
        let result = analyze(Language::Java, "class { // dangling\n void (");
        assert_eq!(result.total_comments, 1);
        assert_eq!(result.density, 1.0);

        let result = analyze(Language::Python, "def f(:\n    # kept\n");
        assert_eq!(result.total_comments, 1);
        assert_eq!(result.scope_breakdown.unwrap().inline, 1);
    }

    #[test]
    fn test_scoped_comment_order() {
        let parsed = ParsedSource {
            declared_types: vec![Declaration::new("Engine", 1, Some(3)).with_doc(Some("Type".into()))],
            declared_callables: vec![
                Declaration::new("run", 5, Some(6)).with_doc(Some("Callable".into())),
                Declaration::new("stop", 7, Some(8)),
            ],
            file_doc: Some("File".into()),
            comments: vec!["inline".into()],
            ..Default::default()
        };

        let comments = scoped_comments(&parsed);
        let scopes: Vec<_> = comments.iter().map(|c| c.scope).collect();
        assert_eq!(
            scopes,
            vec![Scope::File, Scope::Callable, Scope::Type, Scope::Inline]
        );
        assert_eq!(comments[1].owner.as_deref(), Some("run"));
        assert_eq!(comments[2].owner.as_deref(), Some("Engine"));
    }

    #[test]
    fn test_analyzer_uses_custom_thresholds() {
        let loose = Thresholds {
            duplicate_similarity: 0.1,
            over_comment_density: 2.5,
        };
        let src = "# parse the input file\n# parse the output file\n";
        let strict_result = analyze(Language::Python, src);
        let loose_result = analyze_source(Language::Python, src, &loose);

        assert!(strict_result.duplicate_pairs.is_empty());
        assert_eq!(loose_result.duplicate_count(), 1);
    }

    #[test]
    fn test_analyzers_report_language() {
        let t = Thresholds::default();
        assert_eq!(create_analyzer(Language::Python, t).language(), Language::Python);
        assert_eq!(create_analyzer(Language::Java, t).language(), Language::Java);
    }
}
