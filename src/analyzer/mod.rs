//! Comment Analyzer Module
//!
//! Provides the comment-quality pipeline:
//! - Per-language parsing (tree-sitter structure + lexical comment scan)
//! - Text normalization and TF-IDF duplicate detection
//! - Density metrics and verdict classification
//! - File scanning and parallel codebase analysis

pub mod codebase;
pub mod comments;
pub mod metrics;
pub mod normalize;
pub mod parser;
pub mod scanner;
pub mod similarity;

pub use codebase::{analyze_codebase, analyze_file};
pub use comments::{
    CommentAnalyzer, JavaCommentAnalyzer, PythonCommentAnalyzer, analyze_source, create_analyzer,
};
pub use metrics::{CommentMetrics, Thresholds, Verdict};
