//! CommentLens - Comment Quality Analysis for Python and Java
//!
//! Measures how a codebase is commented: how many comments it carries per
//! function or method, which comments repeat each other, and whether the
//! combination amounts to over-commenting.
//!
//! ## Core Features
//!
//! - **Structural Parsing**: tree-sitter grammars for declarations and docstrings
//! - **Lexical Comment Scan**: comments collected independently of parse success
//! - **Duplicate Detection**: TF-IDF vectors and cosine similarity per file
//! - **Verdicts**: ordered rules (over-commented, redundant, undocumented, clean)
//! - **Parallel Scanning**: whole directory trees analyzed with rayon
//!
//! ## Quick Start
//!
//! ```ignore
//! use commentlens::{Language, Thresholds, analyze_source};
//!
//! let result = analyze_source(Language::Python, source, &Thresholds::default());
//! println!("{}", result.conclusion);
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: Parsing, normalization, similarity, metrics, orchestration
//! - [`config`]: Layered configuration (defaults, files, environment)
//! - [`types`]: Result types, report shapes and errors

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, OutputFormat};

// Error Types
pub use types::error::{LensError, Result};

// Results
pub use types::{AnalysisResult, CodebaseReport, CommentReport, DuplicatePair, FileReport};

// =============================================================================
// Analyzer Re-exports
// =============================================================================

pub use analyzer::{
    CommentAnalyzer, Thresholds, Verdict, analyze_codebase, analyze_file, analyze_source,
    parser::{Language, ParsedSource, SourceParser, create_parser},
    scanner::FileScanner,
};
