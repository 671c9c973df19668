//! Unified Error Type System
//!
//! Centralized error types for the analyzer and its CLI.
//!
//! ## Design Principles
//!
//! - Single error type (LensError) for everything that can reach a caller
//! - Source-level failures (syntax errors, broken tokens) are recovered
//!   inside the parsers and never surface here
//! - No panic/unwrap in library code

use thiserror::Error;

// =============================================================================
// Lexical Errors
// =============================================================================

/// Failure raised by a comment scanner.
///
/// Only ever observed inside a parser, which keeps the comments collected
/// before the failure point and logs the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal starting at line {line}")]
    UnterminatedString { line: u32 },

    #[error("EOF in multi-line string starting at line {line}")]
    UnterminatedMultilineString { line: u32 },

    #[error("unterminated block comment starting at line {line}")]
    UnterminatedBlockComment { line: u32 },
}

impl LexError {
    /// Line where the offending token started
    pub fn line(&self) -> u32 {
        match self {
            Self::UnterminatedString { line }
            | Self::UnterminatedMultilineString { line }
            | Self::UnterminatedBlockComment { line } => *line,
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum LensError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Parse error in {path}: {message}")]
    Parse { message: String, path: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

pub type Result<T> = std::result::Result<T, LensError>;

impl LensError {
    /// Create a parse error bound to a path
    pub fn parse(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_display() {
        let err = LexError::UnterminatedMultilineString { line: 12 };
        assert_eq!(
            err.to_string(),
            "EOF in multi-line string starting at line 12"
        );
        assert_eq!(err.line(), 12);
    }

    #[test]
    fn test_parse_error_display() {
        let err = LensError::parse("Failed to set Java language", "Main.java");
        assert_eq!(
            err.to_string(),
            "Parse error in Main.java: Failed to set Java language"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LensError = io.into();
        assert!(matches!(err, LensError::Io(_)));
    }

    #[test]
    fn test_lex_error_line() {
        assert_eq!(LexError::UnterminatedString { line: 3 }.line(), 3);
        assert_eq!(LexError::UnterminatedBlockComment { line: 9 }.line(), 9);
    }
}
