//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Comment analysis constants
pub mod analysis {
    /// Cosine similarity a comment pair must strictly exceed to count as a duplicate
    pub const DUPLICATE_SIMILARITY_THRESHOLD: f64 = 0.85;

    /// Comments-per-callable ratio a file must strictly exceed to be considered dense
    pub const OVER_COMMENT_DENSITY_THRESHOLD: f64 = 2.5;

    /// Decimal places kept in the reported density
    pub const DENSITY_DECIMALS: i32 = 2;
}

/// File scanning constants
pub mod scan {
    /// Default maximum file size for analysis (1MB)
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

    /// Directories never descended into
    pub const DEFAULT_SKIP_DIRS: &[&str] = &[
        "venv",
        "node_modules",
        ".git",
        "__pycache__",
        "build",
        "dist",
    ];
}

/// Python source constants
pub mod python {
    /// Tab stop used when cleaning docstring indentation
    pub const TAB_SIZE: usize = 8;
}
