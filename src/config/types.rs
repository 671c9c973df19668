//! Configuration Types
//!
//! All configuration structures with defaults matching the built-in
//! thresholds. Supports global and project (.commentlens/) level files.

use serde::{Deserialize, Serialize};

use crate::analyzer::metrics::Thresholds;
use crate::constants::analysis::{DUPLICATE_SIMILARITY_THRESHOLD, OVER_COMMENT_DENSITY_THRESHOLD};
use crate::constants::scan::DEFAULT_MAX_FILE_SIZE;
use crate::types::{LensError, Result};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Duplicate and density thresholds
    pub analysis: AnalysisConfig,

    /// Directory walking settings
    pub scan: ScanConfig,

    /// Report rendering settings
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            analysis: AnalysisConfig::default(),
            scan: ScanConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `LensError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        let similarity = self.analysis.duplicate_threshold;
        if !(similarity > 0.0 && similarity <= 1.0) {
            return Err(LensError::Config(format!(
                "analysis.duplicate_threshold must be in (0, 1], got {}",
                similarity
            )));
        }

        // NaN fails this comparison as well
        if !(self.analysis.density_threshold > 0.0) {
            return Err(LensError::Config(format!(
                "analysis.density_threshold must be greater than 0, got {}",
                self.analysis.density_threshold
            )));
        }

        if self.scan.max_file_size == 0 {
            return Err(LensError::Config(
                "scan.max_file_size must be greater than 0".to_string(),
            ));
        }

        for pattern in &self.scan.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                LensError::Config(format!("scan.exclude pattern '{}' is invalid: {}", pattern, e))
            })?;
        }

        Ok(())
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Cosine similarity a pair must strictly exceed to be a duplicate
    pub duplicate_threshold: f64,

    /// Comments per callable a file must strictly exceed to be dense
    pub density_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: DUPLICATE_SIMILARITY_THRESHOLD,
            density_threshold: OVER_COMMENT_DENSITY_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            duplicate_similarity: self.duplicate_threshold,
            over_comment_density: self.density_threshold,
        }
    }
}

// =============================================================================
// Scan Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory names skipped in addition to the built-in list
    pub exclude_dirs: Vec<String>,

    /// Glob patterns (relative to the scanned root) for files to leave out
    pub exclude: Vec<String>,

    /// Files larger than this many bytes are not analyzed
    pub max_file_size: u64,

    /// Honor .gitignore files while walking
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: Vec::new(),
            exclude: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            respect_gitignore: false,
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format when `--format` is not given
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(format!(
                "Unknown output format: {}. Valid values: text, json, yaml",
                s
            )),
        }
    }
}
