//! Codebase Orchestrator
//!
//! Scans a root for Python and Java sources, analyzes them in parallel and
//! aggregates a deterministic, path-sorted report.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use tracing::{info, warn};

use super::comments::analyze_source;
use super::metrics::Thresholds;
use super::parser::Language;
use super::scanner::{FileScanner, ScannedFile};
use crate::config::Config;
use crate::types::{AnalysisResult, CodebaseReport, FileReport, LensError, Result};

/// Analyze a single file.
///
/// Invalid UTF-8 is replaced rather than rejected, so only unreadable files
/// and unsupported extensions fail.
pub fn analyze_file(path: &Path, config: &Config) -> Result<AnalysisResult> {
    let language = Language::from_path(path).ok_or_else(|| {
        LensError::UnsupportedLanguage(path.display().to_string())
    })?;
    let thresholds = config.analysis.thresholds();
    let content = read_lossy(path)?;
    Ok(analyze_source(language, &content, &thresholds))
}

/// Analyze every supported file under `root`.
///
/// `root` may also be a single file. Files that cannot be read are logged
/// and counted as skipped.
pub fn analyze_codebase(root: &Path, config: &Config) -> Result<CodebaseReport> {
    let scanner = FileScanner::new(root)
        .with_skip_dirs(config.scan.exclude_dirs.iter().cloned())
        .with_exclude(&config.scan.exclude)?
        .with_max_file_size(config.scan.max_file_size)
        .with_gitignore(config.scan.respect_gitignore);

    let files = scanner.scan()?;
    let thresholds = config.analysis.thresholds();

    let outcomes: Vec<Option<FileReport>> = files
        .par_iter()
        .map(|file| analyze_scanned(file, root, &thresholds))
        .collect();

    let skipped = outcomes.iter().filter(|o| o.is_none()).count();
    let reports: Vec<FileReport> = outcomes.into_iter().flatten().collect();

    info!(
        "Analyzed {} files under {} ({} skipped)",
        reports.len(),
        root.display(),
        skipped
    );

    Ok(CodebaseReport::new(
        root.display().to_string(),
        reports,
        skipped,
    ))
}

fn analyze_scanned(file: &ScannedFile, root: &Path, thresholds: &Thresholds) -> Option<FileReport> {
    match read_lossy(&file.path) {
        Ok(content) => {
            let result = analyze_source(file.language, &content, thresholds);
            Some(FileReport::new(file.relative_path(root), &result))
        }
        Err(e) => {
            warn!("Skipping {}: {}", file.path.display(), e);
            None
        }
    }
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
