//! Analysis Result Types
//!
//! `AnalysisResult` is the uniform output of every comment analyzer.
//! `CommentReport` is its language-specific serialized shape, and
//! `FileReport`/`CodebaseReport` are what the orchestrator aggregates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comment::{DuplicatePair, ScopeBreakdown};
use crate::analyzer::metrics::Verdict;
use crate::analyzer::parser::Language;

/// Result of analyzing one file's comments
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub language: Language,
    pub total_comments: usize,
    /// Comments per callable, rounded to two decimals
    pub density: f64,
    /// Present only for scope-tagged languages
    pub scope_breakdown: Option<ScopeBreakdown>,
    pub duplicate_pairs: Vec<DuplicatePair>,
    pub over_commented: bool,
    pub verdict: Verdict,
    pub conclusion: String,
}

impl AnalysisResult {
    pub fn duplicate_count(&self) -> usize {
        self.duplicate_pairs.len()
    }

    /// Convert to the serialized shape for this result's language
    pub fn to_report(&self) -> CommentReport {
        match self.language {
            Language::Python => CommentReport::Python(PythonCommentReport {
                total_comments: self.total_comments,
                comments_by_scope: self.scope_breakdown.unwrap_or_default(),
                comments_per_function: self.density,
                redundant_comments: self.duplicate_pairs.clone(),
                over_commented: self.over_commented,
                conclusion: self.conclusion.clone(),
            }),
            Language::Java => CommentReport::Java(JavaCommentReport {
                total_comments: self.total_comments,
                comments_per_method: self.density,
                redundant_comments: self.duplicate_pairs.clone(),
                over_commented: self.over_commented,
                conclusion: self.conclusion.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PythonCommentReport {
    pub total_comments: usize,
    pub comments_by_scope: ScopeBreakdown,
    pub comments_per_function: f64,
    pub redundant_comments: Vec<DuplicatePair>,
    pub over_commented: bool,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaCommentReport {
    pub total_comments: usize,
    pub comments_per_method: f64,
    pub redundant_comments: Vec<DuplicatePair>,
    pub over_commented: bool,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentReport {
    Python(PythonCommentReport),
    Java(JavaCommentReport),
}

impl CommentReport {
    pub fn total_comments(&self) -> usize {
        match self {
            Self::Python(r) => r.total_comments,
            Self::Java(r) => r.total_comments,
        }
    }

    pub fn density(&self) -> f64 {
        match self {
            Self::Python(r) => r.comments_per_function,
            Self::Java(r) => r.comments_per_method,
        }
    }

    pub fn redundant_comments(&self) -> &[DuplicatePair] {
        match self {
            Self::Python(r) => &r.redundant_comments,
            Self::Java(r) => &r.redundant_comments,
        }
    }

    pub fn over_commented(&self) -> bool {
        match self {
            Self::Python(r) => r.over_commented,
            Self::Java(r) => r.over_commented,
        }
    }

    pub fn conclusion(&self) -> &str {
        match self {
            Self::Python(r) => &r.conclusion,
            Self::Java(r) => &r.conclusion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub comments: CommentReport,
}

/// One analyzed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    /// Path relative to the analyzed root
    pub file: String,
    /// Lowercase language tag ("python", "java")
    pub language: String,
    pub verdict: Verdict,
    pub analysis: FileAnalysis,
}

impl FileReport {
    pub fn new(file: impl Into<String>, result: &AnalysisResult) -> Self {
        Self {
            file: file.into(),
            language: result.language.tag().to_string(),
            verdict: result.verdict,
            analysis: FileAnalysis {
                comments: result.to_report(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub files_analyzed: usize,
    pub files_skipped: usize,
    pub files_by_language: BTreeMap<String, usize>,
    pub total_comments: usize,
    pub over_commented_files: usize,
    pub files_with_redundancy: usize,
}

impl ReportSummary {
    pub fn from_files(files: &[FileReport], files_skipped: usize) -> Self {
        let mut summary = Self {
            files_analyzed: files.len(),
            files_skipped,
            ..Default::default()
        };

        for file in files {
            *summary
                .files_by_language
                .entry(file.language.clone())
                .or_insert(0) += 1;

            let comments = &file.analysis.comments;
            summary.total_comments += comments.total_comments();
            if comments.over_commented() {
                summary.over_commented_files += 1;
            }
            if !comments.redundant_comments().is_empty() {
                summary.files_with_redundancy += 1;
            }
        }

        summary
    }
}

/// Aggregated analysis of a directory tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodebaseReport {
    pub root: String,
    pub generated_at: DateTime<Utc>,
    pub summary: ReportSummary,
    pub files: Vec<FileReport>,
}

impl CodebaseReport {
    pub fn new(root: impl Into<String>, files: Vec<FileReport>, files_skipped: usize) -> Self {
        let summary = ReportSummary::from_files(&files, files_skipped);
        Self {
            root: root.into(),
            generated_at: Utc::now(),
            summary,
            files,
        }
    }
}
