//! Analyze Command
//!
//! Runs the comment-quality analysis over a file or a directory tree and
//! renders the report as text, JSON or YAML.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use console::style;

use crate::analyzer::metrics::Verdict;
use crate::analyzer::{analyze_codebase, analyze_file};
use crate::cli::ui::Output;
use crate::cli::ui::output::{header, status_marker};
use crate::config::{Config, ConfigLoader, OutputFormat};
use crate::types::{CodebaseReport, CommentReport, FileAnalysis, LensError, Result};

/// What was analyzed: one file or a whole tree
pub enum Report {
    File {
        path: String,
        verdict: Verdict,
        analysis: FileAnalysis,
    },
    Codebase(CodebaseReport),
}

pub fn run(path: PathBuf, format: Option<OutputFormat>, output: Option<PathBuf>) -> Result<()> {
    let config = ConfigLoader::load()?;
    let format = format.unwrap_or(config.output.format);

    let report = build_report(&path, &config)?;
    let rendered = render(&report, format)?;

    match output {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&out, &rendered)?;
            Output::new().success(&format!("Report written to {}", out.display()));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

pub fn build_report(path: &Path, config: &Config) -> Result<Report> {
    if path.is_file() {
        let result = analyze_file(path, config)?;
        Ok(Report::File {
            path: path.display().to_string(),
            verdict: result.verdict,
            analysis: FileAnalysis {
                comments: result.to_report(),
            },
        })
    } else if path.is_dir() {
        Ok(Report::Codebase(analyze_codebase(path, config)?))
    } else {
        Err(LensError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Path not found: {}", path.display()),
        )))
    }
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match (report, format) {
        (Report::File { analysis, .. }, OutputFormat::Json) => {
            Ok(serde_json::to_string_pretty(analysis)?)
        }
        (Report::File { analysis, .. }, OutputFormat::Yaml) => Ok(serde_yaml::to_string(analysis)?),
        (
            Report::File {
                path,
                verdict,
                analysis,
            },
            OutputFormat::Text,
        ) => {
            let mut out = header("Comment Analysis");
            out.push('\n');
            write_file_entry(&mut out, path, *verdict, &analysis.comments);
            Ok(out)
        }
        (Report::Codebase(report), OutputFormat::Json) => Ok(serde_json::to_string_pretty(report)?),
        (Report::Codebase(report), OutputFormat::Yaml) => Ok(serde_yaml::to_string(report)?),
        (Report::Codebase(report), OutputFormat::Text) => Ok(render_codebase_text(report)),
    }
}

fn render_codebase_text(report: &CodebaseReport) -> String {
    let mut out = header("Comment Analysis");
    let _ = writeln!(out);
    let _ = writeln!(out, "Root: {}", report.root);

    for file in &report.files {
        let _ = writeln!(out);
        write_file_entry(&mut out, &file.file, file.verdict, &file.analysis.comments);
    }

    let summary = &report.summary;
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", style("Summary").bold());
    let languages: Vec<String> = summary
        .files_by_language
        .iter()
        .map(|(lang, count)| format!("{} {}", count, lang))
        .collect();
    let _ = writeln!(
        out,
        "  Files:          {} analyzed, {} skipped{}",
        summary.files_analyzed,
        summary.files_skipped,
        if languages.is_empty() {
            String::new()
        } else {
            format!(" ({})", languages.join(", "))
        }
    );
    let _ = writeln!(out, "  Comments:       {}", summary.total_comments);
    let _ = writeln!(out, "  Redundant:      {} files", summary.files_with_redundancy);
    let _ = write!(out, "  Over-commented: {} files", summary.over_commented_files);

    out
}

fn write_file_entry(out: &mut String, path: &str, verdict: Verdict, comments: &CommentReport) {
    let _ = writeln!(out, "{} {}", status_marker(verdict), style(path).bold());

    let unit = match comments {
        CommentReport::Python(_) => "function",
        CommentReport::Java(_) => "method",
    };
    let _ = writeln!(
        out,
        "  Comments: {}  Density: {:.2} per {}",
        comments.total_comments(),
        comments.density(),
        unit
    );

    if let CommentReport::Python(py) = comments {
        let b = &py.comments_by_scope;
        let _ = writeln!(
            out,
            "  Scopes:   file {}, class {}, function {}, inline {}",
            b.file, b.types, b.callables, b.inline
        );
    }

    let pairs = comments.redundant_comments();
    if !pairs.is_empty() {
        let _ = writeln!(out, "  Redundant pairs: {}", pairs.len());
        for pair in pairs {
            let _ = writeln!(
                out,
                "    {} {:?} ~ {:?}",
                style("·").dim(),
                pair.first(),
                pair.second()
            );
        }
    }

    let _ = writeln!(out, "  {}", style(comments.conclusion()).italic());
}
