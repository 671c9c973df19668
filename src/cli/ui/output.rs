use console::{StyledObject, style};

use crate::analyzer::metrics::Verdict;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Header line followed by a rule
pub fn header(title: &str) -> String {
    format!("{}\n{}", style(title).bold(), "═".repeat(40))
}

/// Marker for one file's verdict
pub fn status_marker(verdict: Verdict) -> StyledObject<&'static str> {
    match verdict {
        Verdict::OverCommented => style("✗").red().bold(),
        Verdict::Redundant => style("⚠").yellow(),
        Verdict::Undocumented => style("○").dim(),
        Verdict::Clean => style("✓").green(),
    }
}
