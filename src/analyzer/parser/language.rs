//! Language Detection Module
//!
//! **Single source of truth** for language detection. The analyzer supports
//! exactly two languages; every other file is ignored by the scanner.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use commentlens::analyzer::parser::Language;
//!
//! assert_eq!(Language::from_path("src/app.py"), Some(Language::Python));
//! assert_eq!(Language::Java.tag(), "java");
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Language Metadata Table
// =============================================================================

/// Language metadata entry containing all language-specific information
struct LanguageMeta {
    /// Display name (human-readable)
    display_name: &'static str,
    /// Lowercase tag used in reports
    tag: &'static str,
    /// File extensions that map to this language
    extensions: &'static [&'static str],
    /// Alternative names for parsing from string
    aliases: &'static [&'static str],
}

macro_rules! lang_meta {
    ($display:literal, $tag:literal, [$($ext:literal),*], [$($alias:literal),*]) => {
        LanguageMeta {
            display_name: $display,
            tag: $tag,
            extensions: &[$($ext),*],
            aliases: &[$($alias),*],
        }
    };
}

/// Languages with a comment analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Python, Language::Java];

    fn meta(&self) -> LanguageMeta {
        match self {
            Language::Python => lang_meta!("Python", "python", ["py"], ["python", "py"]),
            Language::Java => lang_meta!("Java", "java", ["java"], ["java"]),
        }
    }

    /// Display name (human-readable)
    pub fn as_str(&self) -> &'static str {
        self.meta().display_name
    }

    /// Lowercase tag used in reports
    pub fn tag(&self) -> &'static str {
        self.meta().tag
    }

    /// Detect language from file extension (case-sensitive, like the
    /// extension check used for dispatch)
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.meta().extensions.contains(&ext))
    }

    /// Detect language from file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s_lower = s.to_lowercase();

        Self::ALL
            .into_iter()
            .find(|lang| lang.meta().aliases.iter().any(|a| *a == s_lower))
            .ok_or_else(|| format!("Unknown language: {}. Valid values: python, java", s))
    }
}
