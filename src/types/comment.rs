//! Comment Types
//!
//! Units consumed by the similarity engine and the metrics classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Syntactic context a comment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Module-level docstring
    File,
    /// Docstring attached to a class or other type declaration
    #[serde(rename = "class")]
    Type,
    /// Docstring attached to a function or method
    #[serde(rename = "function")]
    Callable,
    /// Free-standing comment token
    Inline,
}

impl Scope {
    pub const ALL: [Scope; 4] = [Scope::File, Scope::Type, Scope::Callable, Scope::Inline];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::File => "file",
            Scope::Type => "class",
            Scope::Callable => "function",
            Scope::Inline => "inline",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A comment tagged with the scope it was found in.
///
/// `text` is the original comment text; normalization happens only
/// inside the similarity pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedComment {
    pub scope: Scope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub text: String,
}

impl ScopedComment {
    pub fn file(text: impl Into<String>) -> Self {
        Self {
            scope: Scope::File,
            owner: None,
            text: text.into(),
        }
    }

    pub fn owned(scope: Scope, owner: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            scope,
            owner: Some(owner.into()),
            text: text.into(),
        }
    }

    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            scope: Scope::Inline,
            owner: None,
            text: text.into(),
        }
    }
}

/// Two comments whose normalized texts are near-duplicates.
///
/// Holds the original texts, in source order. Serialized as a two-element
/// array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatePair(pub String, pub String);

impl DuplicatePair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self(first.into(), second.into())
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

/// Comment counts per scope category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeBreakdown {
    pub file: usize,
    #[serde(rename = "class")]
    pub types: usize,
    #[serde(rename = "function")]
    pub callables: usize,
    pub inline: usize,
}

impl ScopeBreakdown {
    /// Count every comment into exactly one bucket
    pub fn from_comments(comments: &[ScopedComment]) -> Self {
        let mut breakdown = Self::default();
        for comment in comments {
            breakdown.record(comment.scope);
        }
        breakdown
    }

    pub fn record(&mut self, scope: Scope) {
        match scope {
            Scope::File => self.file += 1,
            Scope::Type => self.types += 1,
            Scope::Callable => self.callables += 1,
            Scope::Inline => self.inline += 1,
        }
    }
}
