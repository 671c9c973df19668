//! Metrics & Classifier
//!
//! Turns raw counts and duplicate pairs into a density figure, an
//! over-commenting flag and a verdict. The verdict comes from an ordered
//! rule table evaluated top to bottom; the first matching rule wins and the
//! last rule always matches.

use serde::{Deserialize, Serialize};

use super::parser::Language;
use crate::constants::analysis::{
    DENSITY_DECIMALS, DUPLICATE_SIMILARITY_THRESHOLD, OVER_COMMENT_DENSITY_THRESHOLD,
};

/// Tunable decision thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Similarity a pair must strictly exceed to be a duplicate
    pub duplicate_similarity: f64,
    /// Density a file must strictly exceed to be considered dense
    pub over_comment_density: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            duplicate_similarity: DUPLICATE_SIMILARITY_THRESHOLD,
            over_comment_density: OVER_COMMENT_DENSITY_THRESHOLD,
        }
    }
}

/// Classifier verdict for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Dense and duplicated
    OverCommented,
    /// Duplicated but not dense
    Redundant,
    /// No comments at all
    Undocumented,
    Clean,
}

impl Verdict {
    /// Human-readable conclusion in the wording used for `language`
    pub fn message(&self, language: Language) -> &'static str {
        match (self, language) {
            (Verdict::OverCommented, Language::Python) => {
                "Over-commenting detected: high comment density with redundant comments. \
                 Refactoring or simplification is recommended."
            }
            (Verdict::OverCommented, Language::Java) => {
                "Over-commenting detected: excessive documentation with duplicated comments. \
                 Simplifying code structure may reduce documentation overhead."
            }
            (Verdict::Redundant, Language::Python) => {
                "Redundant comments detected. Consider removing duplicated explanations."
            }
            (Verdict::Redundant, Language::Java) => {
                "Redundant Java comments detected. Consider consolidating documentation."
            }
            (Verdict::Undocumented, Language::Python) => {
                "No comments found. Documentation may be insufficient."
            }
            (Verdict::Undocumented, Language::Java) => {
                "No comments found. Java code may lack documentation."
            }
            (Verdict::Clean, Language::Python) => "Comments are concise and appear meaningful.",
            (Verdict::Clean, Language::Java) => "Java comments appear concise and well-placed.",
        }
    }
}

/// Inputs the rule table looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    pub total_comments: usize,
    pub duplicate_count: usize,
    pub over_commented: bool,
}

/// One entry of the decision list
pub struct Rule {
    pub verdict: Verdict,
    pub applies: fn(&Signals) -> bool,
}

/// Decision list in priority order
pub const RULES: &[Rule] = &[
    Rule {
        verdict: Verdict::OverCommented,
        applies: over_commented,
    },
    Rule {
        verdict: Verdict::Redundant,
        applies: has_duplicates,
    },
    Rule {
        verdict: Verdict::Undocumented,
        applies: has_no_comments,
    },
    Rule {
        verdict: Verdict::Clean,
        applies: always,
    },
];

fn over_commented(s: &Signals) -> bool {
    s.over_commented
}

fn has_duplicates(s: &Signals) -> bool {
    s.duplicate_count > 0
}

fn has_no_comments(s: &Signals) -> bool {
    s.total_comments == 0
}

fn always(_: &Signals) -> bool {
    true
}

/// First matching rule's verdict
pub fn classify(signals: &Signals) -> Verdict {
    RULES
        .iter()
        .find(|rule| (rule.applies)(signals))
        .map(|rule| rule.verdict)
        .unwrap_or(Verdict::Clean)
}

/// Comments per callable. The denominator is floored to one.
pub fn density(total_comments: usize, denominator: usize) -> f64 {
    total_comments as f64 / denominator.max(1) as f64
}

/// Two decimals, exact ties rounded to even.
pub fn round_density(value: f64) -> f64 {
    let factor = 10f64.powi(DENSITY_DECIMALS);
    (value * factor).round_ties_even() / factor
}

/// Dense and duplicated; both conditions are required.
pub fn is_over_commented(density: f64, duplicate_count: usize, thresholds: &Thresholds) -> bool {
    density > thresholds.over_comment_density && duplicate_count > 0
}

/// Density, over-commenting flag and verdict for one file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommentMetrics {
    /// Unrounded comments-per-callable ratio
    pub density: f64,
    pub over_commented: bool,
    pub verdict: Verdict,
}

impl CommentMetrics {
    pub fn compute(
        total_comments: usize,
        denominator: usize,
        duplicate_count: usize,
        thresholds: &Thresholds,
    ) -> Self {
        let density = density(total_comments, denominator);
        let over_commented = is_over_commented(density, duplicate_count, thresholds);
        let verdict = classify(&Signals {
            total_comments,
            duplicate_count,
            over_commented,
        });

        Self {
            density,
            over_commented,
            verdict,
        }
    }

    pub fn rounded_density(&self) -> f64 {
        round_density(self.density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(total: usize, denominator: usize, duplicates: usize) -> CommentMetrics {
        CommentMetrics::compute(total, denominator, duplicates, &Thresholds::default())
    }

    #[test]
    fn test_density_floor() {
        assert_eq!(density(3, 0), 3.0);
        assert_eq!(density(0, 0), 0.0);
        assert_eq!(density(3, 2), 1.5);
    }

    #[test]
    fn test_round_density() {
        assert_eq!(round_density(1.0 / 3.0), 0.33);
        assert_eq!(round_density(2.0 / 3.0), 0.67);
        assert_eq!(round_density(2.5), 2.5);
        // Exact binary ties go to the even neighbour
        assert_eq!(round_density(0.125), 0.12);
        assert_eq!(round_density(1.125), 1.12);
        assert_eq!(round_density(0.375), 0.38);
    }

    #[test]
    fn test_over_commented_requires_both_conditions() {
        let t = Thresholds::default();
        assert!(is_over_commented(3.0, 1, &t));
        assert!(!is_over_commented(3.0, 0, &t));
        assert!(!is_over_commented(1.0, 4, &t));
        // Strictly greater than the density threshold
        assert!(!is_over_commented(2.5, 1, &t));
    }

    #[test]
    fn test_over_commented_wins_over_redundant() {
        let m = metrics(3, 1, 1);
        assert_eq!(m.density, 3.0);
        assert!(m.over_commented);
        assert_eq!(m.verdict, Verdict::OverCommented);
    }

    #[test]
    fn test_redundant_when_not_dense() {
        let m = metrics(3, 2, 3);
        assert!(!m.over_commented);
        assert_eq!(m.verdict, Verdict::Redundant);
    }

    #[test]
    fn test_undocumented() {
        let m = metrics(0, 0, 0);
        assert!(!m.over_commented);
        assert_eq!(m.verdict, Verdict::Undocumented);
    }

    #[test]
    fn test_clean() {
        let m = metrics(10, 1, 0);
        assert_eq!(m.verdict, Verdict::Clean);
    }

    #[test]
    fn test_rule_table_is_total() {
        for total in 0..4 {
            for duplicates in 0..3 {
                for over_commented in [false, true] {
                    let signals = Signals {
                        total_comments: total,
                        duplicate_count: duplicates,
                        over_commented,
                    };
                    assert!(RULES.iter().any(|r| (r.applies)(&signals)));
                }
            }
        }
        assert!(RULES.last().is_some_and(|r| r.verdict == Verdict::Clean));
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = Thresholds {
            duplicate_similarity: 0.9,
            over_comment_density: 1.0,
        };
        let m = CommentMetrics::compute(3, 2, 1, &strict);
        assert!(m.over_commented);
    }

    #[test]
    fn test_messages_differ_per_language() {
        for verdict in [
            Verdict::OverCommented,
            Verdict::Redundant,
            Verdict::Undocumented,
            Verdict::Clean,
        ] {
            assert_ne!(verdict.message(Language::Python), verdict.message(Language::Java));
        }
        assert_eq!(
            Verdict::Undocumented.message(Language::Python),
            "No comments found. Documentation may be insufficient."
        );
    }
}
