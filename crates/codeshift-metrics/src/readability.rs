//! Readability buckets.

use serde::{Deserialize, Serialize};

/// Readability label, worst to best.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, schemars::JsonSchema,
)]
pub enum Readability {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Readability {
    /// Bucket for a number of criteria met (out of three).
    pub fn from_criteria(met: usize) -> Self {
        match met {
            0 => Readability::Poor,
            1 => Readability::Fair,
            2 => Readability::Good,
            _ => Readability::Excellent,
        }
    }
}

impl std::fmt::Display for Readability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Readability::Poor => write!(f, "Poor"),
            Readability::Fair => write!(f, "Fair"),
            Readability::Good => write!(f, "Good"),
            Readability::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Thresholds for the three readability criteria.
///
/// Example config.toml:
/// ```toml
/// [readability]
/// line_length = 80.0
/// comment_ratio = 0.10
/// nesting_depth = 3.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct ReadabilityThresholds {
    /// Maximum average length of non-blank lines.
    pub line_length: f64,
    /// Minimum share of non-blank lines carrying a comment.
    pub comment_ratio: f64,
    /// Maximum average nesting depth of code lines.
    pub nesting_depth: f64,
}

impl Default for ReadabilityThresholds {
    fn default() -> Self {
        Self {
            line_length: 80.0,
            comment_ratio: 0.10,
            nesting_depth: 3.0,
        }
    }
}

impl ReadabilityThresholds {
    /// Number of criteria the averages meet.
    pub fn criteria_met(
        &self,
        average_line_length: f64,
        comment_ratio: f64,
        average_nesting: f64,
    ) -> usize {
        [
            average_line_length <= self.line_length,
            comment_ratio >= self.comment_ratio,
            average_nesting <= self.nesting_depth,
        ]
        .into_iter()
        .filter(|met| *met)
        .count()
    }
}
