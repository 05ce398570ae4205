//! Analyzer limits.

use serde::{Deserialize, Serialize};

/// Limits for the style suggestions.
///
/// Example config.toml:
/// ```toml
/// [analysis]
/// max_line_length = 100
/// max_nesting_depth = 4
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Lines longer than this many characters get a suggestion.
    pub max_line_length: usize,
    /// Blocks nested deeper than this get a suggestion.
    pub max_nesting_depth: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_line_length: 100,
            max_nesting_depth: 4,
        }
    }
}
