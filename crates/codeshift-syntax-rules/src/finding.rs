//! Findings produced by the analyzer.

use codeshift_languages::LineRange;
use serde::Serialize;

/// How serious a finding is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Suggestion => write!(f, "suggestion"),
        }
    }
}

/// A character position: 1-based line, 0-based character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

/// Machine-readable description of what was found.
///
/// Columns are 0-based character offsets into the line. Variants carrying a
/// location have a fix template; the rest are reported only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// An opener with no closer.
    UnclosedDelimiter {
        open: char,
        col: usize,
        /// The closer that skipped this opener; `None` at end of input.
        revealed_by: Option<Position>,
    },
    /// A closer with no opener.
    UnmatchedCloser { close: char, col: usize },
    /// A string or character literal left open at the end of its line.
    UnterminatedString {
        col: usize,
        quote: String,
        /// Closers for the brackets opened before the literal on its line.
        closers: String,
    },
    /// A block comment never closed.
    UnterminatedComment { close: String },
    /// A statement without its terminator.
    MissingTerminator { terminator: char },
    /// A compound statement header without its trailing `:`.
    MissingColon { keyword: String },
    /// A block header with nothing indented under it.
    EmptyBlock,
    /// Indentation mixing tabs and spaces.
    MixedIndentation,
    LongLine { width: usize, limit: usize },
    DeepNesting { depth: usize, limit: usize },
    TrailingWhitespace,
}

impl FindingKind {
    /// Whether the fix engine has a template for this kind.
    pub fn is_fixable(&self) -> bool {
        matches!(
            self,
            FindingKind::UnclosedDelimiter { .. }
                | FindingKind::UnmatchedCloser { .. }
                | FindingKind::UnterminatedString { .. }
                | FindingKind::UnterminatedComment { .. }
                | FindingKind::MissingTerminator { .. }
        )
    }

    /// Column the finding points at, for ordering findings on one line.
    fn col(&self) -> usize {
        match self {
            FindingKind::UnclosedDelimiter { col, .. }
            | FindingKind::UnmatchedCloser { col, .. }
            | FindingKind::UnterminatedString { col, .. } => *col,
            FindingKind::MissingTerminator { .. } => usize::MAX,
            _ => 0,
        }
    }
}

/// One analyzer result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: FindingKind,
    pub message: String,
    pub lines: LineRange,
}

impl Finding {
    pub fn new(severity: Severity, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            lines: LineRange::default(),
        }
    }

    pub fn error(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, message)
    }

    pub fn warning(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, kind, message)
    }

    pub fn suggestion(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Suggestion, kind, message)
    }

    /// Set the location to a single line.
    pub fn at(self, line: usize) -> Self {
        self.spanning(LineRange::line(line))
    }

    pub fn spanning(mut self, lines: LineRange) -> Self {
        self.lines = lines;
        self
    }

    pub fn line(&self) -> usize {
        self.lines.start
    }

    fn sort_key(&self) -> (usize, usize) {
        (self.lines.start, self.kind.col())
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}: {}", self.lines, self.severity, self.message)
    }
}

/// Findings of one analysis, grouped by severity, each group in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct Analysis {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub suggestions: Vec<Finding>,
}

impl Analysis {
    pub(crate) fn from_findings(findings: Vec<Finding>) -> Self {
        let mut analysis = Analysis::default();
        for finding in findings {
            match finding.severity {
                Severity::Error => analysis.errors.push(finding),
                Severity::Warning => analysis.warnings.push(finding),
                Severity::Suggestion => analysis.suggestions.push(finding),
            }
        }
        for group in [
            &mut analysis.errors,
            &mut analysis.warnings,
            &mut analysis.suggestions,
        ] {
            group.sort_by_key(Finding::sort_key);
        }
        analysis
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.suggestions.is_empty()
    }

    /// Every finding, errors first.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.suggestions)
    }

    /// First error the fix engine can repair.
    pub fn first_fixable(&self) -> Option<&Finding> {
        self.errors.iter().find(|f| f.kind.is_fixable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_and_order() {
        let analysis = Analysis::from_findings(vec![
            Finding::suggestion(FindingKind::TrailingWhitespace, "trailing").at(2),
            Finding::error(FindingKind::MissingTerminator { terminator: ';' }, "semi").at(3),
            Finding::error(
                FindingKind::UnmatchedCloser { close: ')', col: 4 },
                "closer",
            )
            .at(3),
            Finding::error(FindingKind::MissingColon { keyword: "if".into() }, "colon").at(1),
        ]);
        let messages: Vec<&str> = analysis.errors.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["colon", "closer", "semi"]);
        assert_eq!(analysis.suggestions.len(), 1);
        assert_eq!(
            analysis.first_fixable().map(|f| f.message.as_str()),
            Some("closer")
        );
    }

    #[test]
    fn test_finding_serializes_flat() {
        let finding = Finding::error(
            FindingKind::UnclosedDelimiter {
                open: '(',
                col: 5,
                revealed_by: None,
            },
            "Unclosed '('",
        )
        .at(1);
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["kind"], "unclosed_delimiter");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["open"], "(");
        assert_eq!(json["lines"]["start"], 1);
    }
}
