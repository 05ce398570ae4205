//! Response types for the four requests, with their text renderings.

use crate::engine::EngineError;
use crate::output::OutputFormatter;
use codeshift_languages::LineRange;
use codeshift_metrics::{QualityMetrics, Readability};
use codeshift_surface_syntax::Conversion;
use codeshift_syntax_rules::{Finding, FixRecord, Severity};
use nu_ansi_term::{Color, Style};
use serde::Serialize;

/// Result of a convert request.
#[derive(Debug, Clone, PartialEq, Serialize, schemars::JsonSchema)]
pub struct ConvertResponse {
    pub success: bool,
    pub output_code: String,
    pub analysis: Vec<String>,
    /// Why the request was rejected; `None` on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Source lines left untranslated.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub untranslated: Vec<LineRange>,
}

impl ConvertResponse {
    pub fn failure(err: &EngineError) -> Self {
        Self {
            success: false,
            output_code: String::new(),
            analysis: Vec::new(),
            error: Some(err.to_string()),
            untranslated: Vec::new(),
        }
    }
}

impl From<Conversion> for ConvertResponse {
    fn from(conversion: Conversion) -> Self {
        Self {
            success: true,
            output_code: conversion.output,
            analysis: conversion.analysis,
            error: None,
            untranslated: conversion.untranslated,
        }
    }
}

impl OutputFormatter for ConvertResponse {
    fn format_text(&self) -> String {
        match &self.error {
            Some(error) => format!("error: {error}"),
            None => self.analysis.join("\n"),
        }
    }

    fn format_pretty(&self) -> String {
        match &self.error {
            Some(error) => format!("{}: {error}", Color::Red.bold().paint("error")),
            None => {
                let mut lines = Vec::with_capacity(self.analysis.len());
                for (i, line) in self.analysis.iter().enumerate() {
                    if i == 0 {
                        lines.push(Style::new().bold().paint(line.as_str()).to_string());
                    } else if self.untranslated.is_empty() {
                        lines.push(line.clone());
                    } else {
                        lines.push(Color::Yellow.paint(line.as_str()).to_string());
                    }
                }
                lines.join("\n")
            }
        }
    }
}

/// Result of an analyze request.
#[derive(Debug, Clone, PartialEq, Serialize, schemars::JsonSchema)]
pub struct AnalyzeResponse {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub suggestions: Vec<Finding>,
    pub metrics: QualityMetrics,
}

impl AnalyzeResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Every finding, errors first.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.suggestions)
    }
}

impl OutputFormatter for AnalyzeResponse {
    fn format_text(&self) -> String {
        let mut lines: Vec<String> = self.findings().map(ToString::to_string).collect();
        if lines.is_empty() {
            lines.push("No issues found".to_string());
        }
        lines.push(summary_line(&self.metrics));
        lines.join("\n")
    }

    fn format_pretty(&self) -> String {
        let mut lines: Vec<String> = self.findings().map(pretty_finding).collect();
        if lines.is_empty() {
            lines.push(Color::Green.paint("No issues found").to_string());
        }
        lines.push(Style::new().dimmed().paint(summary_line(&self.metrics)).to_string());
        lines.join("\n")
    }
}

/// Result of a fix request.
#[derive(Debug, Clone, PartialEq, Serialize, schemars::JsonSchema)]
pub struct FixResponse {
    pub output_code: String,
    pub fixes: Vec<FixRecord>,
    /// Findings still present in the fixed code.
    pub unresolved: Vec<Finding>,
    /// Metrics of the fixed code.
    pub metrics: QualityMetrics,
}

impl OutputFormatter for FixResponse {
    fn format_text(&self) -> String {
        let mut lines = Vec::new();
        if self.fixes.is_empty() {
            lines.push("No fixes applied".to_string());
        }
        for fix in &self.fixes {
            lines.push(format!("line {}: {}", fix.lines, fix.description));
        }
        for finding in &self.unresolved {
            lines.push(format!("unresolved: {finding}"));
        }
        lines.join("\n")
    }

    fn format_pretty(&self) -> String {
        let mut lines = Vec::new();
        if self.fixes.is_empty() {
            lines.push(Style::new().dimmed().paint("No fixes applied").to_string());
        }
        for fix in &self.fixes {
            lines.push(format!(
                "{} {}",
                Color::Green.paint(format!("line {}:", fix.lines)),
                fix.description
            ));
        }
        for finding in &self.unresolved {
            lines.push(format!(
                "{} {}",
                Style::new().dimmed().paint("unresolved:"),
                pretty_finding(finding)
            ));
        }
        lines.join("\n")
    }
}

impl OutputFormatter for QualityMetrics {
    fn format_text(&self) -> String {
        [
            format!("lines of code: {}", self.lines_of_code),
            format!("functions: {}", self.functions),
            format!("classes: {}", self.classes),
            format!("complexity: {}", self.complexity),
            format!("readability: {}", self.readability),
            format!("average line length: {:.1}", self.average_line_length),
            format!("comment ratio: {:.2}", self.comment_ratio),
            format!("average nesting: {:.2}", self.average_nesting),
            format!("blank lines: {}", self.blank_lines),
            format!("comment lines: {}", self.comment_lines),
        ]
        .join("\n")
    }

    fn format_pretty(&self) -> String {
        let color = match self.readability {
            Readability::Excellent => Color::Purple,
            Readability::Good => Color::Green,
            Readability::Fair => Color::Yellow,
            Readability::Poor => Color::Red,
        };
        let label = |name: &str| {
            Style::new()
                .dimmed()
                .paint(format!("{name:<20}"))
                .to_string()
        };
        [
            format!("{}{}", label("lines of code"), self.lines_of_code),
            format!("{}{}", label("functions"), self.functions),
            format!("{}{}", label("classes"), self.classes),
            format!("{}{}", label("complexity"), self.complexity),
            format!(
                "{}{}",
                label("readability"),
                color.bold().paint(self.readability.to_string())
            ),
            format!("{}{:.1}", label("average line length"), self.average_line_length),
            format!("{}{:.2}", label("comment ratio"), self.comment_ratio),
            format!("{}{:.2}", label("average nesting"), self.average_nesting),
            format!("{}{}", label("blank lines"), self.blank_lines),
            format!("{}{}", label("comment lines"), self.comment_lines),
        ]
        .join("\n")
    }
}

fn summary_line(metrics: &QualityMetrics) -> String {
    format!(
        "{} lines of code, {} functions, {} classes, complexity {}, readability {}",
        metrics.lines_of_code,
        metrics.functions,
        metrics.classes,
        metrics.complexity,
        metrics.readability
    )
}

fn pretty_finding(finding: &Finding) -> String {
    let severity = match finding.severity {
        Severity::Error => Color::Red.bold().paint("error"),
        Severity::Warning => Color::Yellow.paint("warning"),
        Severity::Suggestion => Color::Cyan.paint("suggestion"),
    };
    format!(
        "{} {}: {}",
        Style::new().dimmed().paint(format!("line {}:", finding.lines)),
        severity,
        finding.message
    )
}
