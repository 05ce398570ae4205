//! Output formatting utilities.
//!
//! Provides consistent JSON/text output across all commands via the `OutputFormatter` trait.

use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// Color output mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Auto-detect based on TTY (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Configuration for pretty output mode.
///
/// Example config.toml:
/// ```toml
/// [pretty]
/// enabled = true       # auto-enable when TTY (default: auto)
/// colors = "auto"      # "auto", "always", or "never"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct PrettyConfig {
    /// Enable pretty mode. None = auto (true when stdout is TTY)
    pub enabled: Option<bool>,
    /// Color mode: auto (default), always, or never
    pub colors: Option<ColorMode>,
}

impl PrettyConfig {
    /// Should pretty mode be enabled?
    /// Respects explicit setting, otherwise auto-detects TTY.
    pub fn enabled(&self) -> bool {
        self.enabled
            .unwrap_or_else(|| std::io::stdout().is_terminal())
    }
}

/// Output format and display mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact text output (no colors).
    #[default]
    Compact,
    /// Pretty text output (human-friendly, with colors if available).
    Pretty { colors: bool },
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Create from CLI flags and config (fully resolved).
    pub fn from_cli(json: bool, pretty: bool, compact: bool, config: &PrettyConfig) -> Self {
        if json {
            return OutputFormat::Json;
        }
        let is_pretty = if compact {
            false
        } else {
            pretty || config.enabled()
        };
        if !is_pretty {
            return OutputFormat::Compact;
        }
        // Determine colors: respect "never", otherwise --pretty forces colors
        let colors = if std::env::var_os("NO_COLOR").is_some() {
            false
        } else {
            match config.colors.unwrap_or_default() {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => pretty || std::io::stdout().is_terminal(),
            }
        };
        OutputFormat::Pretty { colors }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Trait for types that can format output in multiple formats.
///
/// JSON serialization uses serde, while text formatting is custom.
pub trait OutputFormatter: Serialize + schemars::JsonSchema {
    /// Format as minimal text (default).
    fn format_text(&self) -> String;

    /// Format as pretty text (human-friendly with colors).
    /// Default implementation falls back to format_text().
    fn format_pretty(&self) -> String {
        self.format_text()
    }

    /// Render in the specified format.
    fn render(&self, format: &OutputFormat) -> String {
        match format {
            OutputFormat::Compact | OutputFormat::Pretty { colors: false } => self.format_text(),
            OutputFormat::Pretty { colors: true } => self.format_pretty(),
            OutputFormat::Json => serde_json::to_string(self).unwrap_or_default(),
        }
    }

    /// Print to stdout in the specified format.
    fn print(&self, format: &OutputFormat) {
        println!("{}", self.render(format));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, schemars::JsonSchema)]
    struct TestOutput {
        name: String,
        count: usize,
    }

    impl OutputFormatter for TestOutput {
        fn format_text(&self) -> String {
            format!("{}: {}", self.name, self.count)
        }

        fn format_pretty(&self) -> String {
            format!("** {} **", self.format_text())
        }
    }

    #[test]
    fn test_output_format_from_cli() {
        let config = PrettyConfig::default();
        // compact=true overrides auto
        assert_eq!(
            OutputFormat::from_cli(false, false, true, &config),
            OutputFormat::Compact
        );
        assert_eq!(
            OutputFormat::from_cli(true, true, false, &config),
            OutputFormat::Json
        );
        let config = PrettyConfig {
            enabled: Some(false),
            colors: Some(ColorMode::Never),
        };
        assert_eq!(
            OutputFormat::from_cli(false, false, false, &config),
            OutputFormat::Compact
        );
        assert_eq!(
            OutputFormat::from_cli(false, true, false, &config),
            OutputFormat::Pretty { colors: false }
        );
    }

    #[test]
    fn test_render() {
        let out = TestOutput {
            name: "loc".into(),
            count: 3,
        };
        assert_eq!(out.render(&OutputFormat::Compact), "loc: 3");
        assert_eq!(out.render(&OutputFormat::Pretty { colors: false }), "loc: 3");
        assert_eq!(out.render(&OutputFormat::Pretty { colors: true }), "** loc: 3 **");
        assert_eq!(
            out.render(&OutputFormat::Json),
            r#"{"name":"loc","count":3}"#
        );
    }
}
