//! Languages command - list supported languages.

use crate::output::{OutputFormat, OutputFormatter};
use codeshift_languages::Language;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct LanguageInfo {
    pub tag: &'static str,
    pub name: &'static str,
    pub extensions: Vec<&'static str>,
}

/// Every supported language.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct LanguagesReport {
    pub languages: Vec<LanguageInfo>,
}

impl LanguagesReport {
    pub fn new() -> Self {
        let languages = Language::ALL
            .iter()
            .map(|lang| LanguageInfo {
                tag: lang.as_str(),
                name: lang.display_name(),
                extensions: lang.extensions().to_vec(),
            })
            .collect();
        Self { languages }
    }
}

impl Default for LanguagesReport {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for LanguagesReport {
    fn format_text(&self) -> String {
        self.languages
            .iter()
            .map(|lang| format!("{:<12}{:<12}{}", lang.tag, lang.name, lang.extensions.join(" ")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_pretty(&self) -> String {
        use nu_ansi_term::Style;

        self.languages
            .iter()
            .map(|lang| {
                format!(
                    "{}{:<12}{}",
                    Style::new().bold().paint(format!("{:<12}", lang.tag)),
                    lang.name,
                    Style::new().dimmed().paint(lang.extensions.join(" "))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Run the languages command
pub fn run(format: &OutputFormat) -> ExitCode {
    LanguagesReport::new().print(format);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_language() {
        let report = LanguagesReport::new();
        assert_eq!(report.languages.len(), 6);
        let text = report.format_text();
        assert!(text.starts_with("python      Python      py pyw"));
        assert!(text.contains("cpp         C++"));
    }
}
