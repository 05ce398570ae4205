//! CLI subcommands.

pub mod analyze;
pub mod convert;
pub mod fix;
pub mod languages;
pub mod metrics;

use crate::output::{OutputFormat, OutputFormatter};
use anyhow::{Context, bail};
use codeshift_languages::Language;
use std::io::Read;
use std::path::Path;

/// Whether `path` names standard input.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a source file, or stdin for `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// The language tag for `path`: the explicit one, or one detected from the extension.
pub fn language_tag(explicit: Option<&str>, path: &Path, flag: &str) -> anyhow::Result<String> {
    if let Some(tag) = explicit {
        return Ok(tag.to_string());
    }
    if is_stdin(path) {
        bail!("{flag} is required when reading from stdin");
    }
    let detected = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension);
    match detected {
        Some(lang) => Ok(lang.as_str().to_string()),
        None => bail!(
            "cannot detect language of {}. Use {flag} to specify it",
            path.display()
        ),
    }
}

/// Deliver produced code and its report.
///
/// With `-o` the code goes to the file and the report to stdout. Otherwise
/// JSON output prints the whole report; text output prints the code to
/// stdout and the report to stderr, so the code can be piped.
pub fn emit(
    code: &str,
    output: Option<&Path>,
    report: &impl OutputFormatter,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    if let Some(path) = output {
        std::fs::write(path, code).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = code.len(), "wrote output");
        report.print(format);
        return Ok(());
    }
    if format.is_json() {
        report.print(format);
        return Ok(());
    }
    print!("{code}");
    if !code.is_empty() && !code.ends_with('\n') {
        println!();
    }
    let text = report.render(format);
    if !text.is_empty() {
        eprintln!("{text}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_language_from_extension() {
        let tag = language_tag(None, &PathBuf::from("src/main.rs"), "--lang").unwrap();
        assert_eq!(tag, "rust");
        let tag = language_tag(Some("py"), &PathBuf::from("-"), "--lang").unwrap();
        assert_eq!(tag, "py");
    }

    #[test]
    fn test_stdin_requires_language() {
        let err = language_tag(None, &PathBuf::from("-"), "--from").unwrap_err();
        assert_eq!(err.to_string(), "--from is required when reading from stdin");
    }

    #[test]
    fn test_unknown_extension() {
        let err = language_tag(None, &PathBuf::from("notes.txt"), "--lang").unwrap_err();
        assert!(err.to_string().contains("notes.txt"));
    }
}
