//! Analyze command - report syntax errors, warnings and suggestions.

use super::{language_tag, read_input};
use crate::engine::Engine;
use crate::output::{OutputFormat, OutputFormatter};
use crate::response::AnalyzeResponse;
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Analyze command arguments
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Source files to analyze, use - for stdin
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Language of the inputs (auto-detect from extension otherwise)
    #[arg(short, long)]
    pub lang: Option<String>,
}

/// Analysis of one file.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct FileAnalysis {
    pub path: String,
    #[serde(flatten)]
    pub response: AnalyzeResponse,
}

/// Analysis of several files, in argument order.
#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct AnalyzeReport {
    pub files: Vec<FileAnalysis>,
}

impl AnalyzeReport {
    fn error_count(&self) -> usize {
        self.files.iter().map(|f| f.response.errors.len()).sum()
    }
}

impl OutputFormatter for AnalyzeReport {
    fn format_text(&self) -> String {
        let mut sections = Vec::with_capacity(self.files.len() + 1);
        for file in &self.files {
            sections.push(format!("{}\n{}", file.path, indent(&file.response.format_text())));
        }
        sections.push(format!(
            "{} files, {} errors",
            self.files.len(),
            self.error_count()
        ));
        sections.join("\n\n")
    }

    fn format_pretty(&self) -> String {
        use nu_ansi_term::Style;

        let mut sections = Vec::with_capacity(self.files.len() + 1);
        for file in &self.files {
            sections.push(format!(
                "{}\n{}",
                Style::new().bold().paint(file.path.as_str()),
                indent(&file.response.format_pretty())
            ));
        }
        sections.push(format!(
            "{} files, {} errors",
            self.files.len(),
            self.error_count()
        ));
        sections.join("\n\n")
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run the analyze command. Exits non-zero when any input has errors.
pub fn run(args: &AnalyzeArgs, engine: &Engine, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let files = args
        .inputs
        .par_iter()
        .map(|path| -> anyhow::Result<FileAnalysis> {
            let source = read_input(path)?;
            let lang = language_tag(args.lang.as_deref(), path, "--lang")?;
            let response = engine.analyze(&source, &lang)?;
            Ok(FileAnalysis {
                path: path.display().to_string(),
                response,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let failed = files.iter().any(|f| f.response.has_errors());
    match <[FileAnalysis; 1]>::try_from(files) {
        Ok([single]) => single.response.print(format),
        Err(files) => AnalyzeReport { files }.print(format),
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
