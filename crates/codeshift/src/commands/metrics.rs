//! Metrics command - structural quality metrics for one file.

use super::{language_tag, read_input};
use crate::engine::Engine;
use crate::output::{OutputFormat, OutputFormatter};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

/// Metrics command arguments
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Input source file, use - for stdin
    pub input: PathBuf,

    /// Language of the input (auto-detect from extension otherwise)
    #[arg(short, long)]
    pub lang: Option<String>,
}

/// Run the metrics command
pub fn run(args: &MetricsArgs, engine: &Engine, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let source = read_input(&args.input)?;
    let lang = language_tag(args.lang.as_deref(), &args.input, "--lang")?;
    engine.metrics(&source, &lang)?.print(format);
    Ok(ExitCode::SUCCESS)
}
