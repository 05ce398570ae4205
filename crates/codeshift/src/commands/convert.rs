//! Convert command - translate code between languages.

use super::{emit, language_tag, read_input};
use crate::engine::Engine;
use crate::output::{OutputFormat, OutputFormatter};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert command arguments
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input source file, use - for stdin
    pub input: PathBuf,

    /// Source language (required when using stdin, auto-detect from extension otherwise)
    #[arg(short, long)]
    pub from: Option<String>,

    /// Target language
    #[arg(short, long)]
    pub to: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the convert command
pub fn run(args: &ConvertArgs, engine: &Engine, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let source = read_input(&args.input)?;
    let from = language_tag(args.from.as_deref(), &args.input, "--from")?;
    let response = engine.convert(&source, &from, &args.to);
    if !response.success {
        if format.is_json() {
            response.print(format);
        } else {
            eprintln!("{}", response.render(format));
        }
        return Ok(ExitCode::FAILURE);
    }
    emit(&response.output_code, args.output.as_deref(), &response, format)?;
    Ok(ExitCode::SUCCESS)
}
