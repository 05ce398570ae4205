//! Fix command - repair mechanical syntax errors.

use super::{emit, language_tag, read_input};
use crate::engine::Engine;
use crate::output::OutputFormat;
use clap::Args;
use codeshift_syntax_rules::Severity;
use std::path::PathBuf;
use std::process::ExitCode;

/// Fix command arguments
#[derive(Args, Debug)]
pub struct FixArgs {
    /// Input source file, use - for stdin
    pub input: PathBuf,

    /// Language of the input (auto-detect from extension otherwise)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the fix command. Exits non-zero when errors remain after fixing.
pub fn run(args: &FixArgs, engine: &Engine, format: &OutputFormat) -> anyhow::Result<ExitCode> {
    let source = read_input(&args.input)?;
    let lang = language_tag(args.lang.as_deref(), &args.input, "--lang")?;
    let response = engine.fix(&source, &lang)?;
    tracing::debug!(
        fixes = response.fixes.len(),
        unresolved = response.unresolved.len(),
        "fixed"
    );
    emit(&response.output_code, args.output.as_deref(), &response, format)?;
    let remaining_errors = response
        .unresolved
        .iter()
        .any(|f| f.severity == Severity::Error);
    Ok(if remaining_errors {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
