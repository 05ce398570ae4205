use clap::{Parser, Subcommand};
use codeshift::commands::{analyze, convert, fix, languages, metrics};
use codeshift::config::{CONFIG_PATH, CodeshiftConfig};
use codeshift::engine::Engine;
use codeshift::output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Convert, check, fix and measure code in six languages
#[derive(Parser, Debug)]
#[command(name = "codeshift", version, about)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Human-friendly output with colors
    #[arg(long, global = true, conflicts_with = "compact")]
    pretty: bool,

    /// Compact output without colors
    #[arg(long, global = true)]
    compact: bool,

    /// Project root holding .codeshift/config.toml (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert code from one language to another
    Convert(convert::ConvertArgs),
    /// Report syntax errors, warnings and suggestions
    Analyze(analyze::AnalyzeArgs),
    /// Repair mechanical syntax errors
    Fix(fix::FixArgs),
    /// Report structural quality metrics
    Metrics(metrics::MetricsArgs),
    /// List supported languages
    Languages,
}

/// Print the config schema when invoked as `codeshift --schema`.
fn handle_schema_flag() -> bool {
    if std::env::args().nth(1).as_deref() != Some("--schema") {
        return false;
    }
    let response = serde_json::json!({
        "config_path": CONFIG_PATH,
        "format": "toml",
        "schema": schemars::schema_for!(CodeshiftConfig)
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&response).unwrap_or_default()
    );
    true
}

#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: libc::signal is a standard POSIX function. Restoring the default
    // SIGPIPE disposition makes writes to a closed pipe (`| head`) terminate the
    // process instead of surfacing as write errors. No memory is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_env("CODESHIFT_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let config = CodeshiftConfig::load(&root)?;
    let format = OutputFormat::from_cli(cli.json, cli.pretty, cli.compact, &config.pretty);
    let engine = Engine::new(config);

    match &cli.command {
        Command::Convert(args) => convert::run(args, &engine, &format),
        Command::Analyze(args) => analyze::run(args, &engine, &format),
        Command::Fix(args) => fix::run(args, &engine, &format),
        Command::Metrics(args) => metrics::run(args, &engine, &format),
        Command::Languages => Ok(languages::run(&format)),
    }
}

fn main() -> ExitCode {
    reset_sigpipe();

    if handle_schema_flag() {
        return ExitCode::SUCCESS;
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("codeshift v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
