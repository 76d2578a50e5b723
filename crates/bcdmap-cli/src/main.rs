//! Binary entrypoint for bcdmap.
use anyhow::{Context, Result};
use bcdmap_cli::{resolve_config, run_batch, RunOptions};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Map one browser's compat data onto another browser where it is missing
#[derive(Parser)]
#[command(name = "bcdmap", author, version, about)]
struct Cli {
    /// Directory (or single file) of compat data JSON files
    path: PathBuf,

    /// Mapping config YAML file, takes precedence over --preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in mapping config
    #[arg(long, default_value = bcdmap_core::SAMSUNG_INTERNET)]
    preset: String,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Log every file and decision at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG overrides the -v default
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<bool> {
    let config = resolve_config(cli.config.as_deref(), &cli.preset)
        .context("failed to load mapping config")?;

    let options = RunOptions {
        dry_run: cli.dry_run,
    };
    let summary = run_batch(&cli.path, &config, options)
        .with_context(|| format!("run aborted under {}", cli.path.display()))?;

    summary.log();
    Ok(summary.is_clean())
}
