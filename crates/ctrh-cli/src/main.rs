//! # ctrh CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers. Exit codes: 0 success or match, 1 mismatch, 2 error.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ctrh_core::NormalizerKind;
use tracing_subscriber::EnvFilter;

use ctrh_cli::config::{CliConfig, NORMALIZER_ENV};
use ctrh_cli::hash::{run_hash, HashArgs};
use ctrh_cli::normalize::{run_normalize, NormalizeArgs};
use ctrh_cli::verify::{run_compare, run_verify, CompareArgs, VerifyArgs};

/// Constant-time résumé hashing.
///
/// Normalizes résumé text (lowercase, collapsed whitespace, control bytes
/// dropped, non-ASCII replaced) and prints its SHA-256 digest.
#[derive(Parser, Debug)]
#[command(name = "ctrh", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Normalizer variant (overrides config and CTRH_NORMALIZER).
    #[arg(long, global = true, value_parser = parse_normalizer)]
    normalizer: Option<NormalizerKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the digest of a résumé.
    Hash(HashArgs),

    /// Print the canonical form of a résumé.
    Normalize(NormalizeArgs),

    /// Check a résumé against an expected digest.
    Verify(VerifyArgs),

    /// Check whether two résumés hash identically.
    Compare(CompareArgs),
}

fn parse_normalizer(value: &str) -> Result<NormalizerKind, String> {
    value.parse().map_err(|e: ctrh_core::ParseError| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("ctrh CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let env_normalizer = std::env::var(NORMALIZER_ENV).ok();
    let config = match CliConfig::resolve(
        cli.config.as_deref(),
        env_normalizer.as_deref(),
        cli.normalizer,
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Commands::Hash(args) => run_hash(args, &config, &mut out),
        Commands::Normalize(args) => run_normalize(args, &config, &mut out),
        Commands::Verify(args) => run_verify(args, &config, &mut out),
        Commands::Compare(args) => run_compare(args, &config, &mut out),
    };

    let _ = out.flush();

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
