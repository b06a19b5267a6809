//! # Verify and Compare Subcommands
//!
//! `ctrh verify` checks a résumé against an expected digest. `ctrh compare`
//! reports whether two résumés canonicalize to the same text. Both exit 0 on
//! a match and 1 otherwise; digest comparison is constant-time.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ctrh_core::{NormalizerKind, ResumeDigest};
use ctrh_crypto::hash_once_with;

use crate::config::CliConfig;
use crate::input::{read_secret, InputSource};

/// Arguments for the `ctrh verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Expected digest as 64 hex characters.
    #[arg(long, value_name = "HEX")]
    pub digest: String,

    /// Input file; `-` or absent reads stdin.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Arguments for the `ctrh compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First résumé.
    #[arg(value_name = "A")]
    pub a: PathBuf,

    /// Second résumé.
    #[arg(value_name = "B")]
    pub b: PathBuf,
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let expected: ResumeDigest = args
        .digest
        .parse()
        .with_context(|| format!("invalid --digest value: {}", args.digest))?;

    let source = InputSource::from_arg(args.file.as_deref());
    let input = read_secret(&source, config.chunk_size)?;
    let actual = config.pipeline().hash(input.as_slice())?;

    if actual == expected {
        writeln!(out, "OK: {}", source.describe())?;
        Ok(0)
    } else {
        tracing::info!(source = %source.describe(), "digest mismatch");
        writeln!(out, "MISMATCH: {}", source.describe())?;
        writeln!(out, "  expected: {expected}")?;
        writeln!(out, "  actual:   {actual}")?;
        Ok(1)
    }
}

/// Execute the compare subcommand.
///
/// Both inputs are hashed under every normalizer variant; a disagreement
/// between variants is reported as an error since it means the two
/// implementations have diverged.
pub fn run_compare(args: &CompareArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let a = read_secret(&InputSource::File(args.a.clone()), config.chunk_size)?;
    let b = read_secret(&InputSource::File(args.b.clone()), config.chunk_size)?;

    let digest_a = hash_once_with(config.normalizer, a.as_slice())?;
    let digest_b = hash_once_with(config.normalizer, b.as_slice())?;

    for kind in NormalizerKind::ALL {
        if kind == config.normalizer {
            continue;
        }
        if hash_once_with(kind, a.as_slice())? != digest_a
            || hash_once_with(kind, b.as_slice())? != digest_b
        {
            anyhow::bail!("normalizer {kind} disagrees with {}", config.normalizer);
        }
    }

    if digest_a == digest_b {
        writeln!(out, "SAME: {digest_a}")?;
        Ok(0)
    } else {
        writeln!(out, "DIFFERENT")?;
        writeln!(out, "  {}: {digest_a}", args.a.display())?;
        writeln!(out, "  {}: {digest_b}", args.b.display())?;
        Ok(1)
    }
}
