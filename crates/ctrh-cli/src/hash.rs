//! # Hash Subcommand
//!
//! Prints the digest of a file or stdin. By default the whole input is read
//! into a scrubbing buffer and hashed in one shot; `--stream` feeds the
//! input to a streaming context one read at a time instead. Both paths
//! produce the same digest.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ctrh_core::{NormalizerKind, ResumeDigest};
use serde::Serialize;

use crate::config::CliConfig;
use crate::input::{read_secret, stream_digest, InputSource};

/// Arguments for the `ctrh hash` subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Input file; `-` or absent reads stdin.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Feed input through the streaming context chunk by chunk.
    #[arg(long)]
    pub stream: bool,

    /// Read size in bytes for `--stream` (overrides the config file).
    #[arg(long, value_name = "BYTES")]
    pub chunk_size: Option<usize>,

    /// Emit a JSON object instead of the bare hex digest.
    #[arg(long)]
    pub json: bool,
}

/// Machine-readable output of `ctrh hash --json`.
#[derive(Debug, Serialize)]
pub struct HashReport {
    /// Where the input came from.
    pub source: String,
    /// Normalizer applied before hashing.
    pub normalizer: NormalizerKind,
    /// Whether the streaming path was used.
    pub streamed: bool,
    /// Hex digest.
    pub digest: ResumeDigest,
}

/// Compute the digest for `source` under `config`.
pub fn digest_source(
    source: &InputSource,
    config: &CliConfig,
    stream: bool,
    chunk_size: usize,
) -> Result<ResumeDigest> {
    let pipeline = config.pipeline();
    if stream {
        stream_digest(source, &pipeline, chunk_size)
    } else {
        let input = read_secret(source, chunk_size)?;
        Ok(pipeline.hash(input.as_slice())?)
    }
}

/// Execute the hash subcommand.
pub fn run_hash(args: &HashArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let source = InputSource::from_arg(args.file.as_deref());
    let chunk_size = args.chunk_size.unwrap_or(config.chunk_size);
    if chunk_size == 0 {
        anyhow::bail!("--chunk-size must be at least 1");
    }

    let digest = digest_source(&source, config, args.stream, chunk_size)?;
    tracing::info!(source = %source.describe(), normalizer = %config.normalizer, "computed digest");

    if args.json {
        let report = HashReport {
            source: source.describe(),
            normalizer: config.normalizer,
            streamed: args.stream,
            digest,
        };
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{digest}")?;
    }
    Ok(0)
}
