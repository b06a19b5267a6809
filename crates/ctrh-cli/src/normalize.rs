//! # Normalize Subcommand
//!
//! Prints the canonical form that would be hashed. `--max-len` caps the
//! output the same way a fixed-size caller buffer would: writing stops
//! silently and the trailing space, if any, is trimmed.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ctrh_core::{Normalizer, SecretBuffer};

use crate::config::CliConfig;
use crate::input::{read_secret, InputSource};

/// Arguments for the `ctrh normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Input file; `-` or absent reads stdin.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Maximum canonical bytes to emit.
    #[arg(long, value_name = "BYTES")]
    pub max_len: Option<usize>,
}

/// Execute the normalize subcommand.
pub fn run_normalize(args: &NormalizeArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let source = InputSource::from_arg(args.file.as_deref());
    let input = read_secret(&source, config.chunk_size)?;

    let canonical = config.normalizer.normalize(input.as_slice())?;
    match args.max_len {
        Some(max_len) if max_len < canonical.len() => {
            // One extra slot for the terminator the normalizer reserves.
            let mut scratch = SecretBuffer::zeroed(max_len.saturating_add(1))?;
            let written = config
                .normalizer
                .normalize_into(input.as_slice(), scratch.as_mut_slice());
            tracing::warn!(written, max_len, "canonical output truncated");
            out.write_all(&scratch.as_slice()[..written])?;
        }
        _ => out.write_all(canonical.as_bytes())?,
    }
    writeln!(out)?;
    Ok(0)
}
