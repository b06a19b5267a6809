//! # Input Sources
//!
//! Reads résumé text from a file or stdin without leaving unscrubbed copies
//! behind: bytes go through a fixed-size scrubbed chunk buffer into either a
//! [`SecretBuffer`] or a [`StreamingContext`], never through `read_to_end`.

use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ctrh_core::{ResumeDigest, SecretBuffer};
use ctrh_crypto::HashPipeline;
use zeroize::Zeroizing;

/// Where input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl InputSource {
    /// `None` and `-` mean stdin.
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            None => Self::Stdin,
            Some(p) if p.as_os_str() == "-" => Self::Stdin,
            Some(p) => Self::File(p.to_path_buf()),
        }
    }

    /// Human-readable name for messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(p) => p.display().to_string(),
        }
    }

    fn open(&self) -> Result<Box<dyn Read>> {
        match self {
            Self::Stdin => Ok(Box::new(io::stdin().lock())),
            Self::File(p) => {
                let file = File::open(p)
                    .with_context(|| format!("failed to open input: {}", p.display()))?;
                Ok(Box::new(file))
            }
        }
    }
}

/// Feed `reader` to `sink` in chunks of `chunk_size`, scrubbing the chunk
/// buffer afterwards.
fn pump(
    mut reader: impl Read,
    chunk_size: usize,
    mut sink: impl FnMut(&[u8]) -> Result<()>,
) -> Result<u64> {
    let mut chunk = Zeroizing::new(vec![0u8; chunk_size.max(1)]);
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("failed to read input"),
        };
        sink(&chunk[..n])?;
        total += n as u64;
    }
    Ok(total)
}

/// Read the whole source into a scrubbing buffer.
pub fn read_secret(source: &InputSource, chunk_size: usize) -> Result<SecretBuffer> {
    read_secret_from(source.open()?, chunk_size)
        .with_context(|| format!("reading {}", source.describe()))
}

/// Same as [`read_secret`] over an arbitrary reader.
pub fn read_secret_from(reader: impl Read, chunk_size: usize) -> Result<SecretBuffer> {
    let mut buffer = SecretBuffer::new();
    pump(reader, chunk_size, |bytes| {
        buffer.extend_from_slice(bytes).map_err(anyhow::Error::from)
    })?;
    Ok(buffer)
}

/// Hash the source through a streaming context, one chunk per read.
pub fn stream_digest(
    source: &InputSource,
    pipeline: &HashPipeline,
    chunk_size: usize,
) -> Result<ResumeDigest> {
    stream_digest_from(source.open()?, pipeline, chunk_size)
        .with_context(|| format!("hashing {}", source.describe()))
}

/// Same as [`stream_digest`] over an arbitrary reader.
pub fn stream_digest_from(
    reader: impl Read,
    pipeline: &HashPipeline,
    chunk_size: usize,
) -> Result<ResumeDigest> {
    let mut ctx = pipeline.stream();
    let total = pump(reader, chunk_size, |bytes| {
        ctx.update(bytes).map_err(anyhow::Error::from)
    })?;
    tracing::debug!(total, chunk_size, "streamed input");
    Ok(ctx.finalize()?)
}
