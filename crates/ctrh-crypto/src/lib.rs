//! # ctrh-crypto — Digest Engine and Hashing Pipelines
//!
//! Provides the hashing half of ct-resume-hash:
//!
//! - **SHA-256** implemented from scratch, with its block buffer and message
//!   schedule scrubbed.
//! - **One-shot pipeline** (`hash_once`): normalize into a scrubbed scratch
//!   buffer, hash exactly the canonical bytes.
//! - **Streaming context**: accumulate chunks, finalize once.
//!
//! ## Crate Policy
//!
//! - Depends only on `ctrh-core` internally.
//! - No `unsafe` code.
//! - Tests cross-check the engine against the `sha2` crate; `sha2` is never
//!   a runtime dependency.

#![forbid(unsafe_code)]

pub mod pipeline;
pub mod sha256;
pub mod stream;

pub use ctrh_core::{
    CanonicalText, HashError, Normalizer, NormalizerKind, ResumeDigest, DIGEST_LEN,
};
pub use pipeline::{hash_once, hash_once_with, HashPipeline};
pub use sha256::{sha256, sha256_digest, Sha256};
pub use stream::StreamingContext;
