//! # ctrh-core — Foundational Types for ct-resume-hash
//!
//! This crate is the leaf of the workspace. It defines the canonicalization
//! step that turns free-form human-entered text into a stable ASCII form, the
//! buffer type that guarantees plaintext is scrubbed, and the digest value
//! handed back to callers. The digest engine itself lives in `ctrh-crypto`.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalText` newtype.** The only way to obtain owned canonical
//!    bytes is through a [`Normalizer`]. Digest paths accept `&CanonicalText`
//!    so non-canonical bytes cannot be hashed by accident.
//!
//! 2. **Two normalizers, one contract.** [`NormalizerKind::Reference`] is the
//!    readable branching version; [`NormalizerKind::ConstantTime`] computes
//!    every per-byte decision as a mask so execution time depends only on
//!    input length. Both must agree byte-for-byte.
//!
//! 3. **Scrub on every exit path.** Every buffer that ever holds raw or
//!    canonical plaintext is a [`SecretBuffer`], which zero-fills its whole
//!    allocation on growth, truncation and drop.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ctrh-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Never log buffer contents; lengths and capacities only.

#![forbid(unsafe_code)]

pub mod canonical;
pub mod digest;
pub mod error;
pub mod normalize;
pub mod secret;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalText;
pub use digest::{ResumeDigest, DIGEST_LEN};
pub use error::{HashError, ParseError, STATUS_OK};
pub use normalize::{
    normalize_ascii, normalize_ct, normalize_ref, Normalizer, NormalizerKind,
};
pub use secret::SecretBuffer;
