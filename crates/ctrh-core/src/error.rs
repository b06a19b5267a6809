//! # Error Types — Hashing Error Taxonomy
//!
//! Defines the error types used throughout ct-resume-hash. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Invalid arguments are checked first and produce no side effects.
//! - Allocation failure is distinct from logic errors so callers can tell
//!   resource exhaustion apart from misuse.
//! - Truncation during normalization is not an error. The returned length
//!   is the only signal.
//! - Every error maps onto the stable integer status used by the C ABI.

use thiserror::Error;

/// Status returned by the C ABI on success.
pub const STATUS_OK: i32 = 0;

/// Errors from normalization, hashing, and streaming contexts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// A required argument was missing or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Scratch or accumulation memory could not be obtained.
    #[error("allocation failed: could not reserve {requested} bytes")]
    Allocation {
        /// The capacity that was requested when allocation failed.
        requested: usize,
    },

    /// The streaming context has already produced its digest.
    #[error("streaming context already finalized")]
    Finalized,
}

impl HashError {
    /// The ABI status code for this error.
    ///
    /// `-1` invalid argument, `-2` allocation failure, `-3` finalized context.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => -1,
            Self::Allocation { .. } => -2,
            Self::Finalized => -3,
        }
    }
}

/// Errors parsing user-facing values (normalizer names, hex digests).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The normalizer name is not one of the known variants.
    #[error("unknown normalizer {0:?}; expected \"reference\" or \"constant-time\"")]
    UnknownNormalizer(String),

    /// The digest string contained a non-hex character.
    #[error("invalid hex at position {position}")]
    InvalidHex {
        /// Byte offset of the offending character.
        position: usize,
    },

    /// The digest string decoded to the wrong number of bytes.
    #[error("digest must be exactly {expected} hex chars, got {actual}")]
    InvalidLength {
        /// Expected number of hex characters.
        expected: usize,
        /// Actual number of hex characters.
        actual: usize,
    },
}
