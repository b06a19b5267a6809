//! # One-Shot Pipeline
//!
//! raw bytes → normalizer → canonical bytes → SHA-256 → 32-byte digest.
//!
//! The scratch buffer is sized `input.len() + 2` and scrubbed on every exit
//! path by [`SecretBuffer`](ctrh_core::SecretBuffer)'s drop hook. Only the
//! normalized length is hashed, never the scratch capacity.

use ctrh_core::{HashError, Normalizer, NormalizerKind, ResumeDigest};
use serde::{Deserialize, Serialize};

use crate::sha256::sha256_digest;
use crate::stream::StreamingContext;

/// Normalize and hash `input` with the build-configured normalizer.
///
/// # Errors
///
/// Returns [`HashError::Allocation`] if scratch memory cannot be obtained.
pub fn hash_once(input: &[u8]) -> Result<ResumeDigest, HashError> {
    hash_once_with(NormalizerKind::default(), input)
}

/// Normalize with `normalizer`, then hash.
///
/// # Errors
///
/// Returns [`HashError::Allocation`] if scratch memory cannot be obtained.
pub fn hash_once_with(normalizer: NormalizerKind, input: &[u8]) -> Result<ResumeDigest, HashError> {
    let canonical = normalizer.normalize(input)?;
    let digest = sha256_digest(&canonical);
    tracing::trace!(
        %normalizer,
        input_len = input.len(),
        canonical_len = canonical.len(),
        "hashed input"
    );
    Ok(digest)
}

/// Hashing configuration shared by one-shot and streaming paths.
///
/// Deserializable so the normalizer choice can come from a config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashPipeline {
    /// Which normalizer canonicalizes input before hashing.
    pub normalizer: NormalizerKind,
}

impl HashPipeline {
    /// A pipeline using `normalizer`.
    pub fn new(normalizer: NormalizerKind) -> Self {
        Self { normalizer }
    }

    /// One-shot digest of `input`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Allocation`] if scratch memory cannot be obtained.
    pub fn hash(&self, input: &[u8]) -> Result<ResumeDigest, HashError> {
        hash_once_with(self.normalizer, input)
    }

    /// Canonical form of `input` under this pipeline's normalizer.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Allocation`] if scratch memory cannot be obtained.
    pub fn normalize(&self, input: &[u8]) -> Result<ctrh_core::CanonicalText, HashError> {
        self.normalizer.normalize(input)
    }

    /// An empty streaming context that finalizes with this pipeline.
    pub fn stream(&self) -> StreamingContext {
        StreamingContext::with_normalizer(self.normalizer)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Equal canonical forms always give equal digests, and the digest
        /// is exactly SHA-256 of the canonical form.
        #[test]
        fn digest_is_hash_of_canonical_form(
            a in prop::collection::vec(any::<u8>(), 0..200),
            b in prop::collection::vec(any::<u8>(), 0..200),
        ) {
            let na = NormalizerKind::Reference.normalize(&a).unwrap();
            let nb = NormalizerKind::Reference.normalize(&b).unwrap();
            let ha = hash_once(&a).unwrap();
            let hb = hash_once(&b).unwrap();
            prop_assert_eq!(ha.into_bytes(), crate::sha256::sha256(na.as_bytes()));
            prop_assert_eq!(na == nb, ha == hb);
        }
    }
}
