//! # Streaming Context
//!
//! Accumulates raw chunks, then runs the one-shot pipeline over the whole
//! buffer at finalize time. Normalization is not incremental: whitespace
//! collapsing and the trailing-space trim need the complete input.
//!
//! ## Lifecycle
//!
//! `new` (empty, no allocation) → `update`* → `finalize`.
//!
//! `finalize` takes the context by value, so a finalized context cannot be
//! updated or finalized again. The accumulated plaintext lives in a
//! [`SecretBuffer`] and is scrubbed when the context is finalized or dropped,
//! whichever happens first.

use ctrh_core::{HashError, NormalizerKind, ResumeDigest, SecretBuffer};

use crate::pipeline::hash_once_with;

/// Exclusive owner of accumulated pre-normalization input.
///
/// Not `Clone`: the plaintext has exactly one owner.
#[derive(Debug)]
pub struct StreamingContext {
    buffer: SecretBuffer,
    normalizer: NormalizerKind,
}

impl StreamingContext {
    /// An empty context using the build-configured normalizer.
    pub fn new() -> Self {
        Self::with_normalizer(NormalizerKind::default())
    }

    /// An empty context using `normalizer` at finalize time.
    pub fn with_normalizer(normalizer: NormalizerKind) -> Self {
        Self {
            buffer: SecretBuffer::new(),
            normalizer,
        }
    }

    /// Append `chunk`.
    ///
    /// Capacity doubles from 256 bytes whenever the accumulated length would
    /// exceed it.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Allocation`] if the buffer cannot grow. Data
    /// appended by earlier calls is kept intact.
    pub fn update(&mut self, chunk: &[u8]) -> Result<(), HashError> {
        self.buffer.extend_from_slice(chunk)
    }

    /// Normalize and hash everything appended so far, then scrub and
    /// release the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Allocation`] if the normalization scratch buffer
    /// cannot be obtained. The accumulated input is scrubbed regardless.
    pub fn finalize(self) -> Result<ResumeDigest, HashError> {
        tracing::debug!(
            normalizer = %self.normalizer,
            accumulated = self.buffer.len(),
            "finalizing streaming context"
        );
        hash_once_with(self.normalizer, self.buffer.as_slice())
        // `self.buffer` drops here and zero-fills its allocation.
    }

    /// Bytes accumulated so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Currently allocated capacity.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The normalizer applied at finalize time.
    pub fn normalizer(&self) -> NormalizerKind {
        self.normalizer
    }
}

impl Default for StreamingContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::hash_once;

    const HELLO_WORLD: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn two_chunks_match_known_vector() {
        let mut ctx = StreamingContext::new();
        ctx.update(b"Hello").unwrap();
        ctx.update(b"\nWorld").unwrap();
        assert_eq!(ctx.finalize().unwrap().to_hex(), HELLO_WORLD);
    }

    #[test]
    fn new_context_is_empty_and_unallocated() {
        let ctx = StreamingContext::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.len(), 0);
        assert_eq!(ctx.capacity(), 0);
        assert_eq!(ctx.normalizer(), NormalizerKind::default());
    }

    #[test]
    fn finalize_without_updates_is_empty_digest() {
        assert_eq!(StreamingContext::new().finalize().unwrap().to_hex(), EMPTY);
    }

    #[test]
    fn capacity_starts_at_minimum_and_doubles() {
        let mut ctx = StreamingContext::new();
        ctx.update(b"a").unwrap();
        let first = ctx.capacity();
        assert!(first >= SecretBuffer::MIN_CAPACITY);
        ctx.update(&vec![b'b'; first]).unwrap();
        assert!(ctx.capacity() >= first * 2);
        assert_eq!(ctx.len(), first + 1);
    }

    #[test]
    fn whitespace_split_across_chunks_collapses() {
        let mut ctx = StreamingContext::new();
        for chunk in [&b"Senior "[..], b" ", b"\tENGINEER", b"  "] {
            ctx.update(chunk).unwrap();
        }
        assert_eq!(ctx.finalize().unwrap(), hash_once(b"senior engineer").unwrap());
    }

    #[test]
    fn dropping_without_finalize_is_fine() {
        let mut ctx = StreamingContext::with_normalizer(NormalizerKind::Reference);
        ctx.update(b"never finalized").unwrap();
        drop(ctx);
    }
}
