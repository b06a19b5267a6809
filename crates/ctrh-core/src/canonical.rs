//! # Canonical Text — Normalized Bytes for Digest Computation
//!
//! `CanonicalText` is the sole owned form of normalized text. Its inner
//! buffer is private and the only constructor is crate-internal, reached
//! through [`Normalizer::normalize`](crate::Normalizer::normalize). Any
//! function that hashes canonical text takes `&CanonicalText`, so a digest
//! can never be computed over bytes that skipped normalization.
//!
//! The bytes live in a [`SecretBuffer`] and are zero-filled on drop.

use crate::secret::SecretBuffer;

/// Normalized text: printable ASCII, lowercase, single interior spaces, no
/// leading or trailing space.
///
/// # Invariants
///
/// - Constructed only by a [`Normalizer`](crate::Normalizer).
/// - Every byte is in `0x20..=0x7e` and never uppercase.
/// - Scrubbed on drop.
pub struct CanonicalText(SecretBuffer);

impl CanonicalText {
    pub(crate) fn from_normalized(buffer: SecretBuffer) -> Self {
        Self(buffer)
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// The canonical text as a string slice.
    pub fn as_str(&self) -> &str {
        // ASCII by construction, so this never falls back.
        std::str::from_utf8(self.0.as_slice()).unwrap_or_default()
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if normalization removed everything.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalText {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for CanonicalText {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for CanonicalText {}

impl std::fmt::Debug for CanonicalText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanonicalText")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
