//! # Text Normalization — Canonical ASCII Form
//!
//! Maps raw bytes to the canonical form that gets hashed:
//!
//! 1. Space, tab, LF, CR and form feed become a single space; every other
//!    byte below 0x20 is dropped without leaving a separator.
//! 2. Bytes above 0x7e become `?`, one per byte.
//! 3. ASCII uppercase folds to lowercase.
//! 4. Runs of whitespace collapse to one space; leading and trailing
//!    whitespace is removed.
//! 5. Writing stops once the output has a single slot left, which is
//!    reserved for a NUL terminator. Truncation is silent and the returned
//!    length is the only signal.
//!
//! Two implementations share this contract. [`NormalizerKind::Reference`]
//! branches freely and is the oracle; [`NormalizerKind::ConstantTime`] is
//! branch-free over byte values. They must agree byte-for-byte, including
//! the truncation point, for every input and every output capacity.

mod constant_time;
mod mask;
mod reference;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalText;
use crate::error::{HashError, ParseError};
use crate::secret::SecretBuffer;

pub use constant_time::normalize_ct;
pub use reference::normalize_ref;

/// Extra scratch bytes beyond the input length: growth margin plus the
/// terminator slot.
pub const SCRATCH_MARGIN: usize = 2;

/// A strategy for canonicalizing text.
pub trait Normalizer {
    /// Normalize `input` into the caller-provided `out`.
    ///
    /// Returns the number of canonical bytes written, terminator excluded.
    /// Returns 0 without writing when `out` is empty.
    fn normalize_into(&self, input: &[u8], out: &mut [u8]) -> usize;

    /// Normalize `input` into an owned, scrubbed-on-drop [`CanonicalText`].
    ///
    /// The scratch buffer is sized `input.len() + 2`, so the result is never
    /// truncated.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Allocation`] if scratch memory cannot be obtained.
    fn normalize(&self, input: &[u8]) -> Result<CanonicalText, HashError> {
        let capacity = input
            .len()
            .checked_add(SCRATCH_MARGIN)
            .ok_or(HashError::Allocation {
                requested: usize::MAX,
            })?;
        let mut scratch = SecretBuffer::zeroed(capacity)?;
        let written = self.normalize_into(input, scratch.as_mut_slice());
        scratch.truncate(written);
        Ok(CanonicalText::from_normalized(scratch))
    }
}

/// The two interchangeable normalizer implementations.
///
/// The default is fixed at build time: `ConstantTime`, or `Reference` when
/// the `reference-default` feature is enabled. Callers that need a
/// particular variant name it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizerKind {
    /// Branching implementation; readable, not timing-safe.
    Reference,
    /// Branch-free implementation; timing depends only on input length.
    ConstantTime,
}

impl NormalizerKind {
    /// Both variants, reference first.
    pub const ALL: [NormalizerKind; 2] = [Self::Reference, Self::ConstantTime];

    /// Returns the variant identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::ConstantTime => "constant-time",
        }
    }
}

impl Default for NormalizerKind {
    #[cfg(feature = "reference-default")]
    fn default() -> Self {
        Self::Reference
    }

    #[cfg(not(feature = "reference-default"))]
    fn default() -> Self {
        Self::ConstantTime
    }
}

impl std::fmt::Display for NormalizerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizerKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reference" | "ref" => Ok(Self::Reference),
            "constant-time" | "constant_time" | "ct" => Ok(Self::ConstantTime),
            other => Err(ParseError::UnknownNormalizer(other.to_string())),
        }
    }
}

impl Normalizer for NormalizerKind {
    fn normalize_into(&self, input: &[u8], out: &mut [u8]) -> usize {
        match self {
            Self::Reference => normalize_ref(input, out),
            Self::ConstantTime => normalize_ct(input, out),
        }
    }
}

/// Normalize with the build-configured default variant.
pub fn normalize_ascii(input: &[u8], out: &mut [u8]) -> usize {
    NormalizerKind::default().normalize_into(input, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(kind: NormalizerKind, input: &[u8]) -> Vec<u8> {
        kind.normalize(input)
            .expect("normalization should allocate")
            .as_bytes()
            .to_vec()
    }

    fn check_case(input: &[u8], expected: &[u8]) {
        for kind in NormalizerKind::ALL {
            assert_eq!(
                canonical(kind, input),
                expected,
                "{kind} on {:?}",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn known_cases() {
        check_case(b"", b"");
        check_case(b"   ", b"");
        check_case(b"Hello World", b"hello world");
        check_case(b"Hello   World", b"hello world");
        check_case(b" Hello\tWorld\n", b"hello world");
        check_case(b"Mixed\tCASE\r\n", b"mixed case");
        check_case(b"  Senior ENGINEER\twith\n  spacing  ", b"senior engineer with spacing");
        check_case(b"CTRL\x01\x02abc", b"ctrlabc");
    }

    #[test]
    fn non_ascii_is_replaced_per_byte() {
        // U+00E9 is two bytes in UTF-8.
        check_case("UTF8 \u{e9}".as_bytes(), b"utf8 ??");
        check_case("UTF8 áéí".as_bytes(), b"utf8 ??????");
    }

    #[test]
    fn whitespace_between_controls_still_collapses() {
        check_case(b"a \x01 b", b"a b");
        check_case(b"\x01 a", b"a");
    }

    #[test]
    fn form_feed_is_whitespace() {
        check_case(b"page\x0cbreak", b"page break");
    }

    #[test]
    fn default_follows_build_feature() {
        let expected = if cfg!(feature = "reference-default") {
            NormalizerKind::Reference
        } else {
            NormalizerKind::ConstantTime
        };
        assert_eq!(NormalizerKind::default(), expected);
    }

    #[test]
    fn normalize_ascii_uses_default_kind() {
        let mut out = [0u8; 16];
        let n = normalize_ascii(b" A  B ", &mut out);
        assert_eq!(&out[..n], b"a b");
    }

    #[test]
    fn kind_parses_and_displays() {
        assert_eq!("reference".parse::<NormalizerKind>().unwrap(), NormalizerKind::Reference);
        assert_eq!("CT".parse::<NormalizerKind>().unwrap(), NormalizerKind::ConstantTime);
        assert_eq!(
            "constant-time".parse::<NormalizerKind>().unwrap(),
            NormalizerKind::ConstantTime
        );
        assert!(matches!(
            "fast".parse::<NormalizerKind>(),
            Err(ParseError::UnknownNormalizer(_))
        ));
        for kind in NormalizerKind::ALL {
            assert_eq!(kind.to_string().parse::<NormalizerKind>().unwrap(), kind);
        }
    }

    #[test]
    fn kind_serde_uses_kebab_case() {
        let json = serde_json::to_string(&NormalizerKind::ConstantTime).unwrap();
        assert_eq!(json, "\"constant-time\"");
        let back: NormalizerKind = serde_json::from_str("\"reference\"").unwrap();
        assert_eq!(back, NormalizerKind::Reference);
    }
}
