//! # Résumé Digest — Content-Addressed Identifier
//!
//! A fixed 32-byte, unkeyed, deterministic digest of canonical text. There
//! is no algorithm tag or version field: callers that depend on stability
//! across releases rely on the normalization contract instead.
//!
//! Equality is constant-time so that comparing a candidate digest against a
//! stored one does not leak the length of the common prefix.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;

use crate::error::ParseError;

/// Digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// A 32-byte digest of canonical text.
#[derive(Debug, Clone, Copy)]
pub struct ResumeDigest([u8; DIGEST_LEN]);

impl ResumeDigest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Consume into the raw bytes.
    pub fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse exactly 64 hex characters (either case, surrounding whitespace
    /// ignored).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidLength`] or [`ParseError::InvalidHex`].
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        if s.len() != DIGEST_LEN * 2 {
            return Err(ParseError::InvalidLength {
                expected: DIGEST_LEN * 2,
                actual: s.len(),
            });
        }
        let mut bytes = [0u8; DIGEST_LEN];
        for (i, pair) in s.as_bytes().chunks_exact(2).enumerate() {
            let hi = hex_value(pair[0]).ok_or(ParseError::InvalidHex { position: i * 2 })?;
            let lo = hex_value(pair[1]).ok_or(ParseError::InvalidHex {
                position: i * 2 + 1,
            })?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl ConstantTimeEq for ResumeDigest {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for ResumeDigest {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Eq for ResumeDigest {}

impl AsRef<[u8]> for ResumeDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for ResumeDigest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for ResumeDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ResumeDigest {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ResumeDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ResumeDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
