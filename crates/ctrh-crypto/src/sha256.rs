//! # SHA-256 Digest Engine
//!
//! FIPS 180-4 SHA-256 implemented from scratch: 64-byte blocks, eight
//! 32-bit state words, 64 rounds, Merkle–Damgård padding with a 64-bit
//! big-endian bit length, big-endian output serialization.
//!
//! ## Security Invariant
//!
//! The block buffer and message schedule hold canonical plaintext. The
//! schedule is zero-filled after each compression and the whole state is
//! zero-filled on drop, including after [`Sha256::finalize`].
//!
//! The round-constant table is immutable static data.

use ctrh_core::{CanonicalText, ResumeDigest, DIGEST_LEN};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Block size in bytes.
pub const BLOCK_LEN: usize = 64;

/// Offset within the final block where the 64-bit length field starts.
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

const H0: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Compress one 64-byte block into `state`.
fn compress(state: &mut [u32; 8], block: &[u8]) {
    debug_assert_eq!(block.len(), BLOCK_LEN);

    let mut w = [0u32; 64];
    for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    for i in 16..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for i in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(K[i])
            .wrapping_add(w[i]);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s = s.wrapping_add(v);
    }

    w.zeroize();
}

/// Incremental SHA-256 state.
///
/// `finalize` consumes the state, so it cannot be updated afterwards.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Sha256 {
    state: [u32; 8],
    block: [u8; BLOCK_LEN],
    block_len: usize,
    bit_len: u64,
}

impl Sha256 {
    /// A fresh state loaded with the initialization constants.
    pub fn new() -> Self {
        Self {
            state: H0,
            block: [0u8; BLOCK_LEN],
            block_len: 0,
            bit_len: 0,
        }
    }

    /// Absorb `data`. Handles partial blocks, multi-block input and empty
    /// input; the bit counter advances by `data.len() * 8` regardless.
    pub fn update(&mut self, mut data: &[u8]) {
        self.bit_len = self
            .bit_len
            .wrapping_add((data.len() as u64).wrapping_mul(8));

        if self.block_len > 0 {
            let take = (BLOCK_LEN - self.block_len).min(data.len());
            self.block[self.block_len..self.block_len + take].copy_from_slice(&data[..take]);
            self.block_len += take;
            data = &data[take..];
            if self.block_len < BLOCK_LEN {
                return;
            }
            compress(&mut self.state, &self.block);
            self.block_len = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.block[..rest.len()].copy_from_slice(rest);
        self.block_len = rest.len();
    }

    /// Pad, compress the final block(s), and serialize the state big-endian.
    pub fn finalize(mut self) -> [u8; DIGEST_LEN] {
        let bit_len = self.bit_len;
        let mut pos = self.block_len;

        self.block[pos] = 0x80;
        pos += 1;

        // No room for the length field: pad out this block and start another.
        if pos > LENGTH_OFFSET {
            self.block[pos..].fill(0);
            compress(&mut self.state, &self.block);
            pos = 0;
        }

        self.block[pos..LENGTH_OFFSET].fill(0);
        self.block[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut self.state, &self.block);

        let mut out = [0u8; DIGEST_LEN];
        for (bytes, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
            bytes.copy_from_slice(&word.to_be_bytes());
        }
        out
    }

    /// Number of bytes absorbed so far.
    pub fn bytes_absorbed(&self) -> u64 {
        self.bit_len / 8
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256")
            .field("bytes_absorbed", &self.bytes_absorbed())
            .finish_non_exhaustive()
    }
}

/// One-shot SHA-256 of raw bytes.
pub fn sha256(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize()
}

/// Digest canonical text.
///
/// Accepts only `&CanonicalText`, so every résumé digest flows through
/// normalization.
pub fn sha256_digest(text: &CanonicalText) -> ResumeDigest {
    ResumeDigest::from_bytes(sha256(text.as_bytes()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use sha2::Digest as _;

    proptest! {
        /// The engine agrees with the `sha2` crate for arbitrary input and
        /// arbitrary chunking.
        #[test]
        fn matches_sha2_crate(
            data in prop::collection::vec(any::<u8>(), 0..600),
            chunk in 1usize..130,
        ) {
            let expected: [u8; 32] = sha2::Sha256::digest(&data).into();
            let mut hasher = Sha256::new();
            for piece in data.chunks(chunk) {
                hasher.update(piece);
            }
            prop_assert_eq!(hasher.finalize(), expected);
        }
    }
}
