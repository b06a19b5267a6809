//! # Streaming / One-Shot Equivalence Tests
//!
//! The streaming path only defers normalization and hashing until every
//! chunk is collected, so for any split of a message the streamed digest
//! must equal the one-shot digest. These tests also pin the pipeline to an
//! independent SHA-256 (`sha2`) applied to the reference canonical form.

use ctrh_crypto::{hash_once, hash_once_with, HashPipeline, NormalizerKind, StreamingContext};
use ctrh_core::Normalizer;
use proptest::prelude::*;
use sha2::Digest as _;

/// Helper: digest computed independently of this crate's engine.
fn independent_digest(input: &[u8]) -> [u8; 32] {
    let canonical = NormalizerKind::Reference
        .normalize(input)
        .expect("normalization should allocate");
    sha2::Sha256::digest(canonical.as_bytes()).into()
}

fn stream(kind: NormalizerKind, chunks: &[&[u8]]) -> [u8; 32] {
    let mut ctx = StreamingContext::with_normalizer(kind);
    for chunk in chunks {
        ctx.update(chunk).expect("update should succeed");
    }
    ctx.finalize().expect("finalize should succeed").into_bytes()
}

// ---------------------------------------------------------------------------
// Fixed vectors
// ---------------------------------------------------------------------------

#[test]
fn test_hello_world_every_split() {
    let message = b"Hello\nWorld";
    let expected = hash_once(message).unwrap();
    for split in 0..=message.len() {
        let (a, b) = message.split_at(split);
        for kind in NormalizerKind::ALL {
            assert_eq!(stream(kind, &[a, b]), expected.into_bytes(), "{kind} split {split}");
        }
    }
}

#[test]
fn test_resume_body_matches_independent_digest() {
    let body = b"JANE DOE\r\n\r\nExperience:\n\t- Senior  ENGINEER @ Acme\xc2\xa0Corp\n\x07\n";
    let expected = independent_digest(body);
    assert_eq!(hash_once(body).unwrap().into_bytes(), expected);
    assert_eq!(stream(NormalizerKind::ConstantTime, &[&body[..10], &body[10..]]), expected);
}

#[test]
fn test_chunks_larger_than_minimum_capacity() {
    let body: Vec<u8> = b"Lorem IPSUM\tdolor  sit amet\n"
        .iter()
        .copied()
        .cycle()
        .take(5000)
        .collect();
    let expected = hash_once(&body).unwrap().into_bytes();
    let chunks: Vec<&[u8]> = body.chunks(700).collect();
    assert_eq!(stream(NormalizerKind::default(), &chunks), expected);
}

#[test]
fn test_pipeline_stream_uses_configured_normalizer() {
    let pipeline = HashPipeline::new(NormalizerKind::Reference);
    let mut ctx = pipeline.stream();
    assert_eq!(ctx.normalizer(), NormalizerKind::Reference);
    ctx.update(b"A  B").unwrap();
    assert_eq!(ctx.finalize().unwrap(), hash_once_with(NormalizerKind::ConstantTime, b"a b").unwrap());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Any two-way split streams to the one-shot digest.
    #[test]
    fn two_way_split_matches_one_shot(
        message in prop::collection::vec(any::<u8>(), 0..400),
        split_seed in any::<usize>(),
    ) {
        let split = split_seed % (message.len() + 1);
        let (m1, m2) = message.split_at(split);
        let expected = hash_once(&message).unwrap().into_bytes();
        prop_assert_eq!(stream(NormalizerKind::Reference, &[m1, m2]), expected);
        prop_assert_eq!(stream(NormalizerKind::ConstantTime, &[m1, m2]), expected);
    }

    /// Arbitrary chunk sizes, including chunks that cross the growth
    /// thresholds, stream to the same digest.
    #[test]
    fn many_chunks_match_one_shot(
        message in prop::collection::vec(any::<u8>(), 0..2000),
        chunk in 1usize..600,
    ) {
        let chunks: Vec<&[u8]> = message.chunks(chunk).collect();
        let expected = hash_once(&message).unwrap().into_bytes();
        prop_assert_eq!(stream(NormalizerKind::default(), &chunks), expected);
    }

    /// The full pipeline equals an independent SHA-256 of the canonical form.
    #[test]
    fn pipeline_matches_independent_digest(message in prop::collection::vec(any::<u8>(), 0..400)) {
        for kind in NormalizerKind::ALL {
            prop_assert_eq!(
                hash_once_with(kind, &message).unwrap().into_bytes(),
                independent_digest(&message)
            );
        }
    }
}
