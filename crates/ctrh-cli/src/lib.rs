//! # ctrh-cli — Command-Line Front End for ct-resume-hash
//!
//! Provides the `ctrh` binary. Every subcommand reads résumé text from a file
//! or stdin through scrubbed buffers and never logs content, only sizes and
//! sources.
//!
//! ## Subcommands
//!
//! - `ctrh hash` — Print the digest, one-shot or `--stream`.
//! - `ctrh normalize` — Print the canonical text.
//! - `ctrh verify` — Check input against an expected digest.
//! - `ctrh compare` — Check whether two résumés canonicalize identically.
//!
//! ```bash
//! ctrh hash resume.txt
//! ctrh --normalizer reference hash --stream --chunk-size 4096 < resume.txt
//! ctrh verify --digest b94d27b9...cde9 resume.txt
//! ```

pub mod config;
pub mod hash;
pub mod input;
pub mod normalize;
pub mod verify;
