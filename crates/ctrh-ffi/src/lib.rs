//! # ctrh-ffi — C ABI
//!
//! Exposes the stable integer-status surface consumed by bindings and other
//! foreign callers:
//!
//! ```c
//! size_t ctrh_normalize(const uint8_t *in, size_t in_len, uint8_t *out, size_t out_cap);
//! int    ctrh_hash_once(const uint8_t *in, size_t in_len, uint8_t out[32]);
//! ctrh_context *ctrh_context_new(void);
//! int    ctrh_context_update(ctrh_context *ctx, const uint8_t *chunk, size_t len);
//! int    ctrh_context_final(ctrh_context *ctx, uint8_t out[32]);
//! void   ctrh_context_free(ctrh_context *ctx);
//! ```
//!
//! ## Status Codes
//!
//! `0` success, `-1` null argument, `-2` allocation failure, `-3` context
//! already finalized. Arguments are validated before any side effect.
//!
//! ## Handle Lifecycle
//!
//! The handle owns an `Option<StreamingContext>`. `ctrh_context_final` takes
//! the context out, hashes, and lets it scrub itself; from then on the slot
//! is empty and `update`/`final` return `-3`. `ctrh_context_free` scrubs any
//! still-held input before releasing the handle.
//!
//! ## Crate Policy
//!
//! - `unsafe` is confined to pointer-to-slice conversion and handle
//!   ownership transfer, and every block carries a `// SAFETY:` note.

use std::os::raw::c_int;

use ctrh_core::{normalize_ascii, HashError, ResumeDigest, DIGEST_LEN, STATUS_OK};
use ctrh_crypto::{hash_once, StreamingContext};

/// Digest length written by `ctrh_hash_once` and `ctrh_context_final`.
pub const CTRH_HASH_LEN: usize = DIGEST_LEN;

/// Success.
pub const CTRH_OK: c_int = STATUS_OK;

/// A required pointer was null.
pub const CTRH_ERR_INVALID_ARGUMENT: c_int = -1;

/// Scratch or accumulation memory could not be obtained.
pub const CTRH_ERR_ALLOCATION: c_int = -2;

/// The context has already been finalized.
pub const CTRH_ERR_FINALIZED: c_int = -3;

/// Opaque streaming handle.
pub struct CtrhContext {
    inner: Option<StreamingContext>,
}

fn status(err: &HashError) -> c_int {
    err.status_code()
}

/// Copy a digest into a caller buffer.
///
/// # Safety
///
/// `out` must be valid for writes of [`CTRH_HASH_LEN`] bytes.
unsafe fn write_digest(digest: &ResumeDigest, out: *mut u8) {
    // SAFETY: the caller guarantees `out` points to CTRH_HASH_LEN writable
    // bytes; the source is a distinct stack value so the ranges cannot overlap.
    unsafe { std::ptr::copy_nonoverlapping(digest.as_bytes().as_ptr(), out, CTRH_HASH_LEN) };
}

/// Normalize `input` into `out`, NUL-terminated.
///
/// Returns the number of canonical bytes written (terminator excluded), or
/// 0 without writing if either pointer is null or `out_cap` is 0. Output is
/// silently truncated when `out_cap` is too small.
///
/// # Safety
///
/// `input` must be valid for reads of `input_len` bytes and `out` valid for
/// writes of `out_cap` bytes, and the two ranges must not overlap.
#[no_mangle]
pub unsafe extern "C" fn ctrh_normalize(
    input: *const u8,
    input_len: usize,
    out: *mut u8,
    out_cap: usize,
) -> usize {
    if input.is_null() || out.is_null() || out_cap == 0 {
        return 0;
    }
    // SAFETY: both pointers are non-null and the caller guarantees the
    // stated lengths and that the regions do not overlap.
    let (input, out) = unsafe {
        (
            std::slice::from_raw_parts(input, input_len),
            std::slice::from_raw_parts_mut(out, out_cap),
        )
    };
    normalize_ascii(input, out)
}

/// Normalize and hash `input`, writing 32 bytes to `out`.
///
/// # Safety
///
/// `input` must be valid for reads of `input_len` bytes and `out` valid for
/// writes of 32 bytes.
#[no_mangle]
pub unsafe extern "C" fn ctrh_hash_once(input: *const u8, input_len: usize, out: *mut u8) -> c_int {
    if input.is_null() || out.is_null() {
        return CTRH_ERR_INVALID_ARGUMENT;
    }
    // SAFETY: non-null, and the caller guarantees `input_len` readable bytes.
    let input = unsafe { std::slice::from_raw_parts(input, input_len) };
    match hash_once(input) {
        Ok(digest) => {
            // SAFETY: non-null, and the caller guarantees 32 writable bytes.
            unsafe { write_digest(&digest, out) };
            CTRH_OK
        }
        Err(e) => status(&e),
    }
}

/// Create an empty streaming context. Release it with `ctrh_context_free`.
#[no_mangle]
pub extern "C" fn ctrh_context_new() -> *mut CtrhContext {
    Box::into_raw(Box::new(CtrhContext {
        inner: Some(StreamingContext::new()),
    }))
}

/// Append `chunk_len` bytes to the context.
///
/// # Safety
///
/// `ctx` must come from `ctrh_context_new` and not yet be freed; `chunk`
/// must be valid for reads of `chunk_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn ctrh_context_update(
    ctx: *mut CtrhContext,
    chunk: *const u8,
    chunk_len: usize,
) -> c_int {
    if ctx.is_null() || chunk.is_null() {
        return CTRH_ERR_INVALID_ARGUMENT;
    }
    // SAFETY: non-null, created by ctrh_context_new, and exclusively
    // borrowed for the duration of this call per the single-writer contract.
    let ctx = unsafe { &mut *ctx };
    let Some(stream) = ctx.inner.as_mut() else {
        return CTRH_ERR_FINALIZED;
    };
    // SAFETY: non-null, and the caller guarantees `chunk_len` readable bytes.
    let chunk = unsafe { std::slice::from_raw_parts(chunk, chunk_len) };
    match stream.update(chunk) {
        Ok(()) => CTRH_OK,
        Err(e) => status(&e),
    }
}

/// Hash everything appended, write 32 bytes to `out`, and scrub the
/// accumulated input. The context cannot be updated or finalized again.
///
/// # Safety
///
/// `ctx` must come from `ctrh_context_new` and not yet be freed; `out` must
/// be valid for writes of 32 bytes.
#[no_mangle]
pub unsafe extern "C" fn ctrh_context_final(ctx: *mut CtrhContext, out: *mut u8) -> c_int {
    if ctx.is_null() || out.is_null() {
        return CTRH_ERR_INVALID_ARGUMENT;
    }
    // SAFETY: as in ctrh_context_update.
    let ctx = unsafe { &mut *ctx };
    let Some(stream) = ctx.inner.take() else {
        return CTRH_ERR_FINALIZED;
    };
    match stream.finalize() {
        Ok(digest) => {
            // SAFETY: non-null, and the caller guarantees 32 writable bytes.
            unsafe { write_digest(&digest, out) };
            CTRH_OK
        }
        Err(e) => {
            tracing::debug!(error = %e, "streaming finalize failed");
            status(&e)
        }
    }
}

/// Scrub and release the context. Null is a no-op.
///
/// # Safety
///
/// `ctx` must be null or come from `ctrh_context_new` and not yet be freed.
#[no_mangle]
pub unsafe extern "C" fn ctrh_context_free(ctx: *mut CtrhContext) {
    if ctx.is_null() {
        return;
    }
    // SAFETY: the pointer came from Box::into_raw in ctrh_context_new and
    // ownership returns to us exactly once.
    drop(unsafe { Box::from_raw(ctx) });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_constants_match_error_codes() {
        assert_eq!(
            CTRH_ERR_INVALID_ARGUMENT,
            HashError::InvalidArgument("x").status_code()
        );
        assert_eq!(
            CTRH_ERR_ALLOCATION,
            HashError::Allocation { requested: 0 }.status_code()
        );
        assert_eq!(CTRH_ERR_FINALIZED, HashError::Finalized.status_code());
        assert_eq!(CTRH_OK, 0);
    }
}
