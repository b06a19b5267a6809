//! Constant-time normalizer.
//!
//! Produces exactly the output of [`super::reference::normalize_ref`], but
//! every per-byte decision is a [`subtle::Choice`] and every iteration
//! performs the same operations: one read of the input byte, one
//! read-modify-write of the current output slot, and fixed flag updates.
//! The iteration count equals the input length, which is treated as public.
//!
//! The write at the candidate slot is a masked blend of the slot's previous
//! content and the new byte, never a conditional store. The slot index is
//! the running output length, so it advances by at most one per iteration.

use super::mask;

/// Normalize `input` into `out` without branching on input content.
///
/// Same contract as [`super::normalize_ref`]: returns the number of
/// canonical bytes, NUL-terminates, stops once a single slot remains, and
/// returns 0 when `out` is empty.
pub fn normalize_ct(input: &[u8], out: &mut [u8]) -> usize {
    let out_cap = out.len();
    if out_cap == 0 {
        return 0;
    }

    let mut out_idx = 0usize;
    let mut seen_non_ws = subtle::Choice::from(0);
    let mut last_space = subtle::Choice::from(0);

    for &byte in input {
        let is_space = mask::is_whitespace(byte);
        let keep = is_space | !mask::is_control(byte);

        // Dropped controls become 0, which no later step reclassifies.
        let mut ch = mask::select(0, byte, keep);
        ch = mask::select(ch, b'?', mask::is_non_ascii(ch));
        ch ^= mask::select(0, 0x20, mask::is_upper(ch));
        ch = mask::select(ch, b' ', is_space);

        let emit_space = is_space & !last_space & seen_non_ws;
        let emit_char = !is_space & keep;
        let emit = (emit_space | emit_char) & mask::has_room(out_idx, out_cap);

        // out_idx < out_cap holds throughout: it only advances with room.
        out[out_idx] = mask::select(out[out_idx], ch, emit);
        out_idx += mask::to_usize(emit);

        last_space = mask::select_flag(last_space, is_space, emit_char | emit_space);
        seen_non_ws |= emit_char;
    }

    let prev = out_idx.saturating_sub(1);
    let trailing_space = mask::is_nonzero(out_idx) & subtle::ConstantTimeEq::ct_eq(&out[prev], &b' ');
    out_idx -= mask::to_usize(trailing_space);

    out[out_idx] = 0;
    out_idx
}
