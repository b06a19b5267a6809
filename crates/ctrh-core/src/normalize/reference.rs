//! Branching reference normalizer.
//!
//! Readable single pass used for testing and as the equivalence oracle for
//! the constant-time variant. Control flow depends on byte values, so it
//! must not be used where input content is secret from timing observers.

/// Normalize `input` into `out`, returning the number of canonical bytes.
///
/// Writes a NUL terminator after the canonical bytes when room remains and
/// stops writing once a single slot is left. Returns 0 without writing when
/// `out` is empty.
pub fn normalize_ref(input: &[u8], out: &mut [u8]) -> usize {
    let out_cap = out.len();
    if out_cap == 0 {
        return 0;
    }

    let mut out_idx = 0;
    let mut seen_non_ws = false;
    let mut last_space = false;

    for &byte in input {
        let ch = match byte {
            b' ' | b'\t' | b'\n' | b'\r' | 0x0c => b' ',
            0x00..=0x1f => continue,
            0x7f..=0xff => b'?',
            b'A'..=b'Z' => byte | 0x20,
            _ => byte,
        };

        let space = ch == b' ';
        if space {
            if !seen_non_ws || last_space {
                continue;
            }
        } else {
            seen_non_ws = true;
        }

        if out_idx + 1 >= out_cap {
            break;
        }

        out[out_idx] = ch;
        out_idx += 1;
        last_space = space;
    }

    if out_idx > 0 && out[out_idx - 1] == b' ' {
        out_idx -= 1;
    }

    if out_idx < out_cap {
        out[out_idx] = 0;
    }

    out_idx
}
