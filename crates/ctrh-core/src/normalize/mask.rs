//! Branch-free byte classification and selection.
//!
//! Every helper returns or consumes a [`subtle::Choice`], whose operations
//! are implemented with bitwise arithmetic behind an optimization barrier.
//! Nothing here may branch or index on a byte value.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess};

/// Space, tab, line feed, carriage return, or form feed.
#[inline]
pub(crate) fn is_whitespace(ch: u8) -> Choice {
    ch.ct_eq(&b' ') | ch.ct_eq(&b'\t') | ch.ct_eq(&b'\n') | ch.ct_eq(&b'\r') | ch.ct_eq(&0x0c)
}

/// Below 0x20.
#[inline]
pub(crate) fn is_control(ch: u8) -> Choice {
    ch.ct_lt(&0x20)
}

/// Above 0x7e (DEL and every non-ASCII byte).
#[inline]
pub(crate) fn is_non_ascii(ch: u8) -> Choice {
    ch.ct_gt(&0x7e)
}

/// `A`..=`Z`.
#[inline]
pub(crate) fn is_upper(ch: u8) -> Choice {
    !ch.ct_lt(&b'A') & !ch.ct_gt(&b'Z')
}

/// `new` when `choice` is set, `keep` otherwise.
#[inline]
pub(crate) fn select(keep: u8, new: u8, choice: Choice) -> u8 {
    u8::conditional_select(&keep, &new, choice)
}

/// Same as [`select`] for flags.
#[inline]
pub(crate) fn select_flag(keep: Choice, new: Choice, choice: Choice) -> Choice {
    Choice::from(select(keep.unwrap_u8(), new.unwrap_u8(), choice))
}

/// Whether position `out_idx` can take a byte while still leaving one slot
/// for the terminator.
#[inline]
pub(crate) fn has_room(out_idx: usize, out_cap: usize) -> Choice {
    (out_idx as u64 + 1).ct_lt(&(out_cap as u64))
}

/// Whether `n` is non-zero.
#[inline]
pub(crate) fn is_nonzero(n: usize) -> Choice {
    !(n as u64).ct_eq(&0)
}

/// `1` when set, `0` otherwise, for index arithmetic.
#[inline]
pub(crate) fn to_usize(choice: Choice) -> usize {
    usize::from(choice.unwrap_u8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(c: Choice) -> bool {
        c.unwrap_u8() == 1
    }

    #[test]
    fn classification_matches_branching_predicates() {
        for b in 0u8..=255 {
            assert_eq!(
                flag(is_whitespace(b)),
                matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0c),
                "whitespace {b:#04x}"
            );
            assert_eq!(flag(is_control(b)), b < 0x20, "control {b:#04x}");
            assert_eq!(flag(is_non_ascii(b)), b > 0x7e, "non-ascii {b:#04x}");
            assert_eq!(flag(is_upper(b)), b.is_ascii_uppercase(), "upper {b:#04x}");
        }
    }

    #[test]
    fn select_picks_by_choice() {
        assert_eq!(select(b'a', b'b', Choice::from(0)), b'a');
        assert_eq!(select(b'a', b'b', Choice::from(1)), b'b');
        assert!(flag(select_flag(Choice::from(0), Choice::from(1), Choice::from(1))));
        assert!(!flag(select_flag(Choice::from(0), Choice::from(1), Choice::from(0))));
    }

    #[test]
    fn room_reserves_terminator_slot() {
        assert!(flag(has_room(0, 2)));
        assert!(!flag(has_room(1, 2)));
        assert!(!flag(has_room(0, 1)));
    }

    #[test]
    fn nonzero_and_to_usize() {
        assert!(!flag(is_nonzero(0)));
        assert!(flag(is_nonzero(17)));
        assert_eq!(to_usize(Choice::from(1)), 1);
        assert_eq!(to_usize(Choice::from(0)), 0);
    }
}
