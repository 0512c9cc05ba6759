/// Smallest multiple of `multiple` that is greater than or equal to `n`,
/// or `None` if that multiple does not fit in a `u64`.
///
/// A `multiple` of zero means "no constraint" and returns `n` as-is.
pub const fn checked_round_up(n: u64, multiple: u64) -> Option<u64> {
    if multiple == 0 {
        return Some(n);
    }

    match n % multiple {
        0 => Some(n),
        rem => n.checked_add(multiple - rem),
    }
}

/// Largest multiple of `multiple` that is less than or equal to `n`.
///
/// A `multiple` of zero means "no constraint" and returns `n` as-is.
pub const fn round_down(n: u64, multiple: u64) -> u64 {
    if multiple == 0 {
        return n;
    }

    n - n % multiple
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_multiple_is_identity() {
        assert_eq!(checked_round_up(13, 0), Some(13));
        assert_eq!(round_down(13, 0), 13);
    }

    #[test]
    fn exact_multiples_are_fixed_points() {
        for n in [0, 8, 16, 64] {
            assert_eq!(checked_round_up(n, 8), Some(n));
            assert_eq!(round_down(n, 8), n);
        }
    }

    #[test]
    fn rounds_to_neighbouring_multiples() {
        assert_eq!(checked_round_up(1, 8), Some(8));
        assert_eq!(round_down(15, 8), 8);
        assert_eq!(checked_round_up(33, 32), Some(64));
        assert_eq!(round_down(33, 32), 32);
    }

    #[test]
    fn non_power_of_two_multiple() {
        assert_eq!(checked_round_up(7, 3), Some(9));
        assert_eq!(round_down(7, 3), 6);
    }

    #[test]
    fn round_up_past_u64_is_none() {
        assert_eq!(checked_round_up(u64::MAX, 8), None);
        assert_eq!(checked_round_up(u64::MAX - 7, 8), Some(u64::MAX - 7));
        assert_eq!(checked_round_up(u64::MAX, 1), Some(u64::MAX));
    }
}
