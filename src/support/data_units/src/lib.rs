mod rounding;

pub use rounding::{checked_round_up, round_down};
use std::ops::{Add, Sub, SubAssign};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ByteUnits {
    units: u64,
}

impl ByteUnits {
    pub const ZERO: Self = Self { units: 0 };
    pub const MAX: Self = Self { units: u64::MAX };

    pub const fn of(value: u64) -> Self {
        Self { units: value }
    }

    pub const fn bytes(&self) -> u64 {
        self.units
    }

    /// `None` when the bit count does not fit in a `u64`.
    pub fn checked_to_bits(self) -> Option<BitUnits> {
        self.units.checked_mul(8).map(BitUnits::of)
    }

    pub fn checked_mul(self, rhs: u64) -> Option<Self> {
        self.units.checked_mul(rhs).map(Self::of)
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BitUnits {
    units: u64,
}

impl BitUnits {
    pub const ZERO: Self = Self { units: 0 };

    pub const fn of(value: u64) -> Self {
        Self { units: value }
    }

    pub const fn bits(&self) -> u64 {
        self.units
    }

    /// Number of whole bytes needed to hold this many bits.
    pub fn to_bytes_rounded_up(self) -> ByteUnits {
        ByteUnits::of(self.units.div_ceil(8))
    }
}

macro_rules! impl_units_from {
    ($units:ty, $ty:ty) => {
        impl From<$ty> for $units {
            fn from(value: $ty) -> Self {
                Self {
                    units: value.into(),
                }
            }
        }
    };
}

impl_units_from!(ByteUnits, u8);
impl_units_from!(ByteUnits, u16);
impl_units_from!(ByteUnits, u32);
impl_units_from!(ByteUnits, u64);

impl_units_from!(BitUnits, u8);
impl_units_from!(BitUnits, u16);
impl_units_from!(BitUnits, u32);
impl_units_from!(BitUnits, u64);

impl TryFrom<BitUnits> for ByteUnits {
    type Error = ();

    fn try_from(value: BitUnits) -> Result<Self, ()> {
        if value.bits() % 8 == 0 {
            Ok(Self {
                units: value.bits() / 8,
            })
        } else {
            Err(())
        }
    }
}

macro_rules! impl_math_for {
    ($units:ty) => {
        impl $units {
            pub fn is_zero(&self) -> bool {
                self.units == 0
            }

            /// Smallest multiple of `multiple` that is not below `self`,
            /// or `None` on overflow. A zero `multiple` leaves the value untouched.
            pub fn checked_round_up(&self, multiple: $units) -> Option<$units> {
                checked_round_up(self.units, multiple.units).map(Self::of)
            }

            /// Largest multiple of `multiple` that is not above `self`.
            /// A zero `multiple` leaves the value untouched.
            pub fn round_down(&self, multiple: $units) -> $units {
                Self::of(round_down(self.units, multiple.units))
            }

            pub fn checked_add(&self, rhs: $units) -> Option<$units> {
                self.units.checked_add(rhs.units).map(Self::of)
            }

            pub fn checked_sub(&self, rhs: $units) -> Option<$units> {
                self.units.checked_sub(rhs.units).map(Self::of)
            }
        }

        impl Add<$units> for $units {
            type Output = $units;

            fn add(self, rhs: $units) -> Self::Output {
                Self {
                    units: self.units + rhs.units,
                }
            }
        }

        impl Sub<$units> for $units {
            type Output = $units;

            fn sub(self, rhs: $units) -> Self::Output {
                Self {
                    units: self.units - rhs.units,
                }
            }
        }

        impl SubAssign<$units> for $units {
            fn sub_assign(&mut self, rhs: $units) {
                self.units -= rhs.units
            }
        }
    };
}

impl_math_for!(ByteUnits);
impl_math_for!(BitUnits);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_and_bits_convert() {
        assert_eq!(ByteUnits::of(4).checked_to_bits(), Some(BitUnits::of(32)));
        assert_eq!(ByteUnits::try_from(BitUnits::of(24)), Ok(ByteUnits::of(3)));
        assert_eq!(ByteUnits::try_from(BitUnits::of(25)), Err(()));
        assert_eq!(BitUnits::of(25).to_bytes_rounded_up(), ByteUnits::of(4));
        assert_eq!(BitUnits::ZERO.to_bytes_rounded_up(), ByteUnits::ZERO);
    }

    #[test]
    fn bits_of_huge_sizes_do_not_fit() {
        let largest = ByteUnits::of(u64::MAX / 8);

        assert_eq!(
            largest.checked_to_bits(),
            Some(BitUnits::of(u64::MAX / 8 * 8))
        );
        assert_eq!(ByteUnits::of(u64::MAX / 8 + 1).checked_to_bits(), None);
        assert_eq!(ByteUnits::MAX.checked_to_bits(), None);
    }

    #[test]
    fn unit_rounding() {
        assert_eq!(
            ByteUnits::of(5).checked_round_up(ByteUnits::of(4)),
            Some(ByteUnits::of(8))
        );
        assert_eq!(ByteUnits::of(5).round_down(ByteUnits::of(4)), ByteUnits::of(4));
        assert_eq!(BitUnits::of(33).round_down(BitUnits::of(32)), BitUnits::of(32));
        assert_eq!(
            BitUnits::of(7).checked_round_up(BitUnits::ZERO),
            Some(BitUnits::of(7))
        );
        assert_eq!(ByteUnits::MAX.checked_round_up(ByteUnits::of(2)), None);
    }

    #[test]
    fn checked_arithmetic() {
        assert_eq!(ByteUnits::of(3).checked_sub(ByteUnits::of(4)), None);
        assert_eq!(
            ByteUnits::of(4).checked_sub(ByteUnits::of(3)),
            Some(ByteUnits::of(1))
        );
        assert_eq!(ByteUnits::MAX.checked_add(ByteUnits::of(1)), None);
        assert_eq!(ByteUnits::of(3).checked_mul(4), Some(ByteUnits::of(12)));
        assert_eq!(ByteUnits::of(u64::MAX / 2 + 1).checked_mul(2), None);
    }
}
