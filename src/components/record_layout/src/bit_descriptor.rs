use crate::error::InternalErrorKind;
use data_units::{BitUnits, ByteUnits};
use target::ByteOrder;

/// Bit-field width and bit offset packed into one integer:
/// the width lives in the high 16 bits, the offset in the low 16 bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitDescriptor(u32);

impl BitDescriptor {
    pub const MAX_COMPONENT: u64 = 0xFFFF;

    pub fn pack(bit_width: u64, bit_offset: u64) -> Result<Self, InternalErrorKind> {
        if bit_width == 0 || bit_width > Self::MAX_COMPONENT || bit_offset > Self::MAX_COMPONENT {
            return Err(InternalErrorKind::BitDescriptorOutOfRange {
                bit_width,
                bit_offset,
            });
        }

        let descriptor = Self(((bit_width as u32) << 16) | bit_offset as u32);

        if descriptor.bit_width() != bit_width || descriptor.bit_offset() != bit_offset {
            return Err(InternalErrorKind::BitDescriptorMismatch {
                bit_width,
                bit_offset,
                encoded: descriptor.0,
            });
        }

        Ok(descriptor)
    }

    pub const fn from_encoded(encoded: u32) -> Self {
        Self(encoded)
    }

    pub const fn encoded(self) -> u32 {
        self.0
    }

    pub const fn bit_width(self) -> u64 {
        (self.0 >> 16) as u64
    }

    pub const fn bit_offset(self) -> u64 {
        (self.0 & 0xFFFF) as u64
    }
}

/// Descriptor for a bit-field `bit_width` bits wide that starts
/// `bit_offset` bits into a storage unit of `type_size` bytes.
///
/// Big-endian offsets are counted from the other end of the unit.
pub fn compute_encoded_size(
    bit_width: BitUnits,
    bit_offset: BitUnits,
    byte_order: ByteOrder,
    type_size: ByteUnits,
) -> Result<BitDescriptor, InternalErrorKind> {
    let unit_bits = type_size
        .checked_to_bits()
        .ok_or(InternalErrorKind::BitDescriptorOutOfRange {
            bit_width: bit_width.bits(),
            bit_offset: bit_offset.bits(),
        })?;

    let outside = || InternalErrorKind::BitfieldOutsideStorageUnit {
        bit_offset: bit_offset.bits(),
        bit_width: bit_width.bits(),
        unit_bits: unit_bits.bits(),
    };

    let remaining = unit_bits.checked_sub(bit_offset).ok_or_else(outside)?;
    let mirrored = remaining.checked_sub(bit_width).ok_or_else(outside)?;

    let effective_offset = match byte_order {
        ByteOrder::Little => bit_offset,
        ByteOrder::Big => mirrored,
    };

    BitDescriptor::pack(bit_width.bits(), effective_offset.bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_sampled_grid() {
        let samples = [0, 1, 2, 7, 8, 15, 16, 255, 256, 4096, 0x7FFF, 0xFFFE, 0xFFFF];

        for bit_width in samples.iter().copied().filter(|width| *width > 0) {
            for bit_offset in samples {
                let descriptor = BitDescriptor::pack(bit_width, bit_offset).unwrap();
                assert_eq!(descriptor.bit_width(), bit_width);
                assert_eq!(descriptor.bit_offset(), bit_offset);
                assert_eq!(
                    BitDescriptor::from_encoded(descriptor.encoded()),
                    descriptor
                );
            }
        }
    }

    #[test]
    fn width_occupies_high_half() {
        let descriptor = BitDescriptor::pack(3, 5).unwrap();
        assert_eq!(descriptor.encoded(), (3 << 16) | 5);
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(matches!(
            BitDescriptor::pack(0, 0),
            Err(InternalErrorKind::BitDescriptorOutOfRange { .. })
        ));
        assert!(BitDescriptor::pack(0x1_0000, 0).is_err());
        assert!(BitDescriptor::pack(1, 0x1_0000).is_err());
    }

    #[test]
    fn big_endian_mirrors_offset() {
        let little = compute_encoded_size(
            BitUnits::of(3),
            BitUnits::of(2),
            ByteOrder::Little,
            ByteUnits::of(2),
        )
        .unwrap();
        assert_eq!((little.bit_width(), little.bit_offset()), (3, 2));

        let big = compute_encoded_size(
            BitUnits::of(3),
            BitUnits::of(2),
            ByteOrder::Big,
            ByteUnits::of(2),
        )
        .unwrap();
        assert_eq!((big.bit_width(), big.bit_offset()), (3, 11));
    }

    #[test]
    fn overrun_is_internal_error() {
        let result = compute_encoded_size(
            BitUnits::of(8),
            BitUnits::of(4),
            ByteOrder::Little,
            ByteUnits::of(1),
        );

        assert_eq!(
            result,
            Err(InternalErrorKind::BitfieldOutsideStorageUnit {
                bit_offset: 4,
                bit_width: 8,
                unit_bits: 8,
            })
        );
    }
}
