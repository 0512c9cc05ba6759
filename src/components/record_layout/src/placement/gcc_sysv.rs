use super::{FieldSlot, Placement, PlacementError, PlacementState};
use crate::error::InternalErrorKind;
use data_units::{BitUnits, ByteUnits};

/// GCC / System V allocation: one absolute bit cursor. A field stays at the
/// cursor unless that would carry it past the end of the aligned storage
/// unit the cursor is in, so bit-fields of different types may share a unit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GccSysvState {
    pub bit_cursor: BitUnits,
    pub size: ByteUnits,
}

impl PlacementState for GccSysvState {
    fn seeded(base_size: ByteUnits) -> Option<Self> {
        Some(Self {
            bit_cursor: base_size.checked_to_bits()?,
            size: base_size,
        })
    }

    fn place(self, slot: &FieldSlot) -> Result<(Self, Placement), PlacementError> {
        let align_bits = slot.align_bits;
        let mut bit_cursor = self.bit_cursor;

        let unit_start = bit_cursor.round_down(align_bits);
        let field_end = bit_cursor
            .checked_add(slot.bit_width)
            .ok_or(PlacementError::Overflow)?;
        let unit_end = unit_start
            .checked_add(slot.type_bits)
            .ok_or(PlacementError::Overflow)?;

        if field_end > unit_end {
            bit_cursor = bit_cursor
                .checked_round_up(align_bits)
                .ok_or(PlacementError::Overflow)?;
        }

        let unit_start = bit_cursor.round_down(align_bits);
        let offset = ByteUnits::try_from(unit_start).map_err(|()| {
            InternalErrorKind::MisalignedStorageUnit {
                bit_offset: unit_start.bits(),
            }
        })?;

        let size = slot.size_at(bit_cursor - unit_start)?;

        if !slot.is_bitfield && unit_start != bit_cursor {
            return Err(InternalErrorKind::MisalignedStorageUnit {
                bit_offset: bit_cursor.bits(),
            }
            .into());
        }

        let bit_cursor = bit_cursor
            .checked_add(slot.bit_width)
            .ok_or(PlacementError::Overflow)?;

        let next = Self {
            bit_cursor,
            size: self.size.max(bit_cursor.to_bytes_rounded_up()),
        };

        Ok((next, Placement { offset, size }))
    }

    fn data_size(&self) -> ByteUnits {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_layout::FieldSize;
    use target::ByteOrder;

    fn bits(type_size: u64, bit_width: u64) -> FieldSlot {
        FieldSlot::bitfield(
            ByteUnits::of(type_size),
            ByteUnits::of(type_size),
            BitUnits::of(bit_width),
            ByteOrder::Little,
        )
        .unwrap()
    }

    fn whole(type_size: u64) -> FieldSlot {
        FieldSlot::whole(
            ByteUnits::of(type_size),
            ByteUnits::of(type_size),
            ByteOrder::Little,
        )
        .unwrap()
    }

    #[test]
    fn mixed_types_share_a_unit() {
        let state = GccSysvState::seeded(ByteUnits::ZERO).unwrap();

        let (state, a) = state.place(&bits(1, 4)).unwrap();
        let (state, b) = state.place(&bits(4, 4)).unwrap();

        assert_eq!(a.offset, ByteUnits::ZERO);
        assert_eq!(b.offset, ByteUnits::ZERO);
        assert!(matches!(b.size, FieldSize::Bits(d) if d.bit_offset() == 4));
        assert_eq!(state.bit_cursor, BitUnits::of(8));
        assert_eq!(state.data_size(), ByteUnits::of(1));
    }

    #[test]
    fn straddling_field_moves_to_next_unit() {
        let state = GccSysvState::seeded(ByteUnits::ZERO).unwrap();

        let (state, _) = state.place(&bits(2, 10)).unwrap();
        let (state, b) = state.place(&bits(2, 10)).unwrap();

        assert_eq!(b.offset, ByteUnits::of(2));
        assert!(matches!(b.size, FieldSize::Bits(d) if d.bit_offset() == 0));
        assert_eq!(state.data_size(), ByteUnits::of(4));
    }

    #[test]
    fn whole_field_aligns_cursor() {
        let state = GccSysvState::seeded(ByteUnits::ZERO).unwrap();

        let (state, _) = state.place(&bits(1, 3)).unwrap();
        let (state, b) = state.place(&whole(4)).unwrap();

        assert_eq!(b.offset, ByteUnits::of(4));
        assert_eq!(b.size, FieldSize::Bytes(ByteUnits::of(4)));
        assert_eq!(state.data_size(), ByteUnits::of(8));
    }

    #[test]
    fn seeded_from_base() {
        let (_, placement) = GccSysvState::seeded(ByteUnits::of(6))
            .unwrap()
            .place(&whole(2))
            .unwrap();

        assert_eq!(placement.offset, ByteUnits::of(6));
    }

    #[test]
    fn cursor_overflow_is_reported() {
        assert_eq!(GccSysvState::seeded(ByteUnits::of(u64::MAX / 4)), None);

        let huge = ByteUnits::of(u64::MAX / 8 - 7);
        let state = GccSysvState::seeded(huge).unwrap();

        assert_eq!(state.place(&whole(8)), Err(PlacementError::Overflow));
    }
}
