use super::{FieldSlot, Placement, PlacementError, PlacementState};
use crate::error::InternalErrorKind;
use data_units::{BitUnits, ByteUnits};

/// Microsoft allocation: bit-fields are packed into runs of storage units,
/// and a run only continues while the declared type size stays the same
/// and there is room left in the current unit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MsState {
    /// Byte just past the storage unit that is currently open.
    pub offset: ByteUnits,

    pub unfilled_bits_in_last_unit: BitUnits,

    /// Zero when no unit is open.
    pub last_bitfield_storage_unit_size: BitUnits,

    pub size: ByteUnits,
}

impl PlacementState for MsState {
    fn seeded(base_size: ByteUnits) -> Option<Self> {
        Some(Self {
            offset: base_size,
            unfilled_bits_in_last_unit: BitUnits::ZERO,
            last_bitfield_storage_unit_size: BitUnits::ZERO,
            size: base_size,
        })
    }

    fn place(self, slot: &FieldSlot) -> Result<(Self, Placement), PlacementError> {
        let mut next = self;

        if slot.bit_width > next.unfilled_bits_in_last_unit
            || slot.type_bits != next.last_bitfield_storage_unit_size
        {
            next.offset = next
                .offset
                .checked_round_up(slot.type_align)
                .and_then(|start| start.checked_add(slot.type_size))
                .ok_or(PlacementError::Overflow)?;
            next.last_bitfield_storage_unit_size = slot.type_bits;
            next.unfilled_bits_in_last_unit = slot.type_bits;
        }

        let unit_bits = next.last_bitfield_storage_unit_size;
        let unit_size = ByteUnits::try_from(unit_bits).map_err(|()| {
            InternalErrorKind::MisalignedStorageUnit {
                bit_offset: unit_bits.bits(),
            }
        })?;

        let offset = next
            .offset
            .checked_sub(unit_size)
            .ok_or(InternalErrorKind::OffsetUnderflow)?;

        let size = slot.size_at(unit_bits - next.unfilled_bits_in_last_unit)?;

        next.unfilled_bits_in_last_unit -= slot.bit_width;
        next.size = next.offset;

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

    fn bits(type_size: u64, type_align: u64, bit_width: u64) -> FieldSlot {
        FieldSlot::bitfield(
            ByteUnits::of(type_size),
            ByteUnits::of(type_align),
            BitUnits::of(bit_width),
            ByteOrder::Little,
        )
        .unwrap()
    }

    #[test]
    fn type_change_opens_new_unit() {
        let state = MsState::seeded(ByteUnits::ZERO).unwrap();

        let (state, a) = state.place(&bits(1, 1, 4)).unwrap();
        let (state, b) = state.place(&bits(4, 4, 4)).unwrap();

        assert_eq!(a.offset, ByteUnits::ZERO);
        assert_eq!(b.offset, ByteUnits::of(4));
        assert!(matches!(b.size, FieldSize::Bits(d) if d.bit_offset() == 0));
        assert_eq!(state.data_size(), ByteUnits::of(8));
        assert_eq!(state.unfilled_bits_in_last_unit, BitUnits::of(28));
    }

    #[test]
    fn same_type_continues_run() {
        let state = MsState::seeded(ByteUnits::ZERO).unwrap();

        let (state, _) = state.place(&bits(2, 2, 5)).unwrap();
        let (state, b) = state.place(&bits(2, 2, 11)).unwrap();
        let (state, c) = state.place(&bits(2, 2, 1)).unwrap();

        assert_eq!(b.offset, ByteUnits::ZERO);
        assert!(matches!(b.size, FieldSize::Bits(d) if d.bit_offset() == 5));
        assert_eq!(c.offset, ByteUnits::of(2));
        assert_eq!(state.data_size(), ByteUnits::of(4));
    }

    #[test]
    fn clamped_alignment_is_respected() {
        let state = MsState::seeded(ByteUnits::of(1)).unwrap();
        let slot = FieldSlot::whole(ByteUnits::of(4), ByteUnits::of(2), ByteOrder::Little).unwrap();

        let (_, placement) = state.place(&slot).unwrap();

        assert_eq!(placement.offset, ByteUnits::of(2));
    }

    #[test]
    fn unit_past_largest_offset_is_overflow() {
        let state = MsState::seeded(ByteUnits::of(u64::MAX - 2)).unwrap();

        assert_eq!(state.place(&bits(4, 4, 1)), Err(PlacementError::Overflow));
    }
}
