mod gcc_sysv;
mod ms;

use crate::{
    bit_descriptor::compute_encoded_size, error::InternalErrorKind, record_layout::FieldSize,
};
use data_units::{BitUnits, ByteUnits};
pub use gcc_sysv::GccSysvState;
pub use ms::MsState;
use std::fmt::Debug;
use target::ByteOrder;

/// What placement needs to know about a field, with settings already applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldSlot {
    pub type_size: ByteUnits,
    pub type_bits: BitUnits,

    /// Natural alignment, after any pack clamp. Never zero.
    pub type_align: ByteUnits,
    pub align_bits: BitUnits,

    /// Equal to the whole type for non-bit-fields.
    pub bit_width: BitUnits,

    pub is_bitfield: bool,
    pub byte_order: ByteOrder,
}

impl FieldSlot {
    /// `None` when the type's size or alignment cannot be counted in bits.
    pub fn whole(
        type_size: ByteUnits,
        type_align: ByteUnits,
        byte_order: ByteOrder,
    ) -> Option<Self> {
        let bit_width = type_size.checked_to_bits()?;
        Self::new(type_size, type_align, bit_width, false, byte_order)
    }

    pub fn bitfield(
        type_size: ByteUnits,
        type_align: ByteUnits,
        bit_width: BitUnits,
        byte_order: ByteOrder,
    ) -> Option<Self> {
        Self::new(type_size, type_align, bit_width, true, byte_order)
    }

    fn new(
        type_size: ByteUnits,
        type_align: ByteUnits,
        bit_width: BitUnits,
        is_bitfield: bool,
        byte_order: ByteOrder,
    ) -> Option<Self> {
        Some(Self {
            type_size,
            type_bits: type_size.checked_to_bits()?,
            type_align,
            align_bits: type_align.checked_to_bits()?,
            bit_width,
            is_bitfield,
            byte_order,
        })
    }

    /// Size record for this field when it starts `bit_offset` bits into its storage unit.
    fn size_at(&self, bit_offset: BitUnits) -> Result<FieldSize, InternalErrorKind> {
        if !self.is_bitfield {
            return Ok(FieldSize::Bytes(self.type_size));
        }

        compute_encoded_size(self.bit_width, bit_offset, self.byte_order, self.type_size)
            .map(FieldSize::Bits)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub offset: ByteUnits,
    pub size: FieldSize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// The field would end past the largest representable offset.
    Overflow,
    Internal(InternalErrorKind),
}

impl From<InternalErrorKind> for PlacementError {
    fn from(value: InternalErrorKind) -> Self {
        Self::Internal(value)
    }
}

/// Running cursor of one layout convention.
///
/// Placing a field consumes the state and yields the next one, so each
/// convention can be driven one field at a time.
pub trait PlacementState: Copy + Debug {
    /// State for a record whose first `base_size` bytes are already taken.
    /// `None` if the base is too large to track.
    fn seeded(base_size: ByteUnits) -> Option<Self>;

    fn place(self, slot: &FieldSlot) -> Result<(Self, Placement), PlacementError>;

    /// Bytes covered so far, without tail padding.
    fn data_size(&self) -> ByteUnits;
}
