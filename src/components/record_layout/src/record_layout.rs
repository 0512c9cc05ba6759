use crate::{bit_descriptor::BitDescriptor, record_info::RecordKind};
use c_types::{BufferFormat, CType};
use data_units::{BitUnits, ByteUnits};
use derive_more::IsVariant;
use target::{ByteOrder, LayoutMode};

/// How much of its storage a field occupies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum FieldSize {
    Bytes(ByteUnits),
    Bits(BitDescriptor),
}

impl FieldSize {
    /// Plain byte count, or the packed width/offset integer for bit-fields.
    pub fn encoded(&self) -> u64 {
        match self {
            FieldSize::Bytes(bytes) => bytes.bytes(),
            FieldSize::Bits(descriptor) => descriptor.encoded().into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FieldLayout<'t> {
    pub name: String,
    pub ty: &'t dyn CType,
    pub offset: ByteUnits,
    pub size: FieldSize,

    /// Position in declaration order.
    pub index: usize,
}

impl<'t> FieldLayout<'t> {
    pub fn is_bitfield(&self) -> bool {
        self.size.is_bits()
    }

    pub fn encoded_size(&self) -> u64 {
        self.size.encoded()
    }

    pub fn bit_width(&self) -> Option<BitUnits> {
        match self.size {
            FieldSize::Bits(descriptor) => Some(BitUnits::of(descriptor.bit_width())),
            FieldSize::Bytes(_) => None,
        }
    }

    pub fn bit_offset(&self) -> Option<BitUnits> {
        match self.size {
            FieldSize::Bits(descriptor) => Some(BitUnits::of(descriptor.bit_offset())),
            FieldSize::Bytes(_) => None,
        }
    }

    /// Bytes reserved for the field's storage, bit-field or not.
    pub fn storage_end(&self) -> ByteUnits {
        self.offset + self.ty.size()
    }
}

impl<'t> PartialEq for FieldLayout<'t> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.ty.name() == other.ty.name()
            && self.offset == other.offset
            && self.size == other.size
            && self.index == other.index
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordLayout<'t> {
    pub name: Option<String>,
    pub kind: RecordKind,
    pub fields: Vec<FieldLayout<'t>>,
    pub size: ByteUnits,
    pub alignment: ByteUnits,

    /// Size without tail padding
    pub data_size: ByteUnits,

    pub format_spec: String,
    pub layout_mode: LayoutMode,
    pub byte_order: ByteOrder,
}

impl<'t> RecordLayout<'t> {
    pub fn field(&self, name: &str) -> Option<&FieldLayout<'t>> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn tail_padding(&self) -> ByteUnits {
        self.size - self.data_size
    }
}

impl<'t> CType for RecordLayout<'t> {
    fn size(&self) -> ByteUnits {
        self.size
    }

    fn alignment(&self) -> ByteUnits {
        self.alignment
    }

    fn name(&self) -> String {
        match (&self.name, self.kind) {
            (Some(name), _) => name.clone(),
            (None, RecordKind::Struct) => "<unnamed struct>".into(),
            (None, RecordKind::Union) => "<unnamed union>".into(),
        }
    }

    fn buffer_format(&self) -> Option<BufferFormat> {
        Some(BufferFormat::scalar(self.format_spec.clone()))
    }
}
