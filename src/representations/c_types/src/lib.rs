mod array;
mod opaque;
mod primitive;
mod target_layout;
mod type_layout;

pub use array::CArray;
use data_units::ByteUnits;
pub use opaque::Opaque;
pub use primitive::{CPrimitive, Primitive};
use std::fmt::Debug;
pub use target_layout::TargetLayout;
pub use type_layout::TypeLayout;

/// A C type as seen by record layout: only its footprint and how it
/// describes itself to buffer introspection matter.
pub trait CType: Debug {
    fn size(&self) -> ByteUnits;

    fn alignment(&self) -> ByteUnits;

    fn name(&self) -> String;

    /// Buffer-protocol format of this type, if it has one.
    /// Types without one are treated as opaque bytes.
    fn buffer_format(&self) -> Option<BufferFormat> {
        None
    }

    fn supports_bitfields(&self) -> bool {
        false
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferFormat {
    pub token: String,

    /// Array dimensions, outermost first. Empty for non-array types.
    pub shape: Vec<u64>,
}

impl BufferFormat {
    pub fn scalar(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            shape: Vec::new(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
}
