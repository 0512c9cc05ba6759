use crate::CType;
use data_units::ByteUnits;

/// A type known only by its footprint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opaque {
    pub name: String,
    pub size: ByteUnits,
    pub alignment: ByteUnits,
}

impl Opaque {
    pub fn new(name: impl Into<String>, size: ByteUnits, alignment: ByteUnits) -> Self {
        Self {
            name: name.into(),
            size,
            alignment,
        }
    }
}

impl CType for Opaque {
    fn size(&self) -> ByteUnits {
        self.size
    }

    fn alignment(&self) -> ByteUnits {
        self.alignment
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
