use data_units::ByteUnits;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeLayout {
    pub width: ByteUnits,
    pub alignment: ByteUnits,
}

impl TypeLayout {
    pub fn basic(size: ByteUnits) -> Self {
        Self {
            width: size,
            alignment: size,
        }
    }
}
