use crate::{BufferFormat, CType, TargetLayout, TypeLayout};
use data_units::ByteUnits;
use derive_more::IsVariant;
use target::{ByteOrder, Target};

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, IsVariant)]
pub enum CPrimitive {
    Bool,
    Char,
    SignedChar,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    Double,
    Pointer,
}

impl CPrimitive {
    /// Struct-module format code.
    pub fn format_code(self) -> char {
        match self {
            CPrimitive::Bool => '?',
            CPrimitive::Char => 'c',
            CPrimitive::SignedChar => 'b',
            CPrimitive::UnsignedChar => 'B',
            CPrimitive::Short => 'h',
            CPrimitive::UnsignedShort => 'H',
            CPrimitive::Int => 'i',
            CPrimitive::UnsignedInt => 'I',
            CPrimitive::Long => 'l',
            CPrimitive::UnsignedLong => 'L',
            CPrimitive::LongLong => 'q',
            CPrimitive::UnsignedLongLong => 'Q',
            CPrimitive::Float => 'f',
            CPrimitive::Double => 'd',
            CPrimitive::Pointer => 'P',
        }
    }

    pub fn c_name(self) -> &'static str {
        match self {
            CPrimitive::Bool => "_Bool",
            CPrimitive::Char => "char",
            CPrimitive::SignedChar => "signed char",
            CPrimitive::UnsignedChar => "unsigned char",
            CPrimitive::Short => "short",
            CPrimitive::UnsignedShort => "unsigned short",
            CPrimitive::Int => "int",
            CPrimitive::UnsignedInt => "unsigned int",
            CPrimitive::Long => "long",
            CPrimitive::UnsignedLong => "unsigned long",
            CPrimitive::LongLong => "long long",
            CPrimitive::UnsignedLongLong => "unsigned long long",
            CPrimitive::Float => "float",
            CPrimitive::Double => "double",
            CPrimitive::Pointer => "void *",
        }
    }

    pub fn is_integral(self) -> bool {
        !matches!(
            self,
            CPrimitive::Float | CPrimitive::Double | CPrimitive::Pointer
        )
    }
}

/// A C scalar laid out for a particular target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Primitive {
    pub kind: CPrimitive,
    pub layout: TypeLayout,
    pub byte_order: ByteOrder,
}

impl Primitive {
    pub fn new(kind: CPrimitive, target: &Target) -> Self {
        Self {
            kind,
            layout: target.primitive_layout(kind),
            byte_order: target.byte_order(),
        }
    }

    pub fn with_byte_order(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }
}

impl CType for Primitive {
    fn size(&self) -> ByteUnits {
        self.layout.width
    }

    fn alignment(&self) -> ByteUnits {
        self.layout.alignment
    }

    fn name(&self) -> String {
        self.kind.c_name().into()
    }

    fn buffer_format(&self) -> Option<BufferFormat> {
        Some(BufferFormat::scalar(format!(
            "{}{}",
            self.byte_order.format_prefix(),
            self.kind.format_code()
        )))
    }

    fn supports_bitfields(&self) -> bool {
        self.kind.is_integral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use target::{TargetArch, TargetOs};

    #[test]
    fn format_carries_byte_order() {
        let linux = Target::new(Some(TargetOs::Linux), Some(TargetArch::X86_64));
        let s390x = Target::new(Some(TargetOs::Linux), Some(TargetArch::S390x));

        let int = Primitive::new(CPrimitive::Int, &linux);
        assert_eq!(int.buffer_format(), Some(BufferFormat::scalar("<i")));

        let int = Primitive::new(CPrimitive::Int, &s390x);
        assert_eq!(int.buffer_format(), Some(BufferFormat::scalar(">i")));

        let swapped = int.with_byte_order(ByteOrder::Little);
        assert_eq!(swapped.buffer_format(), Some(BufferFormat::scalar("<i")));
    }

    #[test]
    fn only_integers_hold_bitfields() {
        let target = Target::generic_os(TargetOs::Linux);

        assert!(Primitive::new(CPrimitive::Bool, &target).supports_bitfields());
        assert!(Primitive::new(CPrimitive::UnsignedLongLong, &target).supports_bitfields());
        assert!(!Primitive::new(CPrimitive::Double, &target).supports_bitfields());
        assert!(!Primitive::new(CPrimitive::Pointer, &target).supports_bitfields());
    }
}
