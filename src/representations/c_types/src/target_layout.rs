use crate::{CPrimitive, TypeLayout};
use data_units::ByteUnits;
use target::{Target, TargetOsExt};

pub trait TargetLayout {
    fn pointer_layout(&self) -> TypeLayout;
    fn bool_layout(&self) -> TypeLayout;
    fn char_layout(&self) -> TypeLayout;
    fn short_layout(&self) -> TypeLayout;
    fn int_layout(&self) -> TypeLayout;
    fn long_layout(&self) -> TypeLayout;
    fn longlong_layout(&self) -> TypeLayout;
    fn float_layout(&self) -> TypeLayout;
    fn double_layout(&self) -> TypeLayout;
    fn primitive_layout(&self, primitive: CPrimitive) -> TypeLayout;
}

impl TargetLayout for Target {
    fn pointer_layout(&self) -> TypeLayout {
        TypeLayout::basic(ByteUnits::of(8))
    }

    fn bool_layout(&self) -> TypeLayout {
        TypeLayout::basic(ByteUnits::of(1))
    }

    fn char_layout(&self) -> TypeLayout {
        TypeLayout::basic(ByteUnits::of(1))
    }

    fn short_layout(&self) -> TypeLayout {
        TypeLayout::basic(ByteUnits::of(2))
    }

    fn int_layout(&self) -> TypeLayout {
        TypeLayout::basic(ByteUnits::of(4))
    }

    fn long_layout(&self) -> TypeLayout {
        if self.os().is_windows() {
            TypeLayout::basic(ByteUnits::of(4))
        } else {
            TypeLayout::basic(ByteUnits::of(8))
        }
    }

    fn longlong_layout(&self) -> TypeLayout {
        TypeLayout::basic(ByteUnits::of(8))
    }

    fn float_layout(&self) -> TypeLayout {
        TypeLayout::basic(ByteUnits::of(4))
    }

    fn double_layout(&self) -> TypeLayout {
        TypeLayout::basic(ByteUnits::of(8))
    }

    fn primitive_layout(&self, primitive: CPrimitive) -> TypeLayout {
        match primitive {
            CPrimitive::Bool => self.bool_layout(),
            CPrimitive::Char | CPrimitive::SignedChar | CPrimitive::UnsignedChar => {
                self.char_layout()
            }
            CPrimitive::Short | CPrimitive::UnsignedShort => self.short_layout(),
            CPrimitive::Int | CPrimitive::UnsignedInt => self.int_layout(),
            CPrimitive::Long | CPrimitive::UnsignedLong => self.long_layout(),
            CPrimitive::LongLong | CPrimitive::UnsignedLongLong => self.longlong_layout(),
            CPrimitive::Float => self.float_layout(),
            CPrimitive::Double => self.double_layout(),
            CPrimitive::Pointer => self.pointer_layout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use target::TargetOs;

    #[test]
    fn long_depends_on_os() {
        let windows = Target::generic_os(TargetOs::Windows);
        let linux = Target::generic_os(TargetOs::Linux);

        assert_eq!(windows.long_layout().width, ByteUnits::of(4));
        assert_eq!(linux.long_layout().width, ByteUnits::of(8));
        assert_eq!(
            windows.primitive_layout(CPrimitive::UnsignedLong),
            windows.int_layout()
        );
    }
}
