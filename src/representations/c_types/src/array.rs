use crate::{BufferFormat, CType};
use data_units::ByteUnits;

/// Fixed-length array of another type.
#[derive(Debug)]
pub struct CArray<'t> {
    pub inner: &'t dyn CType,
    pub length: u64,
}

impl<'t> CArray<'t> {
    pub fn new(inner: &'t dyn CType, length: u64) -> Self {
        Self { inner, length }
    }
}

impl<'t> CType for CArray<'t> {
    /// Saturates at `ByteUnits::MAX`, which record layout rejects as too large.
    fn size(&self) -> ByteUnits {
        self.inner
            .size()
            .checked_mul(self.length)
            .unwrap_or(ByteUnits::MAX)
    }

    fn alignment(&self) -> ByteUnits {
        self.inner.alignment()
    }

    fn name(&self) -> String {
        format!("{}[{}]", self.inner.name(), self.length)
    }

    fn buffer_format(&self) -> Option<BufferFormat> {
        let element = self
            .inner
            .buffer_format()
            .unwrap_or_else(|| BufferFormat::scalar("B"));

        let mut shape = Vec::with_capacity(element.ndim() + 1);
        shape.push(self.length);
        shape.extend(element.shape);

        Some(BufferFormat {
            token: element.token,
            shape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CPrimitive, Opaque, Primitive};
    use target::{Target, TargetArch, TargetOs};

    #[test]
    fn nested_arrays_flatten_shape() {
        let target = Target::new(Some(TargetOs::Linux), Some(TargetArch::Aarch64));
        let short = Primitive::new(CPrimitive::Short, &target);
        let row = CArray::new(&short, 3);
        let grid = CArray::new(&row, 2);

        assert_eq!(grid.size(), ByteUnits::of(12));
        assert_eq!(grid.alignment(), ByteUnits::of(2));
        assert_eq!(grid.name(), "short[3][2]");

        let format = grid.buffer_format().unwrap();
        assert_eq!(format.token, "<h");
        assert_eq!(format.shape, vec![2, 3]);
        assert!(!grid.supports_bitfields());
    }

    #[test]
    fn oversized_array_saturates() {
        let blob = Opaque::new("blob", ByteUnits::of(u64::MAX / 2), ByteUnits::of(1));
        let array = CArray::new(&blob, 3);

        assert_eq!(array.size(), ByteUnits::MAX);
        assert_eq!(CArray::new(&blob, 2).size(), ByteUnits::of(u64::MAX - 1));
    }

    #[test]
    fn opaque_elements_default_to_bytes() {
        let blob = Opaque::new("blob", ByteUnits::of(3), ByteUnits::of(1));
        let array = CArray::new(&blob, 4);

        assert_eq!(
            array.buffer_format(),
            Some(BufferFormat {
                token: "B".into(),
                shape: vec![4],
            })
        );
    }
}
