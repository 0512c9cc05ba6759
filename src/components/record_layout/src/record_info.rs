use c_types::CType;
use derive_more::IsVariant;
use target::{ByteOrder, LayoutMode, Target};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum RecordKind {
    Struct,
    Union,
}

/// One declared member, in declaration order.
#[derive(Clone, Debug)]
pub struct FieldInfo<'t> {
    pub name: String,
    pub ty: &'t dyn CType,
    pub bit_width: Option<i64>,
}

impl<'t> FieldInfo<'t> {
    pub fn new(name: impl Into<String>, ty: &'t dyn CType) -> Self {
        Self {
            name: name.into(),
            ty,
            bit_width: None,
        }
    }

    pub fn bitfield(name: impl Into<String>, ty: &'t dyn CType, bit_width: i64) -> Self {
        Self {
            name: name.into(),
            ty,
            bit_width: Some(bit_width),
        }
    }

    pub fn is_bitfield(&self) -> bool {
        self.bit_width.is_some()
    }
}

/// Everything needed to lay out one struct or union.
///
/// Numeric settings are signed because they come straight from user
/// declarations; the builder rejects negative values.
#[derive(Clone, Debug)]
pub struct RecordInfo<'t> {
    pub name: Option<String>,
    pub kind: RecordKind,
    pub fields: Vec<FieldInfo<'t>>,
    pub base: Option<&'t dyn CType>,

    /// Zero means "use the natural alignment".
    pub declared_alignment: Option<i64>,

    /// `#pragma pack` style clamp on field alignment. Only valid with the MS layout.
    pub pack: Option<i64>,

    pub byte_order: ByteOrder,

    /// `None` defers to the target's convention.
    pub layout_mode: Option<LayoutMode>,
}

impl<'t> RecordInfo<'t> {
    pub fn new_struct(fields: Vec<FieldInfo<'t>>) -> Self {
        Self::new(RecordKind::Struct, fields)
    }

    pub fn new_union(fields: Vec<FieldInfo<'t>>) -> Self {
        Self::new(RecordKind::Union, fields)
    }

    fn new(kind: RecordKind, fields: Vec<FieldInfo<'t>>) -> Self {
        Self {
            name: None,
            kind,
            fields,
            base: None,
            declared_alignment: None,
            pack: None,
            byte_order: ByteOrder::NATIVE,
            layout_mode: None,
        }
    }

    pub fn named(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn with_base(self, base: &'t dyn CType) -> Self {
        Self {
            base: Some(base),
            ..self
        }
    }

    pub fn with_alignment(self, alignment: i64) -> Self {
        Self {
            declared_alignment: Some(alignment),
            ..self
        }
    }

    pub fn with_pack(self, pack: i64) -> Self {
        Self {
            pack: Some(pack),
            ..self
        }
    }

    pub fn with_byte_order(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }

    /// Use the opposite of the target's byte order.
    pub fn swapped_bytes(self, target: &Target) -> Self {
        self.with_byte_order(target.byte_order().swapped())
    }

    pub fn with_layout_mode(self, layout_mode: LayoutMode) -> Self {
        Self {
            layout_mode: Some(layout_mode),
            ..self
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldInfo<'t>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn friendly_name(&self) -> &str {
        match (&self.name, self.kind) {
            (Some(name), _) => name,
            (None, RecordKind::Struct) => "<unnamed struct>",
            (None, RecordKind::Union) => "<unnamed union>",
        }
    }
}
