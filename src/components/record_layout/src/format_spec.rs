use crate::{record_info::RecordKind, record_layout::FieldLayout};
use c_types::{BufferFormat, CType};
use data_units::ByteUnits;
use itertools::Itertools;

/// Buffer-protocol description of a laid out record.
///
/// Structs become `T{...}` with explicit padding. Overlapping union members
/// cannot be expressed, so unions are a single opaque `B`.
pub fn format_spec(
    kind: RecordKind,
    base: Option<&dyn CType>,
    fields: &[FieldLayout],
    size: ByteUnits,
) -> String {
    if kind.is_union() {
        return "B".into();
    }

    let mut spec = String::from("T{");
    let mut last_end = ByteUnits::ZERO;

    if let Some(base) = base {
        if let Some(format) = base.buffer_format() {
            spec.push_str(&member_token(format));
            last_end = base.size();
        }
    }

    for field in fields {
        spec.push_str(&padding_token(field.offset, last_end));

        let format = field
            .ty
            .buffer_format()
            .unwrap_or_else(|| BufferFormat::scalar("B"));

        spec.push_str(&member_token(format));
        spec.push(':');
        spec.push_str(&field.name);
        spec.push(':');

        last_end = field.storage_end();
    }

    spec.push_str(&padding_token(size, last_end));
    spec.push('}');
    spec
}

fn member_token(format: BufferFormat) -> String {
    if format.shape.is_empty() {
        format.token
    } else {
        format!("({}){}", format.shape.iter().join(","), format.token)
    }
}

/// Pad bytes between `last_end` and `offset`. Empty when there is no gap,
/// including when bit-fields share storage and `offset` is behind.
fn padding_token(offset: ByteUnits, last_end: ByteUnits) -> String {
    match offset.checked_sub(last_end).map(|gap| gap.bytes()) {
        None | Some(0) => String::new(),
        Some(1) => "x".into(),
        Some(gap) => format!("{}x", gap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_tokens() {
        assert_eq!(padding_token(ByteUnits::of(4), ByteUnits::of(4)), "");
        assert_eq!(padding_token(ByteUnits::of(2), ByteUnits::of(4)), "");
        assert_eq!(padding_token(ByteUnits::of(5), ByteUnits::of(4)), "x");
        assert_eq!(padding_token(ByteUnits::of(8), ByteUnits::of(1)), "7x");
    }

    #[test]
    fn shaped_member() {
        let format = BufferFormat {
            token: "<h".into(),
            shape: vec![2, 3],
        };

        assert_eq!(member_token(format), "(2,3)<h");
        assert_eq!(member_token(BufferFormat::scalar("<i")), "<i");
    }
}
