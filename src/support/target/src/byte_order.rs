use derive_more::IsVariant;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub const NATIVE: Self = if cfg!(target_endian = "big") {
        Self::Big
    } else {
        Self::Little
    };

    pub fn swapped(self) -> Self {
        match self {
            Self::Little => Self::Big,
            Self::Big => Self::Little,
        }
    }

    /// Prefix used by buffer format strings to pin a scalar's byte order.
    pub fn format_prefix(self) -> char {
        match self {
            Self::Little => '<',
            Self::Big => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swapped_twice_is_identity() {
        assert_eq!(ByteOrder::Little.swapped(), ByteOrder::Big);
        assert_eq!(ByteOrder::NATIVE.swapped().swapped(), ByteOrder::NATIVE);
    }
}
