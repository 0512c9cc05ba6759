use colored::Colorize;
use derive_more::IsVariant;
use diagnostics::{Diagnostic, Show};
use std::fmt::Display;

/// Why a record could not be laid out. No partial layout accompanies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutError {
    record: Option<String>,
    kind: LayoutErrorKind,
}

impl LayoutError {
    pub fn new(kind: LayoutErrorKind, record: Option<&str>) -> Self {
        Self {
            record: record.map(ToString::to_string),
            kind,
        }
    }

    pub fn kind(&self) -> &LayoutErrorKind {
        &self.kind
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }

    /// Whether the caller's input was at fault, as opposed to the engine.
    pub fn is_caller_error(&self) -> bool {
        !self.kind.is_internal()
    }
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.record {
            Some(record) => write!(f, "{}: {}", record, self.kind),
            None => self.kind.fmt(f),
        }
    }
}

impl std::error::Error for LayoutError {}

impl Show for LayoutError {
    fn show(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result {
        if let Some(record) = &self.record {
            write!(w, "{}: {} {}", record, "error:".red().bold(), self.kind)
        } else {
            write!(w, "{} {}", "error:".red().bold(), self.kind)
        }
    }
}

impl Diagnostic for LayoutError {}

#[derive(Clone, Debug, PartialEq, Eq, IsVariant)]
pub enum LayoutErrorKind {
    Config(ConfigErrorKind),
    Field { name: String, kind: FieldErrorKind },
    Internal(InternalErrorKind),
}

impl LayoutErrorKind {
    pub fn at(self, record: Option<&str>) -> LayoutError {
        LayoutError::new(self, record)
    }
}

impl From<ConfigErrorKind> for LayoutErrorKind {
    fn from(value: ConfigErrorKind) -> Self {
        Self::Config(value)
    }
}

impl From<InternalErrorKind> for LayoutErrorKind {
    fn from(value: InternalErrorKind) -> Self {
        Self::Internal(value)
    }
}

impl Display for LayoutErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutErrorKind::Config(kind) => kind.fmt(f),
            LayoutErrorKind::Field { name, kind } => write!(f, "Field '{}': {}", name, kind),
            LayoutErrorKind::Internal(kind) => {
                write!(f, "Internal layout engine error: {}", kind)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigErrorKind {
    NegativeAlignment(i64),
    NegativePack(i64),
    PackTooLarge(i64),
    PackRequiresMsLayout,
    RecordTooLarge,
}

impl Display for ConfigErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigErrorKind::NegativeAlignment(value) => write!(
                f,
                "Alignment must be a non-negative integer, got {}",
                value
            ),
            ConfigErrorKind::NegativePack(value) => {
                write!(f, "Pack must be a non-negative integer, got {}", value)
            }
            ConfigErrorKind::PackTooLarge(value) => write!(f, "Pack {} is too big", value),
            ConfigErrorKind::PackRequiresMsLayout => {
                f.write_str("Pack is not compatible with gcc-sysv layout")
            }
            ConfigErrorKind::RecordTooLarge => f.write_str("Record is too large to lay out"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldErrorKind {
    NonPositiveBitWidth(i64),
    InvalidBitWidth { bit_width: i64, type_bits: u64 },
    BitfieldNotAllowed { type_name: String },
    TooLarge,
}

impl Display for FieldErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldErrorKind::NonPositiveBitWidth(bit_width) => {
                write!(f, "Bit-field width must be positive, got {}", bit_width)
            }
            FieldErrorKind::InvalidBitWidth {
                bit_width,
                type_bits,
            } => write!(
                f,
                "Bit-field width {} does not fit in a {}-bit type",
                bit_width, type_bits
            ),
            FieldErrorKind::BitfieldNotAllowed { type_name } => {
                write!(f, "Bit-fields are not allowed for type '{}'", type_name)
            }
            FieldErrorKind::TooLarge => f.write_str("Field does not fit in a record"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InternalErrorKind {
    BitDescriptorOutOfRange {
        bit_width: u64,
        bit_offset: u64,
    },
    BitDescriptorMismatch {
        bit_width: u64,
        bit_offset: u64,
        encoded: u32,
    },
    BitfieldOutsideStorageUnit {
        bit_offset: u64,
        bit_width: u64,
        unit_bits: u64,
    },
    MisalignedStorageUnit {
        bit_offset: u64,
    },
    OffsetUnderflow,
}

impl Display for InternalErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternalErrorKind::BitDescriptorOutOfRange {
                bit_width,
                bit_offset,
            } => write!(
                f,
                "bit-field descriptor out of range (width {}, offset {})",
                bit_width, bit_offset
            ),
            InternalErrorKind::BitDescriptorMismatch {
                bit_width,
                bit_offset,
                encoded,
            } => write!(
                f,
                "bit-field descriptor {:#x} does not decode to width {} and offset {}",
                encoded, bit_width, bit_offset
            ),
            InternalErrorKind::BitfieldOutsideStorageUnit {
                bit_offset,
                bit_width,
                unit_bits,
            } => write!(
                f,
                "bit-field of width {} at bit {} overruns its {}-bit storage unit",
                bit_width, bit_offset, unit_bits
            ),
            InternalErrorKind::MisalignedStorageUnit { bit_offset } => {
                write!(f, "storage unit starts mid-byte at bit {}", bit_offset)
            }
            InternalErrorKind::OffsetUnderflow => f.write_str("field offset underflowed"),
        }
    }
}
