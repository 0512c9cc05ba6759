//! C-compatible struct and union layout.
//!
//! Given the declared members of a record and its packing, alignment and
//! byte-order settings, computes where every member lives, how large and
//! how aligned the record is, and a buffer format string describing it.
//! Both the Microsoft and the GCC / System V bit-field conventions are
//! supported.

mod bit_descriptor;
mod builder;
mod error;
mod format_spec;
mod placement;
mod record_info;
mod record_layout;


pub use bit_descriptor::{BitDescriptor, compute_encoded_size};
pub use builder::{LayoutSettings, RecordLayoutBuilder};
pub use error::{ConfigErrorKind, FieldErrorKind, InternalErrorKind, LayoutError, LayoutErrorKind};
pub use format_spec::format_spec;
pub use placement::{FieldSlot, GccSysvState, MsState, Placement, PlacementError, PlacementState};
pub use record_info::{FieldInfo, RecordInfo, RecordKind};
pub use record_layout::{FieldLayout, FieldSize, RecordLayout};

use diagnostics::Diagnostics;
use target::Target;

/// Lays out `record` for `target`. Pure: nothing is reported anywhere.
pub fn layout_record<'t>(
    record: &RecordInfo<'t>,
    target: &Target,
) -> Result<RecordLayout<'t>, LayoutError> {
    RecordLayoutBuilder::new(record, target).generate()
}

/// Like [`layout_record`], but reports warnings to `diagnostics`.
pub fn layout_record_with_diagnostics<'t>(
    record: &RecordInfo<'t>,
    target: &Target,
    diagnostics: &Diagnostics,
) -> Result<RecordLayout<'t>, LayoutError> {
    RecordLayoutBuilder::new(record, target)
        .with_diagnostics(diagnostics)
        .generate()
}
