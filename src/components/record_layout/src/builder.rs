use crate::{
    error::{ConfigErrorKind, FieldErrorKind, LayoutError, LayoutErrorKind},
    format_spec::format_spec,
    placement::{FieldSlot, GccSysvState, MsState, PlacementError, PlacementState},
    record_info::{FieldInfo, RecordInfo},
    record_layout::{FieldLayout, RecordLayout},
};
use data_units::{BitUnits, ByteUnits};
use diagnostics::{Diagnostics, WarningDiagnostic};
use target::{LayoutMode, Target, TargetOsExt};

const MAX_PACK: i64 = i32::MAX as i64;

/// Settings of a record after validation and target defaults.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayoutSettings {
    pub layout_mode: LayoutMode,

    /// Alignment clamp, if any. Never zero.
    pub pack: Option<ByteUnits>,

    /// Starting alignment of the record. At least one.
    pub min_alignment: ByteUnits,
}

#[derive(Debug)]
pub struct RecordLayoutBuilder<'a, 't> {
    record: &'a RecordInfo<'t>,
    target: &'a Target,
    diagnostics: Option<&'a Diagnostics>,
}

impl<'a, 't> RecordLayoutBuilder<'a, 't> {
    pub fn new(record: &'a RecordInfo<'t>, target: &'a Target) -> Self {
        Self {
            record,
            target,
            diagnostics: None,
        }
    }

    pub fn with_diagnostics(self, diagnostics: &'a Diagnostics) -> Self {
        Self {
            diagnostics: Some(diagnostics),
            ..self
        }
    }

    pub fn generate(&self) -> Result<RecordLayout<'t>, LayoutError> {
        let settings = self.resolve_settings()?;

        match settings.layout_mode {
            LayoutMode::Ms => self.layout_fields::<MsState>(&settings),
            LayoutMode::GccSysv => self.layout_fields::<GccSysvState>(&settings),
        }
    }

    pub fn resolve_settings(&self) -> Result<LayoutSettings, LayoutError> {
        let record = self.record;

        let declared_alignment = match record.declared_alignment {
            Some(alignment) if alignment < 0 => {
                return Err(self.error(ConfigErrorKind::NegativeAlignment(alignment)));
            }
            Some(alignment) => alignment as u64,
            None => 0,
        };

        let pack = match record.pack {
            Some(pack) if pack < 0 => return Err(self.error(ConfigErrorKind::NegativePack(pack))),
            Some(pack) if pack > MAX_PACK => {
                return Err(self.error(ConfigErrorKind::PackTooLarge(pack)));
            }
            // A zero pack is the same as no pack at all
            Some(0) | None => None,
            Some(pack) => Some(ByteUnits::of(pack as u64)),
        };

        let layout_mode = match record.layout_mode {
            Some(layout_mode) => layout_mode,
            None if self.target.os().is_windows() => LayoutMode::Ms,
            None if pack.is_some() => {
                self.warn(format!(
                    "Pack without an explicit layout implies the MS layout on {}, request it explicitly",
                    self.target
                ));
                LayoutMode::Ms
            }
            None => self.target.default_layout_mode(),
        };

        if pack.is_some() && layout_mode.is_gcc_sysv() {
            return Err(self.error(ConfigErrorKind::PackRequiresMsLayout));
        }

        let mut min_alignment = ByteUnits::of(declared_alignment.max(1));
        if let Some(base) = record.base {
            if base.size().checked_to_bits().is_none() {
                return Err(self.error(ConfigErrorKind::RecordTooLarge));
            }

            min_alignment = min_alignment.max(base.alignment());
        }

        Ok(LayoutSettings {
            layout_mode,
            pack,
            min_alignment,
        })
    }

    fn layout_fields<S: PlacementState>(
        &self,
        settings: &LayoutSettings,
    ) -> Result<RecordLayout<'t>, LayoutError> {
        let record = self.record;
        let is_union = record.kind.is_union();
        let base_size = record.base.map_or(ByteUnits::ZERO, |base| base.size());

        let record_too_large = || self.error(ConfigErrorKind::RecordTooLarge);
        let empty = S::seeded(ByteUnits::ZERO).ok_or_else(record_too_large)?;

        let mut state = S::seeded(base_size).ok_or_else(record_too_large)?;
        let mut data_size = base_size;
        let mut alignment = settings.min_alignment;
        let mut fields = Vec::with_capacity(record.len());

        for (index, field) in record.iter().enumerate() {
            let slot = self.field_slot(field, settings)?;

            let placement = if is_union {
                let (placed, placement) = empty
                    .place(&slot)
                    .map_err(|error| self.placement_error(field, error))?;

                data_size = data_size.max(placed.data_size());
                placement
            } else {
                let unpadded_offset = state.data_size();

                let (placed, placement) = state
                    .place(&slot)
                    .map_err(|error| self.placement_error(field, error))?;

                self.check_field_padding(field, index, placement.offset, unpadded_offset);

                state = placed;
                data_size = state.data_size();
                placement
            };

            alignment = alignment.max(slot.type_align);

            fields.push(FieldLayout {
                name: field.name.clone(),
                ty: field.ty,
                offset: placement.offset,
                size: placement.size,
                index,
            });
        }

        self.finish_layout(settings, fields, data_size, alignment)
    }

    fn field_slot(
        &self,
        field: &FieldInfo<'t>,
        settings: &LayoutSettings,
    ) -> Result<FieldSlot, LayoutError> {
        let type_size = field.ty.size();
        let mut type_align = field.ty.alignment().max(ByteUnits::of(1));

        if let Some(pack) = settings.pack {
            type_align = type_align.min(pack);
        }

        let slot = match field.bit_width {
            None => FieldSlot::whole(type_size, type_align, self.record.byte_order),
            Some(bit_width) => {
                self.check_bit_width(field, bit_width)?;

                FieldSlot::bitfield(
                    type_size,
                    type_align,
                    BitUnits::of(bit_width as u64),
                    self.record.byte_order,
                )
            }
        };

        slot.ok_or_else(|| self.field_error(field, FieldErrorKind::TooLarge))
    }

    fn check_bit_width(&self, field: &FieldInfo<'t>, bit_width: i64) -> Result<(), LayoutError> {
        if bit_width <= 0 {
            return Err(self.field_error(field, FieldErrorKind::NonPositiveBitWidth(bit_width)));
        }

        if !field.ty.supports_bitfields() {
            return Err(self.field_error(
                field,
                FieldErrorKind::BitfieldNotAllowed {
                    type_name: field.ty.name(),
                },
            ));
        }

        // Types too large to count in bits fit any width
        match field.ty.size().checked_to_bits() {
            Some(type_bits) if bit_width as u64 > type_bits.bits() => {
                Err(self.field_error(
                    field,
                    FieldErrorKind::InvalidBitWidth {
                        bit_width,
                        type_bits: type_bits.bits(),
                    },
                ))
            }
            _ => Ok(()),
        }
    }

    fn finish_layout(
        &self,
        settings: &LayoutSettings,
        fields: Vec<FieldLayout<'t>>,
        data_size: ByteUnits,
        alignment: ByteUnits,
    ) -> Result<RecordLayout<'t>, LayoutError> {
        let record = self.record;

        // Round size of record up to its alignment
        let size = data_size
            .checked_round_up(alignment)
            .ok_or_else(|| self.error(ConfigErrorKind::RecordTooLarge))?;

        if size > data_size && self.flags(|flags| flags.warn_padded_record) {
            self.warn(format!(
                "Padded type '{}', with {} bytes to alignment boundary",
                record.friendly_name(),
                (size - data_size).bytes()
            ));
        }

        let format_spec = format_spec(record.kind, record.base, &fields, size);

        Ok(RecordLayout {
            name: record.name.clone(),
            kind: record.kind,
            fields,
            size,
            alignment,
            data_size,
            format_spec,
            layout_mode: settings.layout_mode,
            byte_order: record.byte_order,
        })
    }

    fn check_field_padding(
        &self,
        field: &FieldInfo,
        index: usize,
        field_offset: ByteUnits,
        unpadded_field_offset: ByteUnits,
    ) {
        if field_offset <= unpadded_field_offset {
            return;
        }

        let padding = (field_offset - unpadded_field_offset).bytes();

        if field.is_bitfield() {
            if self.flags(|flags| flags.warn_padded_bitfield) {
                self.warn(format!(
                    "Padded bitfield '{}' of '{}' at index {} by {} bytes",
                    field.name,
                    self.record.friendly_name(),
                    index,
                    padding,
                ));
            }
        } else if self.flags(|flags| flags.warn_padded_field) {
            self.warn(format!(
                "Padded field '{}' of '{}' at index {} by {} bytes",
                field.name,
                self.record.friendly_name(),
                index,
                padding,
            ));
        }
    }

    fn flags(&self, f: impl FnOnce(&diagnostics::DiagnosticFlags) -> bool) -> bool {
        self.diagnostics
            .map_or(false, |diagnostics| f(diagnostics.flags()))
    }

    fn warn(&self, message: String) {
        if let Some(diagnostics) = self.diagnostics {
            diagnostics.push(WarningDiagnostic::new(message, self.record.friendly_name()));
        }
    }

    fn error(&self, kind: impl Into<LayoutErrorKind>) -> LayoutError {
        kind.into().at(self.record.name.as_deref())
    }

    fn placement_error(&self, field: &FieldInfo, error: PlacementError) -> LayoutError {
        match error {
            PlacementError::Overflow => self.field_error(field, FieldErrorKind::TooLarge),
            PlacementError::Internal(kind) => self.error(kind),
        }
    }

    fn field_error(&self, field: &FieldInfo, kind: FieldErrorKind) -> LayoutError {
        self.error(LayoutErrorKind::Field {
            name: field.name.clone(),
            kind,
        })
    }
}
