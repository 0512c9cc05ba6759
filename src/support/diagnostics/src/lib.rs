mod show;
mod warning;

use core::fmt::Debug;
pub use show::Show;
use std::sync::{Mutex, MutexGuard, PoisonError};
pub use warning::WarningDiagnostic;

pub trait Diagnostic: Show + Send + Sync {}

#[derive(Clone, Debug)]
pub struct DiagnosticFlags {
    pub print_without_collecting: bool,
    pub warn_padded_field: bool,
    pub warn_padded_bitfield: bool,
    pub warn_padded_record: bool,
}

impl Default for DiagnosticFlags {
    fn default() -> Self {
        Self {
            print_without_collecting: false,
            warn_padded_field: false,
            warn_padded_bitfield: false,
            warn_padded_record: false,
        }
    }
}

impl DiagnosticFlags {
    pub fn all_padding_warnings() -> Self {
        Self {
            warn_padded_field: true,
            warn_padded_bitfield: true,
            warn_padded_record: true,
            ..Default::default()
        }
    }
}

pub struct Diagnostics {
    diagnostics: Mutex<Vec<Box<dyn Diagnostic>>>,
    flags: DiagnosticFlags,
}

impl Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(DiagnosticFlags::default())
    }
}

impl Diagnostics {
    pub fn new(flags: DiagnosticFlags) -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            flags,
        }
    }

    pub fn flags(&self) -> &DiagnosticFlags {
        &self.flags
    }

    pub fn push(&self, diagnostic: impl Diagnostic + 'static) {
        if self.flags.print_without_collecting {
            self.print(&diagnostic);
        } else {
            self.collected().push(Box::new(diagnostic));
        }
    }

    pub fn len(&self) -> usize {
        self.collected().len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected().is_empty()
    }

    /// Renders every collected diagnostic, in the order they were pushed.
    pub fn rendered(&self) -> Vec<String> {
        self.collected()
            .iter()
            .map(|diagnostic| render(&**diagnostic))
            .collect()
    }

    pub fn print(&self, diagnostic: &dyn Diagnostic) {
        eprintln!("{}", render(diagnostic));
    }

    fn collected(&self) -> MutexGuard<'_, Vec<Box<dyn Diagnostic>>> {
        // A panic while pushing cannot leave the vector half-written
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn render(diagnostic: &dyn Diagnostic) -> String {
    let mut message = String::new();

    diagnostic
        .show(&mut message)
        .expect("show diagnostic message");

    message
}
