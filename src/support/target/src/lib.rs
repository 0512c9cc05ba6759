mod arch;
mod byte_order;
mod layout_mode;
mod os;

pub use arch::TargetArch;
pub use byte_order::ByteOrder;
pub use layout_mode::{LayoutMode, UnknownLayoutMode};
pub use os::{TargetOs, TargetOsExt};
use std::fmt::{Display, Formatter};

/// The platform whose C ABI records are laid out for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Target {
    arch: Option<TargetArch>,
    os: Option<TargetOs>,
}

impl Target {
    pub const HOST: Self = Self::new(TargetOs::HOST, TargetArch::HOST);

    pub const fn new(os: Option<TargetOs>, arch: Option<TargetArch>) -> Self {
        Self { arch, os }
    }

    pub const fn generic_os(os: TargetOs) -> Self {
        let arch = match os {
            TargetOs::Windows | TargetOs::Mac | TargetOs::Linux | TargetOs::FreeBsd => {
                TargetArch::X86_64
            }
        };

        Self::new(Some(os), Some(arch))
    }

    pub fn os(&self) -> Option<TargetOs> {
        self.os
    }

    pub fn byte_order(&self) -> ByteOrder {
        match &self.arch {
            Some(TargetArch::X86_64 | TargetArch::Aarch64) => ByteOrder::Little,
            Some(TargetArch::PowerPc64 | TargetArch::S390x) => ByteOrder::Big,
            None => ByteOrder::NATIVE,
        }
    }

    /// Bit-field allocation convention used by the platform's C compiler
    /// when a record does not ask for one.
    pub fn default_layout_mode(&self) -> LayoutMode {
        if self.os.is_windows() {
            LayoutMode::Ms
        } else {
            LayoutMode::GccSysv
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_or_unknown(f, self.arch)?;
        f.write_str(" ")?;
        write_or_unknown(f, self.os)
    }
}

fn write_or_unknown(f: &mut Formatter<'_>, part: Option<impl Display>) -> std::fmt::Result {
    match part {
        Some(part) => part.fmt(f),
        None => f.write_str("unknown"),
    }
}
