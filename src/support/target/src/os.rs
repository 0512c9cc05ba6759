use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetOs {
    Windows,
    Mac,
    Linux,
    FreeBsd,
}

impl TargetOs {
    pub const HOST: Option<Self> = if cfg!(target_os = "windows") {
        Some(TargetOs::Windows)
    } else if cfg!(target_os = "macos") {
        Some(TargetOs::Mac)
    } else if cfg!(target_os = "linux") {
        Some(TargetOs::Linux)
    } else if cfg!(target_os = "freebsd") {
        Some(TargetOs::FreeBsd)
    } else {
        None
    };
}

impl Display for TargetOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TargetOs::Windows => "windows",
            TargetOs::Mac => "macos",
            TargetOs::Linux => "linux",
            TargetOs::FreeBsd => "freebsd",
        })
    }
}

pub trait TargetOsExt {
    fn is_windows(&self) -> bool;
}

impl TargetOsExt for TargetOs {
    fn is_windows(&self) -> bool {
        matches!(self, TargetOs::Windows)
    }
}

impl TargetOsExt for Option<TargetOs> {
    fn is_windows(&self) -> bool {
        matches!(self, Some(TargetOs::Windows))
    }
}
