use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetArch {
    X86_64,
    Aarch64,
    PowerPc64,
    S390x,
}

impl TargetArch {
    pub const HOST: Option<Self> = if cfg!(target_arch = "x86_64") {
        Some(TargetArch::X86_64)
    } else if cfg!(target_arch = "aarch64") {
        Some(TargetArch::Aarch64)
    } else if cfg!(target_arch = "powerpc64") {
        Some(TargetArch::PowerPc64)
    } else if cfg!(target_arch = "s390x") {
        Some(TargetArch::S390x)
    } else {
        None
    };
}

impl Display for TargetArch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TargetArch::X86_64 => "x86_64",
            TargetArch::Aarch64 => "aarch64",
            TargetArch::PowerPc64 => "powerpc64",
            TargetArch::S390x => "s390x",
        })
    }
}
