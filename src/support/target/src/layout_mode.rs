use derive_more::IsVariant;
use std::{fmt::Display, str::FromStr};

/// Convention for allocating bit-fields into storage units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IsVariant)]
pub enum LayoutMode {
    /// Microsoft: a run of bit-fields never mixes declared types, and
    /// `#pragma pack` may clamp field alignment.
    Ms,
    /// GCC / System V: bit-fields share any storage unit they fit in.
    GccSysv,
}

impl Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LayoutMode::Ms => "ms",
            LayoutMode::GccSysv => "gcc-sysv",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownLayoutMode(pub String);

impl Display for UnknownLayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown layout mode '{}', expected 'ms' or 'gcc-sysv'",
            self.0
        )
    }
}

impl std::error::Error for UnknownLayoutMode {}

impl FromStr for LayoutMode {
    type Err = UnknownLayoutMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ms" => Ok(LayoutMode::Ms),
            "gcc-sysv" => Ok(LayoutMode::GccSysv),
            _ => Err(UnknownLayoutMode(s.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes() {
        assert_eq!("ms".parse::<LayoutMode>(), Ok(LayoutMode::Ms));
        assert_eq!("gcc-sysv".parse::<LayoutMode>(), Ok(LayoutMode::GccSysv));
        assert_eq!(LayoutMode::GccSysv.to_string(), "gcc-sysv");
    }

    #[test]
    fn rejects_unknown_mode() {
        let error = "msvc".parse::<LayoutMode>().unwrap_err();
        assert_eq!(error, UnknownLayoutMode("msvc".into()));
        assert!(error.to_string().contains("'msvc'"));
    }
}
