//! Environment classifier: raw signals to normalized flags.
//!
//! Classification never fails. An unrecognized vendor, toolchain or
//! architecture leaves the corresponding flag unset, and more facilities
//! fall through to the neutral layer later on.

use std::fmt;

use super::signals::{RustcVersion, Signals};

/// Whether diagnostics are compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "debug",
            BuildMode::Release => "release",
        }
    }

    pub fn is_debug(&self) -> bool {
        matches!(self, BuildMode::Debug)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Target operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    /// Apple toolchain
    MacOs,
    /// Microsoft toolchain
    Windows,
    /// Recognized, but its facility branch is reserved
    Linux,
    /// None of the above; every OS-specific layer is skipped
    Unspecified,
}

impl OsFamily {
    pub const KNOWN: [OsFamily; 3] = [OsFamily::MacOs, OsFamily::Windows, OsFamily::Linux];

    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::MacOs => "macos",
            OsFamily::Windows => "windows",
            OsFamily::Linux => "linux",
            OsFamily::Unspecified => "unspecified",
        }
    }

    /// Value of the `normalise_os` cfg, if one is emitted.
    pub fn cfg_value(&self) -> Option<&'static str> {
        match self {
            OsFamily::Unspecified => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Target CPU family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchFamily {
    X86,
    Arm64,
    Unknown,
}

impl ArchFamily {
    pub const KNOWN: [ArchFamily; 2] = [ArchFamily::X86, ArchFamily::Arm64];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchFamily::X86 => "x86",
            ArchFamily::Arm64 => "arm64",
            ArchFamily::Unknown => "unknown",
        }
    }

    /// Value of the `normalise_arch` cfg, if one is emitted.
    pub fn cfg_value(&self) -> Option<&'static str> {
        match self {
            ArchFamily::Unknown => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for ArchFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Language tiers, one per Rust edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Edition {
    E2015,
    E2018,
    E2021,
    E2024,
}

impl Edition {
    pub const ALL: [Edition; 4] = [Edition::E2015, Edition::E2018, Edition::E2021, Edition::E2024];

    /// First stable compiler that accepts this edition.
    pub const fn threshold(&self) -> RustcVersion {
        match self {
            Edition::E2015 => RustcVersion::new(1, 0, 0),
            Edition::E2018 => RustcVersion::new(1, 31, 0),
            Edition::E2021 => RustcVersion::new(1, 56, 0),
            Edition::E2024 => RustcVersion::new(1, 85, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::E2015 => "2015",
            Edition::E2018 => "2018",
            Edition::E2021 => "2021",
            Edition::E2024 => "2024",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Cumulative language tiers. Each flag is set by its own threshold check,
/// so meeting a newer threshold implies the older ones as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LanguageTiers {
    pub edition2015: bool,
    pub edition2018: bool,
    pub edition2021: bool,
    pub edition2024: bool,
}

impl LanguageTiers {
    pub fn from_version(version: Option<RustcVersion>) -> Self {
        let Some(v) = version else {
            return Self::default();
        };

        Self {
            edition2015: v >= Edition::E2015.threshold(),
            edition2018: v >= Edition::E2018.threshold(),
            edition2021: v >= Edition::E2021.threshold(),
            edition2024: v >= Edition::E2024.threshold(),
        }
    }

    pub fn contains(&self, edition: Edition) -> bool {
        match edition {
            Edition::E2015 => self.edition2015,
            Edition::E2018 => self.edition2018,
            Edition::E2021 => self.edition2021,
            Edition::E2024 => self.edition2024,
        }
    }

    /// All tiers that hold, oldest first.
    pub fn editions(&self) -> Vec<Edition> {
        Edition::ALL.into_iter().filter(|e| self.contains(*e)).collect()
    }

    pub fn highest(&self) -> Option<Edition> {
        self.editions().last().copied()
    }

    pub fn any(&self) -> bool {
        self.highest().is_some()
    }
}

/// Normalized flags derived from one set of signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Environment {
    pub build_mode: BuildMode,
    pub os: OsFamily,
    pub arch: ArchFamily,
    pub tiers: LanguageTiers,
}

impl Environment {
    pub fn is_debug(&self) -> bool {
        self.build_mode.is_debug()
    }
}

/// Classify raw signals. First match wins for OS and architecture.
pub fn classify(signals: &Signals) -> Environment {
    let build_mode = if signals.debug_marker {
        BuildMode::Debug
    } else {
        BuildMode::Release
    };

    let os = if signals.target_vendor.as_deref() == Some("apple") {
        OsFamily::MacOs
    } else if signals.target_env.as_deref() == Some("msvc") {
        OsFamily::Windows
    } else if signals.target_os.as_deref() == Some("linux") {
        OsFamily::Linux
    } else {
        OsFamily::Unspecified
    };

    let arch = match signals.target_arch.as_deref() {
        Some("x86") | Some("x86_64") => ArchFamily::X86,
        Some("aarch64") => ArchFamily::Arm64,
        _ => ArchFamily::Unknown,
    };

    Environment {
        build_mode,
        os,
        arch,
        tiers: LanguageTiers::from_version(signals.rustc_version),
    }
}
