//! Raw compiler and target signals, before classification.
//!
//! In a build script these come from the `CARGO_CFG_*` variables Cargo sets
//! and from `$RUSTC --version`. The CLI builds them from flags or a profile
//! to simulate other environments.

use std::fmt;

use crate::error::{NormaliseError, NormaliseResult};

/// Environment variable that overrides the debug marker at build time.
pub const BUILD_MODE_OVERRIDE: &str = "NORMALISE_BUILD_MODE";

/// Build-script variables the classifier reads.
pub const CARGO_SIGNAL_VARS: [&str; 5] = [
    "CARGO_CFG_DEBUG_ASSERTIONS",
    "CARGO_CFG_TARGET_VENDOR",
    "CARGO_CFG_TARGET_ENV",
    "CARGO_CFG_TARGET_OS",
    "CARGO_CFG_TARGET_ARCH",
];

/// A `major.minor.patch` compiler version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RustcVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl RustcVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Parse either a bare version (`1.80.0`, `1.85.0-nightly`) or the
    /// full `rustc --version` line (`rustc 1.80.0 (051478957 2024-07-21)`).
    pub fn parse(text: &str) -> NormaliseResult<Self> {
        let invalid = || NormaliseError::InvalidRustcVersion(text.trim().to_string());

        let token = text
            .split_whitespace()
            .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))
            .ok_or_else(invalid)?;

        // Drop pre-release and build metadata: "1.85.0-nightly" -> "1.85.0"
        let core = token.split(['-', '+']).next().unwrap_or(token);

        let mut parts = core.split('.');
        let mut next = |required: bool| -> NormaliseResult<u32> {
            match parts.next() {
                Some(p) => p.parse().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };

        let major = next(true)?;
        let minor = next(true)?;
        let patch = next(false)?;
        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for RustcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Everything the classifier looks at. Absent values are simply absent;
/// nothing here is validated against a list of known targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    /// Conventional debug marker (`debug_assertions`)
    pub debug_marker: bool,
    /// `target_vendor`, e.g. "apple", "pc", "unknown"
    pub target_vendor: Option<String>,
    /// `target_env`, e.g. "msvc", "gnu", "musl"
    pub target_env: Option<String>,
    /// `target_os`, e.g. "macos", "windows", "linux"
    pub target_os: Option<String>,
    /// `target_arch`, e.g. "x86_64", "aarch64"
    pub target_arch: Option<String>,
    /// Compiler version, if it could be determined
    pub rustc_version: Option<RustcVersion>,
}

impl Signals {
    /// Read signals through `lookup`, which maps a build-script variable name
    /// to its value. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            debug_marker: lookup("CARGO_CFG_DEBUG_ASSERTIONS").is_some(),
            target_vendor: get("CARGO_CFG_TARGET_VENDOR"),
            target_env: get("CARGO_CFG_TARGET_ENV"),
            target_os: get("CARGO_CFG_TARGET_OS"),
            target_arch: get("CARGO_CFG_TARGET_ARCH"),
            rustc_version: None,
        }
    }

    /// Apply an explicit `debug`/`release` override to the debug marker.
    pub fn override_build_mode(&mut self, value: &str) -> NormaliseResult<()> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => self.debug_marker = true,
            "release" => self.debug_marker = false,
            _ => return Err(NormaliseError::InvalidBuildMode(value.trim().to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_version_line() {
        let v = RustcVersion::parse("rustc 1.80.0 (051478957 2024-07-21)").unwrap();
        assert_eq!(v, RustcVersion::new(1, 80, 0));
        assert_eq!(v.to_string(), "1.80.0");
    }

    #[test]
    fn test_parse_prerelease() {
        let v = RustcVersion::parse("rustc 1.85.0-nightly (a2545fd6f 2024-11-29)").unwrap();
        assert_eq!(v, RustcVersion::new(1, 85, 0));
        assert_eq!(RustcVersion::parse("1.31").unwrap(), RustcVersion::new(1, 31, 0));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(RustcVersion::parse("").is_err());
        assert!(RustcVersion::parse("rustc").is_err());
        assert!(RustcVersion::parse("1").is_err());
        assert!(RustcVersion::parse("1.x.0").is_err());
    }

    #[test]
    fn test_version_ordering() {
        assert!(RustcVersion::new(1, 56, 0) > RustcVersion::new(1, 31, 9));
        assert!(RustcVersion::new(2, 0, 0) > RustcVersion::new(1, 99, 99));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("CARGO_CFG_DEBUG_ASSERTIONS", ""),
            ("CARGO_CFG_TARGET_VENDOR", "apple"),
            ("CARGO_CFG_TARGET_ENV", ""),
            ("CARGO_CFG_TARGET_OS", "macos"),
            ("CARGO_CFG_TARGET_ARCH", "aarch64"),
        ]
        .into_iter()
        .collect();

        let signals = Signals::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        // debug_assertions is a valueless cfg, so presence is what counts
        assert!(signals.debug_marker);
        assert_eq!(signals.target_vendor.as_deref(), Some("apple"));
        assert_eq!(signals.target_env, None);
        assert_eq!(signals.target_arch.as_deref(), Some("aarch64"));
        assert_eq!(signals.rustc_version, None);
    }

    #[test]
    fn test_from_lookup_nothing() {
        let signals = Signals::from_lookup(|_| None);
        assert_eq!(signals, Signals::default());
    }

    #[test]
    fn test_override_build_mode() {
        let mut signals = Signals::default();
        signals.override_build_mode("Debug").unwrap();
        assert!(signals.debug_marker);
        signals.override_build_mode(" release ").unwrap();
        assert!(!signals.debug_marker);

        let err = signals.override_build_mode("fast").unwrap_err();
        assert_eq!(err, NormaliseError::InvalidBuildMode("fast".into()));
        assert!(!signals.debug_marker);
    }
}
