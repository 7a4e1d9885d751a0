//! Signal profiles: saved environments for simulating other targets.
//!
//! A profile stores the same raw signals the build script reads, so a table
//! resolved from a profile is the one a build for that target would get.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{NormaliseError, NormaliseResult};
use crate::resolve::{RustcVersion, Signals};

/// Raw signals as stored on disk. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalProfile {
    /// "debug" or "release"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_vendor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_env: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_os: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_arch: Option<String>,

    /// e.g. "1.80.0"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rustc_version: Option<String>,
}

impl SignalProfile {
    pub fn from_signals(signals: &Signals) -> Self {
        let build_mode = if signals.debug_marker { "debug" } else { "release" };
        Self {
            build_mode: Some(build_mode.to_string()),
            target_vendor: signals.target_vendor.clone(),
            target_env: signals.target_env.clone(),
            target_os: signals.target_os.clone(),
            target_arch: signals.target_arch.clone(),
            rustc_version: signals.rustc_version.map(|v| v.to_string()),
        }
    }

    /// Validate and convert. A missing build mode means release.
    pub fn to_signals(&self) -> NormaliseResult<Signals> {
        let mut signals = Signals {
            debug_marker: false,
            target_vendor: self.target_vendor.clone(),
            target_env: self.target_env.clone(),
            target_os: self.target_os.clone(),
            target_arch: self.target_arch.clone(),
            rustc_version: None,
        };
        if let Some(mode) = &self.build_mode {
            signals.override_build_mode(mode)?;
        }
        if let Some(version) = &self.rustc_version {
            signals.rustc_version = Some(RustcVersion::parse(version)?);
        }
        Ok(signals)
    }

    /// Default location: `<config dir>/normalise/profile.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("normalise").join("profile.toml"))
    }

    /// Load profile from TOML file
    pub fn load(path: &Path) -> NormaliseResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let profile: Self =
            toml::from_str(&content).map_err(|e| NormaliseError::Config(e.to_string()))?;
        info!("Loaded signal profile from {}", path.display());
        Ok(profile)
    }

    /// Save profile to TOML file
    pub fn save(&self, path: &Path) -> NormaliseResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| NormaliseError::Serialize(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!("Saved signal profile to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows_profile() -> SignalProfile {
        SignalProfile {
            build_mode: Some("debug".into()),
            target_vendor: Some("pc".into()),
            target_env: Some("msvc".into()),
            target_os: Some("windows".into()),
            target_arch: Some("aarch64".into()),
            rustc_version: Some("1.82.0".into()),
        }
    }

    #[test]
    fn test_to_signals() {
        let signals = windows_profile().to_signals().unwrap();
        assert!(signals.debug_marker);
        assert_eq!(signals.target_env.as_deref(), Some("msvc"));
        assert_eq!(signals.rustc_version, Some(RustcVersion::new(1, 82, 0)));
    }

    #[test]
    fn test_empty_profile_is_release() {
        let signals = SignalProfile::default().to_signals().unwrap();
        assert_eq!(signals, Signals::default());
    }

    #[test]
    fn test_invalid_values() {
        let mut profile = windows_profile();
        profile.build_mode = Some("turbo".into());
        assert!(matches!(
            profile.to_signals(),
            Err(NormaliseError::InvalidBuildMode(_))
        ));

        let mut profile = windows_profile();
        profile.rustc_version = Some("latest".into());
        assert!(matches!(
            profile.to_signals(),
            Err(NormaliseError::InvalidRustcVersion(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profile.toml");

        let profile = windows_profile();
        profile.save(&path).unwrap();
        let loaded = SignalProfile::load(&path).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        std::fs::write(&path, "target_vendor = \"apple\"\ntarget_arch = \"x86_64\"\n").unwrap();

        let loaded = SignalProfile::load(&path).unwrap();
        assert_eq!(loaded.target_vendor.as_deref(), Some("apple"));
        assert_eq!(loaded.build_mode, None);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(SignalProfile::load(&missing), Err(NormaliseError::Io(_))));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "target_os = [").unwrap();
        assert!(matches!(SignalProfile::load(&bad), Err(NormaliseError::Config(_))));
    }

    #[test]
    fn test_from_signals_roundtrip_current_build() {
        let signals = crate::env::signals();
        let profile = SignalProfile::from_signals(&signals);
        assert_eq!(profile.to_signals().unwrap(), signals);
    }
}
