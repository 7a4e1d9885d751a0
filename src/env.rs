//! What this build resolved.
//!
//! The build script passes its raw signals through to the library, so the
//! environment and table here are rebuilt from exactly what the macros were
//! selected by.

use std::sync::OnceLock;

use tracing::debug;

use crate::resolve::{classify, Environment, FacilityTable, RustcVersion, Signals};

/// Debug build mode (debug marker, after any `NORMALISE_BUILD_MODE` override).
pub const IS_DEBUG: bool = cfg!(normalise_debug);

/// Apple toolchain detected.
pub const IS_MACOS: bool = cfg!(normalise_os = "macos");

/// Microsoft toolchain detected.
pub const IS_WINDOWS: bool = cfg!(normalise_os = "windows");

/// Linux detected; its facility branch is reserved.
pub const IS_LINUX: bool = cfg!(normalise_os = "linux");

/// Signals the build script classified.
pub fn signals() -> Signals {
    fn opt(value: &'static str) -> Option<String> {
        (!value.is_empty()).then(|| value.to_string())
    }

    Signals {
        debug_marker: !env!("NORMALISE_DEBUG_ASSERTIONS").is_empty(),
        target_vendor: opt(env!("NORMALISE_TARGET_VENDOR")),
        target_env: opt(env!("NORMALISE_TARGET_ENV")),
        target_os: opt(env!("NORMALISE_TARGET_OS")),
        target_arch: opt(env!("NORMALISE_TARGET_ARCH")),
        rustc_version: RustcVersion::parse(env!("NORMALISE_RUSTC_VERSION")).ok(),
    }
}

/// Normalized flags for this build.
pub fn environment() -> Environment {
    classify(&signals())
}

/// Facility table for this build, resolved once per process.
pub fn table() -> &'static FacilityTable {
    static TABLE: OnceLock<FacilityTable> = OnceLock::new();

    TABLE.get_or_init(|| {
        let env = environment();
        let table = FacilityTable::resolve(&env);
        debug!(
            "Resolved {} facilities for {} / {} / {}",
            table.len(),
            env.os,
            env.arch,
            env.build_mode
        );
        table
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{ArchFamily, Edition, Facility, OsFamily};

    /// Values of a cfg key this crate was compiled with, out of `candidates`.
    macro_rules! compiled {
        ($key:tt: $($value:tt)|+) => {{
            let mut found: Vec<&'static str> = Vec::new();
            $(
                if cfg!($key = $value) {
                    found.push($value);
                }
            )+
            found
        }};
    }

    #[test]
    fn test_table_matches_compiled_cfgs() {
        let table = table();
        let compiled = [
            (Facility::Restrict, compiled!(normalise_restrict: "noalias" | "neutral")),
            (Facility::ForceInline, compiled!(normalise_force_inline: "inline-always" | "neutral")),
            (Facility::NeverInline, compiled!(normalise_never_inline: "inline-never" | "neutral")),
            (Facility::PrettyFunction, compiled!(normalise_pretty_function: "type-name" | "neutral")),
            (Facility::IgnoreUnused, compiled!(normalise_ignore_unused: "discard" | "neutral")),
            (Facility::MaybeUnused, compiled!(normalise_maybe_unused: "allow-unused" | "neutral")),
            (
                Facility::Breakpoint,
                compiled!(normalise_breakpoint: "trap-int3" | "trap-brk" | "debug-break" | "neutral"),
            ),
            (
                Facility::DebugPrint,
                compiled!(normalise_debug_print: "stdout" | "debug-output" | "neutral"),
            ),
            (Facility::DebugLine, compiled!(normalise_debug_line: "timestamped" | "neutral")),
            (Facility::ErrorIf, compiled!(normalise_errorif: "conditional-break" | "neutral")),
        ];

        for (facility, values) in compiled {
            let expected = table.definition(facility).unwrap().cfg_value();
            assert_eq!(values, vec![expected], "{}", facility);
        }
    }

    #[test]
    fn test_environment_matches_compiled_cfgs() {
        let env = environment();
        assert_eq!(env.is_debug(), IS_DEBUG);
        assert_eq!(env.os == OsFamily::MacOs, IS_MACOS);
        assert_eq!(env.os == OsFamily::Windows, IS_WINDOWS);
        assert_eq!(env.os == OsFamily::Linux, IS_LINUX);
        assert_eq!(env.arch == ArchFamily::X86, cfg!(normalise_arch = "x86"));
        assert_eq!(env.arch == ArchFamily::Arm64, cfg!(normalise_arch = "arm64"));
        assert_eq!(env.tiers.contains(Edition::E2021), cfg!(normalise_edition = "2021"));
    }

    #[test]
    fn test_signals_match_target() {
        let signals = signals();
        assert_eq!(signals.target_os.as_deref(), Some(std::env::consts::OS));
        // This crate needs a compiler new enough for every tier up to 2021
        if signals.rustc_version.is_some() {
            assert!(environment().tiers.contains(Edition::E2021));
        }
    }

    #[test]
    fn test_table_is_initialized_once() {
        let first: *const FacilityTable = table();
        let second: *const FacilityTable = table();
        assert_eq!(first, second);
        assert!(table().is_complete());
    }
}
