//! Build script: classify the target and select facility definitions.
//!
//! The resolver sources are shared with the library, so the table the macros
//! are compiled against is the one `normalise::env::table()` reports.

use std::env;
use std::process::Command;

#[allow(dead_code)]
#[path = "src/error.rs"]
mod error;

#[allow(dead_code, unused_imports)]
#[path = "src/resolve/mod.rs"]
mod resolve;

use resolve::{RustcVersion, Signals, BUILD_MODE_OVERRIDE, CARGO_SIGNAL_VARS};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/error.rs");
    println!("cargo:rerun-if-changed=src/resolve");
    println!("cargo:rerun-if-env-changed={}", BUILD_MODE_OVERRIDE);

    let mut signals = Signals::from_lookup(|key| env::var(key).ok());

    if let Ok(value) = env::var(BUILD_MODE_OVERRIDE) {
        if let Err(e) = signals.override_build_mode(&value) {
            println!("cargo:warning={}; using the debug_assertions marker", e);
        }
    }

    signals.rustc_version = rustc_version();

    let (environment, table) = resolve::resolve(&signals);

    for check in resolve::check_cfg_flags() {
        println!("cargo:rustc-check-cfg={}", check);
    }
    for flag in resolve::cfg_flags(&environment, &table) {
        println!("cargo:rustc-cfg={}", flag);
    }

    // Hand the raw signals to the library so it can rebuild the same table
    for key in CARGO_SIGNAL_VARS {
        let name = key.trim_start_matches("CARGO_CFG_");
        let value = match key {
            "CARGO_CFG_DEBUG_ASSERTIONS" => signals.debug_marker.then(|| "1".to_string()),
            "CARGO_CFG_TARGET_VENDOR" => signals.target_vendor.clone(),
            "CARGO_CFG_TARGET_ENV" => signals.target_env.clone(),
            "CARGO_CFG_TARGET_OS" => signals.target_os.clone(),
            _ => signals.target_arch.clone(),
        };
        println!("cargo:rustc-env=NORMALISE_{}={}", name, value.unwrap_or_default());
    }
    println!(
        "cargo:rustc-env=NORMALISE_RUSTC_VERSION={}",
        signals.rustc_version.map(|v| v.to_string()).unwrap_or_default()
    );
}

/// Ask the compiler Cargo is using for its version. Any failure just means
/// no language tier is detected.
fn rustc_version() -> Option<RustcVersion> {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let output = Command::new(rustc).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    RustcVersion::parse(&String::from_utf8_lossy(&output.stdout)).ok()
}
