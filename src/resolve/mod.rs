//! Capability resolver.
//!
//! This module tree is compiled twice: into the library, and into `build.rs`
//! through a `#[path]` include. The build script classifies the real target,
//! resolves the table and emits the cfgs the facility macros are selected
//! by. The library uses the same code to inspect and simulate tables.
//!
//! ```text
//! Signals --classify--> Environment --resolve--> FacilityTable --> cfg flags
//! ```
//!
//! Only `std` and `crate::error` may be used in here.

pub mod classify;
pub mod signals;
pub mod table;

pub use classify::{classify, ArchFamily, BuildMode, Edition, Environment, LanguageTiers, OsFamily};
pub use signals::{RustcVersion, Signals, BUILD_MODE_OVERRIDE, CARGO_SIGNAL_VARS};
pub use table::{Definition, Entry, Facility, FacilityTable, Layer, Sink, Trap};

/// Cfg set when the build mode is debug.
pub const DEBUG_CFG: &str = "normalise_debug";
pub const OS_CFG: &str = "normalise_os";
pub const ARCH_CFG: &str = "normalise_arch";
/// Multi-valued: one value per language tier that holds.
pub const EDITION_CFG: &str = "normalise_edition";

/// Classify and resolve in one step.
pub fn resolve(signals: &Signals) -> (Environment, FacilityTable) {
    let env = classify(signals);
    let table = FacilityTable::resolve(&env);
    (env, table)
}

/// `rustc-cfg` values for a resolved environment and table.
pub fn cfg_flags(env: &Environment, table: &FacilityTable) -> Vec<String> {
    let mut flags = Vec::new();

    if env.is_debug() {
        flags.push(DEBUG_CFG.to_string());
    }
    if let Some(os) = env.os.cfg_value() {
        flags.push(format!("{}=\"{}\"", OS_CFG, os));
    }
    if let Some(arch) = env.arch.cfg_value() {
        flags.push(format!("{}=\"{}\"", ARCH_CFG, arch));
    }
    for edition in env.tiers.editions() {
        flags.push(format!("{}=\"{}\"", EDITION_CFG, edition));
    }
    for (facility, entry) in table.entries() {
        flags.push(format!("{}=\"{}\"", facility.cfg_key(), entry.definition.cfg_value()));
    }

    flags
}

/// `rustc-check-cfg` declarations covering every cfg `cfg_flags` can emit.
pub fn check_cfg_flags() -> Vec<String> {
    fn values<I: IntoIterator<Item = &'static str>>(key: &str, vals: I) -> String {
        let quoted: Vec<String> = vals.into_iter().map(|v| format!("\"{}\"", v)).collect();
        format!("cfg({}, values({}))", key, quoted.join(", "))
    }

    let mut flags = vec![
        format!("cfg({})", DEBUG_CFG),
        values(OS_CFG, OsFamily::KNOWN.iter().map(|o| o.as_str())),
        values(ARCH_CFG, ArchFamily::KNOWN.iter().map(|a| a.as_str())),
        values(EDITION_CFG, Edition::ALL.iter().map(|e| e.as_str())),
    ];
    for facility in Facility::ALL {
        flags.push(values(
            facility.cfg_key(),
            facility.candidates().iter().map(|d| d.cfg_value()),
        ));
    }
    flags
}
