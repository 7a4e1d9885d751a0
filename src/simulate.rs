//! Resolve tables for targets other than the one being built.

use tracing::{debug, warn};

use crate::error::{NormaliseError, NormaliseResult};
use crate::resolve::{resolve, Environment, FacilityTable, RustcVersion, Signals};

/// (vendor, env, os) triples covering each OS branch plus an unrecognized target.
const TOOLCHAINS: [(&str, &str, &str); 5] = [
    ("apple", "", "macos"),
    ("pc", "msvc", "windows"),
    ("pc", "gnu", "windows"),
    ("unknown", "gnu", "linux"),
    ("", "", ""),
];

const ARCHES: [&str; 4] = ["x86", "x86_64", "aarch64", "riscv64"];

/// One simulated target.
#[derive(Debug, Clone)]
pub struct MatrixCase {
    pub label: String,
    pub signals: Signals,
    pub environment: Environment,
    pub table: FacilityTable,
}

/// Signals for every toolchain x architecture x build mode combination.
pub fn matrix_signals(rustc_version: Option<RustcVersion>) -> Vec<Signals> {
    let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());

    let mut all = Vec::new();
    for (vendor, env, os) in TOOLCHAINS {
        for arch in ARCHES {
            for debug_marker in [true, false] {
                all.push(Signals {
                    debug_marker,
                    target_vendor: opt(vendor),
                    target_env: opt(env),
                    target_os: opt(os),
                    target_arch: opt(arch),
                    rustc_version,
                });
            }
        }
    }
    all
}

fn label(signals: &Signals) -> String {
    let part = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    format!(
        "{}/{}/{}/{} {}",
        part(&signals.target_vendor),
        part(&signals.target_env),
        part(&signals.target_os),
        part(&signals.target_arch),
        if signals.debug_marker { "debug" } else { "release" }
    )
}

/// Resolve the whole matrix.
pub fn matrix(rustc_version: Option<RustcVersion>) -> Vec<MatrixCase> {
    matrix_signals(rustc_version)
        .into_iter()
        .map(|signals| {
            let (environment, table) = resolve(&signals);
            MatrixCase {
                label: label(&signals),
                signals,
                environment,
                table,
            }
        })
        .collect()
}

/// Resolve the matrix and check every table is complete.
/// Returns the number of targets checked.
pub fn verify_matrix(rustc_version: Option<RustcVersion>) -> NormaliseResult<usize> {
    let cases = matrix(rustc_version);
    let mut missing = Vec::new();

    for case in &cases {
        let gaps = case.table.missing();
        if gaps.is_empty() {
            debug!("{}: complete", case.label);
        } else {
            warn!("{}: missing {:?}", case.label, gaps);
            missing.extend(gaps.iter().map(|f| format!("{} ({})", f, case.label)));
        }
    }

    if missing.is_empty() {
        Ok(cases.len())
    } else {
        Err(NormaliseError::IncompleteTable(missing))
    }
}
