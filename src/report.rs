//! Human and machine readable views of a resolved table.

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{NormaliseError, NormaliseResult};
use crate::resolve::{Environment, FacilityTable, Signals};

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Toml,
}

/// One resolved facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityReport {
    pub facility: String,
    pub definition: String,
    pub layer: String,
}

/// Environment and table for one set of signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub build_mode: String,
    pub os: String,
    pub arch: String,
    pub editions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rustc_version: Option<String>,
    pub complete: bool,
    pub facilities: Vec<FacilityReport>,
}

impl Report {
    pub fn new(signals: &Signals, env: &Environment, table: &FacilityTable) -> Self {
        Self {
            build_mode: env.build_mode.to_string(),
            os: env.os.to_string(),
            arch: env.arch.to_string(),
            editions: env.tiers.editions().iter().map(|e| e.to_string()).collect(),
            rustc_version: signals.rustc_version.map(|v| v.to_string()),
            complete: table.is_complete(),
            facilities: table
                .entries()
                .map(|(facility, entry)| FacilityReport {
                    facility: facility.to_string(),
                    definition: entry.definition.to_string(),
                    layer: entry.layer.to_string(),
                })
                .collect(),
        }
    }

    pub fn render(&self, format: ReportFormat) -> NormaliseResult<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| NormaliseError::Serialize(e.to_string())),
            ReportFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| NormaliseError::Serialize(e.to_string()))
            }
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let editions = if self.editions.is_empty() {
            "none".to_string()
        } else {
            self.editions.join(", ")
        };

        out.push_str("Environment:\n");
        out.push_str(&format!("  Build mode: {}\n", self.build_mode));
        out.push_str(&format!("  OS:         {}\n", self.os));
        out.push_str(&format!("  Arch:       {}\n", self.arch));
        out.push_str(&format!("  Editions:   {}\n", editions));
        out.push_str(&format!(
            "  rustc:      {}\n",
            self.rustc_version.as_deref().unwrap_or("unknown")
        ));
        out.push('\n');
        out.push_str("Facilities:\n");
        for f in &self.facilities {
            out.push_str(&format!("  {:<16} {:<18} {}\n", f.facility, f.definition, f.layer));
        }
        if !self.complete {
            out.push_str("  (incomplete)\n");
        }
        out
    }
}
