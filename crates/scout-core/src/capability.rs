//! Capabilities that are exposed in the UI but not built yet.
//!
//! Each one has a control on screen. Invoking it returns
//! `ScoutError::Unimplemented` with the matching variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, not-yet-implemented capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Export the current candidates as CSV.
    ExportCsv,
    /// Find the people to contact at a candidate company.
    IdentifyDecisionMakers,
}

impl Capability {
    /// Button text for the capability.
    pub fn label(self) -> &'static str {
        match self {
            Capability::ExportCsv => "Export CSV",
            Capability::IdentifyDecisionMakers => "Identify decision makers",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
