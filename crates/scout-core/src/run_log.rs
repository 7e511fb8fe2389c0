//! Agent run log entries.

use serde::{Deserialize, Serialize};

/// One step of the search process, shown in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Short step name, e.g. "Seed search".
    pub title: String,

    /// Human-readable description of the step.
    pub detail: String,
}

impl LogEntry {
    /// Create a new log entry.
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}
