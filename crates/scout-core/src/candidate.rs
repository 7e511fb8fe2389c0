//! Company candidates returned by a search.

use serde::{Deserialize, Serialize};

/// A company that looks like a likely adopter, with the rationale for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCandidate {
    /// Company name. Unique within a result set.
    pub name: String,

    /// Why the company is a fit.
    pub why: String,
}

impl CompanyCandidate {
    /// Create a new candidate.
    pub fn new(name: impl Into<String>, why: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            why: why.into(),
        }
    }
}
