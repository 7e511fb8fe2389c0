//! Run log entries describing each step of a search.

use scout_core::{BackendError, LogEntry, SearchParameters};

pub const SEED_SEARCH: &str = "Seed search";
pub const FILTER: &str = "Filter";
pub const RANK: &str = "Rank";
pub const SEARCH_FAILED: &str = "Search failed";
pub const CANCELLED: &str = "Cancelled";

/// Where and what the agent starts looking for.
pub fn seed_entry(params: &SearchParameters) -> LogEntry {
    LogEntry::new(
        SEED_SEARCH,
        format!(
            "Searching for companies in {} within {} for {}.",
            params.regions, params.industries, params.applications
        ),
    )
}

/// How the seed list gets narrowed down.
pub fn filter_entry(params: &SearchParameters) -> LogEntry {
    LogEntry::new(
        FILTER,
        format!(
            "Applying product fit heuristics: {} with keywords: {}.",
            params.product, params.keywords
        ),
    )
}

/// The two entries logged as soon as a search starts.
pub fn plan_entries(params: &SearchParameters) -> Vec<LogEntry> {
    vec![seed_entry(params), filter_entry(params)]
}

pub fn rank_entry(count: usize) -> LogEntry {
    LogEntry::new(
        RANK,
        format!(
            "Ranked {} candidates by platform fit and actuator density.",
            count
        ),
    )
}

pub fn failure_entry(error: &BackendError) -> LogEntry {
    LogEntry::new(SEARCH_FAILED, error.to_string())
}

pub fn cancelled_entry() -> LogEntry {
    LogEntry::new(CANCELLED, "Search cancelled before results arrived.")
}
