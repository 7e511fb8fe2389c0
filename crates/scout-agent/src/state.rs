//! Explicit state behind the scout screen.
//!
//! All updates are whole-value replacements: the new value goes in and the
//! old one comes back out.

use scout_core::{CompanyCandidate, LogEntry, SearchField, SearchParameters};

/// Score reported when at least one candidate is present.
pub const TOP_SCORE: u32 = 100;

/// Form inputs plus everything derived from the latest search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoutState {
    /// Current form values.
    pub params: SearchParameters,

    /// Whether a search is in flight.
    pub loading: bool,

    /// Candidates from the latest completed search.
    pub results: Vec<CompanyCandidate>,

    /// Run log for the latest search, in arrival order.
    pub logs: Vec<LogEntry>,

    /// Generation counter for async cancellation.
    pub generation: u64,
}

impl ScoutState {
    /// Create a state seeded with the given parameters.
    pub fn with_params(params: SearchParameters) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Replace one form field, returning the previous value.
    pub fn replace_field(&mut self, field: SearchField, value: impl Into<String>) -> String {
        self.params.replace(field, value)
    }

    /// Replace the result list, returning the previous one.
    pub fn replace_results(&mut self, results: Vec<CompanyCandidate>) -> Vec<CompanyCandidate> {
        std::mem::replace(&mut self.results, results)
    }

    /// Replace the run log, returning the previous one.
    pub fn replace_logs(&mut self, logs: Vec<LogEntry>) -> Vec<LogEntry> {
        std::mem::replace(&mut self.logs, logs)
    }

    /// Append to the run log.
    pub fn push_log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
    }

    /// 100 when there is at least one candidate, otherwise 0.
    pub fn top_score(&self) -> u32 {
        if self.results.is_empty() {
            0
        } else {
            TOP_SCORE
        }
    }

    /// Whether the export control is enabled.
    pub fn can_export(&self) -> bool {
        !self.results.is_empty()
    }

    /// Whether the "Find companies" control is enabled.
    pub fn can_search(&self) -> bool {
        !self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ScoutState::default();
        assert!(!state.loading);
        assert!(state.results.is_empty());
        assert!(state.logs.is_empty());
        assert_eq!(state.params, SearchParameters::default());
        assert!(state.can_search());
        assert!(!state.can_export());
    }

    #[test]
    fn test_top_score() {
        let mut state = ScoutState::default();
        assert_eq!(state.top_score(), 0);

        state.replace_results(vec![CompanyCandidate::new("A", "a")]);
        assert_eq!(state.top_score(), 100);

        state.replace_results(vec![
            CompanyCandidate::new("A", "a"),
            CompanyCandidate::new("B", "b"),
            CompanyCandidate::new("C", "c"),
            CompanyCandidate::new("D", "d"),
        ]);
        assert_eq!(state.top_score(), 100);

        state.replace_results(Vec::new());
        assert_eq!(state.top_score(), 0);
    }

    #[test]
    fn test_replace_results_returns_previous() {
        let mut state = ScoutState::default();
        let first = vec![CompanyCandidate::new("A", "a")];

        let old = state.replace_results(first.clone());
        assert!(old.is_empty());

        let old = state.replace_results(Vec::new());
        assert_eq!(old, first);
    }

    #[test]
    fn test_replace_logs_and_push() {
        let mut state = ScoutState::default();
        state.push_log(LogEntry::new("One", "1"));

        let old = state.replace_logs(vec![LogEntry::new("Two", "2")]);
        assert_eq!(old.len(), 1);
        assert_eq!(old[0].title, "One");

        state.push_log(LogEntry::new("Three", "3"));
        let titles: Vec<_> = state.logs.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Two", "Three"]);
    }

    #[test]
    fn test_replace_field() {
        let mut state = ScoutState::default();
        let old = state.replace_field(SearchField::Industries, "Aerospace");
        assert_eq!(old, "Automotive, Industrial Automation, Robotics");
        assert_eq!(state.params.industries, "Aerospace");
    }
}
