//! Mock search controller.
//!
//! The controller owns the observable state and the search backend. A search
//! runs in two halves:
//!
//! ```text
//! begin_search()          (sync)   loading = true, logs = [Seed search, Filter]
//!        │
//!        ▼
//! backend.find_companies  (async)  fixed delay in the simulated backend
//!        │
//!        ▼
//! complete_search()       (sync)   results replaced, + Rank, loading = false
//! ```
//!
//! A trigger while a search is in flight is ignored. A cancelled search bumps
//! the generation, so its late completion is discarded.

use std::sync::Arc;

use scout_core::{Capability, CompanyCandidate, ScoutError, SearchField, SearchParameters};
use tokio::sync::watch;

use crate::backend::SearchBackend;
use crate::observable::ObservableState;
use crate::plan;
use crate::state::ScoutState;

// =============================================================================
// Search Ticket
// =============================================================================

/// Handle for an in-flight search, returned by `begin_search`.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    params: SearchParameters,
}

impl SearchTicket {
    /// Generation the search was started with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Parameters captured when the search started.
    pub fn params(&self) -> &SearchParameters {
        &self.params
    }
}

// =============================================================================
// Search Controller
// =============================================================================

/// Drives the simulated search and owns the screen's state.
pub struct SearchController {
    state: ObservableState,
    backend: Arc<dyn SearchBackend>,
}

impl SearchController {
    /// Create a controller with default form values.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self::with_params(backend, SearchParameters::default())
    }

    /// Create a controller with the given form values.
    pub fn with_params(backend: Arc<dyn SearchBackend>, params: SearchParameters) -> Self {
        Self {
            state: ObservableState::new(ScoutState::with_params(params)),
            backend,
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ScoutState> {
        self.state.subscribe()
    }

    /// Get a copy of the current state.
    pub fn snapshot(&self) -> ScoutState {
        self.state.snapshot()
    }

    /// Whether a search is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.read(|s| s.loading)
    }

    /// Replace one form field, returning the previous value.
    pub fn set_field(&self, field: SearchField, value: impl Into<String>) -> String {
        let value = value.into();
        self.state.update(|s| s.replace_field(field, value))
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Start a search: set loading and reseed the run log with the plan.
    ///
    /// Returns `None` without touching the state if a search is already in flight.
    pub fn begin_search(&self) -> Option<SearchTicket> {
        let ticket = self.state.update_if(|s| {
            if s.loading {
                return None;
            }

            s.generation += 1;
            s.loading = true;
            s.replace_logs(plan::plan_entries(&s.params));

            Some(SearchTicket {
                generation: s.generation,
                params: s.params.clone(),
            })
        });

        match &ticket {
            Some(ticket) => tracing::debug!(generation = ticket.generation, "search started"),
            None => tracing::debug!("search already in flight; ignoring trigger"),
        }

        ticket
    }

    /// Wait for the backend and apply its results.
    ///
    /// Returns `false` if the ticket went stale (the search was cancelled) and
    /// the results were discarded.
    pub async fn complete_search(&self, ticket: SearchTicket) -> bool {
        let SearchTicket { generation, params } = ticket;
        let result = self.backend.find_companies(params).await;

        let applied = self.state.update_if(|s| {
            if s.generation != generation {
                return None;
            }

            s.loading = false;
            match result {
                Ok(candidates) => {
                    let count = candidates.len();
                    s.replace_results(candidates);
                    s.push_log(plan::rank_entry(count));
                }
                Err(e) => {
                    tracing::warn!("Search failed: {}", e);
                    s.push_log(plan::failure_entry(&e));
                }
            }
            Some(())
        });

        if applied.is_some() {
            tracing::debug!(generation, "search completed");
        } else {
            tracing::debug!(generation, "discarding stale search results");
        }

        applied.is_some()
    }

    /// Run a full search. Returns `false` if no search was started or its results were discarded.
    pub async fn search(&self) -> bool {
        match self.begin_search() {
            Some(ticket) => self.complete_search(ticket).await,
            None => false,
        }
    }

    /// Cancel the in-flight search, if any.
    ///
    /// Its results will be discarded when they arrive. Returns `true` if a
    /// search was cancelled.
    pub fn cancel_search(&self) -> bool {
        let cancelled = self
            .state
            .update_if(|s| {
                if !s.loading {
                    return None;
                }
                s.generation += 1;
                s.loading = false;
                s.push_log(plan::cancelled_entry());
                Some(())
            })
            .is_some();

        if cancelled {
            tracing::debug!("search cancelled");
        }
        cancelled
    }

    // -------------------------------------------------------------------------
    // Derived Values
    // -------------------------------------------------------------------------

    /// 100 when there is at least one candidate, otherwise 0.
    pub fn top_score(&self) -> u32 {
        self.state.read(|s| s.top_score())
    }

    /// Whether the export control is enabled.
    pub fn can_export(&self) -> bool {
        self.state.read(|s| s.can_export())
    }

    // -------------------------------------------------------------------------
    // Capability Stubs
    // -------------------------------------------------------------------------

    /// Export the current candidates. Not implemented.
    pub fn export_csv(&self) -> Result<(), ScoutError> {
        let count = self.state.read(|s| s.results.len());
        tracing::debug!(candidates = count, "export requested");
        Err(ScoutError::Unimplemented(Capability::ExportCsv))
    }

    /// Look up people to contact at `candidate`. Not implemented.
    pub fn identify_decision_makers(&self, candidate: &CompanyCandidate) -> Result<(), ScoutError> {
        tracing::debug!(company = %candidate.name, "decision makers requested");
        Err(ScoutError::Unimplemented(
            Capability::IdentifyDecisionMakers,
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockSearchBackend, SimulatedSearchBackend};
    use futures::FutureExt;
    use scout_core::BackendError;
    use std::time::Duration;

    fn simulated() -> Arc<SearchController> {
        Arc::new(SearchController::new(Arc::new(SimulatedSearchBackend::new())))
    }

    fn titles(state: &ScoutState) -> Vec<&str> {
        state.logs.iter().map(|l| l.title.as_str()).collect()
    }

    fn names(state: &ScoutState) -> Vec<&str> {
        state.results.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_initial_state_is_empty() {
        let controller = simulated();
        let state = controller.snapshot();

        assert!(state.results.is_empty());
        assert!(state.logs.is_empty());
        assert!(!state.loading);
        assert_eq!(controller.top_score(), 0);
    }

    #[test]
    fn test_begin_search_sets_loading_and_plan() {
        let controller = simulated();
        controller.set_field(SearchField::Regions, "Korea");
        controller.set_field(SearchField::Industries, "Robotics");
        controller.set_field(SearchField::Applications, "grippers");
        controller.set_field(SearchField::Product, "MLX90395");
        controller.set_field(SearchField::Keywords, "low power");

        let ticket = controller.begin_search().unwrap();
        assert_eq!(ticket.generation(), 1);
        assert_eq!(ticket.params().product, "MLX90395");

        let state = controller.snapshot();
        assert!(state.loading);
        assert_eq!(titles(&state), vec!["Seed search", "Filter"]);

        let seed = &state.logs[0].detail;
        assert!(seed.contains("Korea"));
        assert!(seed.contains("Robotics"));
        assert!(seed.contains("grippers"));

        let filter = &state.logs[1].detail;
        assert!(filter.contains("MLX90395"));
        assert!(filter.contains("low power"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_completes_after_delay() {
        let controller = simulated();
        let ticket = controller.begin_search().unwrap();

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.complete_search(ticket).await }
        });

        // Just before the delay elapses nothing has arrived yet
        tokio::time::sleep(Duration::from_millis(799)).await;
        let state = controller.snapshot();
        assert!(state.loading);
        assert!(state.results.is_empty());
        assert_eq!(state.logs.len(), 2);

        assert!(task.await.unwrap());

        let state = controller.snapshot();
        assert!(!state.loading);
        assert_eq!(names(&state), vec!["BYD", "NIO", "XPeng"]);
        assert_eq!(titles(&state), vec!["Seed search", "Filter", "Rank"]);
        assert_eq!(
            state.logs[2].detail,
            "Ranked 3 candidates by platform fit and actuator density."
        );
        assert_eq!(controller.top_score(), 100);
        assert!(controller.can_export());
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_independent_of_parameters() {
        let default_controller = simulated();
        assert!(default_controller.search().await);

        let other = simulated();
        for field in SearchField::ALL {
            other.set_field(field, "");
        }
        assert!(other.search().await);

        assert_eq!(
            default_controller.snapshot().results,
            other.snapshot().results
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_while_loading_is_ignored() {
        let controller = simulated();
        let ticket = controller.begin_search().unwrap();

        // Edit a field, then trigger again mid-flight
        controller.set_field(SearchField::Regions, "Mars");
        assert!(controller.begin_search().is_none());
        assert!(!controller.search().await);

        let state = controller.snapshot();
        assert_eq!(state.generation, 1);
        assert_eq!(state.logs.len(), 2);
        assert!(!state.logs[0].detail.contains("Mars"));

        assert!(controller.complete_search(ticket).await);
        let state = controller.snapshot();
        assert_eq!(titles(&state), vec!["Seed search", "Filter", "Rank"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_search_reseeds_log() {
        let controller = simulated();
        assert!(controller.search().await);
        assert_eq!(controller.snapshot().logs.len(), 3);

        controller.set_field(SearchField::Keywords, "hall");
        controller.begin_search().unwrap();

        let state = controller.snapshot();
        assert_eq!(titles(&state), vec!["Seed search", "Filter"]);
        assert!(state.logs[1].detail.contains("hall"));
        // Previous results stay until the new ones arrive
        assert_eq!(state.results.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_search_discards_results() {
        let controller = simulated();
        let ticket = controller.begin_search().unwrap();
        assert!(controller.is_loading());
        assert!(!controller.snapshot().can_search());

        assert!(controller.cancel_search());
        assert!(!controller.is_loading());
        assert!(controller.snapshot().can_search());
        assert!(!controller.cancel_search());

        assert!(!controller.complete_search(ticket).await);

        let state = controller.snapshot();
        assert!(state.results.is_empty());
        assert_eq!(titles(&state), vec!["Seed search", "Filter", "Cancelled"]);
    }

    #[tokio::test]
    async fn test_backend_failure_is_logged() {
        let mut backend = MockSearchBackend::new();
        backend.expect_find_companies().times(1).returning(|_| {
            async { Err(BackendError::Search("index offline".to_string())) }.boxed()
        });
        let controller = SearchController::new(Arc::new(backend));

        assert!(controller.search().await);

        let state = controller.snapshot();
        assert!(!state.loading);
        assert!(state.results.is_empty());
        assert_eq!(titles(&state), vec!["Seed search", "Filter", "Search failed"]);
        assert_eq!(state.logs[2].detail, "Search error: index offline");
    }

    #[tokio::test]
    async fn test_backend_receives_current_parameters() {
        let mut backend = MockSearchBackend::new();
        backend
            .expect_find_companies()
            .withf(|params| params.product == "MLX91220")
            .times(1)
            .returning(|_| async { Ok(SimulatedSearchBackend::candidates()) }.boxed());
        let controller = SearchController::new(Arc::new(backend));

        controller.set_field(SearchField::Product, "MLX91220");
        assert!(controller.search().await);
        assert_eq!(controller.snapshot().results.len(), 3);
    }

    #[test]
    fn test_set_field_broadcasts() {
        let controller = simulated();
        let mut rx = controller.subscribe();

        let old = controller.set_field(SearchField::Product, "MLX90372");

        assert_eq!(old, "Melexis Triaxis (3D magnetic position)");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().params.product, "MLX90372");
    }

    #[tokio::test(start_paused = true)]
    async fn test_capability_stubs() {
        let controller = simulated();
        assert!(!controller.can_export());
        assert!(matches!(
            controller.export_csv(),
            Err(ScoutError::Unimplemented(Capability::ExportCsv))
        ));

        controller.search().await;
        assert!(controller.can_export());
        assert!(matches!(
            controller.export_csv(),
            Err(ScoutError::Unimplemented(Capability::ExportCsv))
        ));

        let candidate = controller.snapshot().results[0].clone();
        assert!(matches!(
            controller.identify_decision_makers(&candidate),
            Err(ScoutError::Unimplemented(
                Capability::IdentifyDecisionMakers
            ))
        ));
    }
}
