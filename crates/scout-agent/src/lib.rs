//! Mock search controller for Sales Scout.
//!
//! This crate owns everything that happens between "Find companies" and the
//! results showing up:
//! - `ScoutState`, the explicit state struct behind the screen
//! - `ObservableState`, which broadcasts every mutation to subscribers
//! - `SearchBackend`, the injectable seam that produces candidates
//! - `SearchController`, the search operation and capability stubs
//!
//! Nothing here depends on GPUI, so the whole flow is testable with tokio.

pub mod backend;
pub mod controller;
pub mod observable;
pub mod plan;
pub mod state;

pub use backend::{SearchBackend, SimulatedSearchBackend};
pub use controller::{SearchController, SearchTicket};
pub use observable::ObservableState;
pub use state::ScoutState;

// Re-export scout_core types for convenience
pub use scout_core::{
    BackendError, Capability, CompanyCandidate, LogEntry, ScoutError, SearchField,
    SearchParameters,
};
