//! Search backend seam.
//!
//! The `SearchBackend` trait is GPUI-independent and returns futures, so the
//! controller can drive it on any executor and tests can swap in mocks.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use scout_core::{BackendError, CompanyCandidate, SearchParameters};

// =============================================================================
// Backend Trait
// =============================================================================

/// Produces company candidates for a set of search parameters.
#[cfg_attr(test, mockall::automock)]
pub trait SearchBackend: Send + Sync {
    /// Find companies matching the parameters.
    fn find_companies(
        &self,
        params: SearchParameters,
    ) -> BoxFuture<'static, Result<Vec<CompanyCandidate>, BackendError>>;
}

// =============================================================================
// Simulated Backend
// =============================================================================

/// Stand-in backend: waits a fixed delay, then returns the same three candidates.
///
/// The parameters are ignored.
#[derive(Debug, Clone)]
pub struct SimulatedSearchBackend {
    delay: Duration,
}

impl SimulatedSearchBackend {
    /// Delay used when none is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

    /// Create a simulated backend with the default delay.
    pub fn new() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
        }
    }

    /// Create with a custom delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The fixed result set, in rank order.
    pub fn candidates() -> Vec<CompanyCandidate> {
        vec![
            CompanyCandidate::new(
                "BYD",
                "Triaxis fits steering/actuator angle sensing in steer-by-wire programs.",
            ),
            CompanyCandidate::new(
                "NIO",
                "Redundant rotary sensing in steer-by-wire; stray-field robust sensors required.",
            ),
            CompanyCandidate::new(
                "XPeng",
                "Centralized chassis increases actuator count; good fit for magnetic sensing.",
            ),
        ]
    }
}

impl Default for SimulatedSearchBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBackend for SimulatedSearchBackend {
    fn find_companies(
        &self,
        _params: SearchParameters,
    ) -> BoxFuture<'static, Result<Vec<CompanyCandidate>, BackendError>> {
        let delay = self.delay;

        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Ok(Self::candidates())
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::SearchField;
    use tokio::time::Instant;

    fn names(candidates: &[CompanyCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_backend_waits_default_delay() {
        let backend = SimulatedSearchBackend::new();
        assert_eq!(backend.delay(), Duration::from_millis(800));

        let start = Instant::now();
        let results = backend
            .find_companies(SearchParameters::default())
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(800));
        assert_eq!(names(&results), vec!["BYD", "NIO", "XPeng"]);
    }

    #[tokio::test]
    async fn test_simulated_backend_zero_delay() {
        let backend = SimulatedSearchBackend::new().with_delay(Duration::ZERO);
        let results = backend
            .find_companies(SearchParameters::default())
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_simulated_backend_ignores_parameters() {
        let backend = SimulatedSearchBackend::new().with_delay(Duration::ZERO);

        let mut params = SearchParameters::default();
        params.replace(SearchField::Product, "Something else entirely");
        params.replace(SearchField::Regions, "");

        let default_results = backend
            .find_companies(SearchParameters::default())
            .await
            .unwrap();
        let other_results = backend.find_companies(params).await.unwrap();

        assert_eq!(default_results, other_results);
    }

    #[tokio::test]
    async fn test_mock_backend_failure() {
        let mut backend = MockSearchBackend::new();
        backend
            .expect_find_companies()
            .times(1)
            .returning(|_| async { Err(BackendError::Unavailable) }.boxed());

        let result = backend.find_companies(SearchParameters::default()).await;
        assert!(matches!(result, Err(BackendError::Unavailable)));
    }
}
