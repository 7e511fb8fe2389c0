//! Observable scout state with automatic change notifications.
//!
//! Mutation = notification. Every method that changes the state also
//! broadcasts a snapshot, so callers cannot mutate without notifying.

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::state::ScoutState;

/// A `ScoutState` cell that broadcasts every change.
///
/// ## Thread Safety
///
/// Uses `parking_lot::RwLock` for the state (never poisons) and `tokio::sync::watch`
/// for broadcasts. Writers run on the UI thread and on runtime workers; each
/// snapshot is sent while the write lock is held, so broadcasts follow
/// mutation order. The lock is never held across an `.await`.
pub struct ObservableState {
    inner: RwLock<ScoutState>,
    tx: watch::Sender<ScoutState>,
}

impl ObservableState {
    /// Create a new observable cell holding `state`.
    pub fn new(state: ScoutState) -> Self {
        let (tx, _rx) = watch::channel(state.clone());
        Self {
            inner: RwLock::new(state),
            tx,
        }
    }

    /// Subscribe to state changes. Clone the receiver for each subscriber.
    pub fn subscribe(&self) -> watch::Receiver<ScoutState> {
        self.tx.subscribe()
    }

    /// Get a copy of the current state.
    pub fn snapshot(&self) -> ScoutState {
        self.inner.read().clone()
    }

    /// Read the state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ScoutState) -> R,
    {
        f(&self.inner.read())
    }

    /// Modify the state and broadcast the change.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ScoutState) -> R,
    {
        let mut inner = self.inner.write();
        let result = f(&mut inner);
        self.tx.send_replace(inner.clone());
        result
    }

    /// Modify the state, broadcasting only if the closure returns `Some`.
    ///
    /// The closure must leave the state untouched when it returns `None`.
    pub fn update_if<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut ScoutState) -> Option<R>,
    {
        let mut inner = self.inner.write();
        let result = f(&mut inner)?;
        self.tx.send_replace(inner.clone());
        Some(result)
    }
}

impl Default for ObservableState {
    fn default() -> Self {
        Self::new(ScoutState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::LogEntry;

    #[test]
    fn test_update_broadcasts() {
        let state = ObservableState::default();
        let mut rx = state.subscribe();
        assert!(!rx.has_changed().unwrap());

        state.update(|s| s.loading = true);

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().loading);
        assert!(state.snapshot().loading);
    }

    #[test]
    fn test_update_if_none_does_not_broadcast() {
        let state = ObservableState::default();
        let rx = state.subscribe();

        let result: Option<()> = state.update_if(|_| None);

        assert!(result.is_none());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_update_if_some_broadcasts() {
        let state = ObservableState::default();
        let mut rx = state.subscribe();

        let count = state.update_if(|s| {
            s.push_log(LogEntry::new("Step", "detail"));
            Some(s.logs.len())
        });

        assert_eq!(count, Some(1));
        assert_eq!(rx.borrow_and_update().logs.len(), 1);
    }

    #[test]
    fn test_read_sees_latest() {
        let state = ObservableState::default();
        state.update(|s| s.generation = 7);
        assert_eq!(state.read(|s| s.generation), 7);
    }

    #[test]
    fn test_concurrent_writers_leave_channel_on_latest_state() {
        const THREADS: u64 = 8;
        const UPDATES: u64 = 500;

        for _ in 0..50 {
            let state = ObservableState::default();
            let rx = state.subscribe();

            std::thread::scope(|scope| {
                for _ in 0..THREADS {
                    scope.spawn(|| {
                        for _ in 0..UPDATES {
                            state.update(|s| s.generation += 1);
                        }
                    });
                }
            });

            let actual = state.snapshot().generation;
            assert_eq!(actual, THREADS * UPDATES);
            assert_eq!(rx.borrow().generation, actual);
        }
    }

    #[test]
    fn test_broadcast_without_receivers_still_updates() {
        let state = ObservableState::default();
        state.update(|s| s.generation = 3);

        let rx = state.subscribe();
        assert_eq!(rx.borrow().generation, 3);
    }
}
