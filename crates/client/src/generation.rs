//! Stale-Stream Guard
//!
//! Each generation run is tagged with a token from a shared sequence.
//! Starting a new run (or abandoning the flow) bumps the sequence, so
//! late-arriving events from a superseded stream fail the `is_current`
//! check and are dropped before they can touch newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Issues generation tokens; the most recently issued token is the only
/// current one.
#[derive(Debug, Clone, Default)]
pub struct GenerationTracker {
    sequence: Arc<AtomicU64>,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every previously issued token.
    pub fn begin(&self) -> GenerationToken {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        GenerationToken {
            id,
            sequence: Arc::clone(&self.sequence),
        }
    }

    /// Abandon the active generation without starting a new one (e.g. the
    /// user navigated away).
    pub fn abandon(&self) {
        self.sequence.fetch_add(1, Ordering::SeqCst);
    }
}

/// Token identifying one generation run.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    id: u64,
    sequence: Arc<AtomicU64>,
}

impl GenerationToken {
    /// Whether this run is still the active one. Checked before every
    /// event delivery; a failed check means the event belongs to a
    /// superseded stream and must be discarded.
    pub fn is_current(&self) -> bool {
        self.sequence.load(Ordering::SeqCst) == self.id
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_current() {
        let tracker = GenerationTracker::new();
        let token = tracker.begin();
        assert!(token.is_current());
    }

    #[test]
    fn test_new_run_supersedes_old() {
        let tracker = GenerationTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_abandon_invalidates_without_successor() {
        let tracker = GenerationTracker::new();
        let token = tracker.begin();
        tracker.abandon();
        assert!(!token.is_current());
    }
}
