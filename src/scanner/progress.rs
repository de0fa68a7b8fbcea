//! Shared progress signal for UI polling

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Percentage of a running scan, shared between the orchestrator and pollers
///
/// Within one scan the value only moves forward.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    percent: Arc<AtomicU8>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the percentage to `percent` (capped at 100) and returns the current value
    pub fn advance(&self, percent: u8) -> u8 {
        let percent = percent.min(100);
        self.percent.fetch_max(percent, Ordering::SeqCst).max(percent)
    }

    pub fn get(&self) -> u8 {
        self.percent.load(Ordering::SeqCst)
    }

    /// Starts a new scan at zero
    pub fn reset(&self) {
        self.percent.store(0, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_monotonic() {
        let tracker = ProgressTracker::new();
        assert_eq!(tracker.advance(30), 30);
        assert_eq!(tracker.advance(10), 30);
        assert_eq!(tracker.get(), 30);
        assert_eq!(tracker.advance(200), 100);
    }

    #[test]
    fn test_clones_share_state() {
        let tracker = ProgressTracker::new();
        let poller = tracker.clone();
        tracker.advance(55);
        assert_eq!(poller.get(), 55);

        tracker.reset();
        assert_eq!(poller.get(), 0);
    }
}
