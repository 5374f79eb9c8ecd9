//! Traversal statistics.

use std::time::{Duration, Instant};

/// Counters collected during one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Sources that resolved to an object.
    pub sources_resolved: u64,
    /// Objects handed to the formatter.
    pub objects_rendered: u64,
    /// Folders whose children were listed.
    pub containers_expanded: u64,
    /// Permission lookups issued.
    pub permission_lookups: u64,
    /// Listing pages received.
    pub pages_received: u64,
    /// Wall time of the invocation.
    pub elapsed: Duration,
}

/// Internal stats tracker with timing.
#[derive(Debug)]
pub(crate) struct StatsTracker {
    start_time: Instant,
    stats: TraversalStats,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            stats: TraversalStats::default(),
        }
    }

    pub fn record_source(&mut self) {
        self.stats.sources_resolved += 1;
    }

    pub fn record_render(&mut self) {
        self.stats.objects_rendered += 1;
    }

    pub fn record_permission_lookup(&mut self) {
        self.stats.permission_lookups += 1;
    }

    pub fn record_listing(&mut self, pages: u64) {
        self.stats.containers_expanded += 1;
        self.stats.pages_received += pages;
    }

    pub fn snapshot(&self) -> TraversalStats {
        TraversalStats {
            elapsed: self.start_time.elapsed(),
            ..self.stats.clone()
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_counts() {
        let mut tracker = StatsTracker::new();
        tracker.record_source();
        tracker.record_render();
        tracker.record_render();
        tracker.record_listing(3);
        tracker.record_permission_lookup();

        let stats = tracker.snapshot();
        assert_eq!(stats.sources_resolved, 1);
        assert_eq!(stats.objects_rendered, 2);
        assert_eq!(stats.containers_expanded, 1);
        assert_eq!(stats.pages_received, 3);
        assert_eq!(stats.permission_lookups, 1);
    }
}
