//! Probe and collision counters owned by a single table

use serde::{Deserialize, Serialize};

/// Operation statistics for one table instance.
///
/// Only the owning table mutates these counters; callers get a shared reference.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashStats {
    /// Slots examined by all insert calls
    pub total_probes_insert: u64,
    /// Slots examined by all search calls, hits and misses alike
    pub total_probes_search: u64,
    /// Slots examined by all erase calls, hits and misses alike
    pub total_probes_delete: u64,
    /// Inserts of a new key whose home slot held a different live key
    pub total_collisions: u64,
    /// Number of insert calls
    pub n_insert: u64,
    /// Number of search calls
    pub n_search: u64,
    /// Number of erase calls
    pub n_delete: u64,
    /// Number of slot array rebuilds
    pub rehash_count: u64,
}

impl HashStats {
    pub(crate) fn record_insert(&mut self, probes: usize, collided: bool) {
        self.total_probes_insert += probes as u64;
        self.n_insert += 1;
        if collided {
            self.total_collisions += 1;
        }
    }

    pub(crate) fn record_search(&mut self, probes: usize) {
        self.total_probes_search += probes as u64;
        self.n_search += 1;
    }

    pub(crate) fn record_delete(&mut self, probes: usize) {
        self.total_probes_delete += probes as u64;
        self.n_delete += 1;
    }

    pub(crate) fn record_rehash(&mut self) {
        self.rehash_count += 1;
    }

    /// Average slots examined per insert
    pub fn avg_insert_probes(&self) -> f64 {
        ratio(self.total_probes_insert, self.n_insert)
    }

    /// Average slots examined per search
    pub fn avg_search_probes(&self) -> f64 {
        ratio(self.total_probes_search, self.n_search)
    }

    /// Average slots examined per erase
    pub fn avg_delete_probes(&self) -> f64 {
        ratio(self.total_probes_delete, self.n_delete)
    }

    /// Collisions per hundred inserts
    pub fn collision_rate(&self) -> f64 {
        100.0 * ratio(self.total_collisions, self.n_insert)
    }
}

#[inline]
fn ratio(total: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_averages_are_zero() {
        let stats = HashStats::default();
        assert_eq!(stats.avg_insert_probes(), 0.0);
        assert_eq!(stats.avg_search_probes(), 0.0);
        assert_eq!(stats.avg_delete_probes(), 0.0);
        assert_eq!(stats.collision_rate(), 0.0);
    }

    #[test]
    fn test_recording() {
        let mut stats = HashStats::default();
        stats.record_insert(1, false);
        stats.record_insert(3, true);
        stats.record_search(2);
        stats.record_delete(4);
        stats.record_delete(2);
        stats.record_rehash();

        assert_eq!(stats.n_insert, 2);
        assert_eq!(stats.total_collisions, 1);
        assert_eq!(stats.avg_insert_probes(), 2.0);
        assert_eq!(stats.collision_rate(), 50.0);
        assert_eq!(stats.avg_search_probes(), 2.0);
        assert_eq!(stats.avg_delete_probes(), 3.0);
        assert_eq!(stats.rehash_count, 1);
    }

    #[test]
    fn test_json_shape() {
        let mut stats = HashStats::default();
        stats.record_search(5);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"total_probes_search\":5"));
        let back: HashStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
