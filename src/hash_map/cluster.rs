//! Cluster analysis over a slot array
//!
//! A cluster is a maximal run of contiguous occupied slots. The array is read
//! linearly: a run crossing the end/start boundary counts as two clusters.

use crate::hash_map::slot::{Slot, SlotState};

/// Summary of the occupied runs in a slot array
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClusterStats {
    /// Number of runs
    pub count: usize,
    /// Longest run
    pub max_length: usize,
    /// Mean run length, 0 when there are no runs
    pub avg_length: f64,
}

/// Scans slot states and reports run statistics
pub fn analyze<I>(states: I) -> ClusterStats
where
    I: IntoIterator<Item = SlotState>,
{
    let mut count = 0usize;
    let mut total = 0usize;
    let mut max_length = 0usize;
    let mut current = 0usize;

    for state in states {
        if state == SlotState::Occupied {
            current += 1;
            max_length = max_length.max(current);
        } else if current > 0 {
            count += 1;
            total += current;
            current = 0;
        }
    }
    if current > 0 {
        count += 1;
        total += current;
    }

    let avg_length = if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    };
    ClusterStats {
        count,
        max_length,
        avg_length,
    }
}

/// Longest occupied run
pub fn max_cluster_length<K, V>(slots: &[Slot<K, V>]) -> usize {
    analyze(slots.iter().map(Slot::state)).max_length
}

/// Mean occupied run length, 0 if nothing is occupied
pub fn avg_cluster_length<K, V>(slots: &[Slot<K, V>]) -> f64 {
    analyze(slots.iter().map(Slot::state)).avg_length
}
