//! Timed workload execution against one table configuration

use super::generator::{self, KeyPattern, KeyValue};
use super::timer::PhaseTimer;
use crate::error::{ProbeError, Result};
use crate::hash_map::{ClusterStats, HashStats, OpenAddressingTable, ProbeStrategy};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Pre-generated operations shared by every table of a measurement
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    /// Key pattern the keys were drawn with
    pub pattern: KeyPattern,
    /// Pairs inserted, in order
    pub key_values: Vec<KeyValue>,
    /// Indices into `key_values` looked up as hits
    pub hit_indices: Vec<usize>,
    /// Keys guaranteed absent, looked up as misses
    pub miss_keys: Vec<i64>,
    /// Indices into `key_values` erased and then re-inserted
    pub delete_indices: Vec<usize>,
}

impl Workload {
    /// Generate a workload of `size` keys.
    ///
    /// `size` searches are issued, `round(size * miss_rate)` of them for absent
    /// keys; `delete_count` keys (at most `size`) are erased.
    pub fn build<R: Rng + ?Sized>(
        pattern: KeyPattern,
        size: usize,
        key_upper: i64,
        miss_rate: f64,
        delete_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let key_values = generator::generate(pattern, rng, size, key_upper)?;
        let existing: HashSet<i64> = key_values.iter().map(|(k, _)| *k).collect();

        let num_miss = ((size as f64 * miss_rate).round() as usize).min(size);
        let num_hit = size - num_miss;

        let mut hit_indices = generator::shuffled_indices(rng, size);
        hit_indices.truncate(num_hit);
        let miss_keys = generator::generate_miss_keys(rng, num_miss, &existing, key_upper)?;
        let mut delete_indices = generator::shuffled_indices(rng, size);
        delete_indices.truncate(delete_count.min(size));

        Ok(Self {
            pattern,
            key_values,
            hit_indices,
            miss_keys,
            delete_indices,
        })
    }

    /// Number of keys inserted
    pub fn len(&self) -> usize {
        self.key_values.len()
    }

    /// True if no key is inserted
    pub fn is_empty(&self) -> bool {
        self.key_values.is_empty()
    }
}

/// Averaged timings and probe counts of one table over several runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatResult {
    /// Time to insert every key, in microseconds
    pub insert_time_us: f64,
    /// Time to run every hit and miss search, in microseconds
    pub search_time_us: f64,
    /// Time to erase the delete set, in microseconds
    pub delete_time_us: f64,
    /// Mean probes per successful search
    pub avg_probe_search_hit: f64,
    /// Mean probes per unsuccessful search
    pub avg_probe_search_miss: f64,
    /// Mean probes per insert into a table carrying tombstones
    pub avg_probe_insert_after_delete: f64,
    /// Inserts rejected for lack of a reachable slot, summed over runs
    pub failed_inserts: u64,
}

/// Outcome of [`run_table`]
#[derive(Debug, Clone, PartialEq)]
pub struct TableRun {
    /// Averages over all runs
    pub result: StatResult,
    /// Counters of the first run
    pub stats: HashStats,
    /// Clustering right after the first run's insert phase
    pub clusters: ClusterStats,
    /// Capacity at the end of the first run
    pub final_capacity: usize,
}

/// Run `workload` against `runs` fresh clones of `template`.
///
/// Each run inserts every key, searches the hit and miss keys, erases the
/// delete set and re-inserts it with new values. Timings and probe averages
/// are averaged over the runs.
pub fn run_table<P, R>(
    template: &OpenAddressingTable<i64, i64, P>,
    workload: &Workload,
    runs: usize,
    rng: &mut R,
) -> Result<TableRun>
where
    P: ProbeStrategy,
    R: Rng + ?Sized,
{
    let runs = runs.max(1);
    let mut total = StatResult::default();
    let mut first: Option<(HashStats, ClusterStats, usize)> = None;

    for run in 0..runs {
        let mut table = template.clone();
        table.reset_stats();
        let mut failed = 0u64;

        let timer = PhaseTimer::start("insert");
        for &(key, value) in &workload.key_values {
            if let Err(e) = table.insert(key, value) {
                failed += rejected(e)?;
            }
        }
        total.insert_time_us += timer.finish().as_secs_f64() * 1e6;
        let clusters = table.cluster_stats();

        let timer = PhaseTimer::start("search");
        let before = table.stats().total_probes_search;
        for &i in &workload.hit_indices {
            let _ = table.search(&workload.key_values[i].0);
        }
        let hit_probes = table.stats().total_probes_search - before;
        let before = table.stats().total_probes_search;
        for key in &workload.miss_keys {
            let _ = table.search(key);
        }
        let miss_probes = table.stats().total_probes_search - before;
        total.search_time_us += timer.finish().as_secs_f64() * 1e6;

        let timer = PhaseTimer::start("delete");
        for &i in &workload.delete_indices {
            let _ = table.erase(&workload.key_values[i].0);
        }
        total.delete_time_us += timer.finish().as_secs_f64() * 1e6;

        let before = table.stats().total_probes_insert;
        for &i in &workload.delete_indices {
            let key = workload.key_values[i].0;
            if let Err(e) = table.insert(key, generator::random_value(rng)) {
                failed += rejected(e)?;
            }
        }
        let reinsert_probes = table.stats().total_probes_insert - before;

        total.avg_probe_search_hit += mean(hit_probes, workload.hit_indices.len());
        total.avg_probe_search_miss += mean(miss_probes, workload.miss_keys.len());
        total.avg_probe_insert_after_delete +=
            mean(reinsert_probes, workload.delete_indices.len());
        total.failed_inserts += failed;

        if failed > 0 {
            log::warn!(
                "{}: {} inserts rejected in run {} (capacity {})",
                table.probe_kind().short_name(),
                failed,
                run,
                table.capacity()
            );
        }
        if first.is_none() {
            first = Some((table.stats().clone(), clusters, table.capacity()));
        }
    }

    let n = runs as f64;
    let result = StatResult {
        insert_time_us: total.insert_time_us / n,
        search_time_us: total.search_time_us / n,
        delete_time_us: total.delete_time_us / n,
        avg_probe_search_hit: total.avg_probe_search_hit / n,
        avg_probe_search_miss: total.avg_probe_search_miss / n,
        avg_probe_insert_after_delete: total.avg_probe_insert_after_delete / n,
        failed_inserts: total.failed_inserts,
    };
    let (stats, clusters, final_capacity) = first.unwrap_or_default();

    Ok(TableRun {
        result,
        stats,
        clusters,
        final_capacity,
    })
}

/// Counts a rejected insert; any other error aborts the run
fn rejected(e: ProbeError) -> Result<u64> {
    match e {
        ProbeError::TableFull { .. }
        | ProbeError::ProbeExhausted { .. }
        | ProbeError::RehashLostEntry { .. } => Ok(1),
        other => Err(other),
    }
}

fn mean(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_map::{DoubleHashTable, LinearTable, QuadraticTable};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn workload(pattern: KeyPattern, size: usize) -> Workload {
        let mut rng = StdRng::seed_from_u64(0xBEEF);
        Workload::build(pattern, size, 10_000, 0.5, size, &mut rng).unwrap()
    }

    #[test]
    fn test_workload_shape() {
        let w = workload(KeyPattern::Random, 101);
        assert_eq!(w.len(), 101);
        // round(50.5) = 51 misses
        assert_eq!(w.miss_keys.len(), 51);
        assert_eq!(w.hit_indices.len(), 50);
        assert_eq!(w.delete_indices.len(), 101);

        let keys: HashSet<i64> = w.key_values.iter().map(|(k, _)| *k).collect();
        assert!(w.miss_keys.iter().all(|k| !keys.contains(k)));
        assert!(w.hit_indices.iter().all(|&i| i < w.len()));
    }

    #[test]
    fn test_workload_delete_count_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let w = Workload::build(KeyPattern::Sequential, 10, 1_000, 0.0, 50, &mut rng).unwrap();
        assert_eq!(w.delete_indices.len(), 10);
        assert!(w.miss_keys.is_empty());
        assert_eq!(w.hit_indices.len(), 10);
    }

    #[test]
    fn test_run_table_counts_operations() {
        let w = workload(KeyPattern::Random, 200);
        let mut rng = StdRng::seed_from_u64(2);
        let template = LinearTable::<i64, i64>::fixed(401);
        let run = run_table(&template, &w, 2, &mut rng).unwrap();

        // 200 inserts then 200 re-inserts
        assert_eq!(run.stats.n_insert, 400);
        assert_eq!(run.stats.n_search, 200);
        assert_eq!(run.stats.n_delete, 200);
        assert_eq!(run.final_capacity, 401);
        assert_eq!(run.result.failed_inserts, 0);

        assert!(run.result.avg_probe_search_hit >= 1.0);
        assert!(run.result.avg_probe_search_miss >= 1.0);
        assert!(run.result.avg_probe_insert_after_delete >= 1.0);
        assert!(run.clusters.max_length >= 1);

        // the template is untouched
        assert!(template.is_empty());
        assert_eq!(template.stats().n_insert, 0);
    }

    #[test]
    fn test_run_table_all_strategies() {
        let w = workload(KeyPattern::Clustered, 150);
        let mut rng = StdRng::seed_from_u64(3);

        let linear = run_table(&LinearTable::<i64, i64>::new(17), &w, 1, &mut rng).unwrap();
        let quadratic = run_table(&QuadraticTable::<i64, i64>::new(17), &w, 1, &mut rng).unwrap();
        let double = run_table(&DoubleHashTable::<i64, i64>::new(17), &w, 1, &mut rng).unwrap();

        assert_eq!(linear.result.failed_inserts, 0);
        assert_eq!(double.result.failed_inserts, 0);
        for run in [&linear, &quadratic, &double] {
            assert!(run.stats.rehash_count > 0);
            assert!(run.final_capacity > 150);
        }
    }

    #[test]
    fn test_run_table_records_rejected_inserts() {
        let w = workload(KeyPattern::Sequential, 20);
        let mut rng = StdRng::seed_from_u64(4);
        let run = run_table(&LinearTable::<i64, i64>::fixed(11), &w, 1, &mut rng).unwrap();
        // 9 of the initial inserts overflow; re-inserts of the erased keys
        // that never made it in overflow as well
        assert!(run.result.failed_inserts >= 9);
        assert_eq!(run.final_capacity, 11);
    }
}
