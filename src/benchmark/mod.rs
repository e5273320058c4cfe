//! Benchmark driver
//!
//! Compares the three probe strategies on seeded synthetic workloads:
//! - [`generator`]: key patterns, absent keys and index shuffles
//! - [`runner`]: timed insert/search/erase/re-insert runs against one table
//! - [`report`]: text tables and CSV export
//!
//! A [`BenchmarkSession`] walks every configured size, both resize modes, every
//! key pattern and every load factor, and measures each strategy on the same
//! workload.

pub mod generator;
pub mod report;
pub mod runner;
pub mod timer;

pub use generator::{KeyPattern, KeyValue};
pub use report::{CsvExporter, CSV_HEADER};
pub use runner::{run_table, StatResult, TableRun, Workload};
pub use timer::{format_duration, PhaseTimer};

use crate::config::{BenchmarkConfig, Config, TableConfig};
use crate::error::Result;
use crate::hash_map::{next_prime, DoubleHashTable, LinearTable, ProbeKind, QuadraticTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::PathBuf;

/// Range multiplier for generated keys relative to the largest table
const KEY_RANGE_FACTOR: usize = 10;

/// One strategy measured at one load factor
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Keys inserted
    pub size: usize,
    /// Key pattern
    pub pattern: KeyPattern,
    /// Whether the table was allowed to grow
    pub resize_enabled: bool,
    /// Target load factor
    pub load_factor: f64,
    /// Initial table capacity
    pub capacity: usize,
    /// Probe strategy
    pub kind: ProbeKind,
    /// Timings and counters
    pub run: TableRun,
}

/// Table capacity giving `size` keys the requested load factor
pub fn table_capacity(size: usize, load_factor: f64) -> usize {
    next_prime((size as f64 / load_factor) as usize)
}

/// Run the workload against a fresh table of the given strategy
pub fn measure_kind<R: Rng + ?Sized>(
    kind: ProbeKind,
    config: TableConfig,
    workload: &Workload,
    runs: usize,
    rng: &mut R,
) -> Result<TableRun> {
    match kind {
        ProbeKind::Linear => run_table(&LinearTable::with_config(config)?, workload, runs, rng),
        ProbeKind::Quadratic => {
            run_table(&QuadraticTable::with_config(config)?, workload, runs, rng)
        }
        ProbeKind::Double => {
            run_table(&DoubleHashTable::with_config(config)?, workload, runs, rng)
        }
    }
}

/// Seeded benchmark session over a [`BenchmarkConfig`]
#[derive(Debug)]
pub struct BenchmarkSession {
    config: BenchmarkConfig,
    rng: StdRng,
}

impl BenchmarkSession {
    /// Validate `config` and seed the session generator
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    /// Session configuration
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// CSV file receiving one size/pattern/mode combination
    pub fn csv_path(&self, size: usize, pattern: KeyPattern, resize_enabled: bool) -> PathBuf {
        let mode = if resize_enabled { "with" } else { "without" };
        self.config.csv_dir.join(format!(
            "benchmark_{}_{}_{}_rehash.csv",
            size,
            pattern.label().to_lowercase(),
            mode
        ))
    }

    /// Measure every strategy at every load factor on one generated workload
    pub fn measure(
        &mut self,
        size: usize,
        pattern: KeyPattern,
        resize_enabled: bool,
    ) -> Result<Vec<Measurement>> {
        let capacities: Vec<(f64, usize)> = self
            .config
            .load_factors
            .iter()
            .map(|&lf| (lf, table_capacity(size, lf)))
            .collect();
        let largest = capacities.iter().map(|(_, c)| *c).max().unwrap_or(size);
        let key_upper = (largest.max(size) * KEY_RANGE_FACTOR) as i64;

        let workload = Workload::build(
            pattern,
            size,
            key_upper,
            self.config.miss_rate,
            size,
            &mut self.rng,
        )?;
        log::debug!(
            "{} workload: {} keys, {} hits, {} misses, {} deletes",
            pattern,
            workload.len(),
            workload.hit_indices.len(),
            workload.miss_keys.len(),
            workload.delete_indices.len()
        );

        let mut measurements = Vec::with_capacity(capacities.len() * ProbeKind::ALL.len());
        for &(load_factor, capacity) in &capacities {
            let table_config = if resize_enabled {
                TableConfig::growing(capacity)
            } else {
                TableConfig::fixed(capacity)
            };
            for kind in ProbeKind::ALL {
                let run = measure_kind(
                    kind,
                    table_config.clone(),
                    &workload,
                    self.config.runs,
                    &mut self.rng,
                )?;
                measurements.push(Measurement {
                    size,
                    pattern,
                    resize_enabled,
                    load_factor,
                    capacity,
                    kind,
                    run,
                });
            }
        }
        Ok(measurements)
    }

    /// Run the whole session, printing reports to `out` and appending CSV rows
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<Vec<Measurement>> {
        let timer = PhaseTimer::start("session");
        let sizes = self.config.test_sizes.clone();
        let mut all = Vec::new();

        for size in sizes {
            for resize_enabled in [true, false] {
                for pattern in KeyPattern::ALL {
                    log::info!(
                        "measuring {} {} keys (resize {})",
                        size,
                        pattern,
                        resize_enabled
                    );
                    let measurements = self.measure(size, pattern, resize_enabled)?;
                    let capacities: Vec<(f64, usize)> = self
                        .config
                        .load_factors
                        .iter()
                        .map(|&lf| (lf, table_capacity(size, lf)))
                        .collect();

                    report::print_header(out, size, pattern.label(), resize_enabled, &capacities)?;
                    report::print_cluster_stats(out, &measurements)?;
                    report::print_summary(out, &measurements)?;
                    report::print_detail(out, &measurements)?;

                    CsvExporter::new(self.csv_path(size, pattern, resize_enabled))
                        .append(&measurements)?;
                    all.extend(measurements);
                }
            }
        }

        log::info!(
            "session finished: {} measurements in {}",
            all.len(),
            format_duration(timer.finish())
        );
        Ok(all)
    }
}
