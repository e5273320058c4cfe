//! Benchmark driver configuration.

use super::{parse_env_list, parse_env_var, Config};
use crate::error::{ProbeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters of a benchmark session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Number of keys inserted per session
    pub test_sizes: Vec<usize>,
    /// Target load factors; each yields a table of `next_prime(size / lf)` slots
    pub load_factors: Vec<f64>,
    /// Fraction of searches that look up absent keys
    pub miss_rate: f64,
    /// Repetitions averaged per measurement
    pub runs: usize,
    /// Seed for every generator of the session
    pub seed: u64,
    /// Directory receiving the CSV summaries
    pub csv_dir: PathBuf,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            test_sizes: vec![1_000, 10_000],
            load_factors: vec![0.5, 0.9],
            miss_rate: 0.5,
            runs: 3,
            seed: 0x0DDB_1A5E,
            csv_dir: PathBuf::from("."),
        }
    }
}

impl Config for BenchmarkConfig {
    fn validate(&self) -> Result<()> {
        if self.test_sizes.is_empty() || self.test_sizes.contains(&0) {
            return Err(ProbeError::configuration(
                "test_sizes must be a non-empty list of positive sizes",
            ));
        }
        if self.load_factors.is_empty() {
            return Err(ProbeError::configuration("load_factors must not be empty"));
        }
        if let Some(lf) = self
            .load_factors
            .iter()
            .find(|lf| !lf.is_finite() || **lf <= 0.0 || **lf > 1.0)
        {
            return Err(ProbeError::configuration(format!(
                "load factor must be in (0, 1], got {}",
                lf
            )));
        }
        if !(0.0..=1.0).contains(&self.miss_rate) {
            return Err(ProbeError::configuration(format!(
                "miss_rate must be in [0, 1], got {}",
                self.miss_rate
            )));
        }
        if self.runs == 0 {
            return Err(ProbeError::configuration("runs must be at least 1"));
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.test_sizes = parse_env_list(&format!("{}BENCH_SIZES", prefix), config.test_sizes);
        config.load_factors =
            parse_env_list(&format!("{}BENCH_LOAD_FACTORS", prefix), config.load_factors);
        config.miss_rate = parse_env_var(&format!("{}BENCH_MISS_RATE", prefix), config.miss_rate);
        config.runs = parse_env_var(&format!("{}BENCH_RUNS", prefix), config.runs);
        config.seed = parse_env_var(&format!("{}BENCH_SEED", prefix), config.seed);
        config.csv_dir = parse_env_var(&format!("{}BENCH_CSV_DIR", prefix), config.csv_dir);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            test_sizes: vec![1_000],
            runs: 1,
            ..Self::default()
        }
    }

    fn memory_preset() -> Self {
        Self {
            load_factors: vec![0.9],
            ..Self::default()
        }
    }

    fn realtime_preset() -> Self {
        Self {
            test_sizes: vec![100, 1_000],
            runs: 5,
            ..Self::default()
        }
    }
}
