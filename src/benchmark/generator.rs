//! Synthetic key/value generators
//!
//! Every generator takes the random source as an argument; a session seeds one
//! `StdRng` and threads it through, so a fixed seed reproduces the workload.

use crate::error::{ProbeError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Key/value pair fed to the tables
pub type KeyValue = (i64, i64);

/// Values are drawn from `[1, DEFAULT_VALUE_UPPER]`
pub const DEFAULT_VALUE_UPPER: i64 = 1_000_000;

/// Number of runs produced by [`KeyPattern::Clustered`]
pub const CLUSTER_COUNT: usize = 5;

/// Shape of the generated key set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPattern {
    /// Distinct keys drawn uniformly from `[1, key_upper]`
    Random,
    /// Keys `1..=count`
    Sequential,
    /// Five runs of consecutive keys spread over `[1, key_upper]`
    Clustered,
}

impl KeyPattern {
    /// All patterns, in report order
    pub const ALL: [KeyPattern; 3] = [KeyPattern::Random, KeyPattern::Sequential, KeyPattern::Clustered];

    /// Upper-case label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            KeyPattern::Random => "RANDOM",
            KeyPattern::Sequential => "SEQUENTIAL",
            KeyPattern::Clustered => "CLUSTERED",
        }
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generates `count` distinct keys with random values following `pattern`
pub fn generate<R: Rng + ?Sized>(
    pattern: KeyPattern,
    rng: &mut R,
    count: usize,
    key_upper: i64,
) -> Result<Vec<KeyValue>> {
    match pattern {
        KeyPattern::Random => random_key_values(rng, count, key_upper),
        KeyPattern::Sequential => Ok(sequential_key_values(rng, count)),
        KeyPattern::Clustered => Ok(clustered_key_values(rng, count, key_upper)),
    }
}

/// Distinct keys drawn uniformly from `[1, key_upper]`
pub fn random_key_values<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    key_upper: i64,
) -> Result<Vec<KeyValue>> {
    if key_upper < count as i64 {
        return Err(ProbeError::configuration(format!(
            "cannot draw {} distinct keys from [1, {}]",
            count, key_upper
        )));
    }
    let mut used = HashSet::with_capacity(count);
    let mut key_values = Vec::with_capacity(count);
    while key_values.len() < count {
        let key = rng.gen_range(1..=key_upper);
        if used.insert(key) {
            key_values.push((key, random_value(rng)));
        }
    }
    Ok(key_values)
}

/// Keys `1..=count` with random values
pub fn sequential_key_values<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<KeyValue> {
    (1..=count as i64).map(|key| (key, random_value(rng))).collect()
}

/// [`CLUSTER_COUNT`] runs of consecutive keys; runs start `key_upper / 5`
/// apart (or one run length apart if that is larger) and any remainder
/// extends the last run.
pub fn clustered_key_values<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    key_upper: i64,
) -> Vec<KeyValue> {
    let per_cluster = count / CLUSTER_COUNT;
    let stride = (key_upper / CLUSTER_COUNT as i64).max(per_cluster as i64);

    let mut key_values = Vec::with_capacity(count);
    let mut base = 1i64;
    for _ in 0..CLUSTER_COUNT {
        for offset in 0..per_cluster as i64 {
            key_values.push((base + offset, random_value(rng)));
        }
        base += stride;
    }
    // the remainder continues past the last run start
    let mut next = base - stride + per_cluster as i64;
    while key_values.len() < count {
        key_values.push((next, random_value(rng)));
        next += 1;
    }
    key_values
}

/// `count` distinct keys from `[1, key_upper]` absent from `existing`
pub fn generate_miss_keys<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    existing: &HashSet<i64>,
    key_upper: i64,
) -> Result<Vec<i64>> {
    let in_range = existing.iter().filter(|&&k| k >= 1 && k <= key_upper).count() as i64;
    if key_upper - in_range < count as i64 {
        return Err(ProbeError::configuration(format!(
            "cannot draw {} absent keys from [1, {}] with {} keys present",
            count, key_upper, in_range
        )));
    }
    let mut used: HashSet<i64> = existing.clone();
    let mut keys = Vec::with_capacity(count);
    while keys.len() < count {
        let key = rng.gen_range(1..=key_upper);
        if used.insert(key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

/// A random permutation of `0..len`
pub fn shuffled_indices<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    indices
}

/// A value from `[1, DEFAULT_VALUE_UPPER]`
pub fn random_value<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    rng.gen_range(1..=DEFAULT_VALUE_UPPER)
}
