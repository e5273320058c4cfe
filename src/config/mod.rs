//! Configuration APIs for openprobe
//!
//! Two configuration types cover the crate:
//!
//! - [`TableConfig`]: initial capacity and resize policy of a hash table
//! - [`BenchmarkConfig`]: workload sizes, load factors and output location of
//!   the benchmark driver
//!
//! Both implement [`Config`], which provides validation, environment
//! initialization, presets and JSON file persistence.
//!
//! ```rust
//! use openprobe::config::{Config, ResizePolicy, TableConfig};
//!
//! let config = TableConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.resize, ResizePolicy::Grow { max_load_factor: 0.7 });
//!
//! let fixed = TableConfig::fixed(101);
//! assert!(!fixed.resize.is_enabled());
//! ```
//!
//! Environment variables use the `OPENPROBE_` prefix by default, e.g.
//! `OPENPROBE_TABLE_CAPACITY=1021` or `OPENPROBE_BENCH_SIZES=1000,10000`.

use crate::error::{ProbeError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::env;
use std::fmt;
use std::path::Path;

pub mod benchmark;
pub mod table;


pub use benchmark::BenchmarkConfig;
pub use table::{ResizePolicy, TableConfig, DEFAULT_MAX_LOAD_FACTOR};

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables with the
    /// `OPENPROBE_` prefix.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix("OPENPROBE_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset favouring short probe sequences over memory.
    fn performance_preset() -> Self;

    /// Preset favouring dense tables over probe length.
    fn memory_preset() -> Self;

    /// Preset with predictable per-operation cost.
    fn realtime_preset() -> Self;

    /// Balanced preset, the default.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| ProbeError::serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ProbeError::serialization(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Parse an environment variable, falling back to `default` when unset or malformed.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean environment variable.
///
/// Accepts "true", "1", "yes", "on" (case-insensitive) as true,
/// everything else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}

/// Parse a comma separated list; any malformed element discards the whole list.
pub fn parse_env_list<T>(var_name: &str, default: Vec<T>) -> Vec<T>
where
    T: std::str::FromStr,
{
    match env::var(var_name) {
        Ok(raw) => raw
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().parse())
            .collect::<std::result::Result<Vec<T>, _>>()
            .unwrap_or(default),
        Err(_) => default,
    }
}
