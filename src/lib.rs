//! # openprobe: Open-Addressing Hash Tables with Probe Instrumentation
//!
//! This crate provides an open-addressing hash table engine supporting three
//! probe-sequence strategies, lazy tombstone deletion, automatic resizing
//! under a load-factor ceiling, and built-in probe/collision accounting.
//!
//! ## Key Features
//!
//! - **Pluggable probing**: linear, quadratic and double hashing behind one
//!   [`ProbeStrategy`] trait
//! - **Tombstone deletion**: erase never shifts entries; rehash clears tombstones
//! - **Resize policy**: fixed-capacity or growing tables from a single engine
//! - **Instrumentation**: per-table [`HashStats`] and cluster-length analysis
//! - **Benchmark driver**: seeded workload generators, timing harness and CSV export
//!
//! ## Quick Start
//!
//! ```rust
//! use openprobe::{LinearTable, ProbeError};
//!
//! let mut table = LinearTable::<i32, i32>::fixed(7);
//! table.insert(2, 20).unwrap();
//! table.insert(9, 90).unwrap(); // collides with 2, lands one slot later
//!
//! table.erase(&2);
//! assert_eq!(table.search(&9), Some(&90)); // the tombstone does not stop the scan
//!
//! assert_eq!(table.max_cluster_length(), 1);
//! assert_eq!(table.stats().total_collisions, 1);
//!
//! for key in [16, 23, 30, 37, 44, 51] {
//!     table.insert(key, 0).unwrap();
//! }
//! assert!(matches!(table.insert(58, 0), Err(ProbeError::TableFull { .. })));
//! ```

#![warn(missing_docs)]

pub mod benchmark;
pub mod config;
pub mod error;
pub mod hash_map;

// Re-export core types
pub use config::{BenchmarkConfig, Config, ResizePolicy, TableConfig};
pub use error::{ProbeError, Result};
pub use hash_map::{
    ClusterStats, DoubleHashTable, DoubleHashing, HashStats, LinearProbing, LinearTable,
    OpenAddressingTable, ProbeKey, ProbeKind, ProbeStrategy, QuadraticProbing, QuadraticTable,
    SlotState,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing openprobe v{}", VERSION);
}
