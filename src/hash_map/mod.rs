//! Open-addressing hash table engine
//!
//! This module provides one engine, [`OpenAddressingTable`], parameterized by a
//! probe strategy and a resize policy:
//! - [`LinearProbing`]: `(h + i) mod c`
//! - [`QuadraticProbing`]: `(h + i²) mod c`
//! - [`DoubleHashing`]: `(h1 + i·h2) mod c`
//!
//! Each table owns its [`HashStats`] counters and can report the clustering
//! of its slot array through [`ClusterStats`].

pub mod cluster;
pub mod open_addressing;
pub mod primes;
pub mod probe;
pub mod slot;
pub mod stats;

pub use cluster::ClusterStats;
pub use open_addressing::{DoubleHashTable, Iter, LinearTable, OpenAddressingTable, QuadraticTable};
pub use primes::{is_prime, next_prime, prev_prime};
pub use probe::{
    DoubleHashing, LinearProbing, ProbeKey, ProbeKind, ProbeSequence, ProbeStrategy,
    QuadraticProbing,
};
pub use slot::{Entry, Slot, SlotState};
pub use stats::HashStats;
