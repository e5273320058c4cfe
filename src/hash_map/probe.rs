//! Probe strategies for open addressing
//!
//! A strategy maps `(hash, step, capacity)` to a slot index. Strategies own no
//! table data; the only state is what [`ProbeStrategy::for_capacity`] derives
//! from the capacity (the secondary prime for double hashing), and the engine
//! rebuilds it on every rehash.
//!
//! | Strategy  | `probe(i)`                           | Full coverage          |
//! |-----------|--------------------------------------|------------------------|
//! | Linear    | `(h + i) mod c`                      | always                 |
//! | Quadratic | `(h + i²) mod c`                     | no                     |
//! | Double    | `(h1 + i·h2) mod c`, `h2 ∈ [1, q]`   | when `c` is prime      |

use crate::hash_map::primes::prev_prime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keys the engine can place: any primitive integer.
///
/// The hash is the key's value itself (signed keys are reinterpreted as two's
/// complement), so the initial slot of key `k` is `k mod capacity`.
pub trait ProbeKey: Copy + Eq + fmt::Debug {
    /// Deterministic hash of the key
    fn probe_hash(&self) -> u64;
}

macro_rules! impl_probe_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl ProbeKey for $t {
                #[inline]
                fn probe_hash(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

impl_probe_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// The closed set of probing schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    /// Step by one
    Linear,
    /// Step by successive squares
    Quadratic,
    /// Step by a key-dependent secondary hash
    Double,
}

impl ProbeKind {
    /// All strategies, in report order
    pub const ALL: [ProbeKind; 3] = [ProbeKind::Double, ProbeKind::Linear, ProbeKind::Quadratic];

    /// Human readable name used in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            ProbeKind::Linear => "Linear Probing",
            ProbeKind::Quadratic => "Quadratic Probing",
            ProbeKind::Double => "Double Hashing",
        }
    }

    /// Compact label used in detail tables
    pub fn short_name(&self) -> &'static str {
        match self {
            ProbeKind::Linear => "LinearProb",
            ProbeKind::Quadratic => "QuadraticProb",
            ProbeKind::Double => "DoubleHash",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProbeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(ProbeKind::Linear),
            "quadratic" => Ok(ProbeKind::Quadratic),
            "double" | "double_hashing" => Ok(ProbeKind::Double),
            other => Err(format!("unknown probe strategy '{}'", other)),
        }
    }
}

/// Computes the probe sequence for a key
pub trait ProbeStrategy: Clone + fmt::Debug {
    /// Which scheme this is
    const KIND: ProbeKind;

    /// Builds the strategy for a slot array of `capacity` slots
    fn for_capacity(capacity: usize) -> Self;

    /// Slot index of the `step`-th probe; `step == 0` is the home slot
    fn probe(&self, hash: u64, step: usize, capacity: usize) -> usize;

    /// The bounded sequence `probe(0) .. probe(capacity - 1)`
    fn sequence(&self, hash: u64, capacity: usize) -> ProbeSequence<'_, Self> {
        ProbeSequence {
            strategy: self,
            hash,
            capacity,
            step: 0,
        }
    }
}

/// Iterator over at most `capacity` probe indices
#[derive(Debug)]
pub struct ProbeSequence<'a, P: ProbeStrategy> {
    strategy: &'a P,
    hash: u64,
    capacity: usize,
    step: usize,
}

impl<P: ProbeStrategy> Iterator for ProbeSequence<'_, P> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }
        let index = self.strategy.probe(self.hash, self.step, self.capacity);
        self.step += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity.saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

/// `(hash + i) mod capacity`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearProbing;

impl ProbeStrategy for LinearProbing {
    const KIND: ProbeKind = ProbeKind::Linear;

    fn for_capacity(_capacity: usize) -> Self {
        LinearProbing
    }

    #[inline]
    fn probe(&self, hash: u64, step: usize, capacity: usize) -> usize {
        let c = capacity as u128;
        ((hash as u128 % c + step as u128) % c) as usize
    }
}

/// `(hash + i²) mod capacity`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadraticProbing;

impl ProbeStrategy for QuadraticProbing {
    const KIND: ProbeKind = ProbeKind::Quadratic;

    fn for_capacity(_capacity: usize) -> Self {
        QuadraticProbing
    }

    #[inline]
    fn probe(&self, hash: u64, step: usize, capacity: usize) -> usize {
        let c = capacity as u128;
        let i = step as u128;
        ((hash as u128 % c + (i * i) % c) % c) as usize
    }
}

/// `(h1 + i·h2) mod capacity` with `h1 = hash mod capacity` and
/// `h2 = q - (hash mod q)`, `q` being the largest prime below the capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleHashing {
    secondary_prime: usize,
}

impl DoubleHashing {
    /// Secondary modulus `q`
    pub fn secondary_prime(&self) -> usize {
        self.secondary_prime
    }

    /// Step width for a hash, always in `[1, q]`
    #[inline]
    pub fn step_width(&self, hash: u64) -> u64 {
        let q = self.secondary_prime as u64;
        q - (hash % q)
    }
}

impl ProbeStrategy for DoubleHashing {
    const KIND: ProbeKind = ProbeKind::Double;

    fn for_capacity(capacity: usize) -> Self {
        // capacity 2 has no smaller prime; a unit step still covers both slots
        let secondary_prime = prev_prime(capacity).unwrap_or(1);
        Self { secondary_prime }
    }

    #[inline]
    fn probe(&self, hash: u64, step: usize, capacity: usize) -> usize {
        let c = capacity as u128;
        let h1 = hash as u128 % c;
        let h2 = self.step_width(hash) as u128;
        ((h1 + step as u128 * h2) % c) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn coverage<P: ProbeStrategy>(hash: u64, capacity: usize) -> usize {
        let strategy = P::for_capacity(capacity);
        strategy
            .sequence(hash, capacity)
            .collect::<HashSet<_>>()
            .len()
    }

    #[test]
    fn test_linear_sequence() {
        let seq: Vec<usize> = LinearProbing.sequence(9, 7).collect();
        assert_eq!(seq, vec![2, 3, 4, 5, 6, 0, 1]);
    }

    #[test]
    fn test_quadratic_sequence() {
        let seq: Vec<usize> = QuadraticProbing.sequence(2, 7).take(4).collect();
        // offsets 0, 1, 4, 9
        assert_eq!(seq, vec![2, 3, 6, 4]);
    }

    #[test]
    fn test_quadratic_does_not_cover_prime_table() {
        // squares mod 7 hit only {0, 1, 2, 4}
        assert_eq!(coverage::<QuadraticProbing>(0, 7), 4);
    }

    #[test]
    fn test_double_hashing_parameters() {
        let dh = DoubleHashing::for_capacity(13);
        assert_eq!(dh.secondary_prime(), 11);
        assert_eq!(dh.step_width(0), 11);
        assert_eq!(dh.step_width(12), 10);
        for hash in 0..100u64 {
            let w = dh.step_width(hash);
            assert!(w >= 1 && w <= 11);
        }
    }

    #[test]
    fn test_full_coverage_on_primes() {
        for &capacity in &[2usize, 3, 5, 7, 11, 13, 97, 211] {
            for hash in [0u64, 1, 5, 42, 1_000_003, u64::MAX] {
                assert_eq!(coverage::<LinearProbing>(hash, capacity), capacity);
                assert_eq!(coverage::<DoubleHashing>(hash, capacity), capacity);
            }
        }
    }

    #[test]
    fn test_sequence_is_bounded() {
        let seq = QuadraticProbing.sequence(3, 11);
        assert_eq!(seq.size_hint(), (11, Some(11)));
        assert_eq!(seq.count(), 11);
    }

    #[test]
    fn test_signed_keys_hash_deterministically() {
        assert_eq!((-1i32).probe_hash(), u64::MAX);
        assert_eq!(9i64.probe_hash(), 9);
        let index = LinearProbing.probe((-1i64).probe_hash(), 0, 7);
        assert!(index < 7);
    }

    #[test]
    fn test_probe_kind_parse() {
        assert_eq!("Linear".parse::<ProbeKind>(), Ok(ProbeKind::Linear));
        assert_eq!("double".parse::<ProbeKind>(), Ok(ProbeKind::Double));
        assert!("cuckoo".parse::<ProbeKind>().is_err());
        assert_eq!(ProbeKind::Quadratic.to_string(), "Quadratic Probing");
    }
}
