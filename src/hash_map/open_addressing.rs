//! Open-addressing hash table engine
//!
//! [`OpenAddressingTable`] stores every entry directly in a prime-sized slot
//! array and resolves collisions by walking the probe sequence of a
//! [`ProbeStrategy`]. Erase leaves a tombstone behind instead of shifting
//! entries, so scans for other keys never stop at a removed slot. Tombstones
//! are only cleared by [`rehash`](OpenAddressingTable::rehash), which rebuilds
//! the slot array from scratch.
//!
//! # Examples
//!
//! ```rust
//! use openprobe::hash_map::{DoubleHashing, OpenAddressingTable};
//!
//! let mut table = OpenAddressingTable::<i64, i64, DoubleHashing>::new(11);
//! table.insert(42, 7).unwrap();
//! assert_eq!(table.search(&42), Some(&7));
//!
//! table.erase(&42);
//! assert_eq!(table.search(&42), None);
//! assert_eq!(table.stats().n_search, 2);
//! ```

use crate::config::{Config, ResizePolicy, TableConfig};
use crate::error::{ProbeError, Result};
use crate::hash_map::cluster::{self, ClusterStats};
use crate::hash_map::primes::next_prime;
use crate::hash_map::probe::{
    DoubleHashing, LinearProbing, ProbeKey, ProbeKind, ProbeStrategy, QuadraticProbing,
};
use crate::hash_map::slot::{empty_slots, Entry, Slot, SlotState};
use crate::hash_map::stats::HashStats;
use std::mem;

/// Table using linear probing
pub type LinearTable<K, V> = OpenAddressingTable<K, V, LinearProbing>;
/// Table using quadratic probing
pub type QuadraticTable<K, V> = OpenAddressingTable<K, V, QuadraticProbing>;
/// Table using double hashing
pub type DoubleHashTable<K, V> = OpenAddressingTable<K, V, DoubleHashing>;

/// Where an insert lands
enum InsertSlot {
    /// Key already live at this index
    Existing { index: usize, probes: usize },
    /// First free slot on the sequence (tombstone or empty)
    Vacant {
        index: usize,
        probes: usize,
        collided: bool,
    },
    /// Sequence ran out without reaching the key or a free slot
    Exhausted { probes: usize },
}

/// Open-addressing hash table generic over its probe strategy
#[derive(Debug, Clone)]
pub struct OpenAddressingTable<K, V, P = LinearProbing> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    strategy: P,
    resize: ResizePolicy,
    stats: HashStats,
}

impl<K, V, P> OpenAddressingTable<K, V, P>
where
    K: ProbeKey,
    P: ProbeStrategy,
{
    /// Creates a growing table with at least `capacity` slots
    ///
    /// The capacity is rounded up to the next prime (minimum 2).
    pub fn new(capacity: usize) -> Self {
        Self::build(capacity, ResizePolicy::default())
    }

    /// Creates a table that never resizes
    pub fn fixed(capacity: usize) -> Self {
        Self::build(capacity, ResizePolicy::Fixed)
    }

    /// Creates a table from a validated configuration
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.initial_capacity, config.resize))
    }

    fn build(capacity: usize, resize: ResizePolicy) -> Self {
        let capacity = next_prime(capacity);
        log::trace!(
            "creating {} table: capacity={}, resize={:?}",
            P::KIND,
            capacity,
            resize
        );
        Self {
            slots: empty_slots(capacity),
            len: 0,
            tombstones: 0,
            strategy: P::for_capacity(capacity),
            resize,
            stats: HashStats::default(),
        }
    }

    /// Inserts or updates `key`, returning the previous value on update
    ///
    /// A growing table whose load factor exceeds its ceiling first rehashes to
    /// twice its capacity. Fails with [`ProbeError::TableFull`] when every slot
    /// is occupied, and with [`ProbeError::ProbeExhausted`] when free slots exist
    /// but none lie on the key's probe sequence.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        if self.resize.should_grow(self.load_factor()) {
            self.rehash(self.capacity().saturating_mul(2))?;
        }

        match self.locate_for_insert(key) {
            InsertSlot::Existing { index, probes } => {
                self.stats.record_insert(probes, false);
                let previous = match &mut self.slots[index] {
                    Slot::Occupied(entry) => Some(mem::replace(&mut entry.value, value)),
                    _ => None,
                };
                debug_assert!(previous.is_some());
                Ok(previous)
            }
            InsertSlot::Vacant {
                index,
                probes,
                collided,
            } => {
                if self.slots[index].is_deleted() {
                    self.tombstones -= 1;
                }
                self.slots[index] = Slot::Occupied(Entry { key, value });
                self.len += 1;
                self.stats.record_insert(probes, collided);
                Ok(None)
            }
            InsertSlot::Exhausted { probes } => {
                self.stats.record_insert(probes, false);
                let err = if self.is_full() {
                    ProbeError::table_full(self.capacity())
                } else {
                    ProbeError::probe_exhausted(probes, self.capacity())
                };
                log::warn!("{} insert of {:?} failed: {}", P::KIND, key, err);
                Err(err)
            }
        }
    }

    /// Looks up `key`, recording the probes in the statistics
    pub fn search(&mut self, key: &K) -> Option<&V> {
        let (found, probes) = self.locate(key);
        self.stats.record_search(probes);
        found
            .and_then(|index| self.slots[index].entry())
            .map(|entry| &entry.value)
    }

    /// Looks up `key` without touching the statistics
    pub fn get(&self, key: &K) -> Option<&V> {
        let (found, _) = self.locate(key);
        found
            .and_then(|index| self.slots[index].entry())
            .map(|entry| &entry.value)
    }

    /// True if `key` is live, without touching the statistics
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).0.is_some()
    }

    /// Slot index currently holding `key`
    pub fn slot_index(&self, key: &K) -> Option<usize> {
        self.locate(key).0
    }

    /// Removes `key`, leaving a tombstone in its slot
    ///
    /// A miss is a no-op apart from the statistics.
    pub fn erase(&mut self, key: &K) -> Option<V> {
        let (found, probes) = self.locate(key);
        self.stats.record_delete(probes);
        let entry = found.and_then(|index| self.slots[index].bury())?;
        self.len -= 1;
        self.tombstones += 1;
        Some(entry.value)
    }

    /// Rebuilds the slot array with `next_prime(size_hint)` slots
    ///
    /// Live entries are re-placed in their original slot order and all
    /// tombstones disappear. The new array is planned before anything moves: if
    /// any entry cannot be placed the table is left untouched and
    /// [`ProbeError::RehashLostEntry`] is returned.
    pub fn rehash(&mut self, size_hint: usize) -> Result<()> {
        if size_hint < self.len {
            return Err(ProbeError::invalid_capacity(size_hint, self.len));
        }
        let new_capacity = next_prime(size_hint);
        let strategy = P::for_capacity(new_capacity);

        let mut taken = vec![false; new_capacity];
        let mut placement = Vec::with_capacity(self.len);
        for (old_index, slot) in self.slots.iter().enumerate() {
            let Some(entry) = slot.entry() else {
                continue;
            };
            let target = strategy
                .sequence(entry.key.probe_hash(), new_capacity)
                .find(|&index| !taken[index]);
            match target {
                Some(index) => {
                    taken[index] = true;
                    placement.push((old_index, index));
                }
                None => {
                    log::warn!(
                        "{} rehash to {} slots could not place {:?}",
                        P::KIND,
                        new_capacity,
                        entry.key
                    );
                    return Err(ProbeError::rehash_lost_entry(self.len, placement.len()));
                }
            }
        }
        if placement.len() != self.len {
            return Err(ProbeError::rehash_lost_entry(self.len, placement.len()));
        }

        let mut old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        for (old_index, new_index) in placement {
            self.slots[new_index] = mem::take(&mut old[old_index]);
        }

        log::debug!(
            "{} rehash: {} -> {} slots, {} entries, {} tombstones dropped",
            P::KIND,
            old.len(),
            new_capacity,
            self.len,
            self.tombstones
        );
        self.strategy = strategy;
        self.tombstones = 0;
        self.stats.record_rehash();
        Ok(())
    }

    /// Finds the live slot holding `key`; returns it with the probe count
    fn locate(&self, key: &K) -> (Option<usize>, usize) {
        let capacity = self.capacity();
        let mut sequence = self.strategy.sequence(key.probe_hash(), capacity);
        let Some(home) = sequence.next() else {
            return (None, 0);
        };

        let mut probes = 0;
        for index in std::iter::once(home).chain(sequence) {
            if probes > 0 && index == home {
                // wrapped around without meeting the key
                break;
            }
            probes += 1;
            match &self.slots[index] {
                Slot::Empty => return (None, probes),
                Slot::Occupied(entry) if entry.key == *key => return (Some(index), probes),
                _ => {}
            }
        }
        (None, probes)
    }

    /// Scans until the key or an empty slot, remembering the first tombstone.
    /// Claiming that tombstone only after the scan keeps keys unique.
    fn locate_for_insert(&self, key: K) -> InsertSlot {
        let capacity = self.capacity();
        let mut first_free = None;
        let mut collided = false;
        let mut probes = 0;

        for (step, index) in self.strategy.sequence(key.probe_hash(), capacity).enumerate() {
            probes += 1;
            match &self.slots[index] {
                Slot::Occupied(entry) if entry.key == key => {
                    return InsertSlot::Existing { index, probes };
                }
                Slot::Occupied(_) => {
                    if step == 0 {
                        collided = true;
                    }
                }
                Slot::Deleted => {
                    first_free.get_or_insert(index);
                }
                Slot::Empty => {
                    return InsertSlot::Vacant {
                        index: first_free.unwrap_or(index),
                        probes,
                        collided,
                    };
                }
            }
        }

        match first_free {
            Some(index) => InsertSlot::Vacant {
                index,
                probes,
                collided,
            },
            None => InsertSlot::Exhausted { probes },
        }
    }
}

impl<K, V, P> OpenAddressingTable<K, V, P>
where
    P: ProbeStrategy,
{
    /// Number of live entries
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no entry is live
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// True when every slot holds a live entry
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// `len / capacity`, computed on demand
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Number of tombstones awaiting the next rehash
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Operation counters since creation or the last reset
    pub fn stats(&self) -> &HashStats {
        &self.stats
    }

    /// Clears the counters, keeping the contents
    pub fn reset_stats(&mut self) {
        self.stats = HashStats::default();
    }

    /// Resize behaviour of this table
    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize
    }

    /// Probe strategy sized for the current capacity
    pub fn strategy(&self) -> &P {
        &self.strategy
    }

    /// Which probing scheme the table uses
    pub fn probe_kind(&self) -> ProbeKind {
        P::KIND
    }

    /// Longest run of contiguous occupied slots
    pub fn max_cluster_length(&self) -> usize {
        cluster::max_cluster_length(&self.slots)
    }

    /// Mean run length of contiguous occupied slots, 0 when empty
    pub fn avg_cluster_length(&self) -> f64 {
        cluster::avg_cluster_length(&self.slots)
    }

    /// Count, maximum and mean of the occupied runs in one scan
    pub fn cluster_stats(&self) -> ClusterStats {
        cluster::analyze(self.slot_states())
    }

    /// Slot states in physical order
    pub fn slot_states(&self) -> impl Iterator<Item = SlotState> + '_ {
        self.slots.iter().map(Slot::state)
    }

    /// Live entries in slot order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }
}

impl<'a, K, V, P> IntoIterator for &'a OpenAddressingTable<K, V, P>
where
    P: ProbeStrategy,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the live entries of a table
pub struct Iter<'a, K, V> {
    slots: std::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(entry) = slot.entry() {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
