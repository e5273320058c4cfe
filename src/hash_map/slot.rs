//! Slot storage and its three-state lifecycle
//!
//! ```text
//! Empty --insert--> Occupied --erase--> Deleted --insert--> Occupied
//! ```
//!
//! `Deleted` only returns to `Empty` when the whole slot array is rebuilt.

use std::fmt;

/// Observable state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// Never used since the slot array was built
    Empty,
    /// Holds a live entry
    Occupied,
    /// Tombstone left by an erase
    Deleted,
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            SlotState::Empty => '.',
            SlotState::Occupied => '#',
            SlotState::Deleted => 'x',
        };
        write!(f, "{}", c)
    }
}

/// Key-value pair stored by value in an occupied slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// Stored key
    pub key: K,
    /// Stored value
    pub value: V,
}

/// One cell of the slot array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K, V> {
    /// Never used
    Empty,
    /// Live entry
    Occupied(Entry<K, V>),
    /// Tombstone; never proves absence during a scan
    Deleted,
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<K, V> Slot<K, V> {
    /// Current state of the slot
    #[inline]
    pub fn state(&self) -> SlotState {
        match self {
            Slot::Empty => SlotState::Empty,
            Slot::Occupied(_) => SlotState::Occupied,
            Slot::Deleted => SlotState::Deleted,
        }
    }

    /// Holds a live entry
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    /// Never used since the last rebuild
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Tombstone left by an erase
    #[inline]
    pub fn is_deleted(&self) -> bool {
        matches!(self, Slot::Deleted)
    }

    /// Entry held by an occupied slot
    #[inline]
    pub fn entry(&self) -> Option<&Entry<K, V>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }

    /// Turns an occupied slot into a tombstone and hands back its entry.
    /// Other states are left untouched.
    pub fn bury(&mut self) -> Option<Entry<K, V>> {
        if !self.is_occupied() {
            return None;
        }
        match std::mem::replace(self, Slot::Deleted) {
            Slot::Occupied(entry) => Some(entry),
            _ => None,
        }
    }
}

/// Allocates a fully initialized slot array of `capacity` empty slots
pub(crate) fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, Slot::default);
    slots
}
