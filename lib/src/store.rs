//! The cell store.

use crate::cells::{Coord, NbhdDesc, State};
use std::collections::{btree_map::Entry, BTreeMap};

/// A sparse map from coordinates to packed cell values.
///
/// Only living cells are kept between generations. During a generation
/// the store also holds the dead cells that have at least one living
/// neighbor, together with their neighbor counts.
///
/// The map is ordered, so that iteration (and thus the output of the
/// codec and the consumption of random numbers by the rules) does not
/// depend on hashing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellStore {
    cells: BTreeMap<Coord, u8>,
}

impl CellStore {
    /// An empty store.
    pub fn new() -> Self {
        CellStore::default()
    }

    /// The packed value at the given position, if there is an entry.
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<u8> {
        self.cells.get(&coord).copied()
    }

    /// The state at the given position. Absent cells are dead.
    #[inline]
    pub fn state(&self, coord: Coord) -> State {
        self.get(coord)
            .map_or_else(State::default, |byte| NbhdDesc::unpack(byte).state)
    }

    /// Overwrites the packed value at the given position.
    #[inline]
    pub fn set(&mut self, coord: Coord, value: u8) {
        self.cells.insert(coord, value);
    }

    /// Removes the entry at the given position.
    ///
    /// Returns the old value, if any.
    #[inline]
    pub fn delete(&mut self, coord: Coord) -> Option<u8> {
        self.cells.remove(&coord)
    }

    /// Applies `f` to the descriptor at the given position,
    /// creating an empty entry first if there is none.
    #[inline]
    pub(crate) fn update<F: FnOnce(&mut NbhdDesc)>(&mut self, coord: Coord, f: F) {
        match self.cells.entry(coord) {
            Entry::Occupied(mut entry) => {
                let mut desc = NbhdDesc::unpack(*entry.get());
                f(&mut desc);
                entry.insert(desc.pack());
            }
            Entry::Vacant(entry) => {
                let mut desc = NbhdDesc::default();
                f(&mut desc);
                entry.insert(desc.pack());
            }
        }
    }

    /// Iterates over all entries in `(row, column)` order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, u8)> + '_ {
        self.cells.iter().map(|(&coord, &value)| (coord, value))
    }

    /// Copies all entries into a fresh vector.
    ///
    /// Used whenever a pass needs to mutate the store while
    /// walking over its contents.
    pub(crate) fn snapshot(&self) -> Vec<(Coord, u8)> {
        self.iter().collect()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the store has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Removes every entry and releases the storage.
    pub fn clear(&mut self) {
        self.cells = BTreeMap::new();
    }
}
