//! Slot allocation for one side of a pair.
//!
//! The lowest empty index wins, up to the tree's capacity. The
//! lowest-free-index order is observable by the verifier's callers and must
//! not change.
//!
//! Only occupied slots are stored; an index with no entry is empty. Memory
//! therefore follows the number of resting orders, not the highest index
//! ever used.

use std::collections::BTreeMap;

use xane_types::Order;

/// Occupied slots of one side, bounded by `capacity`.
#[derive(Debug, Clone)]
pub struct SlotTable {
    occupied: BTreeMap<usize, Order>,
    capacity: u64,
}

impl SlotTable {
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            occupied: BTreeMap::new(),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Index the next placement would use, or `None` when the side is full.
    #[must_use]
    pub fn next_free(&self) -> Option<usize> {
        // keys are sorted and unique, so the first gap is where they stop counting up
        let mut candidate = 0usize;
        for &index in self.occupied.keys() {
            if index != candidate {
                break;
            }
            candidate += 1;
        }
        ((candidate as u64) < self.capacity).then_some(candidate)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Order> {
        self.occupied.get(&index)
    }

    /// Store `order` at `index`.
    ///
    /// Callers pick `index` via [`SlotTable::next_free`] or, on restore and
    /// rollback, from a layout already checked against `capacity`.
    pub(crate) fn occupy(&mut self, index: usize, order: Order) {
        self.occupied.insert(index, order);
    }

    /// Empty the slot, returning the order it held.
    pub(crate) fn free(&mut self, index: usize) -> Option<Order> {
        self.occupied.remove(&index)
    }

    /// Occupied slots in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Order)> {
        self.occupied.iter().map(|(index, order)| (*index, order))
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.occupied.len()
    }
}
