//! One side (buy or sell) of a pair: a slot table plus its orders tree.
//!
//! Every mutation validates before it touches anything, so a failed call
//! leaves both the slots and the tree exactly as they were. Propagating the
//! new side root into the pair commitment is the owning registry's job.

use xane_types::{Field, MerkleWitness, Order, Result, Side, XaneError};

use crate::commitment::{empty_leaf, order_commitment};
use crate::merkle::MerkleTree;
use crate::slots::SlotTable;

/// Result of placing an order into a side.
#[derive(Debug, Clone)]
pub struct Placement {
    pub order_index: usize,
    /// Witness of the (previously empty) slot, taken before the write.
    pub order_witness: MerkleWitness,
}

/// Result of removing an order from a side.
#[derive(Debug, Clone)]
pub struct Removal {
    pub order: Order,
    /// Witness of the occupied slot, taken before the write.
    pub order_witness: MerkleWitness,
}

/// Orders resting on one side of one pair.
#[derive(Debug, Clone)]
pub struct OrderSet {
    side: Side,
    slots: SlotTable,
    tree: MerkleTree,
}

impl OrderSet {
    pub fn new(side: Side, height: u8) -> Result<Self> {
        let tree = MerkleTree::new(height)?;
        Ok(Self {
            side,
            slots: SlotTable::new(tree.capacity()),
            tree,
        })
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn root(&self) -> Field {
        self.tree.root()
    }

    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.tree.capacity()
    }

    /// Slot the next [`OrderSet::add_order`] would use.
    #[must_use]
    pub fn next_free_slot(&self) -> Option<usize> {
        self.slots.next_free()
    }

    /// Store `order` in the lowest free slot.
    pub fn add_order(&mut self, order: Order) -> Result<Placement> {
        let order_index = self.next_free_slot().ok_or(XaneError::OrdersTreeFull {
            side: self.side,
            capacity: self.capacity(),
        })?;
        let order_witness = self.tree.witness(order_index as u64)?;

        self.tree
            .set_leaf(order_index as u64, order_commitment(&order))?;
        self.slots.occupy(order_index, order);

        Ok(Placement {
            order_index,
            order_witness,
        })
    }

    /// Free an occupied slot and zero its leaf.
    pub fn remove_order(&mut self, order_index: usize) -> Result<Removal> {
        let order = *self.get_order(order_index).ok_or(XaneError::OrderDoesNotExist {
            side: self.side,
            order_index,
        })?;
        let order_witness = self.tree.witness(order_index as u64)?;

        self.tree.set_leaf(order_index as u64, empty_leaf())?;
        self.slots.free(order_index);

        Ok(Removal {
            order,
            order_witness,
        })
    }

    #[must_use]
    pub fn get_order(&self, order_index: usize) -> Option<&Order> {
        self.slots.get(order_index)
    }

    /// Inclusion proof for any slot within capacity, occupied or not.
    pub fn witness(&self, order_index: usize) -> Result<MerkleWitness> {
        self.tree.witness(order_index as u64)
    }

    /// Current leaf value of a slot.
    #[must_use]
    pub fn leaf(&self, order_index: usize) -> Field {
        self.tree.leaf(order_index as u64)
    }

    /// Occupied slots in index order.
    pub fn orders(&self) -> impl Iterator<Item = (usize, &Order)> {
        self.slots.occupied()
    }

    #[must_use]
    pub fn order_count(&self) -> usize {
        self.slots.order_count()
    }

    /// Put an order back at a known slot (snapshot restore, rollback).
    pub(crate) fn restore_order(&mut self, order_index: usize, order: Order) -> Result<()> {
        if self.get_order(order_index).is_some() {
            return Err(XaneError::SnapshotMismatch {
                reason: format!("{} slot {order_index} listed twice", self.side),
            });
        }
        self.tree
            .set_leaf(order_index as u64, order_commitment(&order))
            .map_err(|_| XaneError::SnapshotMismatch {
                reason: format!(
                    "{} slot {order_index} outside capacity {}",
                    self.side,
                    self.capacity()
                ),
            })?;
        self.slots.occupy(order_index, order);
        Ok(())
    }
}
