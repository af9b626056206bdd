//! Fixed-height sparse Merkle tree.
//!
//! Nodes are stored per level in a map keyed by node index; any node equal to
//! its level's empty-subtree root is simply absent. A leaf update rewrites the
//! `height` ancestors on its path and nothing else.
//!
//! ```text
//! level 2            root
//!                  /      \
//! level 1       n0          n1
//!              /  \        /  \
//! level 0    l0    l1    l2    l3      (leaves, default = ZERO)
//! ```

use std::collections::HashMap;

use xane_types::constants::MAX_TREE_HEIGHT;
use xane_types::{Field, MerkleWitness, Result, WitnessStep, XaneError, empty_roots, hash_pair};

/// A binary Merkle tree with `2^height` leaves.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    height: u8,
    /// `levels[0]` holds leaves, `levels[height]` holds the root.
    levels: Vec<HashMap<u64, Field>>,
    /// Empty-subtree root per level.
    zeros: Vec<Field>,
}

impl MerkleTree {
    /// Create an empty tree.
    pub fn new(height: u8) -> Result<Self> {
        if height == 0 || height > MAX_TREE_HEIGHT {
            return Err(XaneError::InvalidTreeHeight(height));
        }
        Ok(Self {
            height,
            levels: vec![HashMap::new(); usize::from(height) + 1],
            zeros: empty_roots(height),
        })
    }

    #[must_use]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of leaves.
    #[must_use]
    pub fn capacity(&self) -> u64 {
        1u64 << self.height
    }

    #[must_use]
    pub fn root(&self) -> Field {
        self.node(self.height, 0)
    }

    /// Root of an empty tree of the same height.
    #[must_use]
    pub fn empty_root(&self) -> Field {
        self.zeros[usize::from(self.height)]
    }

    /// Leaf value, `ZERO` when unset. Out-of-range indices read as `ZERO`.
    #[must_use]
    pub fn leaf(&self, index: u64) -> Field {
        self.node(0, index)
    }

    fn node(&self, level: u8, index: u64) -> Field {
        let level = usize::from(level);
        self.levels[level]
            .get(&index)
            .copied()
            .unwrap_or(self.zeros[level])
    }

    fn store(&mut self, level: u8, index: u64, value: Field) {
        let slot = usize::from(level);
        if value == self.zeros[slot] {
            self.levels[slot].remove(&index);
        } else {
            self.levels[slot].insert(index, value);
        }
    }

    fn check_index(&self, index: u64) -> Result<()> {
        if index >= self.capacity() {
            return Err(XaneError::InvalidWitnessIndex {
                index,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// Overwrite one leaf and recompute its ancestors.
    pub fn set_leaf(&mut self, index: u64, value: Field) -> Result<()> {
        self.check_index(index)?;

        self.store(0, index, value);
        let mut current = index;
        for level in 0..self.height {
            let parent = current / 2;
            let left = self.node(level, parent * 2);
            let right = self.node(level, parent * 2 + 1);
            self.store(level + 1, parent, hash_pair(left, right));
            current = parent;
        }
        Ok(())
    }

    /// Inclusion proof for `index` against the current root.
    pub fn witness(&self, index: u64) -> Result<MerkleWitness> {
        self.check_index(index)?;

        let mut path = Vec::with_capacity(usize::from(self.height));
        let mut current = index;
        for level in 0..self.height {
            let is_left = current % 2 == 0;
            let sibling = if is_left { current + 1 } else { current - 1 };
            path.push(WitnessStep {
                sibling: self.node(level, sibling),
                is_left,
            });
            current /= 2;
        }
        Ok(MerkleWitness::new(path))
    }

    /// Indices of every non-zero leaf, ascending.
    #[must_use]
    pub fn occupied_leaves(&self) -> Vec<u64> {
        let mut indices: Vec<u64> = self.levels[0].keys().copied().collect();
        indices.sort_unstable();
        indices
    }
}
