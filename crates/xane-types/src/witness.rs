//! Merkle inclusion proofs.
//!
//! A [`MerkleWitness`] lists, from the leaf upwards, the sibling of every
//! node on the path to the root and whether the path node is the left child.
//! Given a leaf value it recomputes the root the witness was taken against;
//! given the zero element it proves the slot was empty.

use serde::{Deserialize, Serialize};

use crate::{Field, hash_pair};

/// One level of a witness path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessStep {
    /// The sibling node at this level.
    pub sibling: Field,
    /// `true` when the path node is the left child (sibling on the right).
    pub is_left: bool,
}

/// Inclusion proof for one leaf of a fixed-height tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleWitness {
    path: Vec<WitnessStep>,
}

impl MerkleWitness {
    /// Build a witness from its leaf-to-root steps.
    #[must_use]
    pub fn new(path: Vec<WitnessStep>) -> Self {
        Self { path }
    }

    /// Number of levels, equal to the tree height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    pub fn path(&self) -> &[WitnessStep] {
        &self.path
    }

    /// Fold `leaf` up the path.
    #[must_use]
    pub fn calculate_root(&self, leaf: Field) -> Field {
        self.path.iter().fold(leaf, |node, step| {
            if step.is_left {
                hash_pair(node, step.sibling)
            } else {
                hash_pair(step.sibling, node)
            }
        })
    }

    /// Leaf index encoded by the direction bits (bit `l` set = right child at level `l`).
    #[must_use]
    pub fn calculate_index(&self) -> u64 {
        self.path
            .iter()
            .enumerate()
            .filter(|(_, step)| !step.is_left)
            .fold(0u64, |index, (level, _)| index | (1u64 << level))
    }

    /// Wire layout: every sibling (leaf to root), then every direction bit.
    #[must_use]
    pub fn to_fields(&self) -> Vec<Field> {
        self.path
            .iter()
            .map(|step| step.sibling)
            .chain(self.path.iter().map(|step| Field::from_bool(step.is_left)))
            .collect()
    }
}
