//! Witness generation at both tree levels, and the checks a verifier runs.
//!
//! A witness is only valid against the root that existed when it was taken.
//! Any later write on the same path (any order on the same side, or any
//! change to another pair's leaf on the pair's outer path) invalidates it,
//! so witnesses must be regenerated after every mutation.

use xane_types::{Field, MerkleWitness, Result, Side};

/// Source of inclusion proofs for pairs and orders.
pub trait WitnessProvider {
    /// Proof for a leaf of the pairs tree. Unassigned leaves within
    /// capacity are provable (as `ZERO`).
    fn pair_witness(&self, pair_index: usize) -> Result<MerkleWitness>;

    /// Proof for a slot of one side's orders tree.
    fn order_witness(&self, side: Side, pair_index: usize, order_index: usize) -> Result<MerkleWitness>;
}

/// `true` when `leaf` at the witness's index is committed by `root`.
#[must_use]
pub fn verify_inclusion(witness: &MerkleWitness, leaf: Field, root: Field) -> bool {
    witness.calculate_root(leaf) == root
}

/// `true` when the witnessed slot is empty under `root`.
#[must_use]
pub fn verify_absence(witness: &MerkleWitness, root: Field) -> bool {
    verify_inclusion(witness, Field::ZERO, root)
}

#[cfg(test)]
mod tests {
    use xane_types::{WitnessStep, hash_pair};

    use super::*;

    #[test]
    fn inclusion_and_absence() {
        let witness = MerkleWitness::new(vec![WitnessStep {
            sibling: Field::from_u64(2),
            is_left: true,
        }]);
        let occupied = hash_pair(Field::from_u64(1), Field::from_u64(2));
        let empty = hash_pair(Field::ZERO, Field::from_u64(2));
        assert!(verify_inclusion(&witness, Field::from_u64(1), occupied));
        assert!(!verify_absence(&witness, occupied));
        assert!(verify_absence(&witness, empty));
    }
}
