//! # xane-ledger
//!
//! **The authenticated order-book ledger for Xane.**
//!
//! An off-chain mirror of the exchange contract's state, kept bit-for-bit in
//! step with the commitments the on-chain verifier computes:
//!
//! - **Pairs tree**: fixed-height Merkle tree, leaf `i` = commitment of pair `i`
//! - **Orders trees**: one per pair per side, leaf `j` = commitment of order `j`
//! - **Slot allocation**: lowest free slot first, freed slots are reused
//! - **Witnesses**: taken before each write, valid for the old and new root
//! - **Receipts**: every transition with its canonical attestation message
//!
//! ```text
//! commitment -> order_set -> pair -> registry -> ledger
//!                  merkle --------------^   witness
//! ```

pub mod commitment;
pub mod ledger;
pub mod merkle;
pub mod order_set;
pub mod pair;
pub mod receipt;
pub mod registry;
pub mod slots;
pub mod snapshot;
pub mod witness;

pub use commitment::{empty_leaf, order_commitment, pair_commitment};
pub use ledger::OrderBookLedger;
pub use merkle::MerkleTree;
pub use order_set::{OrderSet, Placement, Removal};
pub use pair::Pair;
pub use receipt::{
    AddPairReceipt, CancelOrderReceipt, ExecuteOrderReceipt, PlaceOrderReceipt, SideProof,
    Transition,
};
pub use registry::{PairAdded, PairRegistry, PairUpdate};
pub use slots::SlotTable;
pub use snapshot::{BookSnapshot, PairSnapshot, SideSnapshot, SlotEntry};
pub use witness::{WitnessProvider, verify_absence, verify_inclusion};
