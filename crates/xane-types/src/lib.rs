//! # xane-types
//!
//! Shared types, errors, and configuration for the **Xane** order-book ledger.
//!
//! This crate is the leaf dependency of the workspace: every other crate
//! depends on it. It defines:
//!
//! - **Field elements**: [`Field`], the fixed-width value every commitment is built from
//! - **Hashing**: [`hash_fields`], [`hash_pair`], [`empty_roots`]
//! - **Identifiers**: [`AssetId`], [`Address`]
//! - **Order model**: [`Order`], [`Side`]
//! - **Witnesses**: [`MerkleWitness`], [`WitnessStep`]
//! - **Configuration**: [`LedgerConfig`]
//! - **Errors**: [`XaneError`] with `XN_ERR_` prefix codes
//! - **Constants**: tree heights and hashing domain tags

pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod hash;
pub mod ids;
pub mod order;
pub mod witness;

// Re-export all primary types at crate root for ergonomic imports:
//   use xane_types::{Field, Order, Side, MerkleWitness, ...};

pub use config::*;
pub use error::*;
pub use field::*;
pub use hash::*;
pub use ids::*;
pub use order::*;
pub use witness::*;

// Constants are accessed via `xane_types::constants::FOO`
// (not re-exported to avoid name collisions).
