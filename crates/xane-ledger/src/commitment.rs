//! Commitments for pairs and orders.
//!
//! Pure functions; the field order inside each hash is fixed by the verifier:
//! - pair:  `H(base, quote, buy_root, sell_root)`
//! - order: `H(maker, amount, price)`
//!
//! An empty order slot is the raw zero element, never `H(0)`.

use xane_types::{AssetId, Field, Order, hash_fields};

/// Leaf value of a pair in the pairs tree.
#[must_use]
pub fn pair_commitment(base: AssetId, quote: AssetId, buy_root: Field, sell_root: Field) -> Field {
    hash_fields(&[base.as_field(), quote.as_field(), buy_root, sell_root])
}

/// Leaf value of an order in its side's orders tree.
#[must_use]
pub fn order_commitment(order: &Order) -> Field {
    hash_fields(&order.to_fields())
}

/// Leaf value of an empty slot.
#[must_use]
pub const fn empty_leaf() -> Field {
    Field::ZERO
}
