//! A trading pair: two assets and one order set per side.

use xane_types::{AssetId, Field, Result, Side};

use crate::commitment::pair_commitment;
use crate::order_set::OrderSet;

/// A registered pair. Its leaf in the pairs tree is [`Pair::commitment`].
#[derive(Debug, Clone)]
pub struct Pair {
    base: AssetId,
    quote: AssetId,
    buy_orders: OrderSet,
    sell_orders: OrderSet,
}

impl Pair {
    /// A pair with two empty order sets of the given height.
    pub fn new(base: AssetId, quote: AssetId, orders_height: u8) -> Result<Self> {
        Ok(Self {
            base,
            quote,
            buy_orders: OrderSet::new(Side::Buy, orders_height)?,
            sell_orders: OrderSet::new(Side::Sell, orders_height)?,
        })
    }

    #[must_use]
    pub fn base(&self) -> AssetId {
        self.base
    }

    #[must_use]
    pub fn quote(&self) -> AssetId {
        self.quote
    }

    /// Exact-order match on `(base, quote)`.
    #[must_use]
    pub fn matches_exact(&self, base: AssetId, quote: AssetId) -> bool {
        self.base == base && self.quote == quote
    }

    /// Match on the unordered asset set.
    #[must_use]
    pub fn trades(&self, a: AssetId, b: AssetId) -> bool {
        self.matches_exact(a, b) || self.matches_exact(b, a)
    }

    #[must_use]
    pub fn orders(&self, side: Side) -> &OrderSet {
        match side {
            Side::Buy => &self.buy_orders,
            Side::Sell => &self.sell_orders,
        }
    }

    pub(crate) fn orders_mut(&mut self, side: Side) -> &mut OrderSet {
        match side {
            Side::Buy => &mut self.buy_orders,
            Side::Sell => &mut self.sell_orders,
        }
    }

    #[must_use]
    pub fn buy_root(&self) -> Field {
        self.buy_orders.root()
    }

    #[must_use]
    pub fn sell_root(&self) -> Field {
        self.sell_orders.root()
    }

    /// `H(base, quote, buy_root, sell_root)` over the current side roots.
    #[must_use]
    pub fn commitment(&self) -> Field {
        pair_commitment(self.base, self.quote, self.buy_root(), self.sell_root())
    }
}
