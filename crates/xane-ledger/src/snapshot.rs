//! Read-only listing of the whole book, also used as the persisted layout.
//!
//! A snapshot records every pair in index order with its occupied slots and
//! the roots the ledger held when it was taken. Loading one replays each
//! leaf into fresh trees and checks that the recorded roots come back.

use serde::{Deserialize, Serialize};
use xane_types::{AssetId, Field, LedgerConfig, Order, Side};

/// One occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub order_index: usize,
    pub order: Order,
}

/// One side of a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSnapshot {
    pub root: Field,
    /// Occupied slots in index order.
    pub orders: Vec<SlotEntry>,
}

impl SideSnapshot {
    /// Orders arranged for display: best price first, then slot index.
    ///
    /// Bids sort by descending price, asks by ascending price.
    #[must_use]
    pub fn best_first(&self, side: Side) -> Vec<SlotEntry> {
        let mut entries = self.orders.clone();
        entries.sort_by(|a, b| {
            let by_price = match side {
                Side::Buy => b.order.price.cmp(&a.order.price),
                Side::Sell => a.order.price.cmp(&b.order.price),
            };
            by_price.then(a.order_index.cmp(&b.order_index))
        });
        entries
    }
}

/// One registered pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSnapshot {
    pub pair_index: usize,
    pub base: AssetId,
    pub quote: AssetId,
    /// The pair's leaf in the pairs tree.
    pub commitment: Field,
    pub buy: SideSnapshot,
    pub sell: SideSnapshot,
}

impl PairSnapshot {
    #[must_use]
    pub fn side(&self, side: Side) -> &SideSnapshot {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }
}

/// The whole book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub config: LedgerConfig,
    pub pairs_root: Field,
    pub pairs: Vec<PairSnapshot>,
}

impl BookSnapshot {
    /// Total resting orders across all pairs and sides.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.pairs
            .iter()
            .map(|pair| pair.buy.orders.len() + pair.sell.orders.len())
            .sum()
    }

    #[must_use]
    pub fn pair(&self, base: AssetId, quote: AssetId) -> Option<&PairSnapshot> {
        self.pairs
            .iter()
            .find(|pair| pair.base == base && pair.quote == quote)
    }
}
