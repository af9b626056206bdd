//! The ledger facade: the operations the authority exposes to callers.
//!
//! Pairs are addressed by `(base, quote)` in registration order. Every
//! mutating call validates fully before writing, takes its witnesses from
//! the pre-write state, and returns a receipt describing the transition.
//! The ledger is a plain owned value; hosts that share it across threads
//! must serialize all mutations (see `xane-authority`).

use xane_types::{
    Address, AssetId, Field, LedgerConfig, MerkleWitness, Order, Result, Side, XaneError,
};

use crate::pair::Pair;
use crate::receipt::{
    AddPairReceipt, CancelOrderReceipt, ExecuteOrderReceipt, PlaceOrderReceipt, SideProof,
};
use crate::registry::{PairAdded, PairRegistry, PairUpdate};
use crate::snapshot::{BookSnapshot, PairSnapshot, SideSnapshot, SlotEntry};
use crate::witness::WitnessProvider;

/// Pre-removal state shared by cancel and execute.
struct Withdrawn {
    pair_index: usize,
    order_index: usize,
    order: Order,
    proof: SideProof,
    pair_witness: MerkleWitness,
    previous_pairs_root: Field,
    pairs_root: Field,
}

/// The authenticated order book.
#[derive(Debug, Clone)]
pub struct OrderBookLedger {
    registry: PairRegistry,
}

impl OrderBookLedger {
    pub fn new(config: LedgerConfig) -> Result<Self> {
        Ok(Self {
            registry: PairRegistry::new(config)?,
        })
    }

    #[must_use]
    pub fn config(&self) -> LedgerConfig {
        self.registry.config()
    }

    /// Current outer root.
    #[must_use]
    pub fn pairs_root(&self) -> Field {
        self.registry.root()
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.registry.len()
    }

    #[must_use]
    pub fn find_pair(&self, base: AssetId, quote: AssetId) -> Option<usize> {
        self.registry.find(base, quote)
    }

    #[must_use]
    pub fn pair(&self, pair_index: usize) -> Option<&Pair> {
        self.registry.pair(pair_index)
    }

    #[must_use]
    pub fn registry(&self) -> &PairRegistry {
        &self.registry
    }

    fn require_pair(&self, base: AssetId, quote: AssetId) -> Result<usize> {
        self.registry
            .find(base, quote)
            .ok_or(XaneError::PairDoesNotExist { base, quote })
    }

    fn side_root(&self, pair_index: usize, side: Side) -> Result<Field> {
        self.registry
            .pair(pair_index)
            .map(|pair| pair.orders(side).root())
            .ok_or(XaneError::UnknownPairIndex(pair_index))
    }

    // =================================================================
    // Mutations
    // =================================================================

    /// Register `(base, quote)` at the next pair index.
    pub fn add_pair(&mut self, base: AssetId, quote: AssetId) -> Result<AddPairReceipt> {
        let previous_pairs_root = self.pairs_root();
        let PairAdded {
            pair_index,
            pair_witness,
            pairs_root,
        } = self.registry.add_pair(base, quote)?;

        Ok(AddPairReceipt {
            base,
            quote,
            pair_index,
            pair_witness,
            previous_pairs_root,
            pairs_root,
        })
    }

    /// Rest a new order in the lowest free slot of `side`.
    pub fn place_order(
        &mut self,
        side: Side,
        base: AssetId,
        quote: AssetId,
        maker: Address,
        amount: u64,
        price: u64,
    ) -> Result<PlaceOrderReceipt> {
        let pair_index = self.require_pair(base, quote)?;
        let opposite_side_root = self.side_root(pair_index, side.opposite())?;
        let previous_pairs_root = self.pairs_root();
        let order = Order::new(maker, amount, price);

        let PairUpdate {
            inner: placement,
            pair_witness,
        } = self.registry.place_order(pair_index, side, order)?;

        Ok(PlaceOrderReceipt {
            base,
            quote,
            pair_index,
            order_index: placement.order_index,
            order,
            proof: SideProof {
                side,
                order_witness: placement.order_witness,
                opposite_side_root,
            },
            pair_witness,
            previous_pairs_root,
            pairs_root: self.pairs_root(),
        })
    }

    fn withdraw(
        &mut self,
        side: Side,
        base: AssetId,
        quote: AssetId,
        order_index: usize,
    ) -> Result<Withdrawn> {
        let pair_index = self.require_pair(base, quote)?;
        let opposite_side_root = self.side_root(pair_index, side.opposite())?;
        let previous_pairs_root = self.pairs_root();

        let PairUpdate {
            inner: removal,
            pair_witness,
        } = self.registry.remove_order(pair_index, side, order_index)?;

        Ok(Withdrawn {
            pair_index,
            order_index,
            order: removal.order,
            proof: SideProof {
                side,
                order_witness: removal.order_witness,
                opposite_side_root,
            },
            pair_witness,
            previous_pairs_root,
            pairs_root: self.pairs_root(),
        })
    }

    /// Remove an order at its maker's request.
    pub fn cancel_order(
        &mut self,
        side: Side,
        base: AssetId,
        quote: AssetId,
        order_index: usize,
    ) -> Result<CancelOrderReceipt> {
        let w = self.withdraw(side, base, quote, order_index)?;
        Ok(CancelOrderReceipt {
            base,
            quote,
            pair_index: w.pair_index,
            order_index: w.order_index,
            order: w.order,
            proof: w.proof,
            pair_witness: w.pair_witness,
            previous_pairs_root: w.previous_pairs_root,
            pairs_root: w.pairs_root,
        })
    }

    /// Remove an order because a taker filled it.
    pub fn execute_order(
        &mut self,
        side: Side,
        base: AssetId,
        quote: AssetId,
        order_index: usize,
    ) -> Result<ExecuteOrderReceipt> {
        let w = self.withdraw(side, base, quote, order_index)?;
        Ok(ExecuteOrderReceipt {
            base,
            quote,
            pair_index: w.pair_index,
            order_index: w.order_index,
            order: w.order,
            proof: w.proof,
            pair_witness: w.pair_witness,
            previous_pairs_root: w.previous_pairs_root,
            pairs_root: w.pairs_root,
        })
    }

    // =================================================================
    // Queries
    // =================================================================

    /// Root of one side's orders tree.
    pub fn get_orders_root(&self, side: Side, base: AssetId, quote: AssetId) -> Result<Field> {
        let pair_index = self.require_pair(base, quote)?;
        self.side_root(pair_index, side)
    }

    /// The order in a slot, or `None` if the slot is empty.
    pub fn get_order(
        &self,
        side: Side,
        base: AssetId,
        quote: AssetId,
        order_index: usize,
    ) -> Result<Option<Order>> {
        let pair_index = self.require_pair(base, quote)?;
        Ok(self
            .registry
            .pair(pair_index)
            .and_then(|pair| pair.orders(side).get_order(order_index))
            .copied())
    }

    /// Read-only listing of every pair and its resting orders.
    #[must_use]
    pub fn snapshot(&self) -> BookSnapshot {
        let side_snapshot = |pair: &Pair, side: Side| SideSnapshot {
            root: pair.orders(side).root(),
            orders: pair
                .orders(side)
                .orders()
                .map(|(order_index, order)| SlotEntry {
                    order_index,
                    order: *order,
                })
                .collect(),
        };

        BookSnapshot {
            config: self.config(),
            pairs_root: self.pairs_root(),
            pairs: self
                .registry
                .pairs()
                .map(|(pair_index, pair)| PairSnapshot {
                    pair_index,
                    base: pair.base(),
                    quote: pair.quote(),
                    commitment: pair.commitment(),
                    buy: side_snapshot(pair, Side::Buy),
                    sell: side_snapshot(pair, Side::Sell),
                })
                .collect(),
        }
    }

    /// Rebuild a ledger from a persisted snapshot, checking every recorded root.
    pub fn restore(snapshot: &BookSnapshot) -> Result<Self> {
        let mut ledger = Self::new(snapshot.config)?;

        for (position, recorded) in snapshot.pairs.iter().enumerate() {
            if recorded.pair_index != position {
                return Err(XaneError::SnapshotMismatch {
                    reason: format!(
                        "pair {}/{} recorded at index {} but listed at {position}",
                        recorded.base, recorded.quote, recorded.pair_index
                    ),
                });
            }

            let orders: Vec<(Side, usize, Order)> = [Side::Buy, Side::Sell]
                .into_iter()
                .flat_map(|side| {
                    recorded
                        .side(side)
                        .orders
                        .iter()
                        .map(move |entry| (side, entry.order_index, entry.order))
                })
                .collect();

            let pair_index = ledger
                .registry
                .restore_pair(recorded.base, recorded.quote, &orders)
                .map_err(|e| match e {
                    XaneError::SnapshotMismatch { .. } => e,
                    other => XaneError::SnapshotMismatch {
                        reason: format!("pair {position}: {other}"),
                    },
                })?;

            let pair = ledger
                .registry
                .pair(pair_index)
                .ok_or(XaneError::UnknownPairIndex(pair_index))?;
            for side in [Side::Buy, Side::Sell] {
                let rebuilt = pair.orders(side).root();
                let expected = recorded.side(side).root;
                if rebuilt != expected {
                    return Err(XaneError::SnapshotMismatch {
                        reason: format!(
                            "pair {pair_index} {side} root rebuilt as {rebuilt}, recorded {expected}"
                        ),
                    });
                }
            }
            if pair.commitment() != recorded.commitment {
                return Err(XaneError::SnapshotMismatch {
                    reason: format!("pair {pair_index} commitment differs"),
                });
            }
        }

        if ledger.pairs_root() != snapshot.pairs_root {
            return Err(XaneError::SnapshotMismatch {
                reason: format!(
                    "pairs root rebuilt as {}, recorded {}",
                    ledger.pairs_root(),
                    snapshot.pairs_root
                ),
            });
        }

        tracing::info!(
            pairs = ledger.pair_count(),
            orders = snapshot.order_count(),
            pairs_root = %ledger.pairs_root().short(),
            "Ledger restored from snapshot"
        );

        Ok(ledger)
    }
}

/// Undo of transitions the authority failed to attest.
///
/// Each call is only valid directly after the transition it undoes, with no
/// other mutation in between, and must bring the outer root back to
/// `previous_pairs_root`.
impl OrderBookLedger {
    fn confirm_reverted(&self, undo: Result<()>, previous_pairs_root: Field) -> Result<()> {
        undo.map_err(|e| XaneError::RollbackFailed {
            reason: e.to_string(),
        })?;
        if self.pairs_root() != previous_pairs_root {
            return Err(XaneError::RollbackFailed {
                reason: format!(
                    "pairs root is {}, expected {previous_pairs_root}",
                    self.pairs_root()
                ),
            });
        }
        tracing::info!(pairs_root = %previous_pairs_root.short(), "Transition reverted");
        Ok(())
    }

    pub(crate) fn revert_add_pair(
        &mut self,
        pair_index: usize,
        previous_pairs_root: Field,
    ) -> Result<()> {
        let undo = self.registry.pop_pair(pair_index);
        self.confirm_reverted(undo, previous_pairs_root)
    }

    pub(crate) fn revert_placement(
        &mut self,
        side: Side,
        pair_index: usize,
        order_index: usize,
        previous_pairs_root: Field,
    ) -> Result<()> {
        let undo = self
            .registry
            .remove_order(pair_index, side, order_index)
            .map(|_| ());
        self.confirm_reverted(undo, previous_pairs_root)
    }

    pub(crate) fn revert_withdrawal(
        &mut self,
        side: Side,
        pair_index: usize,
        order_index: usize,
        order: Order,
        previous_pairs_root: Field,
    ) -> Result<()> {
        let undo = self
            .registry
            .reinstate_order(pair_index, side, order_index, order);
        self.confirm_reverted(undo, previous_pairs_root)
    }
}

impl WitnessProvider for OrderBookLedger {
    fn pair_witness(&self, pair_index: usize) -> Result<MerkleWitness> {
        self.registry.pair_witness(pair_index)
    }

    fn order_witness(&self, side: Side, pair_index: usize, order_index: usize) -> Result<MerkleWitness> {
        self.registry.order_witness(side, pair_index, order_index)
    }
}
