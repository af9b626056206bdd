//! The pair registry: every known pair plus the outer pairs tree.
//!
//! Pair indices are assigned once, in registration order, and never change.
//! Every inner mutation is followed by rewriting the owning pair's leaf so
//! that `pairs_tree.leaf(i) == pair_i.commitment()` holds after each call.
//!
//! `(A, B)` and `(B, A)` name the same market: registering the swapped form
//! of an existing pair is rejected. The pair keeps the asset order it was
//! first registered with and lookups match that order exactly.

use xane_types::{AssetId, Field, LedgerConfig, MerkleWitness, Order, Result, Side, XaneError};

use crate::commitment::empty_leaf;
use crate::merkle::MerkleTree;
use crate::order_set::{Placement, Removal};
use crate::pair::Pair;
use crate::witness::WitnessProvider;

/// Outcome of [`PairRegistry::add_pair`].
#[derive(Debug, Clone)]
pub struct PairAdded {
    pub pair_index: usize,
    /// Witness of the (previously empty) leaf, taken before the write.
    pub pair_witness: MerkleWitness,
    pub pairs_root: Field,
}

/// Outcome of an inner mutation, with the outer witness taken before it.
#[derive(Debug, Clone)]
pub struct PairUpdate<T> {
    pub inner: T,
    pub pair_witness: MerkleWitness,
}

/// All pairs and the tree committing to them.
#[derive(Debug, Clone)]
pub struct PairRegistry {
    config: LedgerConfig,
    pairs: Vec<Pair>,
    tree: MerkleTree,
}

impl PairRegistry {
    pub fn new(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pairs: Vec::new(),
            tree: MerkleTree::new(config.pairs_height)?,
        })
    }

    #[must_use]
    pub fn config(&self) -> LedgerConfig {
        self.config
    }

    #[must_use]
    pub fn root(&self) -> Field {
        self.tree.root()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Linear lookup by exact `(base, quote)` order.
    #[must_use]
    pub fn find(&self, base: AssetId, quote: AssetId) -> Option<usize> {
        self.pairs.iter().position(|pair| pair.matches_exact(base, quote))
    }

    #[must_use]
    pub fn pair(&self, pair_index: usize) -> Option<&Pair> {
        self.pairs.get(pair_index)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, &Pair)> {
        self.pairs.iter().enumerate()
    }

    /// Current leaf of a pair slot (`ZERO` when unassigned).
    #[must_use]
    pub fn leaf(&self, pair_index: usize) -> Field {
        self.tree.leaf(pair_index as u64)
    }

    /// Register a new pair at the next index.
    pub fn add_pair(&mut self, base: AssetId, quote: AssetId) -> Result<PairAdded> {
        if base == quote {
            return Err(XaneError::SameCurrencyPair(base));
        }
        if self.pairs.iter().any(|pair| pair.trades(base, quote)) {
            return Err(XaneError::PairAlreadyExists { base, quote });
        }
        let pair_index = self.pairs.len();
        if pair_index as u64 >= self.tree.capacity() {
            return Err(XaneError::PairsTreeFull {
                capacity: self.tree.capacity(),
            });
        }

        let pair = Pair::new(base, quote, self.config.orders_height)?;
        let pair_witness = self.tree.witness(pair_index as u64)?;

        self.tree.set_leaf(pair_index as u64, pair.commitment())?;
        self.pairs.push(pair);

        tracing::info!(
            pair_index,
            base = %base,
            quote = %quote,
            pairs_root = %self.root().short(),
            "Pair added"
        );

        Ok(PairAdded {
            pair_index,
            pair_witness,
            pairs_root: self.root(),
        })
    }

    fn pair_mut(&mut self, pair_index: usize) -> Result<&mut Pair> {
        self.pairs
            .get_mut(pair_index)
            .ok_or(XaneError::UnknownPairIndex(pair_index))
    }

    /// Rewrite the pair's outer leaf from its current side roots.
    fn refresh_leaf(&mut self, pair_index: usize) -> Result<()> {
        let commitment = self.pair_mut(pair_index)?.commitment();
        // Assigned indices are always below capacity, so this cannot fail
        // after an inner write has already happened.
        self.tree.set_leaf(pair_index as u64, commitment)
    }

    /// Place `order` on `side` of the pair, then update the outer tree.
    pub fn place_order(
        &mut self,
        pair_index: usize,
        side: Side,
        order: Order,
    ) -> Result<PairUpdate<Placement>> {
        let pair_witness = self.witness_for_assigned(pair_index)?;

        let placement = self.pair_mut(pair_index)?.orders_mut(side).add_order(order)?;
        self.refresh_leaf(pair_index)?;

        tracing::debug!(
            pair_index,
            side = %side,
            order_index = placement.order_index,
            maker = %order.maker,
            amount = order.amount,
            price = order.price,
            pairs_root = %self.root().short(),
            "Order placed"
        );

        Ok(PairUpdate {
            inner: placement,
            pair_witness,
        })
    }

    /// Free slot `order_index` on `side` of the pair, then update the outer tree.
    pub fn remove_order(
        &mut self,
        pair_index: usize,
        side: Side,
        order_index: usize,
    ) -> Result<PairUpdate<Removal>> {
        let pair_witness = self.witness_for_assigned(pair_index)?;

        let removal = self
            .pair_mut(pair_index)?
            .orders_mut(side)
            .remove_order(order_index)?;
        self.refresh_leaf(pair_index)?;

        tracing::debug!(
            pair_index,
            side = %side,
            order_index,
            pairs_root = %self.root().short(),
            "Order removed"
        );

        Ok(PairUpdate {
            inner: removal,
            pair_witness,
        })
    }

    /// Unregister the most recently added pair and zero its leaf.
    pub(crate) fn pop_pair(&mut self, pair_index: usize) -> Result<()> {
        if pair_index + 1 != self.pairs.len() {
            return Err(XaneError::UnknownPairIndex(pair_index));
        }
        self.tree.set_leaf(pair_index as u64, empty_leaf())?;
        self.pairs.pop();
        Ok(())
    }

    /// Put `order` back at its exact slot, then update the outer tree.
    pub(crate) fn reinstate_order(
        &mut self,
        pair_index: usize,
        side: Side,
        order_index: usize,
        order: Order,
    ) -> Result<()> {
        self.pair_mut(pair_index)?
            .orders_mut(side)
            .restore_order(order_index, order)?;
        self.refresh_leaf(pair_index)
    }

    fn witness_for_assigned(&self, pair_index: usize) -> Result<MerkleWitness> {
        if pair_index >= self.pairs.len() {
            return Err(XaneError::UnknownPairIndex(pair_index));
        }
        self.tree.witness(pair_index as u64)
    }

    /// Re-register a persisted pair and its orders at the next index.
    pub(crate) fn restore_pair(
        &mut self,
        base: AssetId,
        quote: AssetId,
        orders: &[(Side, usize, Order)],
    ) -> Result<usize> {
        let PairAdded { pair_index, .. } = self.add_pair(base, quote)?;
        for (side, order_index, order) in orders {
            self.pair_mut(pair_index)?
                .orders_mut(*side)
                .restore_order(*order_index, *order)?;
        }
        self.refresh_leaf(pair_index)?;
        Ok(pair_index)
    }
}

impl WitnessProvider for PairRegistry {
    fn pair_witness(&self, pair_index: usize) -> Result<MerkleWitness> {
        self.tree.witness(pair_index as u64)
    }

    fn order_witness(&self, side: Side, pair_index: usize, order_index: usize) -> Result<MerkleWitness> {
        let pair = self
            .pair(pair_index)
            .ok_or(XaneError::UnknownPairIndex(pair_index))?;
        pair.orders(side).witness(order_index)
    }
}
