//! The authority service: one ledger, one signer, serialized writers.
//!
//! All mutations take the write lock for their whole validate, witness,
//! mutate and sign sequence, so no two transitions can ever be witnessed
//! against the same pre-state. If signing fails the transition is reverted
//! through its receipt before the lock is released, leaving the ledger
//! exactly as it was.
//!
//! Ledger calls either fail before writing or complete, so a lock poisoned by
//! a panicking holder still guards a consistent ledger and is recovered.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xane_ledger::{
    AddPairReceipt, BookSnapshot, CancelOrderReceipt, ExecuteOrderReceipt, OrderBookLedger,
    PlaceOrderReceipt, Transition, WitnessProvider,
};
use xane_types::{
    Address, AssetId, Field, LedgerConfig, MerkleWitness, Order, Result, Side,
};

use crate::attestor::{Attestor, verify_attestation};

/// A receipt together with the authority's signature over its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attested<R> {
    pub receipt: R,
    /// Fields in the verifier's canonical order.
    pub message: Vec<Field>,
    pub signature: Vec<u8>,
    /// Public key of the signing authority.
    pub signer: [u8; 32],
    pub issued_at: DateTime<Utc>,
}

impl<R: Transition> Attested<R> {
    /// The message matches the receipt and the signature matches the signer.
    #[must_use]
    pub fn verify(&self) -> bool {
        self.message == self.receipt.attestation_message()
            && verify_attestation(&self.signer, &self.message, &self.signature)
    }
}

/// Shared front door to the ledger.
#[derive(Debug)]
pub struct AuthorityService<A: Attestor> {
    ledger: RwLock<OrderBookLedger>,
    attestor: A,
}

impl<A: Attestor> AuthorityService<A> {
    /// Start with an empty book.
    pub fn new(config: LedgerConfig, attestor: A) -> Result<Self> {
        Ok(Self::from_ledger(OrderBookLedger::new(config)?, attestor))
    }

    /// Serve an existing ledger, e.g. one rebuilt from a snapshot.
    pub fn from_ledger(ledger: OrderBookLedger, attestor: A) -> Self {
        tracing::info!(
            signer = %hex::encode(attestor.public_key()),
            pairs = ledger.pair_count(),
            pairs_root = %ledger.pairs_root(),
            "Authority service started"
        );
        Self {
            ledger: RwLock::new(ledger),
            attestor,
        }
    }

    #[must_use]
    pub fn signer(&self) -> [u8; 32] {
        self.attestor.public_key()
    }

    fn read(&self) -> RwLockReadGuard<'_, OrderBookLedger> {
        self.ledger.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, OrderBookLedger> {
        self.ledger.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `op` under the write lock and sign it, reverting if signing fails.
    fn transition<R, F>(&self, op: F) -> Result<Attested<R>>
    where
        R: Transition,
        F: FnOnce(&mut OrderBookLedger) -> Result<R>,
    {
        let mut ledger = self.write();

        let receipt = op(&mut *ledger)?;
        let message = receipt.attestation_message();
        let signature = match self.attestor.sign(&message) {
            Ok(signature) => signature,
            Err(e) => {
                receipt.revert(&mut *ledger)?;
                tracing::warn!(
                    kind = receipt.kind(),
                    error = %e,
                    pairs_root = %ledger.pairs_root(),
                    "Signing failed, transition reverted"
                );
                return Err(e);
            }
        };

        tracing::debug!(
            kind = receipt.kind(),
            fields = message.len(),
            previous_pairs_root = %receipt.previous_pairs_root(),
            pairs_root = %receipt.pairs_root(),
            "Transition attested"
        );

        Ok(Attested {
            receipt,
            message,
            signature,
            signer: self.attestor.public_key(),
            issued_at: Utc::now(),
        })
    }

    // =================================================================
    // Mutations
    // =================================================================

    pub fn add_pair(&self, base: AssetId, quote: AssetId) -> Result<Attested<AddPairReceipt>> {
        self.transition(|ledger| ledger.add_pair(base, quote))
            .inspect_err(|e| tracing::warn!(%base, %quote, error = %e, "add_pair rejected"))
    }

    pub fn place_order(
        &self,
        side: Side,
        base: AssetId,
        quote: AssetId,
        maker: Address,
        amount: u64,
        price: u64,
    ) -> Result<Attested<PlaceOrderReceipt>> {
        self.transition(|ledger| ledger.place_order(side, base, quote, maker, amount, price))
            .inspect_err(|e| {
                tracing::warn!(%side, %base, %quote, %maker, error = %e, "place_order rejected");
            })
    }

    pub fn cancel_order(
        &self,
        side: Side,
        base: AssetId,
        quote: AssetId,
        order_index: usize,
    ) -> Result<Attested<CancelOrderReceipt>> {
        self.transition(|ledger| ledger.cancel_order(side, base, quote, order_index))
            .inspect_err(|e| {
                tracing::warn!(%side, %base, %quote, order_index, error = %e, "cancel_order rejected");
            })
    }

    pub fn execute_order(
        &self,
        side: Side,
        base: AssetId,
        quote: AssetId,
        order_index: usize,
    ) -> Result<Attested<ExecuteOrderReceipt>> {
        self.transition(|ledger| ledger.execute_order(side, base, quote, order_index))
            .inspect_err(|e| {
                tracing::warn!(%side, %base, %quote, order_index, error = %e, "execute_order rejected");
            })
    }

    // =================================================================
    // Reads
    // =================================================================

    #[must_use]
    pub fn pairs_root(&self) -> Field {
        self.read().pairs_root()
    }

    pub fn orders_root(&self, side: Side, base: AssetId, quote: AssetId) -> Result<Field> {
        self.read().get_orders_root(side, base, quote)
    }

    pub fn get_order(
        &self,
        side: Side,
        base: AssetId,
        quote: AssetId,
        order_index: usize,
    ) -> Result<Option<Order>> {
        self.read().get_order(side, base, quote, order_index)
    }

    #[must_use]
    pub fn snapshot(&self) -> BookSnapshot {
        self.read().snapshot()
    }
}

impl<A: Attestor> WitnessProvider for AuthorityService<A> {
    fn pair_witness(&self, pair_index: usize) -> Result<MerkleWitness> {
        self.read().pair_witness(pair_index)
    }

    fn order_witness(&self, side: Side, pair_index: usize, order_index: usize) -> Result<MerkleWitness> {
        self.read().order_witness(side, pair_index, order_index)
    }
}
