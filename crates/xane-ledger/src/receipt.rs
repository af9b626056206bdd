//! Transition receipts and their canonical attestation messages.
//!
//! Each mutating ledger call returns a receipt holding everything the
//! on-chain verifier needs to replay the transition: the witnesses taken
//! before the write, the opposite side's root, the old and new pairs roots.
//!
//! [`Transition::attestation_message`] lays those values out in the exact
//! field order the verifier reconstructs before checking the authority's
//! signature. That order is a wire contract:
//!
//! ```text
//! add pair  : base, quote, pair_index
//! place     : amount, price, base, quote, SIDES, pair_witness
//! cancel    : amount, price, base, quote, SIDES, pair_witness
//! execute   : maker, amount, price, base, quote, SIDES, pair_witness
//!
//! SIDES (buy component, then sell component):
//!   side = BUY  -> order_witness, sell_root
//!   side = SELL -> buy_root, order_witness
//! ```

use serde::{Deserialize, Serialize};
use xane_types::{AssetId, Field, MerkleWitness, Order, Result, Side};

use crate::ledger::OrderBookLedger;

/// Proof material for the side an order transition touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideProof {
    pub side: Side,
    /// Witness of the touched slot, valid for both the old and new side root.
    pub order_witness: MerkleWitness,
    /// Root of the untouched side, which the pair commitment also binds.
    pub opposite_side_root: Field,
}

impl SideProof {
    fn push_fields(&self, message: &mut Vec<Field>) {
        match self.side {
            Side::Buy => {
                message.extend(self.order_witness.to_fields());
                message.push(self.opposite_side_root);
            }
            Side::Sell => {
                message.push(self.opposite_side_root);
                message.extend(self.order_witness.to_fields());
            }
        }
    }
}

/// Receipt for a newly registered pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPairReceipt {
    pub base: AssetId,
    pub quote: AssetId,
    pub pair_index: usize,
    /// Witness of the empty leaf the pair now occupies.
    pub pair_witness: MerkleWitness,
    pub previous_pairs_root: Field,
    pub pairs_root: Field,
}

/// Receipt for an order placed into the lowest free slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderReceipt {
    pub base: AssetId,
    pub quote: AssetId,
    pub pair_index: usize,
    pub order_index: usize,
    pub order: Order,
    pub proof: SideProof,
    pub pair_witness: MerkleWitness,
    pub previous_pairs_root: Field,
    pub pairs_root: Field,
}

/// Receipt for an order withdrawn by its maker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderReceipt {
    pub base: AssetId,
    pub quote: AssetId,
    pub pair_index: usize,
    pub order_index: usize,
    /// The order as it stood before removal.
    pub order: Order,
    pub proof: SideProof,
    pub pair_witness: MerkleWitness,
    pub previous_pairs_root: Field,
    pub pairs_root: Field,
}

/// Receipt for an order filled by a taker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteOrderReceipt {
    pub base: AssetId,
    pub quote: AssetId,
    pub pair_index: usize,
    pub order_index: usize,
    /// The order as it stood before removal; the taker settles against it.
    pub order: Order,
    pub proof: SideProof,
    pub pair_witness: MerkleWitness,
    pub previous_pairs_root: Field,
    pub pairs_root: Field,
}

/// A state transition that an authority attests to.
pub trait Transition {
    /// Short label for logs.
    fn kind(&self) -> &'static str;

    /// Outer root before the transition.
    fn previous_pairs_root(&self) -> Field;

    /// Outer root after the transition.
    fn pairs_root(&self) -> Field;

    /// Fields in the verifier's canonical order.
    fn attestation_message(&self) -> Vec<Field>;

    /// Undo this transition on the ledger that produced it.
    ///
    /// Must run before any other mutation of that ledger. Fails with
    /// `RollbackFailed` unless the outer root is back at
    /// [`Transition::previous_pairs_root`].
    fn revert(&self, ledger: &mut OrderBookLedger) -> Result<()>;
}

impl Transition for AddPairReceipt {
    fn kind(&self) -> &'static str {
        "add_pair"
    }

    fn previous_pairs_root(&self) -> Field {
        self.previous_pairs_root
    }

    fn pairs_root(&self) -> Field {
        self.pairs_root
    }

    fn attestation_message(&self) -> Vec<Field> {
        vec![
            self.base.as_field(),
            self.quote.as_field(),
            Field::from_u64(self.pair_index as u64),
        ]
    }

    fn revert(&self, ledger: &mut OrderBookLedger) -> Result<()> {
        ledger.revert_add_pair(self.pair_index, self.previous_pairs_root)
    }
}

fn order_message(
    maker: Option<Field>,
    order: &Order,
    base: AssetId,
    quote: AssetId,
    proof: &SideProof,
    pair_witness: &MerkleWitness,
) -> Vec<Field> {
    let mut message = Vec::with_capacity(8 + 2 * (proof.order_witness.height() + pair_witness.height()));
    message.extend(maker);
    message.push(Field::from_u64(order.amount));
    message.push(Field::from_u64(order.price));
    message.push(base.as_field());
    message.push(quote.as_field());
    proof.push_fields(&mut message);
    message.extend(pair_witness.to_fields());
    message
}

impl Transition for PlaceOrderReceipt {
    fn kind(&self) -> &'static str {
        "place_order"
    }

    fn previous_pairs_root(&self) -> Field {
        self.previous_pairs_root
    }

    fn pairs_root(&self) -> Field {
        self.pairs_root
    }

    fn attestation_message(&self) -> Vec<Field> {
        order_message(
            None,
            &self.order,
            self.base,
            self.quote,
            &self.proof,
            &self.pair_witness,
        )
    }

    fn revert(&self, ledger: &mut OrderBookLedger) -> Result<()> {
        ledger.revert_placement(
            self.proof.side,
            self.pair_index,
            self.order_index,
            self.previous_pairs_root,
        )
    }
}

impl Transition for CancelOrderReceipt {
    fn kind(&self) -> &'static str {
        "cancel_order"
    }

    fn previous_pairs_root(&self) -> Field {
        self.previous_pairs_root
    }

    fn pairs_root(&self) -> Field {
        self.pairs_root
    }

    fn attestation_message(&self) -> Vec<Field> {
        order_message(
            None,
            &self.order,
            self.base,
            self.quote,
            &self.proof,
            &self.pair_witness,
        )
    }

    fn revert(&self, ledger: &mut OrderBookLedger) -> Result<()> {
        ledger.revert_withdrawal(
            self.proof.side,
            self.pair_index,
            self.order_index,
            self.order,
            self.previous_pairs_root,
        )
    }
}

impl Transition for ExecuteOrderReceipt {
    fn kind(&self) -> &'static str {
        "execute_order"
    }

    fn previous_pairs_root(&self) -> Field {
        self.previous_pairs_root
    }

    fn pairs_root(&self) -> Field {
        self.pairs_root
    }

    fn attestation_message(&self) -> Vec<Field> {
        order_message(
            Some(self.order.maker.as_field()),
            &self.order,
            self.base,
            self.quote,
            &self.proof,
            &self.pair_witness,
        )
    }

    fn revert(&self, ledger: &mut OrderBookLedger) -> Result<()> {
        ledger.revert_withdrawal(
            self.proof.side,
            self.pair_index,
            self.order_index,
            self.order,
            self.previous_pairs_root,
        )
    }
}

#[cfg(test)]
mod tests {
    use xane_types::{Address, WitnessStep};

    use super::*;

    fn witness(tag: u64) -> MerkleWitness {
        MerkleWitness::new(vec![WitnessStep {
            sibling: Field::from_u64(tag),
            is_left: true,
        }])
    }

    fn base() -> AssetId {
        AssetId::from_symbol("BTC").unwrap()
    }

    fn quote() -> AssetId {
        AssetId::from_symbol("USD").unwrap()
    }

    fn place(side: Side) -> PlaceOrderReceipt {
        PlaceOrderReceipt {
            base: base(),
            quote: quote(),
            pair_index: 0,
            order_index: 0,
            order: Order::new(Address::dummy(7), 11, 22),
            proof: SideProof {
                side,
                order_witness: witness(100),
                opposite_side_root: Field::from_u64(300),
            },
            pair_witness: witness(200),
            previous_pairs_root: Field::ZERO,
            pairs_root: Field::ONE,
        }
    }

    #[test]
    fn add_pair_message() {
        let receipt = AddPairReceipt {
            base: base(),
            quote: quote(),
            pair_index: 3,
            pair_witness: witness(1),
            previous_pairs_root: Field::ZERO,
            pairs_root: Field::ONE,
        };
        assert_eq!(
            receipt.attestation_message(),
            vec![base().as_field(), quote().as_field(), Field::from_u64(3)]
        );
    }

    #[test]
    fn buy_side_message_puts_witness_before_sell_root() {
        let msg = place(Side::Buy).attestation_message();
        assert_eq!(
            msg,
            vec![
                Field::from_u64(11),
                Field::from_u64(22),
                base().as_field(),
                quote().as_field(),
                Field::from_u64(100),
                Field::ONE,
                Field::from_u64(300),
                Field::from_u64(200),
                Field::ONE,
            ]
        );
    }

    #[test]
    fn sell_side_message_puts_buy_root_first() {
        let msg = place(Side::Sell).attestation_message();
        assert_eq!(msg[4], Field::from_u64(300));
        assert_eq!(msg[5], Field::from_u64(100));
        assert_eq!(msg[6], Field::ONE);
    }

    #[test]
    fn execute_message_leads_with_maker() {
        let p = place(Side::Buy);
        let exec = ExecuteOrderReceipt {
            base: p.base,
            quote: p.quote,
            pair_index: p.pair_index,
            order_index: p.order_index,
            order: p.order,
            proof: p.proof.clone(),
            pair_witness: p.pair_witness.clone(),
            previous_pairs_root: p.previous_pairs_root,
            pairs_root: p.pairs_root,
        };
        let msg = exec.attestation_message();
        assert_eq!(msg[0], Address::dummy(7).as_field());
        assert_eq!(&msg[1..], p.attestation_message().as_slice());
    }
}
