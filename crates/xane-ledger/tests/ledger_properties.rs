//! Integration tests for the authenticated order book.
//!
//! These drive the public ledger API the way the authority does and check,
//! after every call, the properties the on-chain verifier relies on:
//! pair leaves match pair commitments, order leaves match order commitments
//! (or zero), and every witness recomputes the current root.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xane_ledger::*;
use xane_types::*;

fn asset(symbol: &str) -> AssetId {
    AssetId::from_symbol(symbol).unwrap()
}

/// Full consistency sweep over every assigned pair and every slot.
fn assert_consistent(ledger: &OrderBookLedger) {
    let registry = ledger.registry();
    for (pair_index, pair) in registry.pairs() {
        // pair leaf equals pair commitment
        let expected = pair_commitment(pair.base(), pair.quote(), pair.buy_root(), pair.sell_root());
        assert_eq!(registry.leaf(pair_index), expected, "pair {pair_index} leaf");

        let pair_witness = ledger.pair_witness(pair_index).unwrap();
        assert!(verify_inclusion(&pair_witness, expected, ledger.pairs_root()));

        for side in [Side::Buy, Side::Sell] {
            let orders = pair.orders(side);
            for order_index in 0..orders.capacity() as usize {
                // order leaf equals order commitment, or zero when free
                let leaf = orders.leaf(order_index);
                match orders.get_order(order_index) {
                    Some(order) => assert_eq!(leaf, order_commitment(order)),
                    None => assert_eq!(leaf, Field::ZERO),
                }
                let witness = ledger.order_witness(side, pair_index, order_index).unwrap();
                assert!(verify_inclusion(&witness, leaf, orders.root()));
            }
        }
    }
}

// =============================================================================
// Scenario: BTC/USD place, cancel, place, execute
// =============================================================================
#[test]
fn btc_usd_scenario_returns_to_initial_root() {
    let mut ledger = OrderBookLedger::new(LedgerConfig::default()).unwrap();
    let (btc, usd) = (asset("BTC"), asset("USD"));
    let m = Address::dummy(1);
    let m2 = Address::dummy(2);

    let added = ledger.add_pair(btc, usd).unwrap();
    assert_eq!(added.pair_index, 0);
    let r0 = ledger.pairs_root();
    assert_eq!(added.pairs_root, r0);

    let placed = ledger
        .place_order(Side::Buy, btc, usd, m, 1_000_000, 6_900_000)
        .unwrap();
    assert_eq!(placed.order_index, 0);
    let r1 = ledger.pairs_root();
    assert_ne!(r1, r0);
    assert_consistent(&ledger);

    ledger.cancel_order(Side::Buy, btc, usd, 0).unwrap();
    assert_eq!(ledger.pairs_root(), r0);

    let placed = ledger
        .place_order(Side::Sell, btc, usd, m2, 2_000_000, 6_950_000)
        .unwrap();
    assert_eq!(placed.order_index, 0);
    let r2 = ledger.pairs_root();
    assert_ne!(r2, r0);
    assert_ne!(r2, r1, "same slot on the other side commits differently");

    let executed = ledger.execute_order(Side::Sell, btc, usd, 0).unwrap();
    assert_eq!(executed.order, Order::new(m2, 2_000_000, 6_950_000));
    assert_eq!(ledger.pairs_root(), r0);
    assert_consistent(&ledger);
}

// =============================================================================
// Round-trip: place then cancel restores slot leaf, pair leaf, and outer root
// =============================================================================
#[test]
fn place_then_cancel_restores_every_level() {
    let mut ledger = OrderBookLedger::new(LedgerConfig::new(4, 4)).unwrap();
    let (eth, usd) = (asset("ETH"), asset("USD"));
    ledger.add_pair(asset("BTC"), usd).unwrap();
    ledger.add_pair(eth, usd).unwrap();
    ledger
        .place_order(Side::Buy, eth, usd, Address::dummy(1), 3, 30)
        .unwrap();

    let pair_leaf = ledger.registry().leaf(1);
    let root = ledger.pairs_root();

    let placed = ledger
        .place_order(Side::Buy, eth, usd, Address::dummy(2), 4, 40)
        .unwrap();
    let cancelled = ledger
        .cancel_order(Side::Buy, eth, usd, placed.order_index)
        .unwrap();

    assert_eq!(
        ledger.pair(1).unwrap().orders(Side::Buy).leaf(placed.order_index),
        Field::ZERO
    );
    assert_eq!(ledger.registry().leaf(1), pair_leaf);
    assert_eq!(ledger.pairs_root(), root);
    assert_eq!(cancelled.previous_pairs_root, placed.pairs_root);
    assert_eq!(cancelled.pairs_root, placed.previous_pairs_root);
}

// =============================================================================
// Slot reuse: freeing the lowest occupied slot makes it the next allocation
// =============================================================================
#[test]
fn lowest_freed_slot_is_reused_per_side() {
    let mut ledger = OrderBookLedger::new(LedgerConfig::new(2, 3)).unwrap();
    let (btc, usd) = (asset("BTC"), asset("USD"));
    ledger.add_pair(btc, usd).unwrap();

    for seed in 0..4 {
        let r = ledger
            .place_order(Side::Sell, btc, usd, Address::dummy(seed), 1, 1)
            .unwrap();
        assert_eq!(r.order_index, usize::from(seed));
    }
    ledger.cancel_order(Side::Sell, btc, usd, 2).unwrap();
    ledger.execute_order(Side::Sell, btc, usd, 0).unwrap();

    // buy side is unaffected by sell-side holes
    let buy = ledger
        .place_order(Side::Buy, btc, usd, Address::dummy(9), 1, 1)
        .unwrap();
    assert_eq!(buy.order_index, 0);

    let first = ledger
        .place_order(Side::Sell, btc, usd, Address::dummy(7), 1, 1)
        .unwrap();
    let second = ledger
        .place_order(Side::Sell, btc, usd, Address::dummy(8), 1, 1)
        .unwrap();
    let third = ledger
        .place_order(Side::Sell, btc, usd, Address::dummy(6), 1, 1)
        .unwrap();
    assert_eq!(
        (first.order_index, second.order_index, third.order_index),
        (0, 2, 4)
    );
    assert_consistent(&ledger);
}

// =============================================================================
// Rejections leave all state untouched
// =============================================================================
#[test]
fn rejected_mutations_do_not_move_any_root() {
    let mut ledger = OrderBookLedger::new(LedgerConfig::new(1, 1)).unwrap();
    let (btc, usd) = (asset("BTC"), asset("USD"));
    ledger.add_pair(btc, usd).unwrap();
    ledger
        .place_order(Side::Buy, btc, usd, Address::dummy(1), 1, 1)
        .unwrap();
    ledger
        .place_order(Side::Buy, btc, usd, Address::dummy(2), 1, 1)
        .unwrap();
    let snapshot = ledger.snapshot();

    assert!(matches!(
        ledger.add_pair(btc, usd),
        Err(XaneError::PairAlreadyExists { .. })
    ));
    assert!(matches!(
        ledger.add_pair(usd, btc),
        Err(XaneError::PairAlreadyExists { .. })
    ));
    assert!(matches!(
        ledger.add_pair(btc, btc),
        Err(XaneError::SameCurrencyPair(_))
    ));
    assert!(matches!(
        ledger.place_order(Side::Buy, btc, usd, Address::dummy(3), 1, 1),
        Err(XaneError::OrdersTreeFull { .. })
    ));
    assert!(matches!(
        ledger.cancel_order(Side::Sell, btc, usd, 0),
        Err(XaneError::OrderDoesNotExist { .. })
    ));
    assert!(matches!(
        ledger.execute_order(Side::Buy, btc, usd, 2),
        Err(XaneError::OrderDoesNotExist { .. })
    ));
    assert!(matches!(
        ledger.order_witness(Side::Buy, 0, 2),
        Err(XaneError::InvalidWitnessIndex { .. })
    ));

    assert_eq!(ledger.snapshot(), snapshot);
}

// =============================================================================
// Randomized operation sequences
// =============================================================================
#[test]
fn random_operations_preserve_invariants_and_witnesses() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0001);
    let mut ledger = OrderBookLedger::new(LedgerConfig::new(3, 3)).unwrap();
    let assets: Vec<AssetId> = ["BTC", "ETH", "USD", "MINA"]
        .iter()
        .map(|s| asset(s))
        .collect();

    for step in 0..400 {
        let base = assets[rng.gen_range(0..assets.len())];
        let quote = assets[rng.gen_range(0..assets.len())];
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let before = ledger.snapshot();

        let outcome: Result<()> = match rng.gen_range(0..10) {
            0 => ledger.add_pair(base, quote).map(|_| ()),
            1..=5 => ledger
                .place_order(
                    side,
                    base,
                    quote,
                    Address::dummy(rng.r#gen()),
                    rng.gen_range(1..1_000),
                    rng.gen_range(1..1_000),
                )
                .map(|r| {
                    let leaf = order_commitment(&r.order);
                    let new_side_root = r.proof.order_witness.calculate_root(leaf);
                    let (buy, sell) = match side {
                        Side::Buy => (new_side_root, r.proof.opposite_side_root),
                        Side::Sell => (r.proof.opposite_side_root, new_side_root),
                    };
                    let pair_leaf = pair_commitment(base, quote, buy, sell);
                    assert_eq!(r.pair_witness.calculate_root(pair_leaf), r.pairs_root);
                }),
            6..=7 => ledger
                .cancel_order(side, base, quote, rng.gen_range(0..8))
                .map(|_| ()),
            _ => ledger
                .execute_order(side, base, quote, rng.gen_range(0..8))
                .map(|_| ()),
        };

        if outcome.is_err() {
            assert_eq!(ledger.snapshot(), before, "step {step}: failed call mutated state");
        }
        assert_consistent(&ledger);
    }

    let restored = OrderBookLedger::restore(&ledger.snapshot()).unwrap();
    assert_eq!(restored.pairs_root(), ledger.pairs_root());
}
