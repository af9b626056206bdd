//! Order types for the Xane ledger.

use serde::{Deserialize, Serialize};

use crate::{Address, Field};

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// A resting order. Committed as `H(maker, amount, price)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub maker: Address,
    pub amount: u64,
    pub price: u64,
}

impl Order {
    #[must_use]
    pub const fn new(maker: Address, amount: u64, price: u64) -> Self {
        Self {
            maker,
            amount,
            price,
        }
    }

    /// The order's fields in commitment order: maker, amount, price.
    #[must_use]
    pub fn to_fields(&self) -> [Field; 3] {
        [
            self.maker.as_field(),
            Field::from_u64(self.amount),
            Field::from_u64(self.price),
        ]
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    pub fn dummy(seed: u8, amount: u64, price: u64) -> Self {
        Self::new(Address::dummy(seed), amount, price)
    }
}
