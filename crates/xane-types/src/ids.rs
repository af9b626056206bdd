//! Identifiers used throughout Xane.
//!
//! Both identifiers wrap a single [`Field`] so they can be fed to the
//! commitment hash without any further encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Field, Result};

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// Identifier of a token (the verifier's token account, reduced to one field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub Field);

impl AssetId {
    #[must_use]
    pub const fn new(field: Field) -> Self {
        Self(field)
    }

    /// Asset id from a short ticker such as `"BTC"`.
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        Field::from_ascii(symbol).map(Self)
    }

    #[must_use]
    pub const fn as_field(&self) -> Field {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.to_ascii() {
            Ok(symbol) if !symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_graphic()) => {
                write!(f, "{symbol}")
            }
            _ => write!(f, "asset:{}", self.0.short()),
        }
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Order maker identity (the hash of the maker's public key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub Field);

impl Address {
    #[must_use]
    pub const fn new(field: Field) -> Self {
        Self(field)
    }

    #[must_use]
    pub const fn as_field(&self) -> Field {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maker:{}", self.0.short())
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    /// Deterministic address whose last byte is `seed`.
    pub fn dummy(seed: u8) -> Self {
        let mut bytes = [0xAAu8; 32];
        bytes[31] = seed;
        Self(Field(bytes))
    }
}
