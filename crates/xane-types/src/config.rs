//! Configuration types for the Xane ledger.
//!
//! Tree heights are part of the contract with the on-chain verifier: a ledger
//! configured with different heights produces roots the verifier rejects.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Result, XaneError, constants};

/// Shape of the two-level commitment structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Height of the outer pairs tree (capacity `2^pairs_height`).
    pub pairs_height: u8,
    /// Height of every per-side orders tree (capacity `2^orders_height`).
    pub orders_height: u8,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            pairs_height: constants::DEFAULT_PAIRS_HEIGHT,
            orders_height: constants::DEFAULT_ORDERS_HEIGHT,
        }
    }
}

impl LedgerConfig {
    #[must_use]
    pub fn new(pairs_height: u8, orders_height: u8) -> Self {
        Self {
            pairs_height,
            orders_height,
        }
    }

    /// Both heights must lie in `1..=MAX_TREE_HEIGHT`.
    pub fn validate(&self) -> Result<()> {
        for height in [self.pairs_height, self.orders_height] {
            if height == 0 || height > constants::MAX_TREE_HEIGHT {
                return Err(XaneError::InvalidTreeHeight(height));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn pairs_capacity(&self) -> u64 {
        1u64 << self.pairs_height
    }

    #[must_use]
    pub fn orders_capacity(&self) -> u64 {
        1u64 << self.orders_height
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| XaneError::Configuration(format!("invalid ledger config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract_heights() {
        let cfg = LedgerConfig::default();
        assert_eq!(cfg.pairs_height, 10);
        assert_eq!(cfg.orders_height, 10);
        assert_eq!(cfg.pairs_capacity(), 1024);
        assert_eq!(cfg.orders_capacity(), 1024);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_height_rejected() {
        let cfg = LedgerConfig::new(0, 4);
        assert_eq!(cfg.validate(), Err(XaneError::InvalidTreeHeight(0)));
    }

    #[test]
    fn oversized_height_rejected() {
        let cfg = LedgerConfig::new(4, 33);
        assert_eq!(cfg.validate(), Err(XaneError::InvalidTreeHeight(33)));
    }

    #[test]
    fn json_partial_uses_defaults() {
        let cfg = LedgerConfig::from_json_str(r#"{ "orders_height": 4 }"#).unwrap();
        assert_eq!(cfg.pairs_height, constants::DEFAULT_PAIRS_HEIGHT);
        assert_eq!(cfg.orders_height, 4);
    }

    #[test]
    fn json_invalid_is_configuration_error() {
        let err = LedgerConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, XaneError::Configuration(_)));
        let err = LedgerConfig::from_json_str(r#"{ "pairs_height": 0 }"#).unwrap_err();
        assert_eq!(err, XaneError::InvalidTreeHeight(0));
    }
}
