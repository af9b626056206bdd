//! Error types for the Xane ledger.
//!
//! All errors use the `XN_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Pair errors
//! - 2xx: Order errors
//! - 3xx: Tree / witness errors
//! - 4xx: Snapshot errors
//! - 5xx: Attestation errors
//! - 9xx: General / internal errors
//!
//! Every variant is a synchronous validation failure. Nothing here is
//! retried by the ledger; the caller corrects its input and tries again.

use thiserror::Error;

use crate::{AssetId, Side};

/// Central error enum for all Xane operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XaneError {
    // =================================================================
    // Pair Errors (1xx)
    // =================================================================
    /// The pair (or its swapped form) is already registered.
    #[error("XN_ERR_100: Pair already exists: {base}/{quote}")]
    PairAlreadyExists { base: AssetId, quote: AssetId },

    /// No pair is registered under this exact `(base, quote)` order.
    #[error("XN_ERR_101: Pair does not exist: {base}/{quote}")]
    PairDoesNotExist { base: AssetId, quote: AssetId },

    /// Base and quote asset are the same.
    #[error("XN_ERR_102: Pair must use two different assets, got {0} twice")]
    SameCurrencyPair(AssetId),

    /// Every leaf of the pairs tree is assigned.
    #[error("XN_ERR_103: Pairs tree is full ({capacity} pairs)")]
    PairsTreeFull { capacity: u64 },

    /// No pair has been assigned this index.
    #[error("XN_ERR_104: No pair at index {0}")]
    UnknownPairIndex(usize),

    // =================================================================
    // Order Errors (2xx)
    // =================================================================
    /// The slot is empty or outside the tracked range.
    #[error("XN_ERR_200: Order does not exist: {side} slot {order_index}")]
    OrderDoesNotExist { side: Side, order_index: usize },

    /// Every slot of this side's orders tree is occupied.
    #[error("XN_ERR_201: {side} orders tree is full ({capacity} orders)")]
    OrdersTreeFull { side: Side, capacity: u64 },

    // =================================================================
    // Tree / Witness Errors (3xx)
    // =================================================================
    /// A witness was requested for an index outside the tree's capacity.
    #[error("XN_ERR_300: Invalid witness index {index} for tree of capacity {capacity}")]
    InvalidWitnessIndex { index: u64, capacity: u64 },

    /// Tree height outside the supported range.
    #[error("XN_ERR_301: Invalid tree height {0}")]
    InvalidTreeHeight(u8),

    // =================================================================
    // Snapshot Errors (4xx)
    // =================================================================
    /// A persisted snapshot does not rebuild to the roots it recorded.
    #[error("XN_ERR_400: Snapshot mismatch: {reason}")]
    SnapshotMismatch { reason: String },

    // =================================================================
    // Attestation Errors (5xx)
    // =================================================================
    /// The authority could not produce a signature.
    #[error("XN_ERR_500: Attestation failed: {reason}")]
    AttestationFailed { reason: String },

    /// An unattested transition could not be undone.
    #[error("XN_ERR_501: Rollback failed: {reason}")]
    RollbackFailed { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// A value cannot be encoded as (or decoded from) a field element.
    #[error("XN_ERR_900: Invalid field encoding: {reason}")]
    InvalidFieldEncoding { reason: String },

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("XN_ERR_901: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("XN_ERR_902: Serialization error: {0}")]
    Serialization(String),

    /// I/O error (disk).
    #[error("XN_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, XaneError>;

// Conversion from std::io::Error
impl From<std::io::Error> for XaneError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for XaneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let btc = AssetId::from_symbol("BTC").unwrap();
        let err = XaneError::SameCurrencyPair(btc);
        let msg = format!("{err}");
        assert!(msg.starts_with("XN_ERR_102"), "Got: {msg}");
    }

    #[test]
    fn order_does_not_exist_display() {
        let err = XaneError::OrderDoesNotExist {
            side: Side::Sell,
            order_index: 7,
        };
        let msg = format!("{err}");
        assert!(msg.contains("XN_ERR_200"));
        assert!(msg.contains("SELL"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn all_errors_have_xn_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(XaneError::PairsTreeFull { capacity: 4 }),
            Box::new(XaneError::InvalidWitnessIndex {
                index: 9,
                capacity: 8,
            }),
            Box::new(XaneError::InvalidTreeHeight(0)),
            Box::new(XaneError::SnapshotMismatch {
                reason: "root".into(),
            }),
            Box::new(XaneError::Configuration("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("XN_ERR_"),
                "Error missing XN_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn io_error_converts() {
        let err: XaneError = std::io::Error::other("disk gone").into();
        assert!(matches!(err, XaneError::Io(ref m) if m.contains("disk gone")));
    }
}
