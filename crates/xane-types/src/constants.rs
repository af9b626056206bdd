//! System-wide constants for the Xane ledger.

/// Height of the pairs tree deployed with the exchange contract.
pub const DEFAULT_PAIRS_HEIGHT: u8 = 10;

/// Height of every per-side orders tree deployed with the exchange contract.
pub const DEFAULT_ORDERS_HEIGHT: u8 = 10;

/// Largest supported tree height (leaf indices must fit in a `u32`).
pub const MAX_TREE_HEIGHT: u8 = 32;

/// Width of a field element in bytes.
pub const FIELD_BYTES: usize = 32;

/// Domain tag prepended to every field-sequence hash.
pub const FIELD_HASH_DOMAIN: &[u8] = b"xane:fields:v1:";

/// Domain tag prepended to the byte encoding of an attestation message.
pub const ATTESTATION_DOMAIN: &[u8] = b"xane:attest:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ledger name.
pub const LEDGER_NAME: &str = "Xane";
