//! # xane-authority
//!
//! Hosts an [`xane_ledger::OrderBookLedger`] for the exchange authority.
//!
//! - **[`AuthorityService`]**: serializes mutations behind one lock and
//!   returns every transition as an [`Attested`] receipt
//! - **[`Attestor`]**: the signing seam; [`Ed25519Attestor`] is the default
//! - **[`AuthorityConfig`]**: tree heights plus the signing key
//!
//! The `xane-replay` binary rebuilds a ledger from a persisted snapshot and
//! reports whether its roots check out.

pub mod attestor;
pub mod config;
pub mod service;

pub use attestor::{Attestor, Ed25519Attestor, encode_message, message_digest, verify_attestation};
pub use config::AuthorityConfig;
pub use service::{Attested, AuthorityService};
