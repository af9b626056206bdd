//! Host configuration for the authority process.

use std::path::Path;

use serde::{Deserialize, Serialize};
use xane_types::{LedgerConfig, Result, XaneError};

use crate::attestor::Ed25519Attestor;

/// Everything needed to stand up an [`crate::AuthorityService`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityConfig {
    /// Tree heights; must match the deployed verifier.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Hex-encoded 32-byte ed25519 secret key.
    pub signing_key_hex: String,
}

impl AuthorityConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| XaneError::Configuration(format!("invalid authority config: {e}")))?;
        cfg.ledger.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn attestor(&self) -> Result<Ed25519Attestor> {
        Ed25519Attestor::from_hex(&self.signing_key_hex)
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for AuthorityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorityConfig")
            .field("ledger", &self.ledger)
            .field("signing_key_hex", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attestor::Attestor;

    const KEY: &str = "0101010101010101010101010101010101010101010101010101010101010101";

    #[test]
    fn ledger_section_defaults() {
        let cfg = AuthorityConfig::from_json_str(&format!(r#"{{"signing_key_hex":"{KEY}"}}"#))
            .unwrap();
        assert_eq!(cfg.ledger, LedgerConfig::default());
        assert_eq!(
            cfg.attestor().unwrap().public_key(),
            Ed25519Attestor::from_bytes(&[1u8; 32]).public_key()
        );
    }

    #[test]
    fn invalid_heights_rejected() {
        let json = format!(
            r#"{{"ledger":{{"pairs_height":0,"orders_height":4}},"signing_key_hex":"{KEY}"}}"#
        );
        assert!(matches!(
            AuthorityConfig::from_json_str(&json),
            Err(XaneError::InvalidTreeHeight(0))
        ));
    }

    #[test]
    fn missing_key_is_configuration_error() {
        assert!(matches!(
            AuthorityConfig::from_json_str("{}"),
            Err(XaneError::Configuration(_))
        ));
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = AuthorityConfig {
            ledger: LedgerConfig::default(),
            signing_key_hex: KEY.into(),
        };
        assert!(!format!("{cfg:?}").contains(KEY));
    }
}
