//! Transition signing.
//!
//! The verifier checks one authority signature per transition, over the
//! field sequence built by [`xane_ledger::Transition::attestation_message`].
//! Fields are encoded as
//!
//! ```text
//! "xane:attest:v1:" || count (u64 LE) || field_0 (32 bytes BE) || ...
//! ```
//!
//! and [`Ed25519Attestor`] signs the SHA-256 digest of that encoding.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};
use xane_types::constants::ATTESTATION_DOMAIN;
use xane_types::{Field, Result, XaneError};

/// Something that can vouch for a transition.
pub trait Attestor: Send + Sync {
    /// Key the verifier checks signatures against.
    fn public_key(&self) -> [u8; 32];

    /// Sign a message in canonical field order.
    fn sign(&self, message: &[Field]) -> Result<Vec<u8>>;
}

/// Canonical byte encoding of a field message.
#[must_use]
pub fn encode_message(message: &[Field]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(ATTESTATION_DOMAIN.len() + 8 + message.len() * 32);
    payload.extend_from_slice(ATTESTATION_DOMAIN);
    payload.extend_from_slice(&(message.len() as u64).to_le_bytes());
    for field in message {
        payload.extend_from_slice(field.as_bytes());
    }
    payload
}

/// The 32 bytes that are actually signed.
#[must_use]
pub fn message_digest(message: &[Field]) -> [u8; 32] {
    Sha256::digest(encode_message(message)).into()
}

/// Check an attestation against a signer's public key.
///
/// Malformed keys or signatures verify as `false`.
#[must_use]
pub fn verify_attestation(public_key: &[u8; 32], message: &[Field], signature: &[u8]) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    key.verify(&message_digest(message), &signature).is_ok()
}

/// Ed25519 authority key.
pub struct Ed25519Attestor {
    key: SigningKey,
}

impl Ed25519Attestor {
    #[must_use]
    pub fn from_bytes(secret: &[u8; 32]) -> Self {
        Self {
            key: SigningKey::from_bytes(secret),
        }
    }

    /// Parse a 32-byte secret key from hex (`0x` prefix optional).
    pub fn from_hex(secret_hex: &str) -> Result<Self> {
        let raw = hex::decode(secret_hex.trim().trim_start_matches("0x"))
            .map_err(|e| XaneError::Configuration(format!("signing key is not hex: {e}")))?;
        let secret: [u8; 32] = raw.as_slice().try_into().map_err(|_| {
            XaneError::Configuration(format!("signing key must be 32 bytes, got {}", raw.len()))
        })?;
        Ok(Self::from_bytes(&secret))
    }

    /// Hex of the public key, for logs and operator output.
    #[must_use]
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key())
    }
}

impl std::fmt::Debug for Ed25519Attestor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Attestor")
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

impl Attestor for Ed25519Attestor {
    fn public_key(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }

    fn sign(&self, message: &[Field]) -> Result<Vec<u8>> {
        let signature = self.key.sign(&message_digest(message));
        Ok(signature.to_bytes().to_vec())
    }
}
