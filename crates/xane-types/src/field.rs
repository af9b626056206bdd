//! Fixed-width field elements.
//!
//! Every value the ledger commits to (asset ids, maker addresses, amounts,
//! prices, tree nodes) is carried as a 32-byte big-endian [`Field`]. The
//! all-zero element is the empty-slot sentinel and is compared raw; it is
//! never replaced by a hash of zero.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::FIELD_BYTES;
use crate::{Result, XaneError};

/// A 32-byte big-endian field element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct Field(pub [u8; FIELD_BYTES]);

impl Field {
    /// The zero element. Empty leaves hold exactly this value.
    pub const ZERO: Self = Self([0u8; FIELD_BYTES]);

    /// The one element.
    pub const ONE: Self = Self::from_u64(1);

    #[must_use]
    pub const fn from_bytes(bytes: [u8; FIELD_BYTES]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; FIELD_BYTES] {
        &self.0
    }

    /// Place `value` big-endian in the low eight bytes.
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        let be = value.to_be_bytes();
        let mut bytes = [0u8; FIELD_BYTES];
        let mut i = 0;
        while i < 8 {
            bytes[FIELD_BYTES - 8 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::ONE } else { Self::ZERO }
    }

    /// Read the element back as a `u64`, or `None` if the high bytes are set.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        let (high, low) = self.0.split_at(FIELD_BYTES - 8);
        if high.iter().any(|b| *b != 0) {
            return None;
        }
        let mut be = [0u8; 8];
        be.copy_from_slice(low);
        Some(u64::from_be_bytes(be))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Pack an ASCII string of at most 32 bytes, big-endian and right-aligned.
    ///
    /// `"BTC"` becomes `0x...00425443`.
    pub fn from_ascii(input: &str) -> Result<Self> {
        if input.len() > FIELD_BYTES {
            return Err(XaneError::InvalidFieldEncoding {
                reason: format!("string is longer than {FIELD_BYTES} bytes: {input:?}"),
            });
        }
        if !input.is_ascii() {
            return Err(XaneError::InvalidFieldEncoding {
                reason: format!("non ASCII character in {input:?}"),
            });
        }
        let mut bytes = [0u8; FIELD_BYTES];
        bytes[FIELD_BYTES - input.len()..].copy_from_slice(input.as_bytes());
        Ok(Self(bytes))
    }

    /// Inverse of [`Field::from_ascii`]. Leading zero bytes are padding.
    pub fn to_ascii(&self) -> Result<String> {
        let start = self.0.iter().position(|b| *b != 0).unwrap_or(FIELD_BYTES);
        let body = &self.0[start..];
        if !body.is_ascii() {
            return Err(XaneError::InvalidFieldEncoding {
                reason: format!("field {self} does not hold ASCII text"),
            });
        }
        Ok(body.iter().map(|b| char::from(*b)).collect())
    }

    /// Parse a hex string (with or without `0x`), left-padding short input.
    pub fn from_hex(input: &str) -> Result<Self> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        if digits.len() > FIELD_BYTES * 2 {
            return Err(XaneError::InvalidFieldEncoding {
                reason: format!("hex longer than {FIELD_BYTES} bytes"),
            });
        }
        let padded = format!("{digits:0>width$}", width = FIELD_BYTES * 2);
        let mut bytes = [0u8; FIELD_BYTES];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|e| {
            XaneError::InvalidFieldEncoding {
                reason: format!("bad hex {input:?}: {e}"),
            }
        })?;
        Ok(Self(bytes))
    }

    /// Full lowercase hex, 64 digits.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First eight hex digits, for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl From<u64> for Field {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field(0x{})", self.to_hex())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_all_zero_bytes() {
        assert_eq!(Field::ZERO.0, [0u8; 32]);
        assert!(Field::ZERO.is_zero());
        assert!(!Field::ONE.is_zero());
    }

    #[test]
    fn u64_layout_is_big_endian_low_bytes() {
        let f = Field::from_u64(0x0102);
        assert_eq!(f.0[30], 0x01);
        assert_eq!(f.0[31], 0x02);
        assert!(f.0[..30].iter().all(|b| *b == 0));
        assert_eq!(f.to_u64(), Some(0x0102));
    }

    #[test]
    fn to_u64_rejects_wide_values() {
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        assert_eq!(Field(bytes).to_u64(), None);
    }

    #[test]
    fn ascii_packing_matches_shift_accumulate() {
        let f = Field::from_ascii("BTC").unwrap();
        // ((0x42 << 8) + 0x54) << 8 + 0x43
        assert_eq!(f.to_u64(), Some(0x0042_5443));
        assert_eq!(f.to_ascii().unwrap(), "BTC");
    }

    #[test]
    fn ascii_rejects_long_or_non_ascii() {
        assert!(Field::from_ascii(&"x".repeat(33)).is_err());
        assert!(Field::from_ascii("€").is_err());
        assert!(Field::from_ascii(&"y".repeat(32)).is_ok());
    }

    #[test]
    fn hex_accepts_short_and_prefixed_input() {
        assert_eq!(Field::from_hex("0x2a").unwrap(), Field::from_u64(42));
        assert_eq!(Field::from_hex("2a").unwrap(), Field::from_u64(42));
        assert!(Field::from_hex("zz").is_err());
        assert!(Field::from_hex(&"f".repeat(65)).is_err());
    }

    #[test]
    fn serde_uses_hex_string() {
        let f = Field::from_u64(255);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, format!("\"0x{}ff\"", "0".repeat(62)));
        let back: Field = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
