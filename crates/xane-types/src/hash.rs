//! The commitment hash `H` over ordered field sequences.
//!
//! `H(fields) = SHA-256("xane:fields:v1:" || len as u64 LE || f_0 || ... || f_n)`.
//! The ledger and the verifier must both use exactly this function and the
//! same field ordering; a single byte of divergence invalidates every root.

use sha2::{Digest, Sha256};

use crate::Field;
use crate::constants::FIELD_HASH_DOMAIN;

/// Hash an ordered sequence of field elements into one element.
#[must_use]
pub fn hash_fields(fields: &[Field]) -> Field {
    let mut hasher = Sha256::new();
    hasher.update(FIELD_HASH_DOMAIN);
    hasher.update((fields.len() as u64).to_le_bytes());
    for field in fields {
        hasher.update(field.as_bytes());
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Field(out)
}

/// Hash of an internal Merkle node from its two children.
#[must_use]
pub fn hash_pair(left: Field, right: Field) -> Field {
    hash_fields(&[left, right])
}

/// Roots of empty subtrees for every level `0..=height`.
///
/// `roots[0]` is the raw zero leaf; `roots[l + 1] = H(roots[l], roots[l])`.
/// `roots[height]` is the root of an empty tree of that height.
#[must_use]
pub fn empty_roots(height: u8) -> Vec<Field> {
    let mut roots = Vec::with_capacity(usize::from(height) + 1);
    roots.push(Field::ZERO);
    for level in 0..usize::from(height) {
        let below = roots[level];
        roots.push(hash_pair(below, below));
    }
    roots
}
