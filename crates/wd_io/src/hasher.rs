//! SHA-256 digests of canonical bytes.
//!
//! Input snapshots are fingerprinted so two runs over the same data are
//! byte-comparable in the report provenance. Hex digests are lowercase.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_json_bytes;

/// Encode bytes as lowercase hex.
fn to_lower_hex(bytes: &[u8]) -> String {
    const LUT: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(LUT[(b >> 4) as usize] as char);
        out.push(LUT[(b & 0x0F) as usize] as char);
    }
    out
}

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    to_lower_hex(&hasher.finalize())
}

/// SHA-256 over the **canonical** bytes of a parsed JSON value, so
/// formatting and key order in the source file do not affect the digest.
pub fn sha256_canonical_value(v: &Value) -> String {
    sha256_hex(&to_canonical_json_bytes(v))
}
