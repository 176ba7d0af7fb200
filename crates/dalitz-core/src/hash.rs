//! Stable content hashes for configuration provenance.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::DalitzError;
use crate::serde::to_canonical_json_bytes;

/// Hex SHA-256 of the canonical JSON encoding of `value`.
///
/// Key order in maps and structs does not affect the result.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, DalitzError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(format!("{:x}", Sha256::digest(bytes)))
}
