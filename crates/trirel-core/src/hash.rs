//! Stable content fingerprints for relation bodies.

use blake3::Hasher;
use serde::Serialize;

/// A blake3 digest of a serialized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl From<blake3::Hash> for Hash256 {
    fn from(h: blake3::Hash) -> Self {
        Hash256(h.into())
    }
}

impl std::fmt::Display for Hash256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hash any serde-serializable value deterministically, streaming its JSON
/// encoding straight into the hasher.
///
/// Two bodies that iterate the same tuples in the same order hash equal, so
/// fingerprints are only comparable between relations sharing orderings.
pub fn hash_serde<T: Serialize + ?Sized>(v: &T) -> Result<Hash256, crate::error::Error> {
    let mut hasher = Hasher::new();
    serde_json::to_writer(&mut hasher, v)?;
    Ok(hasher.finalize().into())
}
