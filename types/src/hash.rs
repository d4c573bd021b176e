//! Hash value types.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 32-byte network generation hash.
///
/// Mixed into every signature and transaction hash to bind them to a specific
/// network instance; obtained from the nemesis block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationHash([u8; 32]);

impl GenerationHash {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from exactly 64 hex characters.
    pub fn from_hex(hex_str: &str) -> Result<Self, ModelError> {
        if hex_str.len() != 64 {
            return Err(ModelError::InvalidHashLength {
                expected: 64,
                actual: hex_str.len(),
            });
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut bytes)
            .map_err(|e| ModelError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for GenerationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenerationHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for GenerationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}
