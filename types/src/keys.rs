//! Key and signature types for account identity and transaction signing.

use crate::error::ModelError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

/// A 32-byte Ed25519 private key.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or
/// `Clone`; it never appears in any wire format. Key bytes are zeroized on
/// drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl PublicKey {
    /// Parse a public key from exactly 64 hex characters.
    pub fn from_hex(hex_str: &str) -> Result<Self, ModelError> {
        let bytes = decode_hex_fixed::<32>(hex_str).ok_or(ModelError::InvalidKeyLength {
            expected: 64,
            actual: hex_str.len(),
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex form used in DTO fields.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(&self.0[..4]))
    }
}

impl PrivateKey {
    /// Parse a private key from exactly 64 hex characters.
    pub fn from_hex(hex_str: &str) -> Result<Self, ModelError> {
        let bytes = decode_hex_fixed::<32>(hex_str).ok_or(ModelError::InvalidKeyLength {
            expected: 64,
            actual: hex_str.len(),
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Signature {
    /// Parse a signature from exactly 128 hex characters.
    pub fn from_hex(hex_str: &str) -> Result<Self, ModelError> {
        let bytes = decode_hex_fixed::<64>(hex_str).ok_or(ModelError::InvalidSignatureLength {
            expected: 128,
            actual: hex_str.len(),
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Lowercase hex form used in DTO fields.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Whether every byte is zero (the placeholder for an unsigned envelope).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(&self.0[..4]))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Signature::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// An Ed25519 key pair (public + private).
///
/// Use `sirius_crypto::generate_keypair()` or
/// `sirius_crypto::keypair_from_hex()` to construct key pairs. This struct is
/// intentionally just data.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

/// Decode a hex string into a fixed-size byte array, or `None` when the
/// length or characters are wrong.
fn decode_hex_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    if s.len() != N * 2 {
        return None;
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(s, &mut out).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_hex_roundtrip() {
        let hex_key = "c2f93346e27ce6ad1a9f8f5e3066f8326593a406bdf357acb041e2f9ab402efe";
        let key = PublicKey::from_hex(hex_key).unwrap();
        assert_eq!(key.to_hex(), hex_key);
    }

    #[test]
    fn public_key_rejects_short_hex() {
        assert!(PublicKey::from_hex("abcd").is_err());
    }

    #[test]
    fn public_key_rejects_non_hex() {
        let bad = "zz".repeat(32);
        assert!(PublicKey::from_hex(&bad).is_err());
    }

    #[test]
    fn signature_hex_roundtrip() {
        let sig = Signature([0xab; 64]);
        let parsed = Signature::from_hex(&sig.to_hex()).unwrap();
        assert_eq!(parsed, sig);
    }

    #[test]
    fn signature_rejects_wrong_length() {
        assert!(Signature::from_hex(&"ab".repeat(32)).is_err());
    }

    #[test]
    fn zero_signature_detected() {
        assert!(Signature([0u8; 64]).is_zero());
        assert!(!Signature([1u8; 64]).is_zero());
    }

    #[test]
    fn signature_serde_is_hex_string() {
        let sig = Signature([0x11; 64]);
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, format!("\"{}\"", "11".repeat(64)));
        let back: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }
}
