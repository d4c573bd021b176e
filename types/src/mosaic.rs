//! Mosaic (asset) identifiers and quantities.

use crate::keys::PublicKey;
use crate::namespace::NamespaceId;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;

/// The 4-byte nonce that randomizes mosaic id derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicNonce(pub [u8; 4]);

impl MosaicNonce {
    pub fn new(value: u32) -> Self {
        Self(value.to_le_bytes())
    }

    pub fn as_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

/// An opaque 64-bit mosaic identifier.
///
/// A `MosaicId` slot on the wire may also carry a namespace alias id; the
/// two are indistinguishable at this level.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MosaicId(u64);

impl MosaicId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Derive a mosaic id from a nonce and the owner's public key.
    ///
    /// `SHA3-256(nonce || pubkey)`, first two little-endian u32 words, bit 31
    /// of the second word cleared.
    pub fn from_nonce_and_owner(nonce: MosaicNonce, owner: &PublicKey) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(nonce.0);
        hasher.update(owner.as_bytes());
        let digest = hasher.finalize();

        let low = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
        let high = u32::from_le_bytes([digest[4], digest[5], digest[6], digest[7]]) & 0x7FFF_FFFF;
        Self((high as u64) << 32 | low as u64)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<NamespaceId> for MosaicId {
    fn from(id: NamespaceId) -> Self {
        Self(id.as_u64())
    }
}

impl fmt::Debug for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MosaicId({:016x})", self.0)
    }
}

/// A quantity of a mosaic, in its indivisible base unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mosaic {
    pub id: MosaicId,
    pub amount: u64,
}

impl Mosaic {
    pub fn new(id: MosaicId, amount: u64) -> Self {
        Self { id, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> PublicKey {
        PublicKey::from_hex("4afeb0cfde8cd84b8ae905fa07f1e0b37570ca6b4c0de7a1fd88aae02a556dff")
            .unwrap()
    }

    #[test]
    fn derivation_is_deterministic() {
        let nonce = MosaicNonce::new(0xdeadbeef);
        assert_eq!(
            MosaicId::from_nonce_and_owner(nonce, &owner()),
            MosaicId::from_nonce_and_owner(nonce, &owner())
        );
    }

    #[test]
    fn derived_id_high_bit_clear() {
        for n in 0..16u32 {
            let id = MosaicId::from_nonce_and_owner(MosaicNonce::new(n), &owner());
            assert_eq!(id.as_u64() & (1 << 63), 0, "nonce {n}");
        }
    }

    #[test]
    fn different_nonces_different_ids() {
        assert_ne!(
            MosaicId::from_nonce_and_owner(MosaicNonce::new(1), &owner()),
            MosaicId::from_nonce_and_owner(MosaicNonce::new(2), &owner())
        );
    }

    #[test]
    fn nonce_u32_roundtrip() {
        let nonce = MosaicNonce::new(0x01020304);
        assert_eq!(nonce.0, [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(nonce.as_u32(), 0x01020304);
    }

    #[test]
    fn namespace_alias_converts_to_mosaic_slot() {
        let ns = crate::namespace::NamespaceId::from_name("alias").unwrap();
        assert_eq!(MosaicId::from(ns).as_u64(), ns.as_u64());
    }
}
