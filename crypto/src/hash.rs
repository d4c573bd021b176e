//! Hash functions used across the SDK.

use ripemd::Ripemd160;
use sha2::Sha256;
use sha3::{Digest, Keccak256, Sha3_256};

/// SHA3-256 of arbitrary data.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    finalize_32(Sha3_256::new_with_prefix(data))
}

/// SHA3-256 over multiple byte slices in sequence (avoids concatenation).
pub fn sha3_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    finalize_32(hasher)
}

/// Keccak-256 of arbitrary data (legacy secret-lock algorithm).
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    finalize_32(Keccak256::new_with_prefix(data))
}

/// SHA-256 of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    finalize_32(Sha256::new_with_prefix(data))
}

/// Double SHA-256 (the HASH_256 secret-lock algorithm).
pub fn hash_256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of arbitrary data.
pub fn ripemd_160(data: &[u8]) -> [u8; 20] {
    let digest = Ripemd160::digest(data);
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest);
    out
}

/// RIPEMD-160 of SHA-256 (the HASH_160 secret-lock algorithm).
pub fn hash_160(data: &[u8]) -> [u8; 20] {
    ripemd_160(&sha256(data))
}

fn finalize_32<D: Digest>(hasher: D) -> [u8; 32] {
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}
