//! Network addresses derived from public keys.
//!
//! Raw form: 25 bytes = 1 network byte + 20 key-derived bytes
//! (RIPEMD-160 of SHA3-256 of the public key) + 4 checksum bytes
//! (leading bytes of SHA3-256 over the first 21).
//!
//! Human-readable form: base32 of the 25 raw bytes (40 characters); the
//! pretty form inserts a hyphen every 6 characters for display only.

use crate::error::ModelError;
use crate::keys::PublicKey;
use crate::network::NetworkType;
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;

/// RFC 4648 base32 alphabet.
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Reverse lookup table: ASCII byte -> 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Raw address length in bytes.
pub const ADDRESS_SIZE: usize = 25;
/// Checksum length in bytes.
const CHECKSUM_SIZE: usize = 4;
/// Base32 length of the human-readable form (200 bits / 5).
const PLAIN_LEN: usize = 40;

/// A 25-byte network address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// Derive an address from a public key on the given network.
    ///
    /// SHA3-256 -> RIPEMD-160 -> prefix with the network byte -> append the
    /// 4-byte checksum.
    pub fn create_from_public_key(public_key: &PublicKey, network: NetworkType) -> Self {
        let key_hash = Sha3_256::digest(public_key.as_bytes());
        let short_hash = Ripemd160::digest(key_hash);

        let mut raw = [0u8; ADDRESS_SIZE];
        raw[0] = network.value();
        raw[1..21].copy_from_slice(&short_hash);
        let checksum = Sha3_256::digest(&raw[..21]);
        raw[21..].copy_from_slice(&checksum[..CHECKSUM_SIZE]);
        Self(raw)
    }

    /// Parse a human-readable address (hyphens ignored, case-insensitive).
    pub fn create_from_raw_address(raw: &str) -> Result<Self, ModelError> {
        let compact: String = raw
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if compact.len() != PLAIN_LEN {
            return Err(ModelError::InvalidAddress(format!(
                "expected {PLAIN_LEN} base32 chars, got {}",
                compact.len()
            )));
        }
        let bytes: [u8; ADDRESS_SIZE] = decode_base32_fixed(&compact)
            .ok_or_else(|| ModelError::InvalidAddress(format!("invalid base32 in {raw:?}")))?;
        // The leading byte must name a known network.
        NetworkType::from_value(bytes[0])?;
        Ok(Self(bytes))
    }

    /// Parse an address from its 50-char hex encoding (the DTO form).
    pub fn create_from_encoded(encoded: &str) -> Result<Self, ModelError> {
        if encoded.len() != ADDRESS_SIZE * 2 {
            return Err(ModelError::InvalidAddress(format!(
                "expected {} hex chars, got {}",
                ADDRESS_SIZE * 2,
                encoded.len()
            )));
        }
        let mut bytes = [0u8; ADDRESS_SIZE];
        hex::decode_to_slice(encoded, &mut bytes)
            .map_err(|e| ModelError::InvalidHex(e.to_string()))?;
        NetworkType::from_value(bytes[0])?;
        Ok(Self(bytes))
    }

    /// Reconstruct an address from raw bytes, as read from a catbuffer.
    pub fn from_bytes(bytes: [u8; ADDRESS_SIZE]) -> Result<Self, ModelError> {
        NetworkType::from_value(bytes[0])?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// The network this address belongs to, from the leading byte.
    pub fn network_type(&self) -> NetworkType {
        NetworkType::from_value(self.0[0])
            .expect("constructors only admit known network bytes")
    }

    /// The 40-character base32 form.
    pub fn plain(&self) -> String {
        encode_base32(&self.0)
    }

    /// The display form: base32 grouped in hyphenated runs of 6.
    pub fn pretty(&self) -> String {
        let plain = self.plain();
        plain
            .as_bytes()
            .chunks(6)
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Uppercase hex of the 25 raw bytes (the DTO form).
    pub fn encode_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Recompute the checksum and compare it with the stored bytes.
    pub fn is_valid(&self) -> bool {
        let checksum = Sha3_256::digest(&self.0[..21]);
        self.0[21..] == checksum[..CHECKSUM_SIZE]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.plain())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// Encode a byte slice as base32.
fn encode_base32(bytes: &[u8]) -> String {
    let num_chars = (bytes.len() * 8).div_ceil(5);
    let mut result = String::with_capacity(num_chars);

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }
    result
}

/// Decode a base32 string into a fixed-size byte array. Returns `None` on
/// invalid characters or wrong length.
fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    if s.len() != (N * 8).div_ceil(5) {
        return None;
    }
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        if c >= 128 {
            return None;
        }
        let val = BASE32_DECODE[c as usize];
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }
    if pos < N {
        return None;
    }
    Some(result)
}
