//! Cryptographic primitives for the Sirius chain SDK.
//!
//! - **Ed25519** for transaction signing and verification
//! - **SHA3-256 / Keccak-256** for hashing (ids, addresses, transaction
//!   hashes, secret locks)
//! - **RIPEMD-160 / SHA-256** composites for the remaining secret-lock
//!   algorithms

pub mod hash;
pub mod keys;
pub mod sign;

pub use hash::{hash_160, hash_256, keccak_256, ripemd_160, sha256, sha3_256, sha3_256_multi};
pub use keys::{generate_keypair, keypair_from_hex, keypair_from_private, public_from_private};
pub use sign::{sign_message, verify_signature};
