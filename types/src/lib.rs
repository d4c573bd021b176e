//! Fundamental value types for the Sirius chain SDK.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: network discriminants, addresses, keys, identifiers derived by
//! iterated hashing, mosaics, deadlines, and the wide-integer DTO codec used
//! by the REST wire format.

pub mod address;
pub mod deadline;
pub mod error;
pub mod hash;
pub mod keys;
pub mod message;
pub mod mosaic;
pub mod namespace;
pub mod network;
pub mod recipient;
pub mod uint_dto;

pub use address::{Address, ADDRESS_SIZE};
pub use deadline::{Deadline, NETWORK_EPOCH_MS};
pub use error::ModelError;
pub use hash::GenerationHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use message::{Message, MessageType};
pub use mosaic::{Mosaic, MosaicId, MosaicNonce};
pub use namespace::{generate_namespace_path, NamespaceId};
pub use network::NetworkType;
pub use recipient::Recipient;
pub use uint_dto::{dto_to_u128, dto_to_u64, u128_to_dto, u64_to_dto};
