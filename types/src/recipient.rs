//! Transfer recipients: a literal address or a namespace alias.
//!
//! Both share one 25-byte wire slot. A literal address starts with the
//! (even) network byte; a namespace alias sets bit 0 of byte 0 to 1 and
//! carries the 8-byte id followed by 16 zero bytes. Decoders must check the
//! discriminating bit before interpreting the rest.

use crate::address::{Address, ADDRESS_SIZE};
use crate::error::ModelError;
use crate::namespace::NamespaceId;
use crate::network::NetworkType;
use serde::{Deserialize, Serialize};

/// The destination of a transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// A literal 25-byte address.
    Address(Address),
    /// A namespace id aliasing an address.
    Namespace(NamespaceId),
}

impl Recipient {
    /// Encode into the shared 25-byte slot.
    ///
    /// The network byte is only needed for the alias form; a literal address
    /// already carries its own.
    pub fn to_catbuffer(&self, network: NetworkType) -> [u8; ADDRESS_SIZE] {
        match self {
            Self::Address(address) => *address.as_bytes(),
            Self::Namespace(id) => {
                let mut out = [0u8; ADDRESS_SIZE];
                out[0] = network.value() | 1;
                out[1..9].copy_from_slice(&id.as_u64().to_le_bytes());
                out
            }
        }
    }

    /// Decode from the shared 25-byte slot, discriminating on bit 0 of
    /// byte 0.
    pub fn from_catbuffer(bytes: &[u8; ADDRESS_SIZE]) -> Result<Self, ModelError> {
        if bytes[0] & 1 == 1 {
            let id = u64::from_le_bytes(
                bytes[1..9]
                    .try_into()
                    .expect("slice of fixed width"),
            );
            // The marker byte must still name a known network.
            NetworkType::from_value(bytes[0] & !1)?;
            Ok(Self::Namespace(NamespaceId::new(id)))
        } else {
            Ok(Self::Address(Address::from_bytes(*bytes)?))
        }
    }

    /// DTO form: the 25-byte slot, hex-encoded uppercase.
    pub fn to_dto(&self, network: NetworkType) -> String {
        hex::encode_upper(self.to_catbuffer(network))
    }

    /// Parse the DTO hex form.
    pub fn from_dto(encoded: &str) -> Result<Self, ModelError> {
        if encoded.len() != ADDRESS_SIZE * 2 {
            return Err(ModelError::InvalidRecipient(format!(
                "expected {} hex chars, got {}",
                ADDRESS_SIZE * 2,
                encoded.len()
            )));
        }
        let mut bytes = [0u8; ADDRESS_SIZE];
        hex::decode_to_slice(encoded, &mut bytes)
            .map_err(|e| ModelError::InvalidHex(e.to_string()))?;
        Self::from_catbuffer(&bytes)
    }
}

impl From<Address> for Recipient {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<NamespaceId> for Recipient {
    fn from(id: NamespaceId) -> Self {
        Self::Namespace(id)
    }
}
