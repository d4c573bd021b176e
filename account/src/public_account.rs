//! A public key paired with the address derivable from it.

use crate::error::AccountError;
use serde::{Deserialize, Serialize};
use sirius_types::{Address, NetworkType, PublicKey, Signature};
use std::fmt;

/// An account known only by its public key.
///
/// The address is always the one derived from the key at construction; no
/// constructor accepts an unrelated (key, address) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAccount {
    public_key: PublicKey,
    address: Address,
}

impl PublicAccount {
    /// Build a public account from a key on the given network.
    pub fn from_public_key(public_key: PublicKey, network: NetworkType) -> Self {
        let address = Address::create_from_public_key(&public_key, network);
        Self {
            public_key,
            address,
        }
    }

    /// Build a public account from a 64-hex-char key.
    pub fn from_hex(public_key_hex: &str, network: NetworkType) -> Result<Self, AccountError> {
        Ok(Self::from_public_key(
            PublicKey::from_hex(public_key_hex)?,
            network,
        ))
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn network_type(&self) -> NetworkType {
        self.address.network_type()
    }

    /// Verify a signature allegedly produced by this account over `data`.
    pub fn verify_signature(&self, data: &[u8], signature: &Signature) -> bool {
        sirius_crypto::verify_signature(data, signature, &self.public_key)
    }
}

impl fmt::Display for PublicAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf";

    #[test]
    fn address_is_derived_from_key() {
        let account = PublicAccount::from_hex(KEY_HEX, NetworkType::TestNet).unwrap();
        let expected =
            Address::create_from_public_key(account.public_key(), NetworkType::TestNet);
        assert_eq!(*account.address(), expected);
        assert!(account.address().is_valid());
        assert_eq!(account.network_type(), NetworkType::TestNet);
    }

    #[test]
    fn bad_hex_rejected() {
        assert!(PublicAccount::from_hex("abcd", NetworkType::TestNet).is_err());
    }

    #[test]
    fn verify_signature_rejects_garbage() {
        let account = PublicAccount::from_hex(KEY_HEX, NetworkType::TestNet).unwrap();
        assert!(!account.verify_signature(b"data", &Signature([0u8; 64])));
    }
}
