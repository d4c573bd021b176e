//! A full account: key pair plus derived public account.

use crate::error::AccountError;
use crate::public_account::PublicAccount;
use sirius_types::{Address, KeyPair, NetworkType, PublicKey, Signature};

/// An account holding its private key.
///
/// The private key never appears in any wire format; this type deliberately
/// implements neither `Clone` nor `Serialize`.
pub struct Account {
    key_pair: KeyPair,
    public_account: PublicAccount,
}

impl Account {
    /// Rebuild an account from a 64-hex-char private key.
    pub fn from_private_key_hex(
        private_key_hex: &str,
        network: NetworkType,
    ) -> Result<Self, AccountError> {
        let key_pair = sirius_crypto::keypair_from_hex(private_key_hex)?;
        Ok(Self::from_key_pair(key_pair, network))
    }

    /// Generate a fresh account with a random key pair.
    pub fn random(network: NetworkType) -> Self {
        Self::from_key_pair(sirius_crypto::generate_keypair(), network)
    }

    fn from_key_pair(key_pair: KeyPair, network: NetworkType) -> Self {
        let public_account = PublicAccount::from_public_key(key_pair.public, network);
        Self {
            key_pair,
            public_account,
        }
    }

    pub fn public_account(&self) -> &PublicAccount {
        &self.public_account
    }

    pub fn public_key(&self) -> &PublicKey {
        self.public_account.public_key()
    }

    pub fn address(&self) -> &Address {
        self.public_account.address()
    }

    pub fn network_type(&self) -> NetworkType {
        self.public_account.network_type()
    }

    /// Sign an arbitrary byte buffer with this account's private key.
    pub fn sign_data(&self, data: &[u8]) -> Signature {
        sirius_crypto::sign_message(data, &self.key_pair.private)
    }
}
