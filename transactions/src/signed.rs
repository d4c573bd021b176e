//! Signed-transaction artifacts: the announceable payload/hash pair and
//! cosignatures over aggregate hashes.

use crate::entity_type::EntityType;
use crate::error::TransactionError;
use serde::{Deserialize, Serialize};
use sirius_account::PublicAccount;
use sirius_types::{NetworkType, PublicKey, Signature};

/// The product of signing: the full payload hex plus the hash the network
/// will know the transaction by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    payload: String,
    hash: String,
    signer: Option<PublicKey>,
    entity_type: EntityType,
    network: NetworkType,
}

impl SignedTransaction {
    pub fn create(
        payload: String,
        hash: String,
        signer: PublicKey,
        entity_type: EntityType,
        network: NetworkType,
    ) -> Result<Self, TransactionError> {
        check_hash(&hash)?;
        Ok(Self {
            payload,
            hash,
            signer: Some(signer),
            entity_type,
            network,
        })
    }

    /// A hash-only artifact, as used when only the lock-funds reference is
    /// needed.
    pub fn create_from_hash(
        payload: String,
        hash: String,
        entity_type: EntityType,
        network: NetworkType,
    ) -> Result<Self, TransactionError> {
        check_hash(&hash)?;
        Ok(Self {
            payload,
            hash,
            signer: None,
            entity_type,
            network,
        })
    }

    /// The full serialized transaction, hex uppercase.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The transaction hash, hex uppercase.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn signer(&self) -> Option<&PublicKey> {
        self.signer.as_ref()
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }
}

fn check_hash(hash: &str) -> Result<(), TransactionError> {
    if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TransactionError::InvalidSignedTransaction(format!(
            "hash must be 64 hex chars, got {}",
            hash.len()
        )));
    }
    Ok(())
}

/// A cosignature attached to a decoded aggregate.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateTransactionCosignature {
    pub signature: Signature,
    pub signer: PublicAccount,
}

/// The product of cosigning a partial aggregate by its hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CosignatureSignedTransaction {
    pub parent_hash: String,
    pub signature: String,
    pub signer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_hash_rejected() {
        let err = SignedTransaction::create(
            String::new(),
            "abc".into(),
            PublicKey([7u8; 32]),
            EntityType::Transfer,
            NetworkType::TestNet,
        )
        .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidSignedTransaction(_)));
    }

    #[test]
    fn well_formed_hash_accepted() {
        let signed = SignedTransaction::create(
            "00".into(),
            "AB".repeat(32),
            PublicKey([7u8; 32]),
            EntityType::Transfer,
            NetworkType::TestNet,
        )
        .unwrap();
        assert_eq!(signed.hash().len(), 64);
        assert!(signed.signer().is_some());
    }

    #[test]
    fn hash_only_artifact_validates_the_hash_too() {
        let err = SignedTransaction::create_from_hash(
            String::new(),
            "not-a-hash".into(),
            EntityType::AggregateBonded,
            NetworkType::TestNet,
        )
        .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidSignedTransaction(_)));

        let signed = SignedTransaction::create_from_hash(
            String::new(),
            "C9".repeat(32),
            EntityType::AggregateBonded,
            NetworkType::TestNet,
        )
        .unwrap();
        assert!(signed.signer().is_none());
    }
}
