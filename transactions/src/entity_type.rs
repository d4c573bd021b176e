//! Transaction type discriminants.

use crate::error::TransactionError;
use serde::{Deserialize, Serialize};

/// The 16-bit transaction type code carried in every envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Transfer,
    RegisterNamespace,
    AddressAlias,
    MosaicAlias,
    MosaicDefinition,
    ModifyMultisigAccount,
    AggregateComplete,
    AggregateBonded,
    LockFunds,
    SecretLock,
    SecretProof,
    AccountLink,
    BlockchainUpgrade,
    NetworkConfig,
    ModifyAccountMetadata,
    ModifyMosaicMetadata,
    ModifyNamespaceMetadata,
}

impl EntityType {
    /// The wire code.
    pub fn value(&self) -> u16 {
        match self {
            Self::Transfer => 0x4154,
            Self::RegisterNamespace => 0x414e,
            Self::AddressAlias => 0x424e,
            Self::MosaicAlias => 0x434e,
            Self::MosaicDefinition => 0x414d,
            Self::ModifyMultisigAccount => 0x4155,
            Self::AggregateComplete => 0x4141,
            Self::AggregateBonded => 0x4241,
            Self::LockFunds => 0x4148,
            Self::SecretLock => 0x4152,
            Self::SecretProof => 0x4252,
            Self::AccountLink => 0x414c,
            Self::BlockchainUpgrade => 0x4158,
            Self::NetworkConfig => 0x4159,
            Self::ModifyAccountMetadata => 0x413d,
            Self::ModifyMosaicMetadata => 0x423d,
            Self::ModifyNamespaceMetadata => 0x433d,
        }
    }

    /// Look up a type by its wire code.
    pub fn from_value(value: u16) -> Result<Self, TransactionError> {
        match value {
            0x4154 => Ok(Self::Transfer),
            0x414e => Ok(Self::RegisterNamespace),
            0x424e => Ok(Self::AddressAlias),
            0x434e => Ok(Self::MosaicAlias),
            0x414d => Ok(Self::MosaicDefinition),
            0x4155 => Ok(Self::ModifyMultisigAccount),
            0x4141 => Ok(Self::AggregateComplete),
            0x4241 => Ok(Self::AggregateBonded),
            0x4148 => Ok(Self::LockFunds),
            0x4152 => Ok(Self::SecretLock),
            0x4252 => Ok(Self::SecretProof),
            0x414c => Ok(Self::AccountLink),
            0x4158 => Ok(Self::BlockchainUpgrade),
            0x4159 => Ok(Self::NetworkConfig),
            0x413d => Ok(Self::ModifyAccountMetadata),
            0x423d => Ok(Self::ModifyMosaicMetadata),
            0x433d => Ok(Self::ModifyNamespaceMetadata),
            other => Err(TransactionError::UnknownTransactionType(other)),
        }
    }

    /// The current wire version for this transaction kind.
    pub fn version(&self) -> u8 {
        match self {
            Self::Transfer => 3,
            Self::RegisterNamespace => 2,
            Self::AddressAlias | Self::MosaicAlias => 1,
            Self::MosaicDefinition => 3,
            Self::ModifyMultisigAccount => 3,
            Self::AggregateComplete | Self::AggregateBonded => 2,
            Self::LockFunds | Self::SecretLock | Self::SecretProof => 1,
            Self::AccountLink => 2,
            Self::BlockchainUpgrade | Self::NetworkConfig => 1,
            Self::ModifyAccountMetadata
            | Self::ModifyMosaicMetadata
            | Self::ModifyNamespaceMetadata => 1,
        }
    }

    /// Every defined entity type, in registration order.
    pub fn all() -> &'static [EntityType] {
        &[
            Self::Transfer,
            Self::RegisterNamespace,
            Self::AddressAlias,
            Self::MosaicAlias,
            Self::MosaicDefinition,
            Self::ModifyMultisigAccount,
            Self::AggregateComplete,
            Self::AggregateBonded,
            Self::LockFunds,
            Self::SecretLock,
            Self::SecretProof,
            Self::AccountLink,
            Self::BlockchainUpgrade,
            Self::NetworkConfig,
            Self::ModifyAccountMetadata,
            Self::ModifyMosaicMetadata,
            Self::ModifyNamespaceMetadata,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_roundtrip_is_bijective() {
        let mut seen = std::collections::HashSet::new();
        for ty in EntityType::all() {
            assert!(seen.insert(ty.value()), "duplicate code for {ty:?}");
            assert_eq!(EntityType::from_value(ty.value()).unwrap(), *ty);
        }
    }

    #[test]
    fn unknown_code_rejected() {
        let err = EntityType::from_value(0xffff).unwrap_err();
        assert!(matches!(
            err,
            TransactionError::UnknownTransactionType(0xffff)
        ));
    }

    #[test]
    fn transfer_code() {
        assert_eq!(EntityType::Transfer.value(), 0x4154);
    }
}
