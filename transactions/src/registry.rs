//! The codec registry: one entry per transaction type code, dispatching
//! catbuffer and DTO decoding.

use crate::account_link::AccountLinkBody;
use crate::aggregate::AggregateBody;
use crate::alias::{AddressAliasBody, MosaicAliasBody};
use crate::catbuffer::CatReader;
use crate::dto::DtoMap;
use crate::entity_type::EntityType;
use crate::error::TransactionError;
use crate::lock::{LockFundsBody, SecretLockBody, SecretProofBody};
use crate::metadata::ModifyMetadataBody;
use crate::mosaic_definition::MosaicDefinitionBody;
use crate::multisig::ModifyMultisigBody;
use crate::network_config::NetworkConfigBody;
use crate::register_namespace::RegisterNamespaceBody;
use crate::transaction::TransactionBody;
use crate::transfer::TransferBody;
use crate::upgrade::BlockchainUpgradeBody;
use sirius_types::NetworkType;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::trace;

/// The decoding hooks registered for one transaction type code.
#[derive(Debug)]
pub struct VariantCodec {
    pub entity_type: EntityType,
    pub read_body:
        fn(&mut CatReader<'_>, NetworkType) -> Result<TransactionBody, TransactionError>,
    pub body_from_dto: fn(&DtoMap, NetworkType) -> Result<TransactionBody, TransactionError>,
    /// Presence check for the variant's required DTO keys, run before
    /// `body_from_dto`.
    pub validate_dto: fn(&DtoMap) -> bool,
}

/// Maps type codes to their codecs. Populated once at startup; lookups of
/// unregistered codes fail rather than guessing.
pub struct TransactionRegistry {
    codecs: HashMap<u16, VariantCodec>,
}

impl TransactionRegistry {
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Register a codec under its entity type's code. A second registration
    /// for the same code is a hard error, not a silent overwrite.
    pub fn register(&mut self, codec: VariantCodec) -> Result<(), TransactionError> {
        let code = codec.entity_type.value();
        if self.codecs.contains_key(&code) {
            return Err(TransactionError::DuplicateRegistration(code));
        }
        trace!(code = format_args!("{code:#06x}"), "registered transaction codec");
        self.codecs.insert(code, codec);
        Ok(())
    }

    pub fn find(&self, code: u16) -> Result<&VariantCodec, TransactionError> {
        self.codecs
            .get(&code)
            .ok_or(TransactionError::UnknownTransactionType(code))
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl Default for TransactionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn default_registry() -> TransactionRegistry {
    let mut registry = TransactionRegistry::new();
    let codecs = [
        VariantCodec {
            entity_type: EntityType::Transfer,
            read_body: TransferBody::read_body,
            body_from_dto: TransferBody::body_from_dto,
            validate_dto: TransferBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::RegisterNamespace,
            read_body: RegisterNamespaceBody::read_body,
            body_from_dto: RegisterNamespaceBody::body_from_dto,
            validate_dto: RegisterNamespaceBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::AddressAlias,
            read_body: AddressAliasBody::read_body,
            body_from_dto: AddressAliasBody::body_from_dto,
            validate_dto: AddressAliasBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::MosaicAlias,
            read_body: MosaicAliasBody::read_body,
            body_from_dto: MosaicAliasBody::body_from_dto,
            validate_dto: MosaicAliasBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::MosaicDefinition,
            read_body: MosaicDefinitionBody::read_body,
            body_from_dto: MosaicDefinitionBody::body_from_dto,
            validate_dto: MosaicDefinitionBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::ModifyMultisigAccount,
            read_body: ModifyMultisigBody::read_body,
            body_from_dto: ModifyMultisigBody::body_from_dto,
            validate_dto: ModifyMultisigBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::AggregateComplete,
            read_body: AggregateBody::read_complete_body,
            body_from_dto: AggregateBody::complete_body_from_dto,
            validate_dto: AggregateBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::AggregateBonded,
            read_body: AggregateBody::read_bonded_body,
            body_from_dto: AggregateBody::bonded_body_from_dto,
            validate_dto: AggregateBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::LockFunds,
            read_body: LockFundsBody::read_body,
            body_from_dto: LockFundsBody::body_from_dto,
            validate_dto: LockFundsBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::SecretLock,
            read_body: SecretLockBody::read_body,
            body_from_dto: SecretLockBody::body_from_dto,
            validate_dto: SecretLockBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::SecretProof,
            read_body: SecretProofBody::read_body,
            body_from_dto: SecretProofBody::body_from_dto,
            validate_dto: SecretProofBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::AccountLink,
            read_body: AccountLinkBody::read_body,
            body_from_dto: AccountLinkBody::body_from_dto,
            validate_dto: AccountLinkBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::BlockchainUpgrade,
            read_body: BlockchainUpgradeBody::read_body,
            body_from_dto: BlockchainUpgradeBody::body_from_dto,
            validate_dto: BlockchainUpgradeBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::NetworkConfig,
            read_body: NetworkConfigBody::read_body,
            body_from_dto: NetworkConfigBody::body_from_dto,
            validate_dto: NetworkConfigBody::validate_dto,
        },
        // the three metadata codes share one body codec; the leading
        // metadata type byte keeps them consistent with the envelope code
        VariantCodec {
            entity_type: EntityType::ModifyAccountMetadata,
            read_body: ModifyMetadataBody::read_body,
            body_from_dto: ModifyMetadataBody::body_from_dto,
            validate_dto: ModifyMetadataBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::ModifyMosaicMetadata,
            read_body: ModifyMetadataBody::read_body,
            body_from_dto: ModifyMetadataBody::body_from_dto,
            validate_dto: ModifyMetadataBody::validate_dto,
        },
        VariantCodec {
            entity_type: EntityType::ModifyNamespaceMetadata,
            read_body: ModifyMetadataBody::read_body,
            body_from_dto: ModifyMetadataBody::body_from_dto,
            validate_dto: ModifyMetadataBody::validate_dto,
        },
    ];
    for codec in codecs {
        registry
            .register(codec)
            .expect("entity type codes are distinct");
    }
    registry
}

/// The process-wide registry, built on first use with every defined
/// transaction kind.
pub fn registry() -> &'static TransactionRegistry {
    static REGISTRY: OnceLock<TransactionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(default_registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_type_is_registered() {
        let registry = registry();
        assert_eq!(registry.len(), EntityType::all().len());
        for ty in EntityType::all() {
            assert!(registry.find(ty.value()).is_ok(), "{ty:?} missing");
        }
    }

    #[test]
    fn unknown_code_lookup_fails() {
        assert!(matches!(
            registry().find(0x0000).unwrap_err(),
            TransactionError::UnknownTransactionType(0)
        ));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = TransactionRegistry::new();
        let codec = || VariantCodec {
            entity_type: EntityType::Transfer,
            read_body: crate::transfer::TransferBody::read_body,
            body_from_dto: crate::transfer::TransferBody::body_from_dto,
            validate_dto: crate::transfer::TransferBody::validate_dto,
        };
        registry.register(codec()).unwrap();
        assert!(matches!(
            registry.register(codec()).unwrap_err(),
            TransactionError::DuplicateRegistration(0x4154)
        ));
    }
}
