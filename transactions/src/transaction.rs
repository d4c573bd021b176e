//! The transaction value: shared envelope plus a kind-specific body.
//!
//! Two envelope shapes exist over the same body types: the standalone
//! `Transaction` and the `InnerTransaction` embedded in aggregates.

use crate::account_link::AccountLinkBody;
use crate::aggregate::AggregateBody;
use crate::alias::{AddressAliasBody, MosaicAliasBody};
use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::entity_type::EntityType;
use crate::error::TransactionError;
use crate::fee::{calculate_fee, FeeCalculationStrategy};
use crate::header::{
    TransactionHeader, TransactionInfo, EMBEDDED_HEADER_SIZE, TRANSACTION_HEADER_SIZE,
};
use crate::lock::{LockFundsBody, SecretLockBody, SecretProofBody};
use crate::metadata::ModifyMetadataBody;
use crate::mosaic_definition::MosaicDefinitionBody;
use crate::multisig::ModifyMultisigBody;
use crate::network_config::NetworkConfigBody;
use crate::register_namespace::RegisterNamespaceBody;
use crate::registry::registry;
use crate::transfer::TransferBody;
use crate::upgrade::BlockchainUpgradeBody;
use serde_json::{json, Value};
use sirius_types::{Deadline, NetworkType, PublicKey, Signature};
use tracing::debug;

/// The kind-specific part of a transaction.
#[derive(Clone, Debug, PartialEq)]
pub enum TransactionBody {
    Transfer(TransferBody),
    RegisterNamespace(RegisterNamespaceBody),
    MosaicDefinition(MosaicDefinitionBody),
    AddressAlias(AddressAliasBody),
    MosaicAlias(MosaicAliasBody),
    AccountLink(AccountLinkBody),
    ModifyMultisig(ModifyMultisigBody),
    LockFunds(LockFundsBody),
    SecretLock(SecretLockBody),
    SecretProof(SecretProofBody),
    BlockchainUpgrade(BlockchainUpgradeBody),
    NetworkConfig(NetworkConfigBody),
    ModifyMetadata(ModifyMetadataBody),
    Aggregate(AggregateBody),
}

impl TransactionBody {
    /// The type code this body serializes under.
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Transfer(_) => EntityType::Transfer,
            Self::RegisterNamespace(_) => EntityType::RegisterNamespace,
            Self::MosaicDefinition(_) => EntityType::MosaicDefinition,
            Self::AddressAlias(_) => EntityType::AddressAlias,
            Self::MosaicAlias(_) => EntityType::MosaicAlias,
            Self::AccountLink(_) => EntityType::AccountLink,
            Self::ModifyMultisig(_) => EntityType::ModifyMultisigAccount,
            Self::LockFunds(_) => EntityType::LockFunds,
            Self::SecretLock(_) => EntityType::SecretLock,
            Self::SecretProof(_) => EntityType::SecretProof,
            Self::BlockchainUpgrade(_) => EntityType::BlockchainUpgrade,
            Self::NetworkConfig(_) => EntityType::NetworkConfig,
            Self::ModifyMetadata(body) => body.entity_type(),
            Self::Aggregate(body) => body.entity_type(),
        }
    }

    /// Serialized size of the kind-specific bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Transfer(b) => b.size(),
            Self::RegisterNamespace(b) => b.size(),
            Self::MosaicDefinition(b) => b.size(),
            Self::AddressAlias(b) => b.size(),
            Self::MosaicAlias(b) => b.size(),
            Self::AccountLink(b) => b.size(),
            Self::ModifyMultisig(b) => b.size(),
            Self::LockFunds(b) => b.size(),
            Self::SecretLock(b) => b.size(),
            Self::SecretProof(b) => b.size(),
            Self::BlockchainUpgrade(b) => b.size(),
            Self::NetworkConfig(b) => b.size(),
            Self::ModifyMetadata(b) => b.size(),
            Self::Aggregate(b) => b.size(),
        }
    }

    pub(crate) fn write(&self, network: NetworkType, w: &mut CatWriter) {
        match self {
            Self::Transfer(b) => b.write(network, w),
            Self::RegisterNamespace(b) => b.write(w),
            Self::MosaicDefinition(b) => b.write(w),
            Self::AddressAlias(b) => b.write(w),
            Self::MosaicAlias(b) => b.write(w),
            Self::AccountLink(b) => b.write(w),
            Self::ModifyMultisig(b) => b.write(w),
            Self::LockFunds(b) => b.write(w),
            Self::SecretLock(b) => b.write(w),
            Self::SecretProof(b) => b.write(w),
            Self::BlockchainUpgrade(b) => b.write(w),
            Self::NetworkConfig(b) => b.write(w),
            Self::ModifyMetadata(b) => b.write(w),
            Self::Aggregate(b) => b.write(w),
        }
    }

    pub(crate) fn dto_fields(&self, network: NetworkType, map: &mut DtoMap) {
        match self {
            Self::Transfer(b) => b.dto_fields(network, map),
            Self::RegisterNamespace(b) => b.dto_fields(map),
            Self::MosaicDefinition(b) => b.dto_fields(map),
            Self::AddressAlias(b) => b.dto_fields(map),
            Self::MosaicAlias(b) => b.dto_fields(map),
            Self::AccountLink(b) => b.dto_fields(map),
            Self::ModifyMultisig(b) => b.dto_fields(map),
            Self::LockFunds(b) => b.dto_fields(map),
            Self::SecretLock(b) => b.dto_fields(map),
            Self::SecretProof(b) => b.dto_fields(map),
            Self::BlockchainUpgrade(b) => b.dto_fields(map),
            Self::NetworkConfig(b) => b.dto_fields(map),
            Self::ModifyMetadata(b) => b.dto_fields(map),
            Self::Aggregate(b) => b.dto_fields(map),
        }
    }
}

/// A standalone transaction.
#[derive(Clone, Debug)]
pub struct Transaction {
    pub header: TransactionHeader,
    pub body: TransactionBody,
}

impl Transaction {
    /// Pair a body with a fresh header for it.
    pub fn from_body(body: TransactionBody, network: NetworkType, deadline: Deadline) -> Self {
        let header = TransactionHeader::create(body.entity_type(), network, deadline);
        Self { header, body }
    }

    /// Total serialized size: shared header plus kind-specific bytes.
    pub fn size(&self) -> usize {
        TRANSACTION_HEADER_SIZE + self.body.size()
    }

    /// Serialize to catbuffer bytes.
    ///
    /// The size is computed first and the fee derived from it before any
    /// byte is written; the fee occupies a fixed-width slot inside the
    /// already-sized header, so there is no circular dependency.
    pub fn to_catbuffer(&self, strategy: FeeCalculationStrategy) -> Vec<u8> {
        let total = self.size();
        let fee = calculate_fee(strategy, self.header.max_fee, total);
        let mut w = CatWriter::with_capacity(total);
        self.header.write(total as u32, fee, &mut w);
        self.body.write(self.header.network, &mut w);
        debug_assert_eq!(w.len(), total);
        w.into_bytes()
    }

    /// Parse a transaction from catbuffer bytes, dispatching on the type
    /// code through the registry.
    pub fn create_from_catbuffer(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut r = CatReader::new(bytes);
        let (header, declared) = TransactionHeader::read(&mut r)?;
        if declared < TRANSACTION_HEADER_SIZE || declared > bytes.len() {
            return Err(TransactionError::SizeMismatch {
                declared,
                actual: bytes.len(),
            });
        }
        debug!(
            entity_type = ?header.entity_type,
            size = declared,
            "decoding transaction from catbuffer"
        );
        let mut body_reader = r.sub_reader(declared - TRANSACTION_HEADER_SIZE)?;
        let codec = registry().find(header.entity_type.value())?;
        let body = (codec.read_body)(&mut body_reader, header.network)?;
        if !body_reader.is_empty() {
            return Err(TransactionError::SizeMismatch {
                declared,
                actual: declared - body_reader.remaining(),
            });
        }
        if body.entity_type() != header.entity_type {
            return Err(TransactionError::EntityTypeMismatch {
                header: header.entity_type,
                body: body.entity_type(),
            });
        }
        Ok(Self { header, body })
    }

    /// Parse from catbuffer bytes, additionally requiring the embedded
    /// network to match the decode context.
    pub fn create_from_catbuffer_on(
        network: NetworkType,
        bytes: &[u8],
    ) -> Result<Self, TransactionError> {
        let tx = Self::create_from_catbuffer(bytes)?;
        if tx.header.network != network {
            return Err(TransactionError::NetworkMismatch {
                expected: network,
                found: tx.header.network,
            });
        }
        Ok(tx)
    }

    /// The DTO mapping: `{"meta": {...}, "transaction": {...}}`.
    pub fn to_dto(&self) -> Value {
        let mut tx = DtoMap::new();
        if let Some(sig) = &self.header.signature {
            tx.insert("signature".into(), Value::from(sig.to_hex()));
        }
        if let Some(signer) = &self.header.signer {
            tx.insert("signer".into(), Value::from(signer.to_hex()));
        }
        tx.insert("version".into(), Value::from(self.header.dto_version()));
        tx.insert("type".into(), Value::from(self.header.entity_type.value()));
        tx.insert("maxFee".into(), dto::u64_json(self.header.max_fee));
        tx.insert(
            "deadline".into(),
            dto::u64_json(self.header.deadline.to_network_ms()),
        );
        self.body.dto_fields(self.header.network, &mut tx);

        let meta = match &self.header.info {
            Some(info) => info.to_dto(),
            None => Value::Object(DtoMap::new()),
        };
        json!({ "meta": meta, "transaction": Value::Object(tx) })
    }

    /// Parse a transaction from its DTO mapping.
    pub fn create_from_dto(value: &Value) -> Result<Self, TransactionError> {
        let root = dto::as_map(value, "transaction DTO")?;
        let tx = dto::get_map(root, "transaction")?;

        let packed = dto::get_u32(tx, "version")?;
        let (version, network_byte) = TransactionHeader::unpack_dto_version(packed);
        let network = NetworkType::from_value(network_byte)?;
        let entity_type = EntityType::from_value(dto::get_u16(tx, "type")?)?;

        let codec = registry().find(entity_type.value())?;
        if !(codec.validate_dto)(tx) {
            return Err(TransactionError::MissingDtoField(format!(
                "required keys for {entity_type:?}"
            )));
        }
        let body = (codec.body_from_dto)(tx, network)?;
        if body.entity_type() != entity_type {
            return Err(TransactionError::EntityTypeMismatch {
                header: entity_type,
                body: body.entity_type(),
            });
        }

        let signature = match tx.get("signature").and_then(Value::as_str) {
            Some(s) => Some(Signature::from_hex(s)?),
            None => None,
        };
        let signer = match tx.get("signer").and_then(Value::as_str) {
            Some(s) => Some(PublicKey::from_hex(s)?),
            None => None,
        };
        let info = match root.get("meta").and_then(Value::as_object) {
            Some(meta) if meta.contains_key("height") => Some(TransactionInfo::from_dto(meta)?),
            _ => None,
        };

        Ok(Self {
            header: TransactionHeader {
                entity_type,
                network,
                version,
                max_fee: dto::get_uint64(tx, "maxFee")?,
                deadline: Deadline::from_network_ms(dto::get_uint64(tx, "deadline")?),
                signature,
                signer,
                info,
            },
            body,
        })
    }

    /// Parse from a DTO mapping, additionally requiring the embedded
    /// network to match the decode context.
    pub fn create_from_dto_on(
        network: NetworkType,
        value: &Value,
    ) -> Result<Self, TransactionError> {
        let tx = Self::create_from_dto(value)?;
        if tx.header.network != network {
            return Err(TransactionError::NetworkMismatch {
                expected: network,
                found: tx.header.network,
            });
        }
        Ok(tx)
    }

    /// Convert into the embedded form used inside an aggregate, attributing
    /// the body to `signer`. Aggregates themselves cannot be embedded.
    pub fn to_inner(&self, signer: PublicKey) -> Result<InnerTransaction, TransactionError> {
        reject_nested_aggregate(self.body.entity_type())?;
        Ok(InnerTransaction {
            signer,
            version: self.header.version,
            network: self.header.network,
            body: self.body.clone(),
        })
    }
}

/// Aggregates cannot nest; an embedded envelope never carries an aggregate
/// code.
fn reject_nested_aggregate(entity_type: EntityType) -> Result<(), TransactionError> {
    match entity_type {
        EntityType::AggregateComplete | EntityType::AggregateBonded => Err(
            TransactionError::Validation("aggregates cannot contain aggregates".into()),
        ),
        _ => Ok(()),
    }
}

/// The embedded envelope used only inside an aggregate's inner-transaction
/// list: a signer but no signature, fee, or deadline.
#[derive(Clone, Debug, PartialEq)]
pub struct InnerTransaction {
    pub signer: PublicKey,
    pub version: u8,
    pub network: NetworkType,
    pub body: TransactionBody,
}

impl InnerTransaction {
    pub fn size(&self) -> usize {
        EMBEDDED_HEADER_SIZE + self.body.size()
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u32(self.size() as u32);
        w.write_bytes(self.signer.as_bytes());
        w.write_u8(self.version);
        w.write_u8(0);
        w.write_u8(0);
        w.write_u8(self.network.value());
        w.write_u16(self.body.entity_type().value());
        self.body.write(self.network, w);
    }

    pub(crate) fn read(r: &mut CatReader<'_>) -> Result<Self, TransactionError> {
        let declared = r.read_u32()? as usize;
        if declared < EMBEDDED_HEADER_SIZE {
            return Err(TransactionError::SizeMismatch {
                declared,
                actual: r.remaining() + 4,
            });
        }
        let signer = PublicKey(r.read_array::<32>()?);
        let version = r.read_u8()?;
        r.read_bytes(2)?;
        let network = NetworkType::from_value(r.read_u8()?)?;
        let entity_type = EntityType::from_value(r.read_u16()?)?;
        reject_nested_aggregate(entity_type)?;

        let mut body_reader = r.sub_reader(declared - EMBEDDED_HEADER_SIZE)?;
        let codec = registry().find(entity_type.value())?;
        let body = (codec.read_body)(&mut body_reader, network)?;
        if !body_reader.is_empty() {
            return Err(TransactionError::SizeMismatch {
                declared,
                actual: declared - body_reader.remaining(),
            });
        }
        if body.entity_type() != entity_type {
            return Err(TransactionError::EntityTypeMismatch {
                header: entity_type,
                body: body.entity_type(),
            });
        }
        Ok(Self {
            signer,
            version,
            network,
            body,
        })
    }

    /// Embedded DTO form: a `transaction` object without fee, deadline, or
    /// signature.
    pub fn to_dto(&self) -> Value {
        let mut tx = DtoMap::new();
        tx.insert("signer".into(), Value::from(self.signer.to_hex()));
        let packed = self.version as u32 | (self.network.value() as u32) << 24;
        tx.insert("version".into(), Value::from(packed));
        tx.insert("type".into(), Value::from(self.body.entity_type().value()));
        self.body.dto_fields(self.network, &mut tx);
        json!({ "transaction": Value::Object(tx) })
    }

    pub(crate) fn from_dto(value: &Value) -> Result<Self, TransactionError> {
        let root = dto::as_map(value, "inner transaction DTO")?;
        let tx = dto::get_map(root, "transaction")?;

        let packed = dto::get_u32(tx, "version")?;
        let (version, network_byte) = TransactionHeader::unpack_dto_version(packed);
        let network = NetworkType::from_value(network_byte)?;
        let entity_type = EntityType::from_value(dto::get_u16(tx, "type")?)?;
        reject_nested_aggregate(entity_type)?;
        let signer = PublicKey::from_hex(dto::get_str(tx, "signer")?)?;

        let codec = registry().find(entity_type.value())?;
        if !(codec.validate_dto)(tx) {
            return Err(TransactionError::MissingDtoField(format!(
                "required keys for {entity_type:?}"
            )));
        }
        let body = (codec.body_from_dto)(tx, network)?;
        if body.entity_type() != entity_type {
            return Err(TransactionError::EntityTypeMismatch {
                header: entity_type,
                body: body.entity_type(),
            });
        }
        Ok(Self {
            signer,
            version,
            network,
            body,
        })
    }
}
