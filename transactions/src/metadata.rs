//! Modify-metadata transactions: attach or remove key/value pairs on an
//! address, a mosaic, or a namespace.
//!
//! Body layout: `metadata type u8 | target (address 25B or id u64) |
//! modifications`, each modification being `size u32 | modification type
//! u8 | key size u8 | value size u16 | key bytes | value bytes`. Three
//! entity type codes share this one body; the target kind picks the code.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::entity_type::EntityType;
use crate::error::TransactionError;
use crate::transaction::{Transaction, TransactionBody};
use serde_json::{json, Value};
use sirius_types::{Address, Deadline, MosaicId, NamespaceId, NetworkType, ADDRESS_SIZE};

pub(crate) const REQUIRED_DTO_KEYS: &[&str] = &["metadataType", "modifications"];

const METADATA_TYPE_ADDRESS: u8 = 1;
const METADATA_TYPE_MOSAIC: u8 = 2;
const METADATA_TYPE_NAMESPACE: u8 = 3;

/// The entity a metadata modification targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataId {
    Address(Address),
    Mosaic(MosaicId),
    Namespace(NamespaceId),
}

impl MetadataId {
    fn metadata_type(&self) -> u8 {
        match self {
            Self::Address(_) => METADATA_TYPE_ADDRESS,
            Self::Mosaic(_) => METADATA_TYPE_MOSAIC,
            Self::Namespace(_) => METADATA_TYPE_NAMESPACE,
        }
    }

    fn wire_size(&self) -> usize {
        match self {
            Self::Address(_) => ADDRESS_SIZE,
            Self::Mosaic(_) | Self::Namespace(_) => 8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataModificationType {
    Add,
    Remove,
}

impl MetadataModificationType {
    pub fn value(&self) -> u8 {
        match self {
            Self::Add => 0,
            Self::Remove => 1,
        }
    }

    pub fn from_value(value: u8) -> Result<Self, TransactionError> {
        match value {
            0 => Ok(Self::Add),
            1 => Ok(Self::Remove),
            other => Err(TransactionError::invalid(
                "modifications",
                format!("unknown modification type {other}"),
            )),
        }
    }
}

/// One key/value change. A removal carries an empty value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataModification {
    pub kind: MetadataModificationType,
    pub key: String,
    pub value: String,
}

impl MetadataModification {
    pub fn add(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: MetadataModificationType::Add,
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Self {
            kind: MetadataModificationType::Remove,
            key: key.into(),
            value: String::new(),
        }
    }

    fn wire_size(&self) -> usize {
        4 + 1 + 1 + 2 + self.key.len() + self.value.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifyMetadataBody {
    pub metadata_id: MetadataId,
    pub modifications: Vec<MetadataModification>,
}

impl Transaction {
    pub fn modify_metadata(
        network: NetworkType,
        deadline: Deadline,
        metadata_id: MetadataId,
        modifications: Vec<MetadataModification>,
    ) -> Result<Self, TransactionError> {
        let body = ModifyMetadataBody {
            metadata_id,
            modifications,
        };
        body.check_counts()?;
        Ok(Self::from_body(
            TransactionBody::ModifyMetadata(body),
            network,
            deadline,
        ))
    }
}

impl ModifyMetadataBody {
    /// Which of the three shared codes this body serializes under.
    pub(crate) fn entity_type(&self) -> EntityType {
        match self.metadata_id {
            MetadataId::Address(_) => EntityType::ModifyAccountMetadata,
            MetadataId::Mosaic(_) => EntityType::ModifyMosaicMetadata,
            MetadataId::Namespace(_) => EntityType::ModifyNamespaceMetadata,
        }
    }

    /// Every key and value must fit its wire size field.
    fn check_counts(&self) -> Result<(), TransactionError> {
        for m in &self.modifications {
            if m.key.len() > u8::MAX as usize {
                return Err(TransactionError::Validation(format!(
                    "metadata key of {} bytes exceeds the one-byte size field",
                    m.key.len()
                )));
            }
            if m.value.len() > u16::MAX as usize {
                return Err(TransactionError::Validation(format!(
                    "metadata value of {} bytes exceeds the two-byte size field",
                    m.value.len()
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn size(&self) -> usize {
        1 + self.metadata_id.wire_size()
            + self
                .modifications
                .iter()
                .map(MetadataModification::wire_size)
                .sum::<usize>()
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u8(self.metadata_id.metadata_type());
        match &self.metadata_id {
            MetadataId::Address(address) => w.write_bytes(address.as_bytes()),
            MetadataId::Mosaic(id) => w.write_u64(id.as_u64()),
            MetadataId::Namespace(id) => w.write_u64(id.as_u64()),
        }
        for m in &self.modifications {
            w.write_u32(m.wire_size() as u32);
            w.write_u8(m.kind.value());
            w.write_u8(m.key.len() as u8);
            w.write_u16(m.value.len() as u16);
            w.write_bytes(m.key.as_bytes());
            w.write_bytes(m.value.as_bytes());
        }
    }

    /// Shared decoder for all three codes; the leading metadata type byte
    /// names the target kind.
    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let metadata_id = match r.read_u8()? {
            METADATA_TYPE_ADDRESS => {
                MetadataId::Address(Address::from_bytes(r.read_array::<ADDRESS_SIZE>()?)?)
            }
            METADATA_TYPE_MOSAIC => MetadataId::Mosaic(MosaicId::new(r.read_u64()?)),
            METADATA_TYPE_NAMESPACE => MetadataId::Namespace(NamespaceId::new(r.read_u64()?)),
            other => {
                return Err(TransactionError::invalid(
                    "metadataType",
                    format!("unknown value {other}"),
                ));
            }
        };
        let mut modifications = Vec::new();
        while !r.is_empty() {
            let declared = r.read_u32()? as usize;
            let kind = MetadataModificationType::from_value(r.read_u8()?)?;
            let key_size = r.read_u8()? as usize;
            let value_size = r.read_u16()? as usize;
            if declared != 4 + 1 + 1 + 2 + key_size + value_size {
                return Err(TransactionError::SizeMismatch {
                    declared,
                    actual: 8 + key_size + value_size,
                });
            }
            let key = String::from_utf8(r.read_bytes(key_size)?.to_vec())
                .map_err(|_| TransactionError::Validation("metadata key is not UTF-8".into()))?;
            let value = String::from_utf8(r.read_bytes(value_size)?.to_vec()).map_err(|_| {
                TransactionError::Validation("metadata value is not UTF-8".into())
            })?;
            modifications.push(MetadataModification { kind, key, value });
        }
        Ok(TransactionBody::ModifyMetadata(Self {
            metadata_id,
            modifications,
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert(
            "metadataType".into(),
            Value::from(self.metadata_id.metadata_type()),
        );
        match &self.metadata_id {
            MetadataId::Address(address) => {
                map.insert("metadataId".into(), Value::from(address.encode_hex()));
            }
            MetadataId::Mosaic(id) => {
                map.insert("metadataId".into(), dto::u64_json(id.as_u64()));
            }
            MetadataId::Namespace(id) => {
                map.insert("metadataId".into(), dto::u64_json(id.as_u64()));
            }
        }
        let mods: Vec<Value> = self
            .modifications
            .iter()
            .map(|m| {
                json!({
                    "type": m.kind.value(),
                    "key": m.key,
                    "value": m.value,
                })
            })
            .collect();
        map.insert("modifications".into(), Value::from(mods));
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let id_value = tx
            .get("metadataId")
            .ok_or_else(|| TransactionError::missing("metadataId"))?;
        let metadata_id = match dto::get_u8(tx, "metadataType")? {
            METADATA_TYPE_ADDRESS => {
                let encoded = id_value.as_str().ok_or_else(|| {
                    TransactionError::invalid("metadataId", "expected a hex address")
                })?;
                MetadataId::Address(Address::create_from_encoded(encoded)?)
            }
            METADATA_TYPE_MOSAIC => {
                MetadataId::Mosaic(MosaicId::new(dto::uint64_value(id_value, "metadataId")?))
            }
            METADATA_TYPE_NAMESPACE => MetadataId::Namespace(NamespaceId::new(
                dto::uint64_value(id_value, "metadataId")?,
            )),
            other => {
                return Err(TransactionError::invalid(
                    "metadataType",
                    format!("unknown value {other}"),
                ));
            }
        };
        let mut modifications = Vec::new();
        for entry in dto::get_array(tx, "modifications")? {
            let entry = dto::as_map(entry, "modifications")?;
            modifications.push(MetadataModification {
                kind: MetadataModificationType::from_value(dto::get_u8(entry, "type")?)?,
                key: dto::get_str(entry, "key")?.to_string(),
                value: entry
                    .get("value")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            });
        }
        let body = Self {
            metadata_id,
            modifications,
        };
        body.check_counts()?;
        Ok(TransactionBody::ModifyMetadata(body))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, REQUIRED_DTO_KEYS)
    }
}
