//! Alias transactions: link or unlink a namespace to an address or a
//! mosaic.
//!
//! Body layout: `action u8 | namespace id u64 | target` where the target is
//! a 25-byte address or an 8-byte mosaic id.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::error::TransactionError;
use crate::transaction::{Transaction, TransactionBody};
use serde_json::Value;
use sirius_types::{Address, Deadline, MosaicId, NamespaceId, NetworkType, ADDRESS_SIZE};

pub(crate) const ADDRESS_REQUIRED_DTO_KEYS: &[&str] =
    &["aliasAction", "namespaceId", "address"];
pub(crate) const MOSAIC_REQUIRED_DTO_KEYS: &[&str] =
    &["aliasAction", "namespaceId", "mosaicId"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AliasAction {
    Link,
    Unlink,
}

impl AliasAction {
    pub fn value(&self) -> u8 {
        match self {
            Self::Link => 0,
            Self::Unlink => 1,
        }
    }

    pub fn from_value(value: u8) -> Result<Self, TransactionError> {
        match value {
            0 => Ok(Self::Link),
            1 => Ok(Self::Unlink),
            other => Err(TransactionError::invalid(
                "aliasAction",
                format!("unknown value {other}"),
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressAliasBody {
    pub action: AliasAction,
    pub namespace_id: NamespaceId,
    pub address: Address,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicAliasBody {
    pub action: AliasAction,
    pub namespace_id: NamespaceId,
    pub mosaic_id: MosaicId,
}

impl Transaction {
    pub fn address_alias(
        network: NetworkType,
        deadline: Deadline,
        action: AliasAction,
        namespace_id: NamespaceId,
        address: Address,
    ) -> Self {
        Self::from_body(
            TransactionBody::AddressAlias(AddressAliasBody {
                action,
                namespace_id,
                address,
            }),
            network,
            deadline,
        )
    }

    pub fn mosaic_alias(
        network: NetworkType,
        deadline: Deadline,
        action: AliasAction,
        namespace_id: NamespaceId,
        mosaic_id: MosaicId,
    ) -> Self {
        Self::from_body(
            TransactionBody::MosaicAlias(MosaicAliasBody {
                action,
                namespace_id,
                mosaic_id,
            }),
            network,
            deadline,
        )
    }
}

impl AddressAliasBody {
    pub(crate) fn size(&self) -> usize {
        1 + 8 + ADDRESS_SIZE
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u8(self.action.value());
        w.write_u64(self.namespace_id.as_u64());
        w.write_bytes(self.address.as_bytes());
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let action = AliasAction::from_value(r.read_u8()?)?;
        let namespace_id = NamespaceId::new(r.read_u64()?);
        let address = Address::from_bytes(r.read_array::<ADDRESS_SIZE>()?)?;
        Ok(TransactionBody::AddressAlias(Self {
            action,
            namespace_id,
            address,
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert("aliasAction".into(), Value::from(self.action.value()));
        map.insert(
            "namespaceId".into(),
            dto::u64_json(self.namespace_id.as_u64()),
        );
        map.insert("address".into(), Value::from(self.address.encode_hex()));
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Ok(TransactionBody::AddressAlias(Self {
            action: AliasAction::from_value(dto::get_u8(tx, "aliasAction")?)?,
            namespace_id: NamespaceId::new(dto::get_uint64(tx, "namespaceId")?),
            address: Address::create_from_encoded(dto::get_str(tx, "address")?)?,
        }))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, ADDRESS_REQUIRED_DTO_KEYS)
    }
}

impl MosaicAliasBody {
    pub(crate) fn size(&self) -> usize {
        1 + 8 + 8
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u8(self.action.value());
        w.write_u64(self.namespace_id.as_u64());
        w.write_u64(self.mosaic_id.as_u64());
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Ok(TransactionBody::MosaicAlias(Self {
            action: AliasAction::from_value(r.read_u8()?)?,
            namespace_id: NamespaceId::new(r.read_u64()?),
            mosaic_id: MosaicId::new(r.read_u64()?),
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert("aliasAction".into(), Value::from(self.action.value()));
        map.insert(
            "namespaceId".into(),
            dto::u64_json(self.namespace_id.as_u64()),
        );
        map.insert("mosaicId".into(), dto::u64_json(self.mosaic_id.as_u64()));
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Ok(TransactionBody::MosaicAlias(Self {
            action: AliasAction::from_value(dto::get_u8(tx, "aliasAction")?)?,
            namespace_id: NamespaceId::new(dto::get_uint64(tx, "namespaceId")?),
            mosaic_id: MosaicId::new(dto::get_uint64(tx, "mosaicId")?),
        }))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, MOSAIC_REQUIRED_DTO_KEYS)
    }
}
