//! Network-config transaction: replace the chain configuration at a future
//! height.
//!
//! Body layout: `apply height delta u64 | config size u16 |
//! versions size u16 | config bytes | versions bytes`. Both blobs are
//! UTF-8 text (an INI-style config and a JSON version table).

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::error::TransactionError;
use crate::transaction::{Transaction, TransactionBody};
use serde_json::Value;
use sirius_types::{Deadline, NetworkType};

pub(crate) const REQUIRED_DTO_KEYS: &[&str] =
    &["applyHeightDelta", "networkConfig", "supportedEntityVersions"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfigBody {
    /// Blocks from inclusion until the new config applies.
    pub apply_height_delta: u64,
    pub network_config: String,
    pub supported_entity_versions: String,
}

impl Transaction {
    pub fn network_config(
        network: NetworkType,
        deadline: Deadline,
        apply_height_delta: u64,
        network_config: impl Into<String>,
        supported_entity_versions: impl Into<String>,
    ) -> Result<Self, TransactionError> {
        let body = NetworkConfigBody {
            apply_height_delta,
            network_config: network_config.into(),
            supported_entity_versions: supported_entity_versions.into(),
        };
        body.check_counts()?;
        Ok(Self::from_body(
            TransactionBody::NetworkConfig(body),
            network,
            deadline,
        ))
    }
}

impl NetworkConfigBody {
    /// Both blobs must fit their two-byte wire size fields.
    fn check_counts(&self) -> Result<(), TransactionError> {
        if self.network_config.len() > u16::MAX as usize {
            return Err(TransactionError::Validation(format!(
                "network config of {} bytes exceeds the two-byte size field",
                self.network_config.len()
            )));
        }
        if self.supported_entity_versions.len() > u16::MAX as usize {
            return Err(TransactionError::Validation(format!(
                "entity versions blob of {} bytes exceeds the two-byte size field",
                self.supported_entity_versions.len()
            )));
        }
        Ok(())
    }

    pub(crate) fn size(&self) -> usize {
        8 + 2 + 2 + self.network_config.len() + self.supported_entity_versions.len()
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u64(self.apply_height_delta);
        w.write_u16(self.network_config.len() as u16);
        w.write_u16(self.supported_entity_versions.len() as u16);
        w.write_bytes(self.network_config.as_bytes());
        w.write_bytes(self.supported_entity_versions.as_bytes());
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let apply_height_delta = r.read_u64()?;
        let config_size = r.read_u16()? as usize;
        let versions_size = r.read_u16()? as usize;
        let network_config = String::from_utf8(r.read_bytes(config_size)?.to_vec())
            .map_err(|_| TransactionError::Validation("network config is not UTF-8".into()))?;
        let supported_entity_versions =
            String::from_utf8(r.read_bytes(versions_size)?.to_vec()).map_err(|_| {
                TransactionError::Validation("entity versions blob is not UTF-8".into())
            })?;
        Ok(TransactionBody::NetworkConfig(Self {
            apply_height_delta,
            network_config,
            supported_entity_versions,
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert(
            "applyHeightDelta".into(),
            dto::u64_json(self.apply_height_delta),
        );
        map.insert(
            "networkConfig".into(),
            Value::from(self.network_config.clone()),
        );
        map.insert(
            "supportedEntityVersions".into(),
            Value::from(self.supported_entity_versions.clone()),
        );
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let body = Self {
            apply_height_delta: dto::get_uint64(tx, "applyHeightDelta")?,
            network_config: dto::get_str(tx, "networkConfig")?.to_string(),
            supported_entity_versions: dto::get_str(tx, "supportedEntityVersions")?.to_string(),
        };
        body.check_counts()?;
        Ok(TransactionBody::NetworkConfig(body))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, REQUIRED_DTO_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::FeeCalculationStrategy;

    #[test]
    fn roundtrip() {
        let config = "[network]\nidentifier = mijin-test\n";
        let versions = r#"{"entities":[{"name":"transfer","type":"0x4154"}]}"#;
        let tx = Transaction::network_config(
            NetworkType::MijinTest,
            Deadline::from_network_ms(5_000_000),
            100,
            config,
            versions,
        )
        .unwrap();
        assert_eq!(tx.size(), 122 + 12 + config.len() + versions.len());
        let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        assert_eq!(Transaction::create_from_catbuffer(&bytes).unwrap().body, tx.body);
        assert_eq!(Transaction::create_from_dto(&tx.to_dto()).unwrap().body, tx.body);
    }

    #[test]
    fn oversized_config_blob_rejected() {
        let err = Transaction::network_config(
            NetworkType::MijinTest,
            Deadline::from_network_ms(5_000_000),
            100,
            "c".repeat(70_000),
            "{}",
        )
        .unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }
}
