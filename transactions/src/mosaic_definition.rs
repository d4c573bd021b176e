//! Mosaic-definition transaction: create a new mosaic under an owner's
//! nonce-derived id.
//!
//! Body layout: `nonce 4B | mosaic id u64 | optional-property count u8 |
//! flags u8 | divisibility u8 | optional properties (id u8 + value u64)`.
//! Duration is the only optional property and is omitted entirely when
//! unlimited.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::error::TransactionError;
use crate::transaction::{Transaction, TransactionBody};
use serde_json::{json, Value};
use sirius_types::{Deadline, MosaicId, MosaicNonce, NetworkType, PublicKey};

pub(crate) const REQUIRED_DTO_KEYS: &[&str] = &["mosaicNonce", "mosaicId", "properties"];

const FLAG_SUPPLY_MUTABLE: u8 = 0x01;
const FLAG_TRANSFERABLE: u8 = 0x02;

const PROPERTY_ID_FLAGS: u8 = 0;
const PROPERTY_ID_DIVISIBILITY: u8 = 1;
const PROPERTY_ID_DURATION: u8 = 2;

/// The configurable properties of a mosaic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicProperties {
    pub supply_mutable: bool,
    pub transferable: bool,
    pub divisibility: u8,
    /// Lease duration in blocks; `None` means unlimited.
    pub duration: Option<u64>,
}

impl MosaicProperties {
    pub fn new(
        supply_mutable: bool,
        transferable: bool,
        divisibility: u8,
        duration: Option<u64>,
    ) -> Self {
        Self {
            supply_mutable,
            transferable,
            divisibility,
            duration,
        }
    }

    pub(crate) fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.supply_mutable {
            flags |= FLAG_SUPPLY_MUTABLE;
        }
        if self.transferable {
            flags |= FLAG_TRANSFERABLE;
        }
        flags
    }

    pub(crate) fn from_flags(flags: u8, divisibility: u8, duration: Option<u64>) -> Self {
        Self {
            supply_mutable: flags & FLAG_SUPPLY_MUTABLE != 0,
            transferable: flags & FLAG_TRANSFERABLE != 0,
            divisibility,
            duration,
        }
    }

    /// The positional DTO encoding: `[flags, divisibility, duration]`, each
    /// a wide-int pair. Used by account/mosaic info endpoints.
    pub fn to_dto_array(&self) -> Value {
        json!([
            dto::u64_json(self.flags() as u64),
            dto::u64_json(self.divisibility as u64),
            dto::u64_json(self.duration.unwrap_or(0)),
        ])
    }

    /// Parse the positional `[flags, divisibility, duration]` encoding.
    pub fn from_dto_array(value: &Value) -> Result<Self, TransactionError> {
        let arr = value
            .as_array()
            .ok_or_else(|| TransactionError::invalid("properties", "expected an array"))?;
        if arr.len() != 3 {
            return Err(TransactionError::invalid(
                "properties",
                "expected exactly 3 entries",
            ));
        }
        let flags = dto::uint64_value(&arr[0], "properties[0]")?;
        let divisibility = dto::uint64_value(&arr[1], "properties[1]")?;
        let duration = dto::uint64_value(&arr[2], "properties[2]")?;
        Ok(Self::from_flags(
            u8::try_from(flags)
                .map_err(|_| TransactionError::invalid("properties[0]", "flags overflow"))?,
            u8::try_from(divisibility).map_err(|_| {
                TransactionError::invalid("properties[1]", "divisibility overflow")
            })?,
            (duration != 0).then_some(duration),
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicDefinitionBody {
    pub nonce: MosaicNonce,
    pub mosaic_id: MosaicId,
    pub properties: MosaicProperties,
}

impl Transaction {
    /// Define a new mosaic. The id is derived from the nonce and the
    /// owner's public key.
    pub fn mosaic_definition(
        network: NetworkType,
        deadline: Deadline,
        nonce: MosaicNonce,
        owner: &PublicKey,
        properties: MosaicProperties,
    ) -> Self {
        let mosaic_id = MosaicId::from_nonce_and_owner(nonce, owner);
        Self::from_body(
            TransactionBody::MosaicDefinition(MosaicDefinitionBody {
                nonce,
                mosaic_id,
                properties,
            }),
            network,
            deadline,
        )
    }
}

impl MosaicDefinitionBody {
    fn optional_count(&self) -> usize {
        usize::from(self.properties.duration.is_some())
    }

    pub(crate) fn size(&self) -> usize {
        4 + 8 + 1 + 1 + 1 + 9 * self.optional_count()
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_bytes(&self.nonce.0);
        w.write_u64(self.mosaic_id.as_u64());
        w.write_u8(self.optional_count() as u8);
        w.write_u8(self.properties.flags());
        w.write_u8(self.properties.divisibility);
        if let Some(duration) = self.properties.duration {
            w.write_u8(PROPERTY_ID_DURATION);
            w.write_u64(duration);
        }
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let nonce = MosaicNonce(r.read_array::<4>()?);
        let mosaic_id = MosaicId::new(r.read_u64()?);
        let optional_count = r.read_u8()? as usize;
        let flags = r.read_u8()?;
        let divisibility = r.read_u8()?;
        let mut duration = None;
        for _ in 0..optional_count {
            let id = r.read_u8()?;
            let value = r.read_u64()?;
            if id != PROPERTY_ID_DURATION {
                return Err(TransactionError::invalid(
                    "properties",
                    format!("unknown optional property id {id}"),
                ));
            }
            duration = Some(value);
        }
        Ok(TransactionBody::MosaicDefinition(Self {
            nonce,
            mosaic_id,
            properties: MosaicProperties::from_flags(flags, divisibility, duration),
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert("mosaicNonce".into(), Value::from(self.nonce.as_u32()));
        map.insert("mosaicId".into(), dto::u64_json(self.mosaic_id.as_u64()));
        let mut properties = vec![
            json!({
                "id": PROPERTY_ID_FLAGS,
                "value": dto::u64_json(self.properties.flags() as u64),
            }),
            json!({
                "id": PROPERTY_ID_DIVISIBILITY,
                "value": dto::u64_json(self.properties.divisibility as u64),
            }),
        ];
        if let Some(duration) = self.properties.duration {
            properties.push(json!({
                "id": PROPERTY_ID_DURATION,
                "value": dto::u64_json(duration),
            }));
        }
        map.insert("properties".into(), Value::from(properties));
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let nonce = MosaicNonce::new(dto::get_u32(tx, "mosaicNonce")?);
        let mosaic_id = MosaicId::new(dto::get_uint64(tx, "mosaicId")?);

        let mut flags = 0u8;
        let mut divisibility = 0u8;
        let mut duration = None;
        for entry in dto::get_array(tx, "properties")? {
            let entry = dto::as_map(entry, "properties")?;
            let value = dto::get_uint64(entry, "value")?;
            match dto::get_u8(entry, "id")? {
                PROPERTY_ID_FLAGS => {
                    flags = u8::try_from(value).map_err(|_| {
                        TransactionError::invalid("properties", "flags overflow")
                    })?;
                }
                PROPERTY_ID_DIVISIBILITY => {
                    divisibility = u8::try_from(value).map_err(|_| {
                        TransactionError::invalid("properties", "divisibility overflow")
                    })?;
                }
                PROPERTY_ID_DURATION => duration = (value != 0).then_some(value),
                other => {
                    return Err(TransactionError::invalid(
                        "properties",
                        format!("unknown property id {other}"),
                    ));
                }
            }
        }
        Ok(TransactionBody::MosaicDefinition(Self {
            nonce,
            mosaic_id,
            properties: MosaicProperties::from_flags(flags, divisibility, duration),
        }))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, REQUIRED_DTO_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::FeeCalculationStrategy;

    fn owner() -> PublicKey {
        PublicKey::from_hex("1b153f8b76ef60a4bfe152f4de3698bd230bac9dc239d4e448715aa46bd58955")
            .unwrap()
    }

    fn sample(duration: Option<u64>) -> Transaction {
        Transaction::mosaic_definition(
            NetworkType::TestNet,
            Deadline::from_network_ms(5_000_000),
            MosaicNonce::new(0xdead_beef),
            &owner(),
            MosaicProperties::new(true, true, 6, duration),
        )
    }

    #[test]
    fn id_derived_from_nonce_and_owner() {
        let tx = sample(None);
        let TransactionBody::MosaicDefinition(body) = &tx.body else {
            panic!("wrong body kind");
        };
        assert_eq!(
            body.mosaic_id,
            MosaicId::from_nonce_and_owner(MosaicNonce::new(0xdead_beef), &owner())
        );
        // derived ids never collide with namespace ids
        assert_eq!(body.mosaic_id.as_u64() >> 63, 0);
    }

    #[test]
    fn unlimited_duration_contributes_no_bytes() {
        assert_eq!(sample(None).size(), 122 + 15);
        assert_eq!(sample(Some(10_000)).size(), 122 + 15 + 9);
    }

    #[test]
    fn catbuffer_roundtrip_with_and_without_duration() {
        for duration in [None, Some(10_000)] {
            let tx = sample(duration);
            let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
            let back = Transaction::create_from_catbuffer(&bytes).unwrap();
            assert_eq!(back.body, tx.body);
        }
    }

    #[test]
    fn flags_pack_both_bits() {
        let props = MosaicProperties::new(true, false, 0, None);
        assert_eq!(props.flags(), 0x01);
        let props = MosaicProperties::new(false, true, 0, None);
        assert_eq!(props.flags(), 0x02);
        let props = MosaicProperties::new(true, true, 0, None);
        assert_eq!(props.flags(), 0x03);
    }

    #[test]
    fn dto_roundtrip() {
        for duration in [None, Some(777)] {
            let tx = sample(duration);
            let back = Transaction::create_from_dto(&tx.to_dto()).unwrap();
            assert_eq!(back.body, tx.body);
        }
    }

    #[test]
    fn positional_properties_encoding_roundtrip() {
        let props = MosaicProperties::new(true, false, 4, Some(99));
        let back = MosaicProperties::from_dto_array(&props.to_dto_array()).unwrap();
        assert_eq!(back, props);
    }

    #[test]
    fn unknown_optional_property_rejected() {
        let tx = sample(Some(5));
        let mut bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        bytes[122 + 15] = 7; // optional property id slot
        assert!(Transaction::create_from_catbuffer(&bytes).is_err());
    }
}
