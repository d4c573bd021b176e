//! Transfer transaction: move mosaics and an optional message to a
//! recipient.
//!
//! Body layout: `recipient 25B | message size u16 | mosaic count u8 |
//! message bytes | mosaics (id u64 + amount u64 each)`.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::error::TransactionError;
use crate::transaction::{Transaction, TransactionBody};
use serde_json::{json, Value};
use sirius_types::{
    Deadline, Message, Mosaic, MosaicId, NetworkType, Recipient, ADDRESS_SIZE,
};

pub(crate) const REQUIRED_DTO_KEYS: &[&str] = &["recipient", "mosaics"];

#[derive(Clone, Debug, PartialEq)]
pub struct TransferBody {
    pub recipient: Recipient,
    pub mosaics: Vec<Mosaic>,
    pub message: Message,
}

impl Transaction {
    /// Build a transfer transaction.
    pub fn transfer(
        network: NetworkType,
        deadline: Deadline,
        recipient: impl Into<Recipient>,
        mosaics: Vec<Mosaic>,
        message: Message,
    ) -> Result<Self, TransactionError> {
        let body = TransferBody {
            recipient: recipient.into(),
            mosaics,
            message,
        };
        body.check_counts()?;
        Ok(Self::from_body(
            TransactionBody::Transfer(body),
            network,
            deadline,
        ))
    }
}

impl TransferBody {
    /// The mosaic count and message size must fit their wire fields.
    fn check_counts(&self) -> Result<(), TransactionError> {
        if self.mosaics.len() > u8::MAX as usize {
            return Err(TransactionError::Validation(format!(
                "{} mosaics exceed the one-byte count field",
                self.mosaics.len()
            )));
        }
        if self.message.size() > u16::MAX as usize {
            return Err(TransactionError::Validation(format!(
                "message of {} bytes exceeds the two-byte size field",
                self.message.size()
            )));
        }
        Ok(())
    }

    pub(crate) fn size(&self) -> usize {
        ADDRESS_SIZE + 2 + 1 + self.message.size() + 16 * self.mosaics.len()
    }

    pub(crate) fn write(&self, network: NetworkType, w: &mut CatWriter) {
        w.write_bytes(&self.recipient.to_catbuffer(network));
        w.write_u16(self.message.size() as u16);
        w.write_u8(self.mosaics.len() as u8);
        w.write_bytes(&self.message.to_catbuffer());
        for mosaic in &self.mosaics {
            w.write_u64(mosaic.id.as_u64());
            w.write_u64(mosaic.amount);
        }
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let slot: [u8; ADDRESS_SIZE] = r.read_array()?;
        let recipient = Recipient::from_catbuffer(&slot)?;
        let message_size = r.read_u16()? as usize;
        let mosaic_count = r.read_u8()? as usize;
        let message = Message::from_catbuffer(r.read_bytes(message_size)?)?;
        let mut mosaics = Vec::with_capacity(mosaic_count);
        for _ in 0..mosaic_count {
            let id = MosaicId::new(r.read_u64()?);
            let amount = r.read_u64()?;
            mosaics.push(Mosaic::new(id, amount));
        }
        Ok(TransactionBody::Transfer(Self {
            recipient,
            mosaics,
            message,
        }))
    }

    pub(crate) fn dto_fields(&self, network: NetworkType, map: &mut DtoMap) {
        map.insert(
            "recipient".into(),
            Value::from(self.recipient.to_dto(network)),
        );
        map.insert(
            "message".into(),
            json!({
                "type": self.message.kind().value(),
                "payload": self.message.payload_hex(),
            }),
        );
        let mosaics: Vec<Value> = self
            .mosaics
            .iter()
            .map(|m| {
                json!({
                    "id": dto::u64_json(m.id.as_u64()),
                    "amount": dto::u64_json(m.amount),
                })
            })
            .collect();
        map.insert("mosaics".into(), Value::from(mosaics));
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let recipient = Recipient::from_dto(dto::get_str(tx, "recipient")?)?;
        let message = match tx.get("message").and_then(Value::as_object) {
            Some(msg) => Message::from_dto_parts(
                dto::get_u8(msg, "type")?,
                dto::get_str(msg, "payload")?,
            )?,
            None => Message::empty(),
        };
        let mut mosaics = Vec::new();
        for entry in dto::get_array(tx, "mosaics")? {
            let entry = dto::as_map(entry, "mosaics")?;
            mosaics.push(Mosaic::new(
                MosaicId::new(dto::get_uint64(entry, "id")?),
                dto::get_uint64(entry, "amount")?,
            ));
        }
        let body = Self {
            recipient,
            mosaics,
            message,
        };
        body.check_counts()?;
        Ok(TransactionBody::Transfer(body))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, REQUIRED_DTO_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::FeeCalculationStrategy;
    use sirius_types::{Address, NamespaceId, PublicKey};

    fn recipient_address() -> Address {
        let key = PublicKey::from_hex(
            "1b153f8b76ef60a4bfe152f4de3698bd230bac9dc239d4e448715aa46bd58955",
        )
        .unwrap();
        Address::create_from_public_key(&key, NetworkType::TestNet)
    }

    fn sample() -> Transaction {
        Transaction::transfer(
            NetworkType::TestNet,
            Deadline::from_network_ms(5_000_000),
            recipient_address(),
            vec![Mosaic::new(MosaicId::new(0x0dc6_7fbe_1cad_29e3), 100)],
            Message::empty(),
        )
        .unwrap()
    }

    #[test]
    fn single_mosaic_no_message_is_166_bytes() {
        let tx = sample();
        assert_eq!(tx.size(), 166);
        assert_eq!(tx.to_catbuffer(FeeCalculationStrategy::Zero).len(), 166);
    }

    #[test]
    fn catbuffer_roundtrip() {
        let tx = sample();
        let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        let back = Transaction::create_from_catbuffer(&bytes).unwrap();
        assert_eq!(back.body, tx.body);
        assert_eq!(back.header.entity_type, tx.header.entity_type);
        assert_eq!(back.header.deadline, tx.header.deadline);
    }

    #[test]
    fn message_bytes_precede_mosaics() {
        let tx = Transaction::transfer(
            NetworkType::TestNet,
            Deadline::from_network_ms(5_000_000),
            recipient_address(),
            vec![Mosaic::new(MosaicId::new(7), 1)],
            Message::plain("hi"),
        )
        .unwrap();
        let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        // header 122 | recipient 25 | message size 2 | count 1
        assert_eq!(u16::from_le_bytes([bytes[147], bytes[148]]), 3);
        assert_eq!(bytes[149], 1);
        assert_eq!(&bytes[150..153], &[0, b'h', b'i']);
        assert_eq!(u64::from_le_bytes(bytes[153..161].try_into().unwrap()), 7);
    }

    #[test]
    fn alias_recipient_roundtrip() {
        let tx = Transaction::transfer(
            NetworkType::TestNet,
            Deadline::from_network_ms(5_000_000),
            NamespaceId::from_name("alias").unwrap(),
            vec![],
            Message::plain("to an alias"),
        )
        .unwrap();
        let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        let back = Transaction::create_from_catbuffer(&bytes).unwrap();
        assert_eq!(back.body, tx.body);
    }

    #[test]
    fn dto_roundtrip() {
        let tx = Transaction::transfer(
            NetworkType::TestNet,
            Deadline::from_network_ms(5_000_000),
            recipient_address(),
            vec![Mosaic::new(MosaicId::new(42), 12_345)],
            Message::plain("dto"),
        )
        .unwrap();
        let dto = tx.to_dto();
        let back = Transaction::create_from_dto(&dto).unwrap();
        assert_eq!(back.body, tx.body);
        assert_eq!(back.header.max_fee, tx.header.max_fee);
    }

    #[test]
    fn mosaic_count_must_fit_the_count_byte() {
        let mosaics: Vec<Mosaic> = (0..300)
            .map(|i| Mosaic::new(MosaicId::new(i), 1))
            .collect();
        let err = Transaction::transfer(
            NetworkType::TestNet,
            Deadline::from_network_ms(5_000_000),
            recipient_address(),
            mosaics,
            Message::empty(),
        )
        .unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }

    #[test]
    fn oversized_message_rejected() {
        let err = Transaction::transfer(
            NetworkType::TestNet,
            Deadline::from_network_ms(5_000_000),
            recipient_address(),
            vec![],
            Message::plain("m".repeat(70_000)),
        )
        .unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }

    #[test]
    fn truncated_buffer_rejected() {
        let tx = sample();
        let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        assert!(Transaction::create_from_catbuffer(&bytes[..150]).is_err());
    }

    #[test]
    fn wrong_network_rejected_by_checked_decode() {
        let bytes = sample().to_catbuffer(FeeCalculationStrategy::Zero);
        let err =
            Transaction::create_from_catbuffer_on(NetworkType::MainNet, &bytes).unwrap_err();
        assert!(matches!(err, TransactionError::NetworkMismatch { .. }));
    }
}
