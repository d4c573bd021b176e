//! Aggregate transactions: several embedded transactions committed as one
//! unit, complete (all signatures present at announce) or bonded (partial,
//! completed by later cosignatures).
//!
//! Body layout: `payload size u32 | embedded transactions`, each embedded
//! transaction self-describing its size. Cosignature records (signer 32B +
//! signature 64B) follow the payload; they are appended by the signing
//! step, never by the body encoder, so a freshly built aggregate and a
//! decoded announced one share this type.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::entity_type::EntityType;
use crate::error::TransactionError;
use crate::signed::AggregateTransactionCosignature;
use crate::transaction::{InnerTransaction, Transaction, TransactionBody};
use serde_json::Value;
use sirius_account::PublicAccount;
use sirius_types::{Deadline, NetworkType, PublicKey, Signature};

pub(crate) const REQUIRED_DTO_KEYS: &[&str] = &["transactions"];

/// Size of one trailing cosignature record.
pub const COSIGNATURE_SIZE: usize = 96;

#[derive(Clone, Debug, PartialEq)]
pub struct AggregateBody {
    bonded: bool,
    pub inner_transactions: Vec<InnerTransaction>,
    /// Cosignatures seen when decoding an announced aggregate; empty on a
    /// freshly built one.
    pub cosignatures: Vec<AggregateTransactionCosignature>,
}

impl AggregateBody {
    pub fn complete(inner_transactions: Vec<InnerTransaction>) -> Self {
        Self {
            bonded: false,
            inner_transactions,
            cosignatures: Vec::new(),
        }
    }

    pub fn bonded(inner_transactions: Vec<InnerTransaction>) -> Self {
        Self {
            bonded: true,
            inner_transactions,
            cosignatures: Vec::new(),
        }
    }

    pub fn is_bonded(&self) -> bool {
        self.bonded
    }

    pub(crate) fn entity_type(&self) -> EntityType {
        if self.bonded {
            EntityType::AggregateBonded
        } else {
            EntityType::AggregateComplete
        }
    }

    fn payload_size(&self) -> usize {
        self.inner_transactions.iter().map(InnerTransaction::size).sum()
    }

    pub(crate) fn size(&self) -> usize {
        4 + self.payload_size()
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u32(self.payload_size() as u32);
        for inner in &self.inner_transactions {
            inner.write(w);
        }
    }

    fn read_kind(
        r: &mut CatReader<'_>,
        network: NetworkType,
        bonded: bool,
    ) -> Result<TransactionBody, TransactionError> {
        let payload_size = r.read_u32()? as usize;
        let mut payload = r.sub_reader(payload_size)?;
        let mut inner_transactions = Vec::new();
        while !payload.is_empty() {
            inner_transactions.push(InnerTransaction::read(&mut payload)?);
        }

        // whatever follows the payload must be whole cosignature records
        if r.remaining() % COSIGNATURE_SIZE != 0 {
            return Err(TransactionError::SizeMismatch {
                declared: COSIGNATURE_SIZE,
                actual: r.remaining() % COSIGNATURE_SIZE,
            });
        }
        let mut cosignatures = Vec::with_capacity(r.remaining() / COSIGNATURE_SIZE);
        while !r.is_empty() {
            let signer = PublicKey(r.read_array::<32>()?);
            let signature = Signature(r.read_array::<64>()?);
            cosignatures.push(AggregateTransactionCosignature {
                signature,
                signer: PublicAccount::from_public_key(signer, network),
            });
        }
        Ok(TransactionBody::Aggregate(Self {
            bonded,
            inner_transactions,
            cosignatures,
        }))
    }

    pub(crate) fn read_complete_body(
        r: &mut CatReader<'_>,
        network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Self::read_kind(r, network, false)
    }

    pub(crate) fn read_bonded_body(
        r: &mut CatReader<'_>,
        network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Self::read_kind(r, network, true)
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        let transactions: Vec<Value> = self
            .inner_transactions
            .iter()
            .map(InnerTransaction::to_dto)
            .collect();
        map.insert("transactions".into(), Value::from(transactions));
        let cosignatures: Vec<Value> = self
            .cosignatures
            .iter()
            .map(|c| {
                let mut entry = DtoMap::new();
                entry.insert("signature".into(), Value::from(c.signature.to_hex()));
                entry.insert("signer".into(), Value::from(c.signer.public_key().to_hex()));
                Value::Object(entry)
            })
            .collect();
        map.insert("cosignatures".into(), Value::from(cosignatures));
    }

    fn body_from_dto_kind(
        tx: &DtoMap,
        network: NetworkType,
        bonded: bool,
    ) -> Result<TransactionBody, TransactionError> {
        let mut inner_transactions = Vec::new();
        for entry in dto::get_array(tx, "transactions")? {
            inner_transactions.push(InnerTransaction::from_dto(entry)?);
        }
        let mut cosignatures = Vec::new();
        if let Some(list) = tx.get("cosignatures").and_then(Value::as_array) {
            for entry in list {
                let entry = dto::as_map(entry, "cosignatures")?;
                let signer = PublicKey::from_hex(dto::get_str(entry, "signer")?)?;
                cosignatures.push(AggregateTransactionCosignature {
                    signature: Signature::from_hex(dto::get_str(entry, "signature")?)?,
                    signer: PublicAccount::from_public_key(signer, network),
                });
            }
        }
        Ok(TransactionBody::Aggregate(Self {
            bonded,
            inner_transactions,
            cosignatures,
        }))
    }

    pub(crate) fn complete_body_from_dto(
        tx: &DtoMap,
        network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Self::body_from_dto_kind(tx, network, false)
    }

    pub(crate) fn bonded_body_from_dto(
        tx: &DtoMap,
        network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Self::body_from_dto_kind(tx, network, true)
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, REQUIRED_DTO_KEYS)
    }
}

impl Transaction {
    /// An aggregate announced with every required signature already
    /// attached.
    pub fn aggregate_complete(
        network: NetworkType,
        deadline: Deadline,
        inner_transactions: Vec<InnerTransaction>,
    ) -> Self {
        Self::from_body(
            TransactionBody::Aggregate(AggregateBody::complete(inner_transactions)),
            network,
            deadline,
        )
    }

    /// An aggregate announced partially signed, to be completed by
    /// cosignatures; requires an accompanying funds lock.
    pub fn aggregate_bonded(
        network: NetworkType,
        deadline: Deadline,
        inner_transactions: Vec<InnerTransaction>,
    ) -> Self {
        Self::from_body(
            TransactionBody::Aggregate(AggregateBody::bonded(inner_transactions)),
            network,
            deadline,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee::FeeCalculationStrategy;
    use sirius_types::{Message, Mosaic, MosaicId};

    fn deadline() -> Deadline {
        Deadline::from_network_ms(5_000_000)
    }

    fn signer_key(last: u8) -> PublicKey {
        let mut bytes = [0x22u8; 32];
        bytes[31] = last;
        PublicKey(bytes)
    }

    fn inner_transfer(last: u8) -> InnerTransaction {
        let recipient = sirius_types::Address::create_from_public_key(
            &signer_key(0xff),
            NetworkType::TestNet,
        );
        Transaction::transfer(
            NetworkType::TestNet,
            deadline(),
            recipient,
            vec![Mosaic::new(MosaicId::new(9), 50)],
            Message::empty(),
        )
        .unwrap()
        .to_inner(signer_key(last))
        .unwrap()
    }

    #[test]
    fn embedded_transfer_is_86_bytes() {
        // 42-byte embedded header + 44-byte transfer body
        assert_eq!(inner_transfer(1).size(), 86);
    }

    #[test]
    fn catbuffer_roundtrip_both_kinds() {
        for bonded in [false, true] {
            let inner = vec![inner_transfer(1), inner_transfer(2)];
            let tx = if bonded {
                Transaction::aggregate_bonded(NetworkType::TestNet, deadline(), inner)
            } else {
                Transaction::aggregate_complete(NetworkType::TestNet, deadline(), inner)
            };
            assert_eq!(tx.size(), 122 + 4 + 2 * 86);
            let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
            let back = Transaction::create_from_catbuffer(&bytes).unwrap();
            assert_eq!(back.body, tx.body);
            assert_eq!(back.header.entity_type, tx.header.entity_type);
        }
    }

    #[test]
    fn trailing_cosignature_records_decode() {
        let tx = Transaction::aggregate_bonded(
            NetworkType::TestNet,
            deadline(),
            vec![inner_transfer(1)],
        );
        let mut bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        bytes.extend_from_slice(signer_key(7).as_bytes());
        bytes.extend_from_slice(&[0x55u8; 64]);
        let total = bytes.len() as u32;
        bytes[0..4].copy_from_slice(&total.to_le_bytes());

        let back = Transaction::create_from_catbuffer(&bytes).unwrap();
        let TransactionBody::Aggregate(body) = &back.body else {
            panic!("wrong body kind");
        };
        assert_eq!(body.cosignatures.len(), 1);
        assert_eq!(*body.cosignatures[0].signer.public_key(), signer_key(7));
        assert_eq!(body.cosignatures[0].signature, Signature([0x55; 64]));
    }

    #[test]
    fn partial_cosignature_record_rejected() {
        let tx = Transaction::aggregate_bonded(
            NetworkType::TestNet,
            deadline(),
            vec![inner_transfer(1)],
        );
        let mut bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        bytes.extend_from_slice(&[0u8; 48]); // half a record
        let total = bytes.len() as u32;
        bytes[0..4].copy_from_slice(&total.to_le_bytes());
        assert!(Transaction::create_from_catbuffer(&bytes).is_err());
    }

    #[test]
    fn dto_roundtrip_with_cosignatures() {
        let inner = vec![inner_transfer(1)];
        let mut tx = Transaction::aggregate_bonded(NetworkType::TestNet, deadline(), inner);
        if let TransactionBody::Aggregate(body) = &mut tx.body {
            body.cosignatures.push(AggregateTransactionCosignature {
                signature: Signature([0x66; 64]),
                signer: PublicAccount::from_public_key(signer_key(3), NetworkType::TestNet),
            });
        }
        let back = Transaction::create_from_dto(&tx.to_dto()).unwrap();
        assert_eq!(back.body, tx.body);
    }

    #[test]
    fn aggregates_cannot_be_embedded() {
        let tx = Transaction::aggregate_complete(
            NetworkType::TestNet,
            deadline(),
            vec![inner_transfer(1)],
        );
        let err = tx.to_inner(signer_key(9)).unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }

    #[test]
    fn nested_aggregates_cannot_be_built_from_the_wire() {
        let inner = inner_transfer(1);
        let mut w = CatWriter::new();
        inner.write(&mut w);
        let mut bytes = w.into_bytes();
        // overwrite the embedded type code with the aggregate code
        let code = EntityType::AggregateComplete.value().to_le_bytes();
        bytes[40] = code[0];
        bytes[41] = code[1];
        let mut r = CatReader::new(&bytes);
        assert!(InnerTransaction::read(&mut r).is_err());
    }
}
