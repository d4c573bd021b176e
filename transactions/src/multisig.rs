//! Modify-multisig-account transaction: convert an account to multisig or
//! adjust its cosignatory set and approval thresholds.
//!
//! Body layout: `min removal delta i8 | min approval delta i8 |
//! modification count u8 | modifications (type u8 + public key 32B each)`.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::error::TransactionError;
use crate::transaction::{Transaction, TransactionBody};
use serde_json::{json, Value};
use sirius_types::{Deadline, NetworkType, PublicKey};

pub(crate) const REQUIRED_DTO_KEYS: &[&str] =
    &["minRemovalDelta", "minApprovalDelta", "modifications"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultisigModificationType {
    Add,
    Remove,
}

impl MultisigModificationType {
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

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CosignatoryModification {
    pub kind: MultisigModificationType,
    pub cosignatory: PublicKey,
}

impl CosignatoryModification {
    pub fn add(cosignatory: PublicKey) -> Self {
        Self {
            kind: MultisigModificationType::Add,
            cosignatory,
        }
    }

    pub fn remove(cosignatory: PublicKey) -> Self {
        Self {
            kind: MultisigModificationType::Remove,
            cosignatory,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifyMultisigBody {
    pub min_removal_delta: i8,
    pub min_approval_delta: i8,
    pub modifications: Vec<CosignatoryModification>,
}

impl Transaction {
    pub fn modify_multisig_account(
        network: NetworkType,
        deadline: Deadline,
        min_removal_delta: i8,
        min_approval_delta: i8,
        modifications: Vec<CosignatoryModification>,
    ) -> Result<Self, TransactionError> {
        let body = ModifyMultisigBody {
            min_removal_delta,
            min_approval_delta,
            modifications,
        };
        body.check_counts()?;
        Ok(Self::from_body(
            TransactionBody::ModifyMultisig(body),
            network,
            deadline,
        ))
    }
}

impl ModifyMultisigBody {
    /// The modification count must fit its one-byte wire field.
    fn check_counts(&self) -> Result<(), TransactionError> {
        if self.modifications.len() > u8::MAX as usize {
            return Err(TransactionError::Validation(format!(
                "{} modifications exceed the one-byte count field",
                self.modifications.len()
            )));
        }
        Ok(())
    }

    pub(crate) fn size(&self) -> usize {
        1 + 1 + 1 + 33 * self.modifications.len()
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_i8(self.min_removal_delta);
        w.write_i8(self.min_approval_delta);
        w.write_u8(self.modifications.len() as u8);
        for m in &self.modifications {
            w.write_u8(m.kind.value());
            w.write_bytes(m.cosignatory.as_bytes());
        }
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let min_removal_delta = r.read_i8()?;
        let min_approval_delta = r.read_i8()?;
        let count = r.read_u8()? as usize;
        let mut modifications = Vec::with_capacity(count);
        for _ in 0..count {
            let kind = MultisigModificationType::from_value(r.read_u8()?)?;
            let cosignatory = PublicKey(r.read_array::<32>()?);
            modifications.push(CosignatoryModification { kind, cosignatory });
        }
        Ok(TransactionBody::ModifyMultisig(Self {
            min_removal_delta,
            min_approval_delta,
            modifications,
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert(
            "minRemovalDelta".into(),
            Value::from(self.min_removal_delta),
        );
        map.insert(
            "minApprovalDelta".into(),
            Value::from(self.min_approval_delta),
        );
        let mods: Vec<Value> = self
            .modifications
            .iter()
            .map(|m| {
                json!({
                    "type": m.kind.value(),
                    "cosignatoryPublicKey": m.cosignatory.to_hex(),
                })
            })
            .collect();
        map.insert("modifications".into(), Value::from(mods));
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let mut modifications = Vec::new();
        for entry in dto::get_array(tx, "modifications")? {
            let entry = dto::as_map(entry, "modifications")?;
            modifications.push(CosignatoryModification {
                kind: MultisigModificationType::from_value(dto::get_u8(entry, "type")?)?,
                cosignatory: PublicKey::from_hex(dto::get_str(entry, "cosignatoryPublicKey")?)?,
            });
        }
        let body = Self {
            min_removal_delta: dto::get_i8(tx, "minRemovalDelta")?,
            min_approval_delta: dto::get_i8(tx, "minApprovalDelta")?,
            modifications,
        };
        body.check_counts()?;
        Ok(TransactionBody::ModifyMultisig(body))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, REQUIRED_DTO_KEYS)
    }
}
