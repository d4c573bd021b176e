//! Account-link transaction: delegate harvesting to a remote account.
//!
//! Body layout: `remote public key 32B | link action u8`.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::error::TransactionError;
use crate::transaction::{Transaction, TransactionBody};
use serde_json::Value;
use sirius_types::{Deadline, NetworkType, PublicKey};

pub(crate) const REQUIRED_DTO_KEYS: &[&str] = &["remoteAccountKey", "action"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkAction {
    Link,
    Unlink,
}

impl LinkAction {
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
                "action",
                format!("unknown value {other}"),
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountLinkBody {
    pub remote_account_key: PublicKey,
    pub action: LinkAction,
}

impl Transaction {
    pub fn account_link(
        network: NetworkType,
        deadline: Deadline,
        remote_account_key: PublicKey,
        action: LinkAction,
    ) -> Self {
        Self::from_body(
            TransactionBody::AccountLink(AccountLinkBody {
                remote_account_key,
                action,
            }),
            network,
            deadline,
        )
    }
}

impl AccountLinkBody {
    pub(crate) fn size(&self) -> usize {
        32 + 1
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_bytes(self.remote_account_key.as_bytes());
        w.write_u8(self.action.value());
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Ok(TransactionBody::AccountLink(Self {
            remote_account_key: PublicKey(r.read_array::<32>()?),
            action: LinkAction::from_value(r.read_u8()?)?,
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert(
            "remoteAccountKey".into(),
            Value::from(self.remote_account_key.to_hex()),
        );
        map.insert("action".into(), Value::from(self.action.value()));
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Ok(TransactionBody::AccountLink(Self {
            remote_account_key: PublicKey::from_hex(dto::get_str(tx, "remoteAccountKey")?)?,
            action: LinkAction::from_value(dto::get_u8(tx, "action")?)?,
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

    #[test]
    fn roundtrip_both_actions() {
        let remote = PublicKey::from_hex(
            "4afeb0cfde8cd84b8ae905fa07f1e0b37570ca6b4c0de7a1fd88aae02a556dff",
        )
        .unwrap();
        for action in [LinkAction::Link, LinkAction::Unlink] {
            let tx = Transaction::account_link(
                NetworkType::MainNet,
                Deadline::from_network_ms(5_000_000),
                remote,
                action,
            );
            assert_eq!(tx.size(), 122 + 33);
            let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
            assert_eq!(Transaction::create_from_catbuffer(&bytes).unwrap().body, tx.body);
            assert_eq!(Transaction::create_from_dto(&tx.to_dto()).unwrap().body, tx.body);
        }
    }
}
