//! Blockchain-upgrade transaction: schedule a mandatory node version bump.
//!
//! Body layout: `upgrade period u64 | new version u64`.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::error::TransactionError;
use crate::transaction::{Transaction, TransactionBody};
use sirius_types::{Deadline, NetworkType};

pub(crate) const REQUIRED_DTO_KEYS: &[&str] = &["upgradePeriod", "newBlockchainVersion"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockchainUpgradeBody {
    /// Blocks until the new version becomes mandatory.
    pub upgrade_period: u64,
    /// Packed version: four 16-bit components, major first.
    pub new_version: u64,
}

impl Transaction {
    pub fn blockchain_upgrade(
        network: NetworkType,
        deadline: Deadline,
        upgrade_period: u64,
        new_version: u64,
    ) -> Self {
        Self::from_body(
            TransactionBody::BlockchainUpgrade(BlockchainUpgradeBody {
                upgrade_period,
                new_version,
            }),
            network,
            deadline,
        )
    }
}

impl BlockchainUpgradeBody {
    pub(crate) fn size(&self) -> usize {
        8 + 8
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u64(self.upgrade_period);
        w.write_u64(self.new_version);
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Ok(TransactionBody::BlockchainUpgrade(Self {
            upgrade_period: r.read_u64()?,
            new_version: r.read_u64()?,
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert("upgradePeriod".into(), dto::u64_json(self.upgrade_period));
        map.insert(
            "newBlockchainVersion".into(),
            dto::u64_json(self.new_version),
        );
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        Ok(TransactionBody::BlockchainUpgrade(Self {
            upgrade_period: dto::get_uint64(tx, "upgradePeriod")?,
            new_version: dto::get_uint64(tx, "newBlockchainVersion")?,
        }))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, REQUIRED_DTO_KEYS)
    }
}
