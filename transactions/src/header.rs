//! The shared transaction envelope.
//!
//! Standalone layout (122 bytes):
//! `size u32 | signature 64B | signer 32B | version u8 + 2 zero bytes |
//! network u8 | type u16 | max_fee u64 | deadline u64`.
//!
//! Embedded layout (42 bytes, used only inside aggregates):
//! `size u32 | signer 32B | version u8 + 2 zero bytes | network u8 |
//! type u16` — no signature, fee, or deadline, since those belong to the
//! enclosing aggregate.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::entity_type::EntityType;
use crate::error::TransactionError;
use serde_json::Value;
use sirius_types::{Deadline, NetworkType, PublicKey, Signature};

/// Size of the standalone shared header.
pub const TRANSACTION_HEADER_SIZE: usize = 122;
/// Size of the embedded shared header.
pub const EMBEDDED_HEADER_SIZE: usize = 42;

/// Confirmation metadata returned by the network once a transaction is
/// announced; never present on a freshly built transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInfo {
    pub height: u64,
    pub index: u32,
    pub id: Option<String>,
    pub hash: Option<String>,
}

impl TransactionInfo {
    pub(crate) fn to_dto(&self) -> Value {
        let mut meta = DtoMap::new();
        meta.insert("height".into(), dto::u64_json(self.height));
        meta.insert("index".into(), Value::from(self.index));
        if let Some(id) = &self.id {
            meta.insert("id".into(), Value::from(id.clone()));
        }
        if let Some(hash) = &self.hash {
            meta.insert("hash".into(), Value::from(hash.clone()));
        }
        Value::Object(meta)
    }

    pub(crate) fn from_dto(meta: &DtoMap) -> Result<Self, TransactionError> {
        Ok(Self {
            height: dto::get_uint64(meta, "height")?,
            index: dto::get_u32(meta, "index")?,
            id: meta.get("id").and_then(Value::as_str).map(str::to_string),
            hash: meta.get("hash").and_then(Value::as_str).map(str::to_string),
        })
    }
}

/// Fields shared by every transaction kind.
#[derive(Clone, Debug)]
pub struct TransactionHeader {
    pub entity_type: EntityType,
    pub network: NetworkType,
    pub version: u8,
    pub max_fee: u64,
    pub deadline: Deadline,
    /// Present only once signed.
    pub signature: Option<Signature>,
    /// Present once signed or when decoded from the network.
    pub signer: Option<PublicKey>,
    /// Present only for announced/confirmed transactions.
    pub info: Option<TransactionInfo>,
}

impl TransactionHeader {
    /// A fresh unsigned header with the kind's current version and no
    /// declared max fee.
    pub fn create(entity_type: EntityType, network: NetworkType, deadline: Deadline) -> Self {
        Self {
            entity_type,
            network,
            version: entity_type.version(),
            max_fee: 0,
            deadline,
            signature: None,
            signer: None,
            info: None,
        }
    }

    /// Declare an explicit max fee, overriding strategy-derived fees.
    pub fn with_max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    /// The packed DTO version field: version in the low byte, network byte
    /// in bits 24-31.
    pub fn dto_version(&self) -> u32 {
        self.version as u32 | (self.network.value() as u32) << 24
    }

    /// Unpack a DTO version field into (version, network byte).
    pub fn unpack_dto_version(packed: u32) -> (u8, u8) {
        (packed as u8, (packed >> 24) as u8)
    }

    /// Write the standalone header. `total_size` and `fee` are computed by
    /// the caller before any byte is written.
    pub(crate) fn write(&self, total_size: u32, fee: u64, w: &mut CatWriter) {
        w.write_u32(total_size);
        match &self.signature {
            Some(sig) => w.write_bytes(sig.as_bytes()),
            None => w.write_bytes(&[0u8; 64]),
        }
        match &self.signer {
            Some(signer) => w.write_bytes(signer.as_bytes()),
            None => w.write_bytes(&[0u8; 32]),
        }
        w.write_u8(self.version);
        w.write_u8(0);
        w.write_u8(0);
        w.write_u8(self.network.value());
        w.write_u16(self.entity_type.value());
        w.write_u64(fee);
        w.write_u64(self.deadline.to_network_ms());
    }

    /// Read the standalone header, returning it with the declared total
    /// size. Zero-filled signature/signer come back as `None`.
    pub(crate) fn read(r: &mut CatReader<'_>) -> Result<(Self, usize), TransactionError> {
        let size = r.read_u32()? as usize;
        let signature = Signature(r.read_array::<64>()?);
        let signer_bytes = r.read_array::<32>()?;
        let version = r.read_u8()?;
        r.read_bytes(2)?; // reserved padding after the version byte
        let network = NetworkType::from_value(r.read_u8()?)?;
        let entity_type = EntityType::from_value(r.read_u16()?)?;
        let max_fee = r.read_u64()?;
        let deadline = Deadline::from_network_ms(r.read_u64()?);

        let header = Self {
            entity_type,
            network,
            version,
            max_fee,
            deadline,
            signature: (!signature.is_zero()).then_some(signature),
            signer: (signer_bytes != [0u8; 32]).then_some(PublicKey(signer_bytes)),
            info: None,
        };
        Ok((header, size))
    }
}
