//! Lock transactions: the funds lock backing a bonded aggregate, and the
//! secret lock / secret proof pair used for cross-chain swaps.

use crate::catbuffer::{CatReader, CatWriter};
use crate::dto::{self, DtoMap};
use crate::error::TransactionError;
use crate::signed::SignedTransaction;
use crate::transaction::{Transaction, TransactionBody};
use serde_json::Value;
use sirius_types::{Address, Deadline, Mosaic, MosaicId, NetworkType, ADDRESS_SIZE};

pub(crate) const LOCK_FUNDS_REQUIRED_DTO_KEYS: &[&str] =
    &["mosaicId", "amount", "duration", "hash"];
pub(crate) const SECRET_LOCK_REQUIRED_DTO_KEYS: &[&str] =
    &["mosaicId", "amount", "duration", "hashAlgorithm", "secret", "recipient"];
pub(crate) const SECRET_PROOF_REQUIRED_DTO_KEYS: &[&str] =
    &["hashAlgorithm", "secret", "recipient", "proof"];

/// The hash algorithm a secret lock commits under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashType {
    Sha3_256,
    Keccak256,
    Hash160,
    Hash256,
}

impl HashType {
    pub fn value(&self) -> u8 {
        match self {
            Self::Sha3_256 => 0,
            Self::Keccak256 => 1,
            Self::Hash160 => 2,
            Self::Hash256 => 3,
        }
    }

    pub fn from_value(value: u8) -> Result<Self, TransactionError> {
        match value {
            0 => Ok(Self::Sha3_256),
            1 => Ok(Self::Keccak256),
            2 => Ok(Self::Hash160),
            3 => Ok(Self::Hash256),
            other => Err(TransactionError::invalid(
                "hashAlgorithm",
                format!("unknown value {other}"),
            )),
        }
    }

    /// Expected hex length of a secret under this algorithm.
    pub fn secret_hex_len(&self) -> usize {
        match self {
            Self::Hash160 => 40,
            _ => 64,
        }
    }

    /// Whether `secret` is a well-formed hex digest for this algorithm.
    pub fn validate_secret(&self, secret: &str) -> bool {
        secret.len() == self.secret_hex_len()
            && secret.chars().all(|c| c.is_ascii_hexdigit())
    }
}

/// Decode a secret into its zero-padded 32-byte wire form.
fn secret_to_wire(hash_type: HashType, secret: &str) -> Result<[u8; 32], TransactionError> {
    if !hash_type.validate_secret(secret) {
        return Err(TransactionError::Validation(format!(
            "secret must be {} hex chars for {hash_type:?}",
            hash_type.secret_hex_len()
        )));
    }
    let raw = hex::decode(secret)
        .map_err(|e| TransactionError::invalid("secret", e.to_string()))?;
    let mut wire = [0u8; 32];
    wire[..raw.len()].copy_from_slice(&raw);
    Ok(wire)
}

/// Recover the hex secret from its wire form, trimming the padding for
/// 20-byte digests.
fn secret_from_wire(hash_type: HashType, wire: &[u8; 32]) -> String {
    hex::encode(&wire[..hash_type.secret_hex_len() / 2])
}

/// Lock of funds that must accompany an announced bonded aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockFundsBody {
    pub mosaic: Mosaic,
    /// Lock duration in blocks.
    pub duration: u64,
    /// Hash of the signed bonded aggregate.
    pub hash: [u8; 32],
}

impl Transaction {
    /// Lock funds against a signed bonded aggregate.
    pub fn lock_funds(
        network: NetworkType,
        deadline: Deadline,
        mosaic: Mosaic,
        duration: u64,
        signed: &SignedTransaction,
    ) -> Result<Self, TransactionError> {
        if signed.entity_type() != crate::entity_type::EntityType::AggregateBonded {
            return Err(TransactionError::Validation(
                "lock funds requires a signed bonded aggregate".into(),
            ));
        }
        let mut hash = [0u8; 32];
        hex::decode_to_slice(signed.hash(), &mut hash)
            .map_err(|e| TransactionError::invalid("hash", e.to_string()))?;
        Ok(Self::from_body(
            TransactionBody::LockFunds(LockFundsBody {
                mosaic,
                duration,
                hash,
            }),
            network,
            deadline,
        ))
    }

    pub fn secret_lock(
        network: NetworkType,
        deadline: Deadline,
        mosaic: Mosaic,
        duration: u64,
        hash_type: HashType,
        secret: &str,
        recipient: Address,
    ) -> Result<Self, TransactionError> {
        Ok(Self::from_body(
            TransactionBody::SecretLock(SecretLockBody {
                mosaic,
                duration,
                hash_type,
                secret: secret_to_wire(hash_type, secret)?,
                recipient,
            }),
            network,
            deadline,
        ))
    }

    pub fn secret_proof(
        network: NetworkType,
        deadline: Deadline,
        hash_type: HashType,
        secret: &str,
        recipient: Address,
        proof: Vec<u8>,
    ) -> Result<Self, TransactionError> {
        if proof.len() > u16::MAX as usize {
            return Err(TransactionError::Validation(format!(
                "proof of {} bytes exceeds the two-byte size field",
                proof.len()
            )));
        }
        Ok(Self::from_body(
            TransactionBody::SecretProof(SecretProofBody {
                hash_type,
                secret: secret_to_wire(hash_type, secret)?,
                recipient,
                proof,
            }),
            network,
            deadline,
        ))
    }
}

impl LockFundsBody {
    pub(crate) fn size(&self) -> usize {
        16 + 8 + 32
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u64(self.mosaic.id.as_u64());
        w.write_u64(self.mosaic.amount);
        w.write_u64(self.duration);
        w.write_bytes(&self.hash);
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let mosaic = Mosaic::new(MosaicId::new(r.read_u64()?), r.read_u64()?);
        let duration = r.read_u64()?;
        let hash = r.read_array::<32>()?;
        Ok(TransactionBody::LockFunds(Self {
            mosaic,
            duration,
            hash,
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert("mosaicId".into(), dto::u64_json(self.mosaic.id.as_u64()));
        map.insert("amount".into(), dto::u64_json(self.mosaic.amount));
        map.insert("duration".into(), dto::u64_json(self.duration));
        map.insert("hash".into(), Value::from(hex::encode_upper(self.hash)));
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let mut hash = [0u8; 32];
        hex::decode_to_slice(dto::get_str(tx, "hash")?, &mut hash)
            .map_err(|_| TransactionError::invalid("hash", "expected 64 hex chars"))?;
        Ok(TransactionBody::LockFunds(Self {
            mosaic: Mosaic::new(
                MosaicId::new(dto::get_uint64(tx, "mosaicId")?),
                dto::get_uint64(tx, "amount")?,
            ),
            duration: dto::get_uint64(tx, "duration")?,
            hash,
        }))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, LOCK_FUNDS_REQUIRED_DTO_KEYS)
    }
}

/// Lock of funds claimable by whoever reveals the secret's preimage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretLockBody {
    pub mosaic: Mosaic,
    pub duration: u64,
    pub hash_type: HashType,
    /// Digest of the preimage in its wire form: zero-padded to 32 bytes
    /// for 20-byte algorithms.
    pub secret: [u8; 32],
    pub recipient: Address,
}

impl SecretLockBody {
    pub(crate) fn size(&self) -> usize {
        16 + 8 + 1 + 32 + ADDRESS_SIZE
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u64(self.mosaic.id.as_u64());
        w.write_u64(self.mosaic.amount);
        w.write_u64(self.duration);
        w.write_u8(self.hash_type.value());
        w.write_bytes(&self.secret);
        w.write_bytes(self.recipient.as_bytes());
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let mosaic = Mosaic::new(MosaicId::new(r.read_u64()?), r.read_u64()?);
        let duration = r.read_u64()?;
        let hash_type = HashType::from_value(r.read_u8()?)?;
        let secret = r.read_array::<32>()?;
        let recipient = Address::from_bytes(r.read_array::<ADDRESS_SIZE>()?)?;
        Ok(TransactionBody::SecretLock(Self {
            mosaic,
            duration,
            hash_type,
            secret,
            recipient,
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert("mosaicId".into(), dto::u64_json(self.mosaic.id.as_u64()));
        map.insert("amount".into(), dto::u64_json(self.mosaic.amount));
        map.insert("duration".into(), dto::u64_json(self.duration));
        map.insert(
            "hashAlgorithm".into(),
            Value::from(self.hash_type.value()),
        );
        map.insert(
            "secret".into(),
            Value::from(secret_from_wire(self.hash_type, &self.secret)),
        );
        map.insert(
            "recipient".into(),
            Value::from(self.recipient.encode_hex()),
        );
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let hash_type = HashType::from_value(dto::get_u8(tx, "hashAlgorithm")?)?;
        let secret = secret_to_wire(hash_type, &dto::get_str(tx, "secret")?.to_lowercase())?;
        Ok(TransactionBody::SecretLock(Self {
            mosaic: Mosaic::new(
                MosaicId::new(dto::get_uint64(tx, "mosaicId")?),
                dto::get_uint64(tx, "amount")?,
            ),
            duration: dto::get_uint64(tx, "duration")?,
            hash_type,
            secret,
            recipient: Address::create_from_encoded(dto::get_str(tx, "recipient")?)?,
        }))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, SECRET_LOCK_REQUIRED_DTO_KEYS)
    }
}

/// Reveal of a secret-lock preimage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretProofBody {
    pub hash_type: HashType,
    /// Digest of the preimage in its wire form: zero-padded to 32 bytes
    /// for 20-byte algorithms.
    pub secret: [u8; 32],
    pub recipient: Address,
    pub proof: Vec<u8>,
}

impl SecretProofBody {
    pub(crate) fn size(&self) -> usize {
        1 + 32 + ADDRESS_SIZE + 2 + self.proof.len()
    }

    pub(crate) fn write(&self, w: &mut CatWriter) {
        w.write_u8(self.hash_type.value());
        w.write_bytes(&self.secret);
        w.write_bytes(self.recipient.as_bytes());
        w.write_u16(self.proof.len() as u16);
        w.write_bytes(&self.proof);
    }

    pub(crate) fn read_body(
        r: &mut CatReader<'_>,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let hash_type = HashType::from_value(r.read_u8()?)?;
        let secret = r.read_array::<32>()?;
        let recipient = Address::from_bytes(r.read_array::<ADDRESS_SIZE>()?)?;
        let proof_size = r.read_u16()? as usize;
        let proof = r.read_bytes(proof_size)?.to_vec();
        Ok(TransactionBody::SecretProof(Self {
            hash_type,
            secret,
            recipient,
            proof,
        }))
    }

    pub(crate) fn dto_fields(&self, map: &mut DtoMap) {
        map.insert(
            "hashAlgorithm".into(),
            Value::from(self.hash_type.value()),
        );
        map.insert(
            "secret".into(),
            Value::from(secret_from_wire(self.hash_type, &self.secret)),
        );
        map.insert(
            "recipient".into(),
            Value::from(self.recipient.encode_hex()),
        );
        map.insert("proof".into(), Value::from(hex::encode(&self.proof)));
    }

    pub(crate) fn body_from_dto(
        tx: &DtoMap,
        _network: NetworkType,
    ) -> Result<TransactionBody, TransactionError> {
        let hash_type = HashType::from_value(dto::get_u8(tx, "hashAlgorithm")?)?;
        let secret = secret_to_wire(hash_type, &dto::get_str(tx, "secret")?.to_lowercase())?;
        let proof = hex::decode(dto::get_str(tx, "proof")?)
            .map_err(|e| TransactionError::invalid("proof", e.to_string()))?;
        if proof.len() > u16::MAX as usize {
            return Err(TransactionError::invalid(
                "proof",
                "exceeds the two-byte size field",
            ));
        }
        Ok(TransactionBody::SecretProof(Self {
            hash_type,
            secret,
            recipient: Address::create_from_encoded(dto::get_str(tx, "recipient")?)?,
            proof,
        }))
    }

    pub(crate) fn validate_dto(tx: &DtoMap) -> bool {
        dto::has_keys(tx, SECRET_PROOF_REQUIRED_DTO_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_type::EntityType;
    use crate::fee::FeeCalculationStrategy;
    use sirius_types::PublicKey;

    fn deadline() -> Deadline {
        Deadline::from_network_ms(5_000_000)
    }

    fn recipient() -> Address {
        let key = PublicKey::from_hex(
            "1b153f8b76ef60a4bfe152f4de3698bd230bac9dc239d4e448715aa46bd58955",
        )
        .unwrap();
        Address::create_from_public_key(&key, NetworkType::TestNet)
    }

    fn bonded_hash() -> String {
        "C9".repeat(32)
    }

    fn signed_bonded() -> SignedTransaction {
        SignedTransaction::create_from_hash(
            String::new(),
            bonded_hash(),
            EntityType::AggregateBonded,
            NetworkType::TestNet,
        )
        .unwrap()
    }

    #[test]
    fn lock_funds_roundtrip() {
        let tx = Transaction::lock_funds(
            NetworkType::TestNet,
            deadline(),
            Mosaic::new(MosaicId::new(42), 10_000_000),
            240,
            &signed_bonded(),
        )
        .unwrap();
        assert_eq!(tx.size(), 122 + 56);
        let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        let back = Transaction::create_from_catbuffer(&bytes).unwrap();
        assert_eq!(back.body, tx.body);
        let TransactionBody::LockFunds(body) = &back.body else {
            panic!("wrong body kind");
        };
        assert_eq!(hex::encode_upper(body.hash), bonded_hash());
        assert_eq!(Transaction::create_from_dto(&tx.to_dto()).unwrap().body, tx.body);
    }

    #[test]
    fn lock_funds_rejects_non_bonded_hash() {
        let signed = SignedTransaction::create_from_hash(
            String::new(),
            bonded_hash(),
            EntityType::Transfer,
            NetworkType::TestNet,
        )
        .unwrap();
        assert!(Transaction::lock_funds(
            NetworkType::TestNet,
            deadline(),
            Mosaic::new(MosaicId::new(42), 10),
            240,
            &signed,
        )
        .is_err());
    }

    #[test]
    fn secret_lock_roundtrip_all_algorithms() {
        for hash_type in [
            HashType::Sha3_256,
            HashType::Keccak256,
            HashType::Hash160,
            HashType::Hash256,
        ] {
            let secret = "ab".repeat(hash_type.secret_hex_len() / 2);
            let tx = Transaction::secret_lock(
                NetworkType::TestNet,
                deadline(),
                Mosaic::new(MosaicId::new(7), 100),
                96,
                hash_type,
                &secret,
                recipient(),
            )
            .unwrap();
            assert_eq!(tx.size(), 122 + 82);
            let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
            assert_eq!(
                Transaction::create_from_catbuffer(&bytes).unwrap().body,
                tx.body,
                "{hash_type:?}"
            );
            assert_eq!(Transaction::create_from_dto(&tx.to_dto()).unwrap().body, tx.body);
        }
    }

    #[test]
    fn secret_length_validated_per_algorithm() {
        let sixty_four = "ab".repeat(32);
        assert!(Transaction::secret_lock(
            NetworkType::TestNet,
            deadline(),
            Mosaic::new(MosaicId::new(7), 100),
            96,
            HashType::Hash160,
            &sixty_four,
            recipient(),
        )
        .is_err());
        assert!(HashType::Hash160.validate_secret(&"cd".repeat(20)));
        assert!(!HashType::Sha3_256.validate_secret("zz"));
    }

    #[test]
    fn secret_proof_roundtrip() {
        let tx = Transaction::secret_proof(
            NetworkType::TestNet,
            deadline(),
            HashType::Sha3_256,
            &"ef".repeat(32),
            recipient(),
            b"the preimage".to_vec(),
        )
        .unwrap();
        assert_eq!(tx.size(), 122 + 60 + 12);
        let bytes = tx.to_catbuffer(FeeCalculationStrategy::Zero);
        assert_eq!(Transaction::create_from_catbuffer(&bytes).unwrap().body, tx.body);
        assert_eq!(Transaction::create_from_dto(&tx.to_dto()).unwrap().body, tx.body);
    }

    #[test]
    fn oversized_proof_rejected() {
        let err = Transaction::secret_proof(
            NetworkType::TestNet,
            deadline(),
            HashType::Sha3_256,
            &"ef".repeat(32),
            recipient(),
            vec![0u8; 70_000],
        )
        .unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }
}
