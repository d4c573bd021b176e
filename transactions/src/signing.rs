//! Signing, transaction hashing, and aggregate cosigning.
//!
//! The signing preimage is the generation hash followed by the payload
//! from byte 100 onward; the size word, signature, and signer slots are
//! excluded so the signature can be written back without invalidating
//! itself. The transaction hash mixes the first signature half, the
//! signer, the generation hash, and the same payload tail.

use crate::aggregate::COSIGNATURE_SIZE;
use crate::error::TransactionError;
use crate::fee::{calculate_fee, FeeCalculationStrategy};
use crate::signed::{CosignatureSignedTransaction, SignedTransaction};
use crate::transaction::{Transaction, TransactionBody};
use sirius_account::Account;
use sirius_crypto::sha3_256_multi;
use sirius_types::GenerationHash;
use tracing::debug;

/// Envelope bytes excluded from the signing preimage: size word (4),
/// signature (64), signer (32).
const SIGNING_SKIP: usize = 100;
/// Where the max-fee field sits inside the standalone header.
const FEE_RANGE: std::ops::Range<usize> = 106..114;

fn transaction_hash(payload: &[u8], generation_hash: &GenerationHash) -> [u8; 32] {
    sha3_256_multi(&[
        &payload[4..36], // first half of the signature
        &payload[68..SIGNING_SKIP],
        generation_hash.as_bytes(),
        &payload[SIGNING_SKIP..],
    ])
}

fn signing_preimage(payload: &[u8], generation_hash: &GenerationHash) -> Vec<u8> {
    let mut preimage =
        Vec::with_capacity(32 + payload.len() - SIGNING_SKIP);
    preimage.extend_from_slice(generation_hash.as_bytes());
    preimage.extend_from_slice(&payload[SIGNING_SKIP..]);
    preimage
}

/// Sign a standalone transaction, producing the announceable payload and
/// its hash.
pub fn sign_transaction(
    transaction: &Transaction,
    signer: &Account,
    generation_hash: &GenerationHash,
    strategy: FeeCalculationStrategy,
) -> Result<SignedTransaction, TransactionError> {
    let mut payload = transaction.to_catbuffer(strategy);
    let signature = signer.sign_data(&signing_preimage(&payload, generation_hash));
    payload[4..68].copy_from_slice(signature.as_bytes());
    payload[68..SIGNING_SKIP].copy_from_slice(signer.public_key().as_bytes());

    let hash = transaction_hash(&payload, generation_hash);
    debug!(
        entity_type = ?transaction.header.entity_type,
        size = payload.len(),
        "signed transaction"
    );
    SignedTransaction::create(
        hex::encode_upper(&payload),
        hex::encode_upper(hash),
        *signer.public_key(),
        transaction.header.entity_type,
        transaction.header.network,
    )
}

/// Sign an aggregate and attach cosignatures from `cosignatories` in one
/// step.
///
/// The cosignature records grow the announced size, so a strategy-derived
/// fee is computed over the final size including them; an explicitly
/// declared max fee is kept as-is. Each cosignatory signs the aggregate's
/// hash, not its payload.
pub fn sign_transaction_with_cosignatories(
    transaction: &Transaction,
    initiator: &Account,
    cosignatories: &[Account],
    generation_hash: &GenerationHash,
    strategy: FeeCalculationStrategy,
) -> Result<SignedTransaction, TransactionError> {
    if !matches!(transaction.body, TransactionBody::Aggregate(_)) {
        return Err(TransactionError::NotAggregate(
            transaction.header.entity_type,
        ));
    }

    let mut payload = transaction.to_catbuffer(strategy);
    let total_size = payload.len() + COSIGNATURE_SIZE * cosignatories.len();
    let fee = calculate_fee(strategy, transaction.header.max_fee, total_size);
    payload[0..4].copy_from_slice(&(total_size as u32).to_le_bytes());
    payload[FEE_RANGE].copy_from_slice(&fee.to_le_bytes());

    let signature = initiator.sign_data(&signing_preimage(&payload, generation_hash));
    payload[4..68].copy_from_slice(signature.as_bytes());
    payload[68..SIGNING_SKIP].copy_from_slice(initiator.public_key().as_bytes());

    let hash = transaction_hash(&payload, generation_hash);
    for cosigner in cosignatories {
        payload.extend_from_slice(cosigner.public_key().as_bytes());
        payload.extend_from_slice(cosigner.sign_data(&hash).as_bytes());
    }
    debug!(
        entity_type = ?transaction.header.entity_type,
        cosignatories = cosignatories.len(),
        size = payload.len(),
        "signed aggregate with cosignatories"
    );
    SignedTransaction::create(
        hex::encode_upper(&payload),
        hex::encode_upper(hash),
        *initiator.public_key(),
        transaction.header.entity_type,
        transaction.header.network,
    )
}

/// Cosign an announced partial aggregate, identified by its hash.
pub fn cosign_transaction(
    parent_hash: &str,
    cosigner: &Account,
) -> Result<CosignatureSignedTransaction, TransactionError> {
    let mut hash = [0u8; 32];
    hex::decode_to_slice(parent_hash, &mut hash).map_err(|_| {
        TransactionError::InvalidSignedTransaction(
            "parent hash must be 64 hex chars".into(),
        )
    })?;
    let signature = cosigner.sign_data(&hash);
    Ok(CosignatureSignedTransaction {
        parent_hash: parent_hash.to_string(),
        signature: signature.to_hex(),
        signer: cosigner.public_key().to_hex(),
    })
}

impl Transaction {
    /// Sign this transaction with `signer`. See [`sign_transaction`].
    pub fn sign_with(
        &self,
        signer: &Account,
        generation_hash: &GenerationHash,
        strategy: FeeCalculationStrategy,
    ) -> Result<SignedTransaction, TransactionError> {
        sign_transaction(self, signer, generation_hash, strategy)
    }

    /// Sign this aggregate and attach the given cosignatures. See
    /// [`sign_transaction_with_cosignatories`].
    pub fn sign_with_cosignatories(
        &self,
        initiator: &Account,
        cosignatories: &[Account],
        generation_hash: &GenerationHash,
        strategy: FeeCalculationStrategy,
    ) -> Result<SignedTransaction, TransactionError> {
        sign_transaction_with_cosignatories(
            self,
            initiator,
            cosignatories,
            generation_hash,
            strategy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sirius_types::{Deadline, Message, Mosaic, MosaicId, NetworkType};

    fn generation_hash() -> GenerationHash {
        GenerationHash::new([0x7a; 32])
    }

    fn transfer(network: NetworkType) -> Transaction {
        let recipient = sirius_types::Address::create_from_public_key(
            Account::random(network).public_key(),
            network,
        );
        Transaction::transfer(
            network,
            Deadline::from_network_ms(5_000_000),
            recipient,
            vec![Mosaic::new(MosaicId::new(3), 10)],
            Message::empty(),
        )
        .unwrap()
    }

    #[test]
    fn signature_verifies_over_the_preimage() {
        let account = Account::random(NetworkType::TestNet);
        let tx = transfer(NetworkType::TestNet);
        let signed = tx
            .sign_with(&account, &generation_hash(), FeeCalculationStrategy::Medium)
            .unwrap();

        let payload = hex::decode(signed.payload()).unwrap();
        assert_eq!(payload.len(), 166);
        let preimage = signing_preimage(&payload, &generation_hash());
        let signature = sirius_types::Signature(
            payload[4..68].try_into().unwrap(),
        );
        assert!(account.public_account().verify_signature(&preimage, &signature));
        assert_eq!(&payload[68..100], account.public_key().as_bytes());
    }

    #[test]
    fn signed_payload_decodes_with_signature_and_fee() {
        let account = Account::random(NetworkType::TestNet);
        let tx = transfer(NetworkType::TestNet);
        let signed = tx
            .sign_with(&account, &generation_hash(), FeeCalculationStrategy::Medium)
            .unwrap();

        let payload = hex::decode(signed.payload()).unwrap();
        let back = Transaction::create_from_catbuffer(&payload).unwrap();
        assert_eq!(back.body, tx.body);
        assert_eq!(back.header.max_fee, 250 * 166);
        assert_eq!(back.header.signer.as_ref(), Some(account.public_key()));
        assert!(back.header.signature.is_some());
    }

    #[test]
    fn hash_depends_on_generation_hash() {
        let account = Account::random(NetworkType::TestNet);
        let tx = transfer(NetworkType::TestNet);
        let a = tx
            .sign_with(&account, &generation_hash(), FeeCalculationStrategy::Zero)
            .unwrap();
        let b = tx
            .sign_with(
                &account,
                &GenerationHash::new([0x11; 32]),
                FeeCalculationStrategy::Zero,
            )
            .unwrap();
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn cosigning_a_non_aggregate_is_rejected() {
        let account = Account::random(NetworkType::TestNet);
        let tx = transfer(NetworkType::TestNet);
        let err = tx
            .sign_with_cosignatories(
                &account,
                &[],
                &generation_hash(),
                FeeCalculationStrategy::Zero,
            )
            .unwrap_err();
        assert!(matches!(err, TransactionError::NotAggregate(_)));
    }

    #[test]
    fn cosignature_verifies_against_parent_hash() {
        let cosigner = Account::random(NetworkType::TestNet);
        let parent_hash = "A1".repeat(32);
        let cosignature = cosign_transaction(&parent_hash, &cosigner).unwrap();
        assert_eq!(cosignature.parent_hash, parent_hash);

        let hash = hex::decode(&parent_hash).unwrap();
        let signature = sirius_types::Signature::from_hex(&cosignature.signature).unwrap();
        assert!(cosigner.public_account().verify_signature(&hash, &signature));
    }

    #[test]
    fn malformed_parent_hash_rejected() {
        let cosigner = Account::random(NetworkType::TestNet);
        assert!(cosign_transaction("zz", &cosigner).is_err());
    }
}
