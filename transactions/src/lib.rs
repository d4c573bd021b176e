//! Transaction models and the catbuffer/DTO codec core.
//!
//! Every transaction kind serializes to two interchange formats:
//!
//! - **catbuffer** — the compact little-endian binary layout used for
//!   on-chain bytes, hashing, and signing;
//! - **DTO** — the JSON-compatible mapping used by the REST transport, with
//!   64-bit integers encoded as `[low32, high32]` pairs.
//!
//! Transaction kinds:
//! - **Transfer**: move mosaics and a message to an address or alias
//! - **RegisterNamespace**: claim a root or child namespace
//! - **MosaicDefinition**: create a new mosaic from a nonce
//! - **AddressAlias / MosaicAlias**: link a namespace to an address/mosaic
//! - **AccountLink**: link a remote harvesting account
//! - **ModifyMultisigAccount**: change cosignatories and thresholds
//! - **LockFunds / SecretLock / SecretProof**: lock and cross-chain swaps
//! - **BlockchainUpgrade / NetworkConfig**: chain governance
//! - **ModifyMetadata**: attach key/value metadata to an entity
//! - **Aggregate (complete/bonded)**: bundle inner transactions with
//!   cosignatures

pub mod account_link;
pub mod aggregate;
pub mod alias;
pub mod catbuffer;
pub mod dto;
pub mod entity_type;
pub mod error;
pub mod fee;
pub mod header;
pub mod lock;
pub mod metadata;
pub mod mosaic_definition;
pub mod multisig;
pub mod network_config;
pub mod register_namespace;
pub mod registry;
pub mod signed;
pub mod signing;
pub mod transaction;
pub mod transfer;
pub mod upgrade;

pub use account_link::{AccountLinkBody, LinkAction};
pub use aggregate::{AggregateBody, COSIGNATURE_SIZE};
pub use alias::{AddressAliasBody, AliasAction, MosaicAliasBody};
pub use entity_type::EntityType;
pub use error::TransactionError;
pub use fee::{calculate_fee, FeeCalculationStrategy};
pub use header::{TransactionHeader, TransactionInfo, EMBEDDED_HEADER_SIZE, TRANSACTION_HEADER_SIZE};
pub use lock::{HashType, LockFundsBody, SecretLockBody, SecretProofBody};
pub use metadata::{MetadataId, MetadataModification, MetadataModificationType, ModifyMetadataBody};
pub use mosaic_definition::{MosaicDefinitionBody, MosaicProperties};
pub use multisig::{CosignatoryModification, ModifyMultisigBody, MultisigModificationType};
pub use network_config::NetworkConfigBody;
pub use register_namespace::{NamespaceType, RegisterNamespaceBody};
pub use registry::{registry, TransactionRegistry, VariantCodec};
pub use signed::{AggregateTransactionCosignature, CosignatureSignedTransaction, SignedTransaction};
pub use signing::{cosign_transaction, sign_transaction, sign_transaction_with_cosignatories};
pub use transaction::{InnerTransaction, Transaction, TransactionBody};
pub use transfer::TransferBody;
pub use upgrade::BlockchainUpgradeBody;
