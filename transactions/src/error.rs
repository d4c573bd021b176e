use crate::entity_type::EntityType;
use sirius_types::{ModelError, NetworkType};
use thiserror::Error;

/// Errors raised while encoding, decoding, or signing transactions.
///
/// Decode errors are definitive outcomes; nothing at this layer retries.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("buffer too short: need {needed} more bytes, {remaining} remaining")]
    BufferTooShort { needed: usize, remaining: usize },

    #[error("declared size {declared} exceeds buffer length {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("unknown transaction type 0x{0:04x}")]
    UnknownTransactionType(u16),

    #[error("transaction type 0x{0:04x} registered twice")]
    DuplicateRegistration(u16),

    #[error("network type mismatch: expected {expected:?}, found {found:?}")]
    NetworkMismatch {
        expected: NetworkType,
        found: NetworkType,
    },

    #[error("entity type {header:?} does not match decoded body {body:?}")]
    EntityTypeMismatch { header: EntityType, body: EntityType },

    #[error("missing DTO field: {0}")]
    MissingDtoField(String),

    #[error("invalid DTO field {field}: {reason}")]
    InvalidDtoField { field: String, reason: String },

    #[error("not an aggregate transaction: {0:?}")]
    NotAggregate(EntityType),

    #[error("invalid signed transaction: {0}")]
    InvalidSignedTransaction(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl TransactionError {
    /// Shorthand for a missing-key error while reading a DTO mapping.
    pub(crate) fn missing(key: &str) -> Self {
        Self::MissingDtoField(key.to_string())
    }

    /// Shorthand for a malformed-value error while reading a DTO mapping.
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDtoField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
