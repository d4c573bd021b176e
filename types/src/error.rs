//! Validation errors raised at value construction time.

use thiserror::Error;

/// Errors produced while constructing or parsing model values.
///
/// Every variant is a construction-time validation failure; none of these are
/// deferred to serialization time.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unknown network type byte 0x{0:02x}")]
    UnknownNetworkType(u8),

    #[error("unknown network address prefix '{0}'")]
    UnknownNetworkPrefix(char),

    #[error("invalid key length: expected {expected} hex chars, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid signature length: expected {expected} hex chars, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },

    #[error("invalid hash length: expected {expected} hex chars, got {actual}")]
    InvalidHashLength { expected: usize, actual: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid namespace name part: {0:?}")]
    InvalidNamespaceName(String),

    #[error("namespace depth {0} exceeds the maximum of 3")]
    NamespaceDepthExceeded(usize),

    #[error("invalid deadline: {0}")]
    InvalidDeadline(String),

    #[error("unknown message type byte 0x{0:02x}")]
    UnknownMessageType(u8),

    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("value for {field} does not fit in {width} bits")]
    ValueOutOfRange { field: &'static str, width: u32 },
}
