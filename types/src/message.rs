//! Transfer message payloads.
//!
//! Catbuffer form: 1-byte type tag followed by the raw payload. An empty
//! message contributes no bytes at all.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Message payload discriminant. Only plain messages are defined today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Plain,
}

impl MessageType {
    pub fn value(&self) -> u8 {
        match self {
            Self::Plain => 0,
        }
    }

    pub fn from_value(value: u8) -> Result<Self, ModelError> {
        match value {
            0 => Ok(Self::Plain),
            other => Err(ModelError::UnknownMessageType(other)),
        }
    }
}

/// A transfer message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    kind: MessageType,
    payload: Vec<u8>,
}

impl Message {
    /// A plain-text message.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: MessageType::Plain,
            payload: text.into().into_bytes(),
        }
    }

    /// The empty message (zero wire bytes).
    pub fn empty() -> Self {
        Self {
            kind: MessageType::Plain,
            payload: Vec::new(),
        }
    }

    pub fn kind(&self) -> MessageType {
        self.kind
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Wire size in bytes: tag + payload, or 0 for the empty message.
    pub fn size(&self) -> usize {
        if self.payload.is_empty() {
            0
        } else {
            1 + self.payload.len()
        }
    }

    /// Catbuffer form: `tag || payload` (empty for the empty message).
    pub fn to_catbuffer(&self) -> Vec<u8> {
        if self.payload.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(self.size());
        out.push(self.kind.value());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Parse a message from catbuffer bytes (the whole slice is the
    /// message).
    pub fn from_catbuffer(bytes: &[u8]) -> Result<Self, ModelError> {
        match bytes.split_first() {
            None => Ok(Self::empty()),
            Some((tag, payload)) => Ok(Self {
                kind: MessageType::from_value(*tag)?,
                payload: payload.to_vec(),
            }),
        }
    }

    /// Hex form of the payload, as used in the DTO mapping.
    pub fn payload_hex(&self) -> String {
        hex::encode(&self.payload)
    }

    /// Rebuild a message from its DTO fields.
    pub fn from_dto_parts(kind: u8, payload_hex: &str) -> Result<Self, ModelError> {
        let payload =
            hex::decode(payload_hex).map_err(|e| ModelError::InvalidHex(e.to_string()))?;
        Ok(Self {
            kind: MessageType::from_value(kind)?,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_has_no_wire_bytes() {
        let msg = Message::empty();
        assert_eq!(msg.size(), 0);
        assert!(msg.to_catbuffer().is_empty());
    }

    #[test]
    fn plain_message_prepends_tag() {
        let msg = Message::plain("hi");
        assert_eq!(msg.to_catbuffer(), vec![0, b'h', b'i']);
        assert_eq!(msg.size(), 3);
    }

    #[test]
    fn catbuffer_roundtrip() {
        let msg = Message::plain("sirius test message");
        assert_eq!(Message::from_catbuffer(&msg.to_catbuffer()).unwrap(), msg);
        assert_eq!(Message::from_catbuffer(&[]).unwrap(), Message::empty());
    }

    #[test]
    fn dto_roundtrip() {
        let msg = Message::plain("payload");
        let back = Message::from_dto_parts(msg.kind().value(), &msg.payload_hex()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn unknown_tag_rejected() {
        assert!(Message::from_catbuffer(&[9, 1, 2]).is_err());
    }
}
