//! Network discriminant.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Identifies which Sirius-family network a value belongs to.
///
/// Each network has a fixed 1-byte wire code and a fixed base32 prefix
/// character; the two mappings are bijective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    /// The production network.
    MainNet,
    /// The public test network.
    TestNet,
    /// Private Mijin network.
    Mijin,
    /// Private Mijin test network.
    MijinTest,
}

impl NetworkType {
    /// The 1-byte wire code of this network.
    pub fn value(&self) -> u8 {
        match self {
            Self::MainNet => 0xb8,
            Self::TestNet => 0xa8,
            Self::Mijin => 0x60,
            Self::MijinTest => 0x90,
        }
    }

    /// Look up a network by its wire code.
    pub fn from_value(value: u8) -> Result<Self, ModelError> {
        match value {
            0xb8 => Ok(Self::MainNet),
            0xa8 => Ok(Self::TestNet),
            0x60 => Ok(Self::Mijin),
            0x90 => Ok(Self::MijinTest),
            other => Err(ModelError::UnknownNetworkType(other)),
        }
    }

    /// The leading character of every base32 address on this network.
    pub fn prefix(&self) -> char {
        match self {
            Self::MainNet => 'X',
            Self::TestNet => 'V',
            Self::Mijin => 'M',
            Self::MijinTest => 'S',
        }
    }

    /// Look up a network by the leading character of a base32 address.
    pub fn from_prefix(prefix: char) -> Result<Self, ModelError> {
        match prefix {
            'X' => Ok(Self::MainNet),
            'V' => Ok(Self::TestNet),
            'M' => Ok(Self::Mijin),
            'S' => Ok(Self::MijinTest),
            other => Err(ModelError::UnknownNetworkPrefix(other)),
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainNet => "main_net",
            Self::TestNet => "test_net",
            Self::Mijin => "mijin",
            Self::MijinTest => "mijin_test",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [NetworkType; 4] = [
        NetworkType::MainNet,
        NetworkType::TestNet,
        NetworkType::Mijin,
        NetworkType::MijinTest,
    ];

    #[test]
    fn value_roundtrip() {
        for net in ALL {
            assert_eq!(NetworkType::from_value(net.value()).unwrap(), net);
        }
    }

    #[test]
    fn prefix_roundtrip() {
        for net in ALL {
            assert_eq!(NetworkType::from_prefix(net.prefix()).unwrap(), net);
        }
    }

    #[test]
    fn test_net_wire_byte() {
        assert_eq!(NetworkType::TestNet.value(), 0xa8);
        assert_eq!(NetworkType::TestNet.prefix(), 'V');
    }

    #[test]
    fn unknown_byte_rejected() {
        assert!(NetworkType::from_value(0x00).is_err());
        assert!(NetworkType::from_value(0xa9).is_err());
    }

    #[test]
    fn unknown_prefix_rejected() {
        assert!(NetworkType::from_prefix('A').is_err());
    }
}
