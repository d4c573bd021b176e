//! Max-fee derivation strategies.
//!
//! A transaction's max fee depends on its serialized size, so the size must
//! be known before the fee is written. The fee field itself is fixed-width,
//! which keeps the dependency one-directional.

use serde::{Deserialize, Serialize};

/// How the max fee is derived from the serialized transaction size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeCalculationStrategy {
    /// No fee (private chains).
    Zero,
    Low,
    #[default]
    Medium,
    High,
}

impl FeeCalculationStrategy {
    /// Fee charged per serialized byte.
    pub fn multiplier(&self) -> u64 {
        match self {
            Self::Zero => 0,
            Self::Low => 25,
            Self::Medium => 250,
            Self::High => 2500,
        }
    }
}

/// Derive the max fee for a transaction of `size` bytes.
///
/// An explicitly declared (non-zero) max fee always wins; otherwise the
/// strategy charges its per-byte multiplier over the full serialized size.
pub fn calculate_fee(
    strategy: FeeCalculationStrategy,
    declared_max_fee: u64,
    size: usize,
) -> u64 {
    if declared_max_fee != 0 {
        return declared_max_fee;
    }
    strategy.multiplier() * size as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_fee_wins() {
        assert_eq!(calculate_fee(FeeCalculationStrategy::High, 1234, 500), 1234);
    }

    #[test]
    fn strategy_scales_with_size() {
        assert_eq!(calculate_fee(FeeCalculationStrategy::Zero, 0, 166), 0);
        assert_eq!(calculate_fee(FeeCalculationStrategy::Low, 0, 166), 25 * 166);
        assert_eq!(calculate_fee(FeeCalculationStrategy::Medium, 0, 166), 250 * 166);
        assert_eq!(calculate_fee(FeeCalculationStrategy::High, 0, 166), 2500 * 166);
    }

    #[test]
    fn default_is_medium() {
        assert_eq!(FeeCalculationStrategy::default(), FeeCalculationStrategy::Medium);
    }
}
