//! Table policy configuration.
//!
//! The payout schedule itself is fixed in `domain::payout`; only the stake window a
//! round may use is configurable.

use crate::error::{Result, WalletError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const DEFAULT_MIN_BET: Decimal = dec!(1);
pub const DEFAULT_MAX_BET: Decimal = dec!(10);

/// Inclusive stake window enforced per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetLimits {
    min: Decimal,
    max: Decimal,
}

impl BetLimits {
    /// Validated limits: `0 < min <= max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self> {
        if min <= Decimal::ZERO {
            return Err(WalletError::Config(format!(
                "minimum bet must be positive, got {min}"
            )));
        }
        if min > max {
            return Err(WalletError::Config(format!(
                "minimum bet {min} exceeds maximum bet {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Fails with `OutOfRange` when `amount` falls outside the window.
    pub fn check(&self, amount: Decimal) -> Result<()> {
        if amount < self.min || amount > self.max {
            return Err(WalletError::OutOfRange {
                amount,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for BetLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_BET,
            max: DEFAULT_MAX_BET,
        }
    }
}
