use crate::error::WalletError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A wallet balance in fixed-point currency units.
///
/// Wraps `rust_decimal::Decimal` so deposit/withdraw/settle cycles never pick up
/// binary floating-point drift. The ledger guarantees it is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Renders with two decimal places, e.g. `12.50`.
impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

/// Decimal places any amount entering the ledger may carry.
pub const CENT_SCALE: u32 = 2;

/// True when `value` has no digits below the cent (`1.50` and `1.500` do, `1.005` does not).
pub fn is_whole_cents(value: Decimal) -> bool {
    value.normalize().scale() <= CENT_SCALE
}

/// A strictly positive monetary amount in whole cents: a deposit, a withdrawal or a stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, WalletError> {
        if value <= Decimal::ZERO {
            return Err(WalletError::invalid_argument(format!(
                "amount must be positive, got {value}"
            )));
        }
        if !is_whole_cents(value) {
            return Err(WalletError::invalid_argument(format!(
                "amount must be in whole cents, got {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = WalletError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}
