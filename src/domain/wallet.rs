use super::money::{Amount, Balance, is_whole_cents};
use crate::error::{Result, WalletError};
use rust_decimal::Decimal;

/// The player's wallet: the single source of truth for the balance.
///
/// Every operation validates all of its inputs before touching the balance, so a
/// rejected call is always a no-op and the balance is never negative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Wallet {
    balance: Balance,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// Adds `amount` to the balance.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        let updated = exact_sum(self.balance.value(), amount.value())
            .ok_or_else(|| WalletError::invalid_argument("deposit overflows the balance"))?;

        self.balance = Balance::new(updated);
        Ok(self.balance)
    }

    /// Removes `amount` from the balance if enough funds are available.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        self.ensure_covers(amount)?;

        let updated = exact_sum(self.balance.value(), -amount.value()).ok_or_else(|| {
            WalletError::invalid_argument("withdrawal exceeds the balance precision")
        })?;
        self.balance = Balance::new(updated);
        Ok(self.balance)
    }

    /// Debits a stake and credits its win as one transition.
    ///
    /// `win` may be zero (a lost round) but never negative or finer than a cent; either
    /// means the payout side broke its contract.
    pub fn settle(&mut self, bet: Decimal, win: Decimal) -> Result<Balance> {
        let bet = Amount::new(bet)?;
        if win < Decimal::ZERO {
            return Err(WalletError::invalid_argument(format!(
                "win amount must be non-negative, got {win}"
            )));
        }
        if !is_whole_cents(win) {
            return Err(WalletError::invalid_argument(format!(
                "win amount must be in whole cents, got {win}"
            )));
        }
        self.ensure_covers(bet)?;

        let updated = exact_sum(self.balance.value(), -bet.value())
            .and_then(|staked| exact_sum(staked, win))
            .ok_or_else(|| WalletError::invalid_argument("win overflows the balance"))?;

        self.balance = Balance::new(updated);
        Ok(self.balance)
    }

    fn ensure_covers(&self, amount: Amount) -> Result<()> {
        if amount.value() > self.balance.value() {
            return Err(WalletError::InsufficientFunds {
                balance: self.balance.value(),
                requested: amount.value(),
            });
        }
        Ok(())
    }
}

/// `lhs + rhs`, or `None` when `Decimal` would have to round the result.
fn exact_sum(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    lhs.checked_add(rhs).filter(|sum| sum.checked_sub(lhs) == Some(rhs))
}
