use crate::config::BetLimits;
use crate::domain::money::{Amount, Balance};
use crate::domain::payout::PayoutEngine;
use crate::domain::ports::{LedgerBox, RandomSource};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

/// What one betting round produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundOutcome {
    pub bet_amount: Decimal,
    pub win_amount: Decimal,
    pub resulting_balance: Balance,
}

impl RoundOutcome {
    pub fn is_win(&self) -> bool {
        self.win_amount > Decimal::ZERO
    }
}

/// The entry point the interfaces layer talks to.
///
/// Holds no balance of its own: money lives behind the `Ledger` port and win
/// amounts come from the `PayoutEngine`.
pub struct RoundCoordinator<R: RandomSource> {
    ledger: LedgerBox,
    payout: PayoutEngine<R>,
    limits: BetLimits,
}

impl<R: RandomSource> RoundCoordinator<R> {
    /// # Arguments
    ///
    /// * `ledger` - The wallet ledger rounds settle against.
    /// * `payout` - The engine resolving stakes into wins.
    /// * `limits` - The stake window each round must respect.
    pub fn new(ledger: LedgerBox, payout: PayoutEngine<R>, limits: BetLimits) -> Self {
        Self {
            ledger,
            payout,
            limits,
        }
    }

    /// Plays one round.
    ///
    /// The win is resolved before the ledger is touched, so an out-of-range stake or
    /// a failing random source leaves the balance as it was. The settlement either
    /// applies bet and win together or fails without effect.
    pub async fn place_round(&mut self, bet: Decimal) -> Result<RoundOutcome> {
        self.limits.check(bet)?;
        let bet = Amount::new(bet)?.value();

        let win = self.payout.resolve(bet)?;
        let resulting_balance = self.ledger.settle(bet, win).await?;

        info!(%bet, %win, balance = %resulting_balance, "round completed");
        Ok(RoundOutcome {
            bet_amount: bet,
            win_amount: win,
            resulting_balance,
        })
    }

    /// Adds funds and returns the new balance.
    pub async fn deposit(&self, amount: Decimal) -> Result<Balance> {
        self.ledger.deposit(amount).await
    }

    /// Removes funds and returns the new balance.
    pub async fn withdraw(&self, amount: Decimal) -> Result<Balance> {
        self.ledger.withdraw(amount).await
    }

    pub async fn balance(&self) -> Result<Balance> {
        self.ledger.balance().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Ledger;
    use crate::error::WalletError;
    use crate::infrastructure::in_memory::InMemoryLedger;
    use crate::infrastructure::random::ScriptedRandomSource;
    use rust_decimal_macros::dec;

    async fn coordinator(
        funds: Decimal,
        draws: &[f64],
    ) -> (RoundCoordinator<ScriptedRandomSource>, InMemoryLedger) {
        let ledger = InMemoryLedger::new();
        if funds > Decimal::ZERO {
            ledger.deposit(funds).await.unwrap();
        }
        let coordinator = RoundCoordinator::new(
            Box::new(ledger.clone()),
            PayoutEngine::new(ScriptedRandomSource::new(draws.to_vec())),
            BetLimits::default(),
        );
        (coordinator, ledger)
    }

    #[tokio::test]
    async fn test_losing_round() {
        let (mut coordinator, _) = coordinator(dec!(20), &[0.3]).await;
        let outcome = coordinator.place_round(dec!(5)).await.unwrap();

        assert_eq!(outcome.bet_amount, dec!(5));
        assert_eq!(outcome.win_amount, Decimal::ZERO);
        assert_eq!(outcome.resulting_balance, Balance::new(dec!(15)));
        assert!(!outcome.is_win());
    }

    #[tokio::test]
    async fn test_winning_rounds() {
        let (mut coordinator, ledger) = coordinator(dec!(20), &[0.6, 0.5, 0.95, 0.5]).await;

        let small = coordinator.place_round(dec!(10)).await.unwrap();
        assert_eq!(small.win_amount, dec!(15.00));
        assert_eq!(small.resulting_balance, Balance::new(dec!(25)));

        let big = coordinator.place_round(dec!(10)).await.unwrap();
        assert_eq!(big.win_amount, dec!(60.00));
        assert_eq!(big.resulting_balance, Balance::new(dec!(75)));
        assert!(big.is_win());

        assert_eq!(ledger.balance().await.unwrap(), Balance::new(dec!(75)));
    }

    #[tokio::test]
    async fn test_out_of_range_bet_has_no_effect() {
        let (mut coordinator, _) = coordinator(dec!(20), &[0.95, 0.5]).await;

        for bet in [dec!(0), dec!(0.5), dec!(10.01), dec!(-3)] {
            assert!(matches!(
                coordinator.place_round(bet).await,
                Err(WalletError::OutOfRange { .. })
            ));
        }
        assert_eq!(coordinator.balance().await.unwrap(), Balance::new(dec!(20)));

        // No draw was consumed by the rejected rounds.
        let outcome = coordinator.place_round(dec!(10)).await.unwrap();
        assert_eq!(outcome.win_amount, dec!(60));
    }

    #[tokio::test]
    async fn test_sub_cent_bet_is_rejected_before_drawing() {
        let (mut coordinator, _) = coordinator(dec!(20), &[0.95, 0.5]).await;

        assert!(matches!(
            coordinator.place_round(dec!(2.005)).await,
            Err(WalletError::InvalidArgument(_))
        ));
        assert_eq!(coordinator.balance().await.unwrap(), Balance::new(dec!(20)));

        let outcome = coordinator.place_round(dec!(10)).await.unwrap();
        assert_eq!(outcome.win_amount, dec!(60));
    }

    #[tokio::test]
    async fn test_insufficient_funds_round() {
        let (mut coordinator, _) = coordinator(dec!(4), &[0.95, 0.5]).await;

        assert!(matches!(
            coordinator.place_round(dec!(5)).await,
            Err(WalletError::InsufficientFunds { .. })
        ));
        assert_eq!(coordinator.balance().await.unwrap(), Balance::new(dec!(4)));
    }

    #[tokio::test]
    async fn test_random_failure_leaves_ledger_untouched() {
        let (mut coordinator, _) = coordinator(dec!(10), &[0.7]).await;

        assert!(matches!(
            coordinator.place_round(dec!(2)).await,
            Err(WalletError::RandomSourceFailure(_))
        ));
        assert_eq!(coordinator.balance().await.unwrap(), Balance::new(dec!(10)));
    }

    #[tokio::test]
    async fn test_full_balance_bet_loss_reaches_zero() {
        let (mut coordinator, _) = coordinator(dec!(3), &[0.1]).await;
        let outcome = coordinator.place_round(dec!(3)).await.unwrap();
        assert_eq!(outcome.resulting_balance, Balance::ZERO);
    }

    #[tokio::test]
    async fn test_deposit_and_withdraw_use_cases() {
        let (coordinator, _) = coordinator(Decimal::ZERO, &[]).await;

        assert_eq!(
            coordinator.deposit(dec!(100)).await.unwrap(),
            Balance::new(dec!(100))
        );
        assert_eq!(
            coordinator.withdraw(dec!(40)).await.unwrap(),
            Balance::new(dec!(60))
        );
        assert!(matches!(
            coordinator.withdraw(dec!(61)).await,
            Err(WalletError::InsufficientFunds { .. })
        ));
    }
}
