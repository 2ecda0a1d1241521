use crate::domain::payout::{PayoutEngine, PayoutTier, THEORETICAL_RTP};
use crate::domain::ports::RandomSource;
use crate::error::{Result, WalletError};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Aggregate statistics over many resolutions of the same stake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub rounds: u64,
    pub bet_amount: Decimal,
    pub losses: u64,
    pub small_wins: u64,
    pub big_wins: u64,
    pub total_staked: Decimal,
    pub total_won: Decimal,
    /// Smallest and largest drawn multiplier among winning rounds.
    pub min_multiplier: Option<f64>,
    pub max_multiplier: Option<f64>,
    pub theoretical_rtp: f64,
}

impl SimulationReport {
    fn frequency(&self, count: u64) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            count as f64 / self.rounds as f64
        }
    }

    pub fn loss_frequency(&self) -> f64 {
        self.frequency(self.losses)
    }

    pub fn small_win_frequency(&self) -> f64 {
        self.frequency(self.small_wins)
    }

    pub fn big_win_frequency(&self) -> f64 {
        self.frequency(self.big_wins)
    }

    /// Total won divided by total staked.
    pub fn rtp(&self) -> f64 {
        if self.total_staked.is_zero() {
            return 0.0;
        }
        (self.total_won / self.total_staked).to_f64().unwrap_or(0.0)
    }
}

/// Resolves `bet` `rounds` times without touching any ledger.
pub fn simulate<R: RandomSource>(
    engine: &mut PayoutEngine<R>,
    bet: Decimal,
    rounds: u64,
) -> Result<SimulationReport> {
    let mut report = SimulationReport {
        rounds,
        bet_amount: bet,
        losses: 0,
        small_wins: 0,
        big_wins: 0,
        total_staked: Decimal::ZERO,
        total_won: Decimal::ZERO,
        min_multiplier: None,
        max_multiplier: None,
        theoretical_rtp: THEORETICAL_RTP,
    };

    for _ in 0..rounds {
        let resolution = engine.resolve_detailed(bet)?;
        match resolution.tier {
            PayoutTier::Loss => report.losses += 1,
            PayoutTier::SmallWin => report.small_wins += 1,
            PayoutTier::BigWin => report.big_wins += 1,
        }

        report.total_staked = report
            .total_staked
            .checked_add(bet)
            .ok_or_else(|| WalletError::invalid_argument("total stake overflowed"))?;
        report.total_won = report
            .total_won
            .checked_add(resolution.win_amount)
            .ok_or_else(|| WalletError::invalid_argument("total winnings overflowed"))?;

        if let Some(observed) = resolution.multiplier {
            report.min_multiplier =
                Some(report.min_multiplier.map_or(observed, |m| m.min(observed)));
            report.max_multiplier =
                Some(report.max_multiplier.map_or(observed, |m| m.max(observed)));
        }
    }

    Ok(report)
}
