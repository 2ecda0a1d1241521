//! Fixed three-tier payout schedule.
//!
//! | first draw        | tier      | multiplier          |
//! |-------------------|-----------|---------------------|
//! | `[0.0, 0.5)`      | loss      | none                |
//! | `[0.5, 0.9)`      | small win | `1.0 + r2 * 1.0`    |
//! | `[0.9, 1.0)`      | big win   | `2.0 + r2 * 8.0`    |
//!
//! With a uniform source the expected multiplier (RTP) is
//! `0.5 * 0 + 0.4 * 1.5 + 0.1 * 6.0 = 1.2`.

use super::money::CENT_SCALE;
use super::ports::RandomSource;
use crate::error::{Result, WalletError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub const LOSS_THRESHOLD: f64 = 0.5;
pub const SMALL_WIN_THRESHOLD: f64 = 0.9;

pub const SMALL_WIN_MIN_MULTIPLIER: f64 = 1.0;
pub const SMALL_WIN_MAX_MULTIPLIER: f64 = 2.0;
pub const BIG_WIN_MIN_MULTIPLIER: f64 = 2.0;
pub const BIG_WIN_MAX_MULTIPLIER: f64 = 10.0;

/// Decimal places kept on a win amount.
pub const WIN_SCALE: u32 = CENT_SCALE;

pub const THEORETICAL_RTP: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutTier {
    Loss,
    SmallWin,
    BigWin,
}

impl PayoutTier {
    /// Maps the first draw of a round onto its tier. Thresholds are exclusive
    /// upper bounds, so 0.5 and 0.9 fall into the higher tier.
    pub fn from_roll(roll: f64) -> Self {
        if roll < LOSS_THRESHOLD {
            PayoutTier::Loss
        } else if roll < SMALL_WIN_THRESHOLD {
            PayoutTier::SmallWin
        } else {
            PayoutTier::BigWin
        }
    }

    fn multiplier_range(self) -> Option<(f64, f64)> {
        match self {
            PayoutTier::Loss => None,
            PayoutTier::SmallWin => Some((SMALL_WIN_MIN_MULTIPLIER, SMALL_WIN_MAX_MULTIPLIER)),
            PayoutTier::BigWin => Some((BIG_WIN_MIN_MULTIPLIER, BIG_WIN_MAX_MULTIPLIER)),
        }
    }
}

/// The detailed result of resolving one stake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resolution {
    pub tier: PayoutTier,
    pub multiplier: Option<f64>,
    pub win_amount: Decimal,
}

/// Turns a stake and random draws into a win amount.
///
/// The engine owns its random source; nothing here reads global state, so tests
/// can hand it a scripted sequence of draws.
pub struct PayoutEngine<R: RandomSource> {
    random: R,
}

impl<R: RandomSource> PayoutEngine<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }

    /// Resolves a stake into its win amount (zero on a loss).
    pub fn resolve(&mut self, bet: Decimal) -> Result<Decimal> {
        Ok(self.resolve_detailed(bet)?.win_amount)
    }

    /// Resolves a stake, keeping the tier and multiplier that produced the win.
    ///
    /// Consumes one draw on a loss and two on a win. Failures of the random source
    /// are returned as-is.
    pub fn resolve_detailed(&mut self, bet: Decimal) -> Result<Resolution> {
        if bet <= Decimal::ZERO {
            return Err(WalletError::invalid_argument(format!(
                "bet amount must be positive, got {bet}"
            )));
        }

        let tier = PayoutTier::from_roll(self.draw()?);
        let Some((min, max)) = tier.multiplier_range() else {
            return Ok(Resolution {
                tier,
                multiplier: None,
                win_amount: Decimal::ZERO,
            });
        };

        let multiplier = min + self.draw()? * (max - min);
        Ok(Resolution {
            tier,
            multiplier: Some(multiplier),
            win_amount: win_amount(bet, multiplier)?,
        })
    }

    fn draw(&mut self) -> Result<f64> {
        let value = self.random.next_draw()?;
        if !(0.0..1.0).contains(&value) {
            return Err(WalletError::random_source(format!(
                "draw {value} is outside [0, 1)"
            )));
        }
        Ok(value)
    }
}

/// `bet * multiplier`, rounded half-to-even to cents.
fn win_amount(bet: Decimal, multiplier: f64) -> Result<Decimal> {
    let multiplier = Decimal::try_from(multiplier).map_err(|e| {
        WalletError::invalid_argument(format!("multiplier {multiplier} is not representable: {e}"))
    })?;
    let raw = bet
        .checked_mul(multiplier)
        .ok_or_else(|| WalletError::invalid_argument("bet too large to resolve"))?;
    Ok(raw.round_dp_with_strategy(WIN_SCALE, RoundingStrategy::MidpointNearestEven))
}
