use super::money::Balance;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Access point to the wallet ledger.
///
/// Each mutating call is one serialized read-validate-write step and returns the
/// balance it produced.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn deposit(&self, amount: Decimal) -> Result<Balance>;
    async fn withdraw(&self, amount: Decimal) -> Result<Balance>;
    async fn settle(&self, bet: Decimal, win: Decimal) -> Result<Balance>;
    async fn balance(&self) -> Result<Balance>;
}

/// A source of independent, uniformly distributed draws in `[0.0, 1.0)`.
pub trait RandomSource: Send {
    fn next_draw(&mut self) -> Result<f64>;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_draw(&mut self) -> Result<f64> {
        (**self).next_draw()
    }
}

pub type LedgerBox = Box<dyn Ledger>;
pub type RandomSourceBox = Box<dyn RandomSource>;
