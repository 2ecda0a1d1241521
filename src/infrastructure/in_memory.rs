use crate::domain::money::Balance;
use crate::domain::ports::Ledger;
use crate::domain::wallet::Wallet;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// A thread-safe in-memory ledger holding a single wallet.
///
/// Uses `Arc<Mutex<Wallet>>` so every operation is one critical section around
/// read, validate and write. Cloning shares the same wallet.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    wallet: Arc<Mutex<Wallet>>,
}

impl InMemoryLedger {
    /// Creates a ledger with an empty wallet.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn deposit(&self, amount: Decimal) -> Result<Balance> {
        let mut wallet = self.wallet.lock().await;
        debug!(%amount, "attempting deposit");
        let balance = wallet
            .deposit(amount)
            .inspect_err(|e| warn!(%amount, error = %e, "deposit rejected"))?;
        info!(%amount, %balance, "deposit applied");
        Ok(balance)
    }

    async fn withdraw(&self, amount: Decimal) -> Result<Balance> {
        let mut wallet = self.wallet.lock().await;
        debug!(%amount, "attempting withdrawal");
        let balance = wallet
            .withdraw(amount)
            .inspect_err(|e| warn!(%amount, error = %e, "withdrawal rejected"))?;
        info!(%amount, %balance, "withdrawal applied");
        Ok(balance)
    }

    async fn settle(&self, bet: Decimal, win: Decimal) -> Result<Balance> {
        let mut wallet = self.wallet.lock().await;
        let balance = wallet
            .settle(bet, win)
            .inspect_err(|e| warn!(%bet, %win, error = %e, "settlement rejected"))?;
        info!(%bet, %win, %balance, "bet settled");
        Ok(balance)
    }

    async fn balance(&self) -> Result<Balance> {
        Ok(self.wallet.lock().await.balance())
    }
}
