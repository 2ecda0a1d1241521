use super::command_reader::CommandType;
use crate::application::round::RoundOutcome;
use crate::domain::money::Balance;
use crate::error::{Result, WalletError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One applied wallet operation: `type,amount,win,balance`.
///
/// Amounts are normalized (`15.00` is written as `15`).
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct EventRecord {
    pub r#type: CommandType,
    pub amount: Decimal,
    pub win: Option<Decimal>,
    pub balance: Balance,
}

impl EventRecord {
    pub fn transfer(r#type: CommandType, amount: Decimal, balance: Balance) -> Self {
        Self {
            r#type,
            amount: amount.normalize(),
            win: None,
            balance: Balance::new(balance.value().normalize()),
        }
    }

    pub fn round(outcome: &RoundOutcome) -> Self {
        Self {
            r#type: CommandType::Bet,
            amount: outcome.bet_amount.normalize(),
            win: Some(outcome.win_amount.normalize()),
            balance: Balance::new(outcome.resulting_balance.value().normalize()),
        }
    }
}

/// Writes applied operations as CSV, one row per event.
pub struct EventWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> EventWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_event(&mut self, event: &EventRecord) -> Result<()> {
        self.writer.serialize(event)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and hands back the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| WalletError::Io(e.into_error()))
    }
}
