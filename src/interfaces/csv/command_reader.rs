use crate::error::{Result, WalletError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Deposit,
    Withdraw,
    Bet,
}

/// One row of a replay script: `type, amount`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub r#type: CommandType,
    pub amount: Decimal,
}

/// Reads wallet commands from a CSV source.
///
/// Wraps `csv::Reader`, trimming whitespace and tolerating ragged rows.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes rows; a bad row yields an error without ending the stream.
    pub fn commands(self) -> impl Iterator<Item = Result<CommandRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(WalletError::from))
    }
}
