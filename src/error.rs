use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },
    #[error("Bet must be between ${min} and ${max}, got ${amount}")]
    OutOfRange {
        amount: Decimal,
        min: Decimal,
        max: Decimal,
    },
    #[error("Random source failure: {0}")]
    RandomSourceFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WalletError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn random_source(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::RandomSourceFailure(error.into())
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
