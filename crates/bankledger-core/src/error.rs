use std::io;

use thiserror::Error;
use uuid::Uuid;

use bankledger_domain::{AccountError, Money, MoneyError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },
    #[error("account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<AccountError> for CoreError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InsufficientFunds { balance, requested } => {
                CoreError::InsufficientFunds { balance, requested }
            }
            other => CoreError::InvalidArgument(other.to_string()),
        }
    }
}

impl From<MoneyError> for CoreError {
    fn from(err: MoneyError) -> Self {
        CoreError::InvalidArgument(err.to_string())
    }
}
