use miette::Diagnostic;
use rust_decimal::Decimal;
use std::time::Duration;
use thiserror::Error;

/// Failures raised at the storage boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("debt limit exceeded for account {account}: balance would be {attempted}, limit is -{limit}")]
    DebtLimitExceeded {
        account: String,
        attempted: Decimal,
        limit: Decimal,
    },
    #[error("balance arithmetic overflow for account {0}")]
    Overflow(String),
    #[error("timed out after {0:?} waiting to write")]
    Timeout(Duration),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for StoreError {
    fn from(err: rocksdb::Error) -> Self {
        StoreError::Unavailable(err.into_string())
    }
}

/// Outcome of an account operation, as seen by callers of the ledger.
#[derive(Error, Diagnostic, Debug)]
pub enum LedgerError {
    #[error("invalid amount: {0}")]
    #[diagnostic(code(ledger::invalid_amount), help("amounts must be greater than zero"))]
    InvalidAmount(String),

    #[error("insufficient funds for withdrawal")]
    #[diagnostic(code(ledger::insufficient_funds))]
    InsufficientFunds,

    #[error("storage unavailable")]
    #[diagnostic(code(ledger::storage_unavailable), help("the request may be retried"))]
    StorageUnavailable(#[source] StoreError),

    #[error("invalid configuration: {0}")]
    #[diagnostic(code(ledger::config))]
    Config(String),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DebtLimitExceeded { .. } => LedgerError::InsufficientFunds,
            StoreError::Overflow(account) => {
                LedgerError::InvalidAmount(format!("amount overflows balance of account {}", account))
            }
            other => LedgerError::StorageUnavailable(other),
        }
    }
}

/// Failures that abort a whole batch run, as opposed to a single row.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("failed to write receipts: {0}")]
    Output(#[from] csv::Error),
    #[error("failed to flush receipts: {0}")]
    Flush(#[from] std::io::Error),
    #[error("operation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = LedgerError> = std::result::Result<T, E>;
