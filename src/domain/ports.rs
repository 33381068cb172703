use super::account::{Account, AccountNumber, Balance};
use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

/// Durable, concurrency-safe storage of account balances.
///
/// Implementations enforce the debt limit inside `apply_delta` and rely on
/// their medium to serialize conflicting writes to the same account.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Current balance, or zero when the account has never been written.
    async fn read_balance(&self, account: &AccountNumber) -> Result<Balance, StoreError>;

    /// Atomically adds `delta` to the balance and returns the new value.
    ///
    /// Creates the account when it does not exist. Rejects the whole write with
    /// `StoreError::DebtLimitExceeded` if the result would fall below the limit.
    async fn apply_delta(&self, account: &AccountNumber, delta: Balance) -> Result<Balance, StoreError>;

    /// Every stored account, ordered by account number.
    async fn accounts(&self) -> Result<Vec<Account>, StoreError>;
}

pub type LedgerStoreRef = Arc<dyn LedgerStore>;
