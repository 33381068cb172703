use crate::domain::account::{Account, AccountNumber, Balance, DebtLimit};
use crate::domain::ports::LedgerStore;
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// A thread-safe in-memory ledger.
///
/// The map's write lock is the medium's serialization point: `apply_delta`
/// reads, checks and writes while holding it, so concurrent deltas on one
/// account can never both observe the same starting balance. Waiting for the
/// lock is bounded by `write_timeout`.
#[derive(Clone)]
pub struct InMemoryLedgerStore {
    balances: Arc<RwLock<BTreeMap<AccountNumber, Balance>>>,
    max_debt: DebtLimit,
    write_timeout: Duration,
}

impl InMemoryLedgerStore {
    pub fn new(max_debt: DebtLimit, write_timeout: Duration) -> Self {
        Self {
            balances: Arc::default(),
            max_debt,
            write_timeout,
        }
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn read_balance(&self, account: &AccountNumber) -> Result<Balance, StoreError> {
        let balances = self.balances.read().await;
        Ok(balances.get(account).copied().unwrap_or(Balance::ZERO))
    }

    #[instrument(skip_all, fields(account = %account, delta = %delta), err(level = "debug"))]
    async fn apply_delta(&self, account: &AccountNumber, delta: Balance) -> Result<Balance, StoreError> {
        let mut balances = tokio::time::timeout(self.write_timeout, self.balances.write())
            .await
            .map_err(|_| {
                warn!("gave up waiting for write lock");
                StoreError::Timeout(self.write_timeout)
            })?;

        let current = balances.get(account).copied().unwrap_or(Balance::ZERO);
        let new_balance = current
            .checked_add(delta)
            .ok_or_else(|| StoreError::Overflow(account.to_string()))?;

        if !self.max_debt.admits(new_balance) {
            return Err(StoreError::DebtLimitExceeded {
                account: account.to_string(),
                attempted: new_balance.value(),
                limit: self.max_debt.value(),
            });
        }

        balances.insert(account.clone(), new_balance);
        debug!(balance = %new_balance, "delta applied");
        Ok(new_balance)
    }

    async fn accounts(&self) -> Result<Vec<Account>, StoreError> {
        let balances = self.balances.read().await;
        Ok(balances
            .iter()
            .map(|(account_number, balance)| Account {
                account_number: account_number.clone(),
                balance: *balance,
            })
            .collect())
    }
}
