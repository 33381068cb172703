use crate::domain::account::{Account, AccountNumber, Balance, DebtLimit};
use crate::domain::ports::LedgerStore;
use crate::error::StoreError;
use async_trait::async_trait;
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, ErrorKind, IteratorMode, Options, TransactionDB,
    TransactionDBOptions, TransactionOptions, WriteOptions,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Column Family holding one record per account.
pub const CF_ACCOUNTS: &str = "accounts";

/// A persistent ledger backed by a RocksDB `TransactionDB`.
///
/// `apply_delta` runs a pessimistic transaction: the account key is locked with
/// `get_for_update`, so RocksDB itself serializes concurrent writers to the same
/// account. Lock acquisition is bounded by the configured write timeout.
///
/// `Clone` shares the underlying `Arc<TransactionDB>`.
#[derive(Clone)]
pub struct RocksDBLedgerStore {
    db: Arc<TransactionDB>,
    max_debt: DebtLimit,
    write_timeout: Duration,
}

impl RocksDBLedgerStore {
    /// Opens or creates the database at `path`, creating the accounts column
    /// family if it is missing.
    pub fn open<P: AsRef<Path>>(path: P, max_debt: DebtLimit, write_timeout: Duration) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let mut txn_db_opts = TransactionDBOptions::default();
        txn_db_opts.set_txn_lock_timeout(timeout_millis(write_timeout));

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let db = TransactionDB::open_cf_descriptors(&opts, &txn_db_opts, path.as_ref(), vec![cf_accounts])?;

        info!(path = %path.as_ref().display(), "opened ledger database");
        Ok(Self {
            db: Arc::new(db),
            max_debt,
            write_timeout,
        })
    }

    /// Runs a RocksDB call on the blocking pool.
    async fn blocking<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&TransactionDB) -> Result<T, StoreError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| StoreError::Unavailable(format!("storage task failed: {}", e)))?
    }
}

fn timeout_millis(timeout: Duration) -> i64 {
    i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX)
}

fn accounts_cf(db: &TransactionDB) -> Result<&ColumnFamily, StoreError> {
    db.cf_handle(CF_ACCOUNTS)
        .ok_or_else(|| StoreError::Unavailable("accounts column family not found".to_string()))
}

fn decode(bytes: &[u8]) -> Result<Account, StoreError> {
    serde_json::from_slice(bytes)
        .map_err(|e| StoreError::Unavailable(format!("corrupt account record: {}", e)))
}

fn encode(account: &Account) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(account)
        .map_err(|e| StoreError::Unavailable(format!("serialization error: {}", e)))
}

/// Lock waits surface as `TimedOut` (or `Busy` under deadlock detection).
fn write_error(err: rocksdb::Error, timeout: Duration) -> StoreError {
    match err.kind() {
        ErrorKind::TimedOut | ErrorKind::Busy => StoreError::Timeout(timeout),
        _ => StoreError::from(err),
    }
}

fn apply_delta_blocking(
    db: &TransactionDB,
    account: &AccountNumber,
    delta: Balance,
    max_debt: DebtLimit,
    timeout: Duration,
) -> Result<Balance, StoreError> {
    let cf = accounts_cf(db)?;
    let key = account.as_str().as_bytes();

    let mut txn_opts = TransactionOptions::default();
    txn_opts.set_lock_timeout(timeout_millis(timeout));
    let txn = db.transaction_opt(&WriteOptions::default(), &txn_opts);

    // Dropping `txn` without commit rolls it back, so every `?` below leaves
    // the stored balance untouched.
    let mut record = match txn
        .get_for_update_cf(cf, key, true)
        .map_err(|e| write_error(e, timeout))?
    {
        Some(bytes) => decode(&bytes)?,
        None => Account::new(account.clone()),
    };

    let new_balance = record
        .balance
        .checked_add(delta)
        .ok_or_else(|| StoreError::Overflow(account.to_string()))?;

    if !max_debt.admits(new_balance) {
        txn.rollback()?;
        return Err(StoreError::DebtLimitExceeded {
            account: account.to_string(),
            attempted: new_balance.value(),
            limit: max_debt.value(),
        });
    }

    record.balance = new_balance;
    txn.put_cf(cf, key, encode(&record)?)?;
    txn.commit().map_err(|e| write_error(e, timeout))?;
    Ok(new_balance)
}

#[async_trait]
impl LedgerStore for RocksDBLedgerStore {
    async fn read_balance(&self, account: &AccountNumber) -> Result<Balance, StoreError> {
        let owned = account.clone();
        self.blocking(move |db| {
            let cf = accounts_cf(db)?;
            match db.get_cf(cf, owned.as_str().as_bytes())? {
                Some(bytes) => Ok(decode(&bytes)?.balance),
                None => Ok(Balance::ZERO),
            }
        })
        .await
    }

    #[instrument(skip_all, fields(account = %account, delta = %delta), err(level = "debug"))]
    async fn apply_delta(&self, account: &AccountNumber, delta: Balance) -> Result<Balance, StoreError> {
        let owned = account.clone();
        let max_debt = self.max_debt;
        let timeout = self.write_timeout;

        // Lock waits block the calling thread for up to `timeout`.
        let result = self
            .blocking(move |db| apply_delta_blocking(db, &owned, delta, max_debt, timeout))
            .await;

        match &result {
            Ok(balance) => debug!(balance = %balance, "delta applied"),
            Err(StoreError::Timeout(_)) => warn!("gave up waiting for account lock"),
            Err(_) => {}
        }
        result
    }

    async fn accounts(&self) -> Result<Vec<Account>, StoreError> {
        self.blocking(|db| {
            let cf = accounts_cf(db)?;
            let mut accounts = Vec::new();
            for item in db.iterator_cf(cf, IteratorMode::Start) {
                let (_key, value) = item?;
                accounts.push(decode(&value)?);
            }
            Ok(accounts)
        })
        .await
    }
}
