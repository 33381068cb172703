//! Storage adapters implementing `LedgerStore`.

use crate::config::LedgerConfig;
use crate::domain::ports::LedgerStoreRef;
use crate::error::StoreError;
use in_memory::InMemoryLedgerStore;
use std::sync::Arc;

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

/// Builds the store described by `config`.
///
/// A configured `db_path` selects RocksDB. Without the `storage-rocksdb`
/// feature a configured path is an error: balances are only kept in memory
/// when no path was asked for.
pub fn open_store(config: &LedgerConfig) -> Result<LedgerStoreRef, StoreError> {
    match &config.db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = rocksdb::RocksDBLedgerStore::open(path, config.max_debt, config.write_timeout)?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(path) => Err(StoreError::Unavailable(format!(
            "cannot open {}: built without the 'storage-rocksdb' feature",
            path.display()
        ))),
        None => Ok(in_memory_store(config)),
    }
}

fn in_memory_store(config: &LedgerConfig) -> LedgerStoreRef {
    Arc::new(InMemoryLedgerStore::new(config.max_debt, config.write_timeout))
}
