use crate::domain::account::DebtLimit;
use crate::error::{LedgerError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings fixed for the lifetime of the process.
///
/// Built once at startup and handed to the store factory; nothing in the crate
/// reads configuration from global state.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    pub max_debt: DebtLimit,
    /// Location of the persistent database. `None` keeps balances in memory.
    pub db_path: Option<PathBuf>,
    pub write_timeout: Duration,
}

impl LedgerConfig {
    pub fn new(max_debt: DebtLimit, db_path: Option<PathBuf>, write_timeout: Duration) -> Result<Self> {
        if write_timeout.is_zero() {
            return Err(LedgerError::Config(
                "write timeout must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            max_debt,
            db_path,
            write_timeout,
        })
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_debt: DebtLimit::default(),
            db_path: None,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.max_debt.value(), dec!(1000));
        assert_eq!(config.write_timeout, Duration::from_secs(5));
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = LedgerConfig::new(DebtLimit::default(), None, Duration::ZERO);
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }
}
