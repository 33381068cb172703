use crate::domain::account::{Account, AccountNumber, Amount, Balance};
use crate::domain::operation::{Operation, OperationKind, Receipt};
use crate::domain::ports::LedgerStoreRef;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use tracing::instrument;

/// Entry point for balance queries, deposits and withdrawals.
///
/// Holds no state beyond a handle to the store; cloning is cheap and clones
/// may be used from any number of tasks at once.
#[derive(Clone)]
pub struct AccountService {
    store: LedgerStoreRef,
}

impl AccountService {
    pub fn new(store: LedgerStoreRef) -> Self {
        Self { store }
    }

    /// Balance of `account`, zero if it was never written. Never creates it.
    pub async fn get_balance(&self, account: &AccountNumber) -> Result<Balance> {
        Ok(self.store.read_balance(account).await?)
    }

    #[instrument(skip(self), fields(account = %account), err(level = "warn"))]
    pub async fn deposit(&self, account: &AccountNumber, amount: Decimal) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        Ok(self.store.apply_delta(account, amount.into()).await?)
    }

    /// Withdraws `amount`, letting the balance go negative down to the debt
    /// limit. Anything past it fails with `InsufficientFunds`.
    #[instrument(skip(self), fields(account = %account), err(level = "warn"))]
    pub async fn withdraw(&self, account: &AccountNumber, amount: Decimal) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        // DebtLimitExceeded from the store surfaces as InsufficientFunds.
        Ok(self.store.apply_delta(account, -Balance::from(amount)).await?)
    }

    /// Runs a parsed operation and describes the result.
    pub async fn execute(&self, operation: Operation) -> Result<Receipt> {
        let Operation {
            r#type: kind,
            account,
            amount,
        } = operation;

        let balance = match kind {
            OperationKind::Balance => self.get_balance(&account).await?,
            OperationKind::Deposit => self.deposit(&account, required(amount)?).await?,
            OperationKind::Withdraw => self.withdraw(&account, required(amount)?).await?,
        };

        Ok(Receipt {
            account,
            kind,
            amount,
            balance,
        })
    }

    pub async fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self.store.accounts().await?)
    }
}

fn required(amount: Option<Decimal>) -> Result<Decimal> {
    amount.ok_or_else(|| LedgerError::InvalidAmount("amount is missing".to_string()))
}
