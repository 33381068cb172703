use super::account::{AccountNumber, Balance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Balance,
    Deposit,
    Withdraw,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Balance => "balance",
            OperationKind::Deposit => "deposit",
            OperationKind::Withdraw => "withdraw",
        };
        f.write_str(name)
    }
}

/// A single request against the ledger.
///
/// `amount` is left unvalidated here; deposits and withdrawals check it when
/// they are executed.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Operation {
    pub r#type: OperationKind,
    pub account: AccountNumber,
    pub amount: Option<Decimal>,
}

/// Successful result of an operation.
#[derive(Debug, PartialEq, Clone)]
pub struct Receipt {
    pub account: AccountNumber,
    pub kind: OperationKind,
    pub amount: Option<Decimal>,
    pub balance: Balance,
}
