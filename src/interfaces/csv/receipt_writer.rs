use crate::domain::account::{Account, AccountNumber};
use crate::domain::operation::{Operation, OperationKind, Receipt};
use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};

/// How an operation ended, as reported to batch callers.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    InsufficientFunds,
    InvalidAmount,
    Error,
}

impl From<&LedgerError> for Status {
    fn from(err: &LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds => Status::InsufficientFunds,
            LedgerError::InvalidAmount(_) => Status::InvalidAmount,
            LedgerError::StorageUnavailable(_) | LedgerError::Config(_) => Status::Error,
        }
    }
}

#[derive(Serialize)]
struct ReceiptRow<'a> {
    account: &'a AccountNumber,
    r#type: OperationKind,
    amount: Option<Decimal>,
    balance: Option<Decimal>,
    status: Status,
}

#[derive(Serialize)]
struct AccountRow<'a> {
    account: &'a AccountNumber,
    balance: Decimal,
}

const RECEIPT_HEADER: [&str; 5] = ["account", "type", "amount", "balance", "status"];
const ACCOUNT_HEADER: [&str; 2] = ["account", "balance"];

/// Writes operation outcomes and account listings as CSV.
///
/// The header is written explicitly, so an empty listing still prints it.
pub struct ReceiptWriter<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> ReceiptWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().has_headers(false).from_writer(sink),
            header_written: false,
        }
    }

    fn header(&mut self, header: &[&str]) -> csv::Result<()> {
        if !self.header_written {
            self.writer.write_record(header)?;
            self.header_written = true;
        }
        Ok(())
    }

    /// One row per operation. Failed operations carry no balance.
    pub fn write_outcome(&mut self, operation: &Operation, outcome: &Result<Receipt, LedgerError>) -> csv::Result<()> {
        self.header(&RECEIPT_HEADER)?;
        let row = match outcome {
            Ok(receipt) => ReceiptRow {
                account: &receipt.account,
                r#type: receipt.kind,
                amount: receipt.amount.map(|a| a.normalize()),
                balance: Some(receipt.balance.value().normalize()),
                status: Status::Success,
            },
            Err(err) => ReceiptRow {
                account: &operation.account,
                r#type: operation.r#type,
                amount: operation.amount.map(|a| a.normalize()),
                balance: None,
                status: Status::from(err),
            },
        };
        self.writer.serialize(row)
    }

    pub fn write_accounts(&mut self, accounts: &[Account]) -> csv::Result<()> {
        self.header(&ACCOUNT_HEADER)?;
        for account in accounts {
            self.writer.serialize(AccountRow {
                account: &account.account_number,
                balance: account.balance.value().normalize(),
            })?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
