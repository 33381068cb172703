use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Opaque identifier of an account. Any string is a valid key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountNumber {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Signed monetary value held by an account.
///
/// A thin wrapper around `rust_decimal::Decimal` so balances never go through
/// binary floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(pub Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Adds `delta`, returning `None` if the result leaves the decimal range.
    pub fn checked_add(self, delta: Balance) -> Option<Balance> {
        self.0.checked_add(delta.0).map(Self)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Balance {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// A strictly positive amount moved by a deposit or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::InvalidAmount(format!(
                "{} is not greater than zero",
                value
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

/// How far below zero a balance may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebtLimit(Decimal);

impl DebtLimit {
    pub fn new(max_debt: Decimal) -> Result<Self, LedgerError> {
        if max_debt < Decimal::ZERO {
            return Err(LedgerError::Config(format!(
                "max debt must be non-negative, got {}",
                max_debt
            )));
        }
        Ok(Self(max_debt))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Whether `balance >= -max_debt`.
    pub fn admits(&self, balance: Balance) -> bool {
        balance.0 >= -self.0
    }
}

impl Default for DebtLimit {
    fn default() -> Self {
        Self(Decimal::from(1000))
    }
}

/// The persisted record for one account.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Account {
    pub account_number: AccountNumber,
    pub balance: Balance,
}

impl Account {
    pub fn new(account_number: AccountNumber) -> Self {
        Self {
            account_number,
            balance: Balance::ZERO,
        }
    }
}
