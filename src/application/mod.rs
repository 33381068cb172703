//! Application layer orchestrating account operations.
//!
//! `AccountService` turns balance, deposit and withdraw requests into calls on
//! a `LedgerStore` and maps storage failures to the outcomes callers act on.
//! It holds no locks; all coordination happens inside the store.

pub mod accounts;
