//! Domain types and the storage port the ledger is built around.

pub mod account;
pub mod operation;
pub mod ports;
