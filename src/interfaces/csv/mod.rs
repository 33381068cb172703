//! CSV adapters for batch input and tabular output.

pub mod batch;
pub mod operation_reader;
pub mod receipt_writer;
