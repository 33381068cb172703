//! Concurrent batch execution with receipts in input order.

use crate::application::accounts::AccountService;
use crate::domain::operation::{Operation, Receipt};
use crate::error::{BatchError, LedgerError};
use crate::interfaces::csv::operation_reader::OperationReader;
use crate::interfaces::csv::receipt_writer::ReceiptWriter;
use std::collections::VecDeque;
use std::io::{Read, Write};
use tokio::task::JoinHandle;

/// Upper bound on operations running at once during a batch.
pub const MAX_IN_FLIGHT: usize = 64;

type Pending = (Operation, JoinHandle<Result<Receipt, LedgerError>>);

/// Runs every readable row of `source` as its own task and writes one receipt
/// per row to `sink`, in input order.
///
/// At most `max_in_flight` operations are outstanding; once the window is full
/// the oldest one is awaited and written before the next row is spawned.
/// Unreadable rows are logged and skipped.
pub async fn run_batch<R: Read, W: Write>(
    service: &AccountService,
    source: R,
    sink: W,
    max_in_flight: usize,
) -> Result<(), BatchError> {
    let max_in_flight = max_in_flight.max(1);
    let mut writer = ReceiptWriter::new(sink);
    let mut window: VecDeque<Pending> = VecDeque::with_capacity(max_in_flight);

    for (row, op_result) in OperationReader::new(source).operations().enumerate() {
        let operation = match op_result {
            Ok(operation) => operation,
            Err(e) => {
                tracing::warn!(row = row + 1, error = %e, "skipping unreadable operation");
                continue;
            }
        };

        if window.len() == max_in_flight {
            if let Some(oldest) = window.pop_front() {
                write_settled(&mut writer, oldest).await?;
            }
        }

        let service = service.clone();
        let task_op = operation.clone();
        let handle = tokio::spawn(async move { service.execute(task_op).await });
        window.push_back((operation, handle));
    }

    while let Some(pending) = window.pop_front() {
        write_settled(&mut writer, pending).await?;
    }
    writer.flush()?;
    Ok(())
}

async fn write_settled<W: Write>(writer: &mut ReceiptWriter<W>, (operation, handle): Pending) -> Result<(), BatchError> {
    let outcome = handle.await?;
    if let Err(LedgerError::StorageUnavailable(source)) = &outcome {
        tracing::error!(account = %operation.account, error = %source, "operation failed");
    }
    writer.write_outcome(&operation, &outcome)?;
    Ok(())
}
