use crate::domain::operation::Operation;
use std::io::Read;

/// Reads ledger operations from a CSV source with a `type, account, amount`
/// header.
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OperationReader<R> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes operations, one `Result` per data row.
    pub fn operations(self) -> impl Iterator<Item = Result<Operation, csv::Error>> {
        self.reader.into_deserialize()
    }
}
