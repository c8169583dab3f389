//! Loading the raw transaction log the trainer mines.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::models::Transaction;

use super::ArtifactError;

/// Reads a transaction log export from disk.
///
/// Columns beyond the ones [`Transaction`] names (stock code, invoice date,
/// unit price, country) are ignored. Rows missing an invoice number or a
/// description carry no basket information and are dropped here rather than
/// polluting the matrix with empty keys.
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>, ArtifactError> {
    let file = File::open(path)?;
    read_transactions_from(file)
}

/// Reader-generic form of [`read_transactions`], used directly by tests.
pub fn read_transactions_from<R: Read>(reader: R) -> Result<Vec<Transaction>, ArtifactError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let record: Transaction = row?;
        if record.invoice_no.trim().is_empty() || record.description.trim().is_empty() {
            continue;
        }
        records.push(record);
    }
    Ok(records)
}
