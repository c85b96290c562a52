use crate::model::Transaction;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 5] = ["id", "type", "category", "amount", "date"];

/// Writes transactions as CSV with header `id,type,category,amount,date`.
pub fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Header goes out even when there are no rows
    wtr.write_record(HEADER)?;
    for tx in transactions {
        wtr.serialize(tx).context("Failed to serialize transaction")?;
    }
    wtr.flush()?;

    Ok(transactions.len())
}

pub fn export_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(file, transactions)
}
