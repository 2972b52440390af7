//! The backup document
//!
//! `{ "initialBalance": number, "targetTotal": number, "transactions": [...] }`
//! written as-is, with no wrapper or version field.

use std::io::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PettyCashError, PettyCashResult};
use crate::models::{Money, Transaction};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub initial_balance: Money,
    pub target_total: Money,
    pub transactions: Vec<Transaction>,
}

/// `petty-cash-backup-<YYYY-MM-DD>.json`
pub fn backup_file_name(day: NaiveDate) -> String {
    format!("petty-cash-backup-{}.json", day.format("%Y-%m-%d"))
}

/// Write the document as pretty-printed JSON
pub fn write_backup<W: Write>(document: &BackupDocument, writer: &mut W) -> PettyCashResult<()> {
    serde_json::to_writer_pretty(&mut *writer, document)
        .map_err(|e| PettyCashError::Io(format!("Failed to write backup: {}", e)))?;
    writeln!(writer)?;
    Ok(())
}
