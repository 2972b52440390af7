//! Backup decoding
//!
//! Untrusted input is checked structurally on a generic JSON value first,
//! so each failure maps to a specific [`ImportError`], and only then decoded
//! into typed transactions.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use super::document::BackupDocument;
use crate::error::ImportError;
use crate::models::{Money, Transaction};

/// Parse and validate a backup payload
pub fn decode_backup(payload: &str) -> Result<BackupDocument, ImportError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| ImportError::Malformed(e.to_string()))?;

    let object = value.as_object().ok_or(ImportError::NotAnObject)?;

    let initial_balance = numeric_field(object, "initialBalance")?;
    let target_total = numeric_field(object, "targetTotal")?;

    let entries = object
        .get("transactions")
        .and_then(Value::as_array)
        .ok_or(ImportError::NotAList)?;

    let transactions = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            decode_transaction(entry)
                .map_err(|reason| ImportError::InvalidTransaction { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for (index, txn) in transactions.iter().enumerate() {
        if !seen.insert(&txn.id) {
            return Err(ImportError::DuplicateId {
                index,
                id: txn.id.to_string(),
            });
        }
    }

    Ok(BackupDocument {
        initial_balance,
        target_total,
        transactions,
    })
}

fn numeric_field(
    object: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Money, ImportError> {
    object
        .get(field)
        .and_then(Value::as_f64)
        .and_then(Money::from_decimal)
        .ok_or(ImportError::NotNumeric { field })
}

fn decode_transaction(value: &Value) -> Result<Transaction, String> {
    Transaction::deserialize(value).map_err(|e| e.to_string())
}
