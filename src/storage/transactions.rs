//! In-memory transaction repository
//!
//! Holds the ledger's transactions as an ordered list, newest date first.
//! Every mutation restores that order; transactions sharing a date keep
//! their relative order. Ids are unique within the repository.

use std::collections::HashSet;

use crate::error::{PettyCashError, PettyCashResult};
use crate::models::{Transaction, TransactionFields, TransactionId};

#[derive(Debug, Clone, Default)]
pub struct TransactionRepository {
    transactions: Vec<Transaction>,
}

impl TransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from loaded or imported records
    ///
    /// A record whose id was already seen is dropped; the first one wins.
    pub fn from_vec(transactions: Vec<Transaction>) -> Self {
        let mut repo = Self {
            transactions: dedup_ids(transactions),
        };
        repo.sort();
        repo
    }

    fn sort(&mut self) {
        // Vec::sort_by is stable
        self.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Record a new transaction; it starts out not reimbursed
    pub fn add(&mut self, fields: TransactionFields) -> Transaction {
        let txn = Transaction::new(fields);
        self.transactions.push(txn.clone());
        self.sort();
        txn
    }

    /// Replace the record with the same id
    pub fn update(&mut self, txn: Transaction) -> PettyCashResult<()> {
        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == txn.id)
            .ok_or_else(|| PettyCashError::transaction_not_found(txn.id.as_str()))?;
        *slot = txn;
        self.sort();
        Ok(())
    }

    pub fn remove(&mut self, id: &TransactionId) -> Option<Transaction> {
        let pos = self.transactions.iter().position(|t| &t.id == id)?;
        Some(self.transactions.remove(pos))
    }

    /// Remove every transaction whose id is in `ids`; returns how many went
    pub fn remove_many(&mut self, ids: &HashSet<TransactionId>) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|t| !ids.contains(&t.id));
        before - self.transactions.len()
    }

    /// Swap in a whole new list (used by import)
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = dedup_ids(transactions);
        self.sort();
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    pub fn get_mut(&mut self, id: &TransactionId) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| &t.id == id)
    }

    /// Resolve a full id or a unique prefix of one
    pub fn find(&self, identifier: &str) -> PettyCashResult<&Transaction> {
        let identifier = identifier.trim();
        if let Some(exact) = self.transactions.iter().find(|t| t.id.as_str() == identifier) {
            return Ok(exact);
        }

        let mut matches = self
            .transactions
            .iter()
            .filter(|t| t.id.matches_prefix(identifier));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn),
            (Some(_), Some(_)) => Err(PettyCashError::Validation(format!(
                "Id prefix '{}' is ambiguous",
                identifier
            ))),
            (None, _) => Err(PettyCashError::transaction_not_found(identifier)),
        }
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn dedup_ids(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    let before = transactions.len();
    let kept: Vec<Transaction> = transactions
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect();

    if kept.len() < before {
        tracing::warn!(
            dropped = before - kept.len(),
            "discarded transactions with duplicate ids"
        );
    }
    kept
}
