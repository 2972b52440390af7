//! Month grouping
//!
//! Partitions a date-descending transaction list by `YYYY-MM`. Groups come
//! out in first-encounter order, so the most recent month is first.

use crate::models::{Money, Transaction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    /// `YYYY-MM`
    pub month: String,
    pub transactions: Vec<Transaction>,
    /// Signed total of the month's transactions, starting from zero
    pub net_total: Money,
}

/// Group transactions by month, preserving list order within and across groups
pub fn group_by_month<'a, I>(transactions: I) -> Vec<MonthGroup>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: Vec<MonthGroup> = Vec::new();

    for txn in transactions {
        let month = txn.month_key();
        match groups.iter_mut().find(|g| g.month == month) {
            Some(group) => {
                group.net_total += txn.signed_amount();
                group.transactions.push(txn.clone());
            }
            None => groups.push(MonthGroup {
                month,
                net_total: txn.signed_amount(),
                transactions: vec![txn.clone()],
            }),
        }
    }

    groups
}
