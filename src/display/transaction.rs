//! Transaction display formatting
//!
//! Register-style rows grouped by month.

use crate::models::{Category, Transaction, TransactionKind};
use crate::reports::MonthGroup;
use crate::services::Selection;

fn category_tag(category: Category) -> &'static str {
    match category {
        Category::FundSource => "FUND",
        Category::StudentPayment => "STUD",
        Category::InvoiceReimbursement => "INV",
        Category::OtherAdjustment => "ADJ",
    }
}

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, selected: bool) -> String {
    let marker = if selected { "*" } else { " " };
    let status = if txn.is_invoice() && txn.kind == TransactionKind::Expense {
        if txn.reimbursed {
            "✓"
        } else {
            "…"
        }
    } else {
        " "
    };
    let signed = match txn.kind {
        TransactionKind::Income => format!("+{}", txn.amount),
        TransactionKind::Expense => format!("-{}", txn.amount),
    };

    format!(
        "{}{} {:8} {} {:4} {:24} {:>14}",
        marker,
        status,
        txn.id.short(),
        txn.date.format("%Y-%m-%d"),
        category_tag(txn.category),
        truncate(&txn.description, 24),
        signed,
    )
}

/// Format month groups, newest month first
pub fn format_month_groups(groups: &[MonthGroup], selection: &Selection) -> String {
    if groups.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    for group in groups {
        output.push_str(&format!(
            "── {} ─────────────────────────────── net {:>12}\n",
            group.month, group.net_total
        ));
        for txn in &group.transactions {
            output.push_str(&format_transaction_row(txn, selection.contains(&txn.id)));
            output.push('\n');
        }
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    if txn.is_invoice() && txn.kind == TransactionKind::Expense {
        let state = if txn.reimbursed {
            "reimbursed"
        } else {
            "outstanding"
        };
        output.push_str(&format!("Status:      {}\n", state));
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
