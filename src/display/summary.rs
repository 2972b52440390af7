//! Summary display formatting

use crate::models::{FundSettings, Money};
use crate::reports::Summary;

/// Format the headline figures as an aligned block
pub fn format_summary(summary: &Summary, settings: &FundSettings) -> String {
    let mut output = String::new();

    output.push_str("Petty Cash Summary\n");
    output.push_str(&"=".repeat(40));
    output.push('\n');

    let opening = match settings.initial_balance {
        Some(balance) => balance.to_string(),
        None => "(not set)".to_string(),
    };
    output.push_str(&format!("{:<24}{:>16}\n", "Initial balance", opening));
    output.push_str(&format!(
        "{:<24}{:>16}\n",
        "Current balance", summary.visible_balance
    ));
    output.push_str(&format!("{:<24}{:>16}\n", "Receivable", summary.receivable));
    output.push_str(&format!(
        "{:<24}{:>16}\n",
        "Unreimbursed invoices", summary.unreimbursed_total
    ));
    output.push_str(&"-".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "{:<24}{:>16}\n",
        "Invoice-only balance", summary.invoice_only_balance
    ));
    output.push_str(&format!(
        "{:<24}{:>16}\n",
        "Verification total", summary.verification_total
    ));
    output.push_str(&format!(
        "{:<24}{:>16}\n",
        "Target total", summary.target_total
    ));

    if summary.is_reconciled() {
        output.push_str("Books balance: verification total matches target.\n");
    } else {
        output.push_str(&format!(
            "Books do not balance: off by {}.\n",
            summary.discrepancy()
        ));
    }

    output
}

/// One-line note about the current selection
pub fn format_selection_note(count: usize, reimbursable: Money) -> String {
    format!("{} selected, {} pending reimbursement", count, reimbursable)
}
