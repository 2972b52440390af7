//! Fund summary
//!
//! The headline figures of the ledger. All of them are folds over the full
//! transaction list; the category filter never applies here.

use std::collections::HashSet;

use crate::models::{Category, FundSettings, Money, Transaction, TransactionId, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Cash that should be in the box right now
    pub visible_balance: Money,
    /// Fund-source movements minus student payments
    pub receivable: Money,
    /// Running balance counting only invoice-reimbursement transactions
    pub invoice_only_balance: Money,
    /// Invoice expenses still waiting to be paid back
    pub unreimbursed_total: Money,
    /// `invoice_only_balance + unreimbursed_total`
    pub verification_total: Money,
    /// Expected fund size the verification total is compared against
    pub target_total: Money,
}

impl Summary {
    pub fn compute(transactions: &[Transaction], settings: &FundSettings) -> Self {
        let opening = settings.opening_balance();
        let invoice_only_balance = invoice_only_balance(transactions, opening);
        let unreimbursed_total = unreimbursed_total(transactions);

        Self {
            visible_balance: visible_balance(transactions, opening),
            receivable: receivable(transactions),
            invoice_only_balance,
            unreimbursed_total,
            verification_total: invoice_only_balance + unreimbursed_total,
            target_total: settings.target_total,
        }
    }

    /// Whether the books balance against the target
    ///
    /// Advisory only; nothing refuses to run when this is false.
    pub fn is_reconciled(&self) -> bool {
        self.verification_total == self.target_total
    }

    /// How far the verification total is from the target
    pub fn discrepancy(&self) -> Money {
        self.verification_total - self.target_total
    }
}

/// Opening balance plus every signed amount
pub fn visible_balance(transactions: &[Transaction], opening: Money) -> Money {
    transactions
        .iter()
        .fold(opening, |acc, t| acc + t.signed_amount())
}

/// Fund-source amounts in, student payments out, everything else ignored
pub fn receivable(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .fold(Money::zero(), |acc, t| match t.category {
            Category::FundSource => acc + t.amount,
            Category::StudentPayment => acc - t.amount,
            _ => acc,
        })
}

pub fn invoice_only_balance(transactions: &[Transaction], opening: Money) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_invoice())
        .fold(opening, |acc, t| acc + t.signed_amount())
}

pub fn unreimbursed_total(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_invoice() && t.kind == TransactionKind::Expense && !t.reimbursed)
        .map(|t| t.amount)
        .sum()
}

/// Amount that reimbursing the selection would settle
pub fn selected_for_reimbursement(
    transactions: &[Transaction],
    selected: &HashSet<TransactionId>,
) -> Money {
    transactions
        .iter()
        .filter(|t| selected.contains(&t.id) && t.is_invoice() && !t.reimbursed)
        .map(|t| t.amount)
        .sum()
}
