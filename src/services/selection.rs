//! Transaction selection and bulk-action legality
//!
//! The selection is a set of transaction ids. Bulk reimbursement is only
//! offered when every selected transaction is an invoice-reimbursement in
//! the same reimbursed state; deletion accepts any non-empty selection.

use std::collections::HashSet;

use crate::models::{Transaction, TransactionId};
use crate::storage::TransactionRepository;

/// Areas of the interface where a pointer press keeps the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiRegion {
    TransactionRow,
    BulkActionBar,
    HeaderButton,
    Elsewhere,
}

impl UiRegion {
    pub fn keeps_selection(&self) -> bool {
        !matches!(self, Self::Elsewhere)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<TransactionId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present; returns whether it is now selected
    pub fn toggle(&mut self, id: TransactionId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Pointer press somewhere in the interface
    pub fn on_pointer_down(&mut self, region: UiRegion) {
        if !region.keeps_selection() {
            self.clear();
        }
    }

    /// Forget ids that no longer resolve to a transaction
    pub fn retain_existing(&mut self, repo: &TransactionRepository) {
        self.ids.retain(|id| repo.get(id).is_some());
    }

    pub fn contains(&self, id: &TransactionId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<TransactionId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Every selected id resolves to an invoice in the given reimbursed state
    fn all_invoices_with(&self, repo: &TransactionRepository, reimbursed: bool) -> bool {
        !self.ids.is_empty()
            && self.ids.iter().all(|id| {
                repo.get(id)
                    .map(|t: &Transaction| t.is_invoice() && t.reimbursed == reimbursed)
                    .unwrap_or(false)
            })
    }

    pub fn can_reimburse(&self, repo: &TransactionRepository) -> bool {
        self.all_invoices_with(repo, false)
    }

    pub fn can_cancel_reimbursement(&self, repo: &TransactionRepository) -> bool {
        self.all_invoices_with(repo, true)
    }

    pub fn can_delete(&self) -> bool {
        !self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionFields, TransactionKind};
    use chrono::NaiveDate;

    fn add(repo: &mut TransactionRepository, category: Category) -> TransactionId {
        repo.add(TransactionFields {
            date: NaiveDate::from_ymd_opt(2025, 5, 5).unwrap(),
            category,
            kind: TransactionKind::Expense,
            amount: Money::from_units(10),
            description: String::new(),
        })
        .id
    }

    fn mark_reimbursed(repo: &mut TransactionRepository, id: &TransactionId) {
        repo.get_mut(id).unwrap().reimbursed = true;
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        let id = TransactionId::new();

        assert!(selection.toggle(id.clone()));
        assert!(selection.contains(&id));
        assert!(!selection.toggle(id.clone()));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_empty_selection_allows_nothing() {
        let repo = TransactionRepository::new();
        let selection = Selection::new();

        assert!(!selection.can_reimburse(&repo));
        assert!(!selection.can_cancel_reimbursement(&repo));
        assert!(!selection.can_delete());
    }

    #[test]
    fn test_pending_invoices_can_be_reimbursed() {
        let mut repo = TransactionRepository::new();
        let a = add(&mut repo, Category::InvoiceReimbursement);
        let b = add(&mut repo, Category::InvoiceReimbursement);

        let mut selection = Selection::new();
        selection.toggle(a);
        selection.toggle(b);

        assert!(selection.can_reimburse(&repo));
        assert!(!selection.can_cancel_reimbursement(&repo));
    }

    #[test]
    fn test_reimbursed_invoices_can_be_cancelled() {
        let mut repo = TransactionRepository::new();
        let a = add(&mut repo, Category::InvoiceReimbursement);
        mark_reimbursed(&mut repo, &a);

        let mut selection = Selection::new();
        selection.toggle(a);

        assert!(!selection.can_reimburse(&repo));
        assert!(selection.can_cancel_reimbursement(&repo));
    }

    #[test]
    fn test_mixed_selection_allows_neither() {
        let mut repo = TransactionRepository::new();
        let pending = add(&mut repo, Category::InvoiceReimbursement);
        let done = add(&mut repo, Category::InvoiceReimbursement);
        mark_reimbursed(&mut repo, &done);

        let mut selection = Selection::new();
        selection.toggle(pending);
        selection.toggle(done);

        assert!(!selection.can_reimburse(&repo));
        assert!(!selection.can_cancel_reimbursement(&repo));
        assert!(selection.can_delete());
    }

    #[test]
    fn test_non_invoice_blocks_reimbursement() {
        let mut repo = TransactionRepository::new();
        let invoice = add(&mut repo, Category::InvoiceReimbursement);
        let other = add(&mut repo, Category::OtherAdjustment);

        let mut selection = Selection::new();
        selection.toggle(invoice);
        selection.toggle(other);

        assert!(!selection.can_reimburse(&repo));
    }

    #[test]
    fn test_never_both_legal() {
        let mut repo = TransactionRepository::new();
        let ids: Vec<_> = Category::ALL
            .iter()
            .flat_map(|c| [add(&mut repo, *c), add(&mut repo, *c)])
            .collect();
        for id in ids.iter().skip(1).step_by(2) {
            mark_reimbursed(&mut repo, id);
        }

        // Every subset of the eight transactions
        for mask in 0u32..(1 << ids.len()) {
            let mut selection = Selection::new();
            for (i, id) in ids.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    selection.toggle(id.clone());
                }
            }
            assert!(
                !(selection.can_reimburse(&repo) && selection.can_cancel_reimbursement(&repo)),
                "both actions legal for mask {:b}",
                mask
            );
        }
    }

    #[test]
    fn test_stale_id_blocks_actions() {
        let mut repo = TransactionRepository::new();
        let a = add(&mut repo, Category::InvoiceReimbursement);

        let mut selection = Selection::new();
        selection.toggle(a);
        selection.toggle(TransactionId::new());

        assert!(!selection.can_reimburse(&repo));

        selection.retain_existing(&repo);
        assert_eq!(selection.len(), 1);
        assert!(selection.can_reimburse(&repo));
    }

    #[test]
    fn test_pointer_down_outside_safe_regions_clears() {
        let mut selection = Selection::new();
        selection.toggle(TransactionId::new());

        selection.on_pointer_down(UiRegion::TransactionRow);
        selection.on_pointer_down(UiRegion::BulkActionBar);
        selection.on_pointer_down(UiRegion::HeaderButton);
        assert_eq!(selection.len(), 1);

        selection.on_pointer_down(UiRegion::Elsewhere);
        assert!(selection.is_empty());
    }
}
