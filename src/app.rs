//! Application state
//!
//! [`LedgerApp`] owns everything the ledger knows: the transactions, fund
//! settings, display preferences and the current selection. Every mutation
//! goes through it and is mirrored to the backing store key by key. A failed
//! write is logged and the in-memory state is kept.

use serde::Serialize;

use crate::backup::BackupDocument;
use crate::error::{PettyCashError, PettyCashResult};
use crate::models::{
    Category, FundSettings, Money, Theme, Transaction, TransactionDraft, TransactionId,
    VisibleCategories,
};
use crate::reports::{group_by_month, selected_for_reimbursement, MonthGroup, Summary};
use crate::services::{Selection, UiRegion};
use crate::storage::persisted::{self, keys};
use crate::storage::{KeyValueStore, TransactionRepository};

pub struct LedgerApp<S: KeyValueStore> {
    store: S,
    transactions: TransactionRepository,
    settings: FundSettings,
    visible: VisibleCategories,
    theme: Theme,
    selection: Selection,
}

/// Write one key, logging instead of failing
fn persist<S, T>(store: &mut S, key: &str, value: &T)
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    if let Err(e) = persisted::save(store, key, value) {
        tracing::error!(key, error = %e, "failed to persist value");
    }
}

impl<S: KeyValueStore> LedgerApp<S> {
    /// Load every key from the store, using defaults for anything missing
    pub fn load(store: S) -> Self {
        let defaults = FundSettings::default();
        let transactions: Vec<Transaction> =
            persisted::load_or_default(&store, keys::TRANSACTIONS);
        let settings = FundSettings {
            initial_balance: persisted::load_or(&store, keys::INITIAL_BALANCE, None),
            target_total: persisted::load_or(&store, keys::TARGET_TOTAL, defaults.target_total),
        };
        let visible = persisted::load_or_default(&store, keys::VISIBLE_CATEGORIES);
        let theme = persisted::load_or_default(&store, keys::THEME);

        tracing::debug!(count = transactions.len(), "ledger loaded");

        Self {
            store,
            transactions: TransactionRepository::from_vec(transactions),
            settings,
            visible,
            theme,
            selection: Selection::new(),
        }
    }

    fn persist_transactions(&mut self) {
        persist(&mut self.store, keys::TRANSACTIONS, self.transactions.all());
    }

    fn persist_settings(&mut self) {
        persist(
            &mut self.store,
            keys::INITIAL_BALANCE,
            &self.settings.initial_balance,
        );
        persist(&mut self.store, keys::TARGET_TOTAL, &self.settings.target_total);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transactions(&self) -> &TransactionRepository {
        &self.transactions
    }

    pub fn settings(&self) -> &FundSettings {
        &self.settings
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn visible_categories(&self) -> &VisibleCategories {
        &self.visible
    }

    /// First run: no opening balance has been recorded yet
    pub fn needs_setup(&self) -> bool {
        !self.settings.is_configured()
    }

    pub fn complete_setup(
        &mut self,
        initial_balance: Money,
        target_total: Money,
    ) -> PettyCashResult<()> {
        self.selection.clear();
        let target_total = FundSettings::validate_target(target_total)?;

        self.settings = FundSettings {
            initial_balance: Some(initial_balance),
            target_total,
        };
        self.persist_settings();
        tracing::info!(%initial_balance, %target_total, "fund configured");
        Ok(())
    }

    /// Edit either setting in place; `None` leaves a value unchanged
    pub fn update_settings(
        &mut self,
        initial_balance: Option<Money>,
        target_total: Option<Money>,
    ) -> PettyCashResult<()> {
        self.selection.clear();
        if let Some(target) = target_total {
            self.settings.target_total = FundSettings::validate_target(target)?;
        }
        if let Some(initial) = initial_balance {
            self.settings.initial_balance = Some(initial);
        }
        self.persist_settings();
        Ok(())
    }

    pub fn add_transaction(&mut self, draft: &TransactionDraft) -> PettyCashResult<Transaction> {
        self.selection.clear();
        let fields = draft.validate()?;
        let txn = self.transactions.add(fields);
        self.persist_transactions();
        tracing::debug!(id = %txn.id, "transaction added");
        Ok(txn)
    }

    /// Replace a transaction's content; the reimbursed flag is kept
    pub fn update_transaction(
        &mut self,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> PettyCashResult<Transaction> {
        let fields = draft.validate()?;
        let mut txn = self
            .transactions
            .get(id)
            .cloned()
            .ok_or_else(|| PettyCashError::transaction_not_found(id.as_str()))?;

        txn.apply(fields);
        self.transactions.update(txn.clone())?;
        self.selection.clear();
        self.persist_transactions();
        tracing::debug!(id = %txn.id, "transaction updated");
        Ok(txn)
    }

    pub fn delete_transaction(&mut self, id: &TransactionId) -> PettyCashResult<Transaction> {
        let removed = self
            .transactions
            .remove(id)
            .ok_or_else(|| PettyCashError::transaction_not_found(id.as_str()))?;
        self.selection.retain_existing(&self.transactions);
        self.persist_transactions();
        tracing::debug!(id = %removed.id, "transaction deleted");
        Ok(removed)
    }

    /// Delete everything in the selection
    pub fn delete_selected(&mut self) -> PettyCashResult<usize> {
        if !self.selection.can_delete() {
            return Err(PettyCashError::IllegalAction("Nothing is selected".into()));
        }
        let removed = self.transactions.remove_many(self.selection.ids());
        self.selection.clear();
        self.persist_transactions();
        tracing::debug!(removed, "selected transactions deleted");
        Ok(removed)
    }

    /// Toggle a transaction in or out of the selection
    pub fn toggle_selection(&mut self, id: &TransactionId) -> PettyCashResult<bool> {
        if self.transactions.get(id).is_none() {
            return Err(PettyCashError::transaction_not_found(id.as_str()));
        }
        Ok(self.selection.toggle(id.clone()))
    }

    pub fn on_pointer_down(&mut self, region: UiRegion) {
        self.selection.on_pointer_down(region);
    }

    pub fn can_reimburse(&self) -> bool {
        self.selection.can_reimburse(&self.transactions)
    }

    pub fn can_cancel_reimbursement(&self) -> bool {
        self.selection.can_cancel_reimbursement(&self.transactions)
    }

    /// Mark (or unmark) every selected invoice as reimbursed, then clear the selection
    pub fn set_selected_reimbursed(&mut self, reimbursed: bool) -> PettyCashResult<usize> {
        let allowed = if reimbursed {
            self.can_reimburse()
        } else {
            self.can_cancel_reimbursement()
        };
        if !allowed {
            let action = if reimbursed {
                "reimburse"
            } else {
                "cancel reimbursement of"
            };
            return Err(PettyCashError::IllegalAction(format!(
                "Cannot {} the current selection: every selected transaction must be an \
                 invoice reimbursement that is currently {}",
                action,
                if reimbursed { "outstanding" } else { "reimbursed" }
            )));
        }

        let mut changed = 0;
        for id in self.selection.ids() {
            if let Some(txn) = self.transactions.get_mut(id) {
                txn.reimbursed = reimbursed;
                changed += 1;
            }
        }
        self.selection.clear();
        self.persist_transactions();
        tracing::info!(changed, reimbursed, "reimbursement status updated");
        Ok(changed)
    }

    /// Show or hide a category in listings; returns the new visibility
    pub fn toggle_category_filter(&mut self, category: Category) -> bool {
        self.selection.clear();
        let visible = self.visible.toggle(category);
        persist(&mut self.store, keys::VISIBLE_CATEGORIES, &self.visible);
        visible
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        persist(&mut self.store, keys::THEME, &self.theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    /// Headline figures over every transaction, ignoring the filter
    pub fn summary(&self) -> Summary {
        Summary::compute(self.transactions.all(), &self.settings)
    }

    /// Month groups of the transactions whose category is visible
    pub fn month_groups(&self) -> Vec<MonthGroup> {
        group_by_month(
            self.transactions
                .iter()
                .filter(|t| self.visible.contains(t.category)),
        )
    }

    pub fn selected_for_reimbursement(&self) -> Money {
        selected_for_reimbursement(self.transactions.all(), self.selection.ids())
    }

    pub fn export_document(&self) -> BackupDocument {
        BackupDocument {
            initial_balance: self.settings.opening_balance(),
            target_total: self.settings.target_total,
            transactions: self.transactions.all().to_vec(),
        }
    }

    /// Replace settings and transactions with a decoded backup
    pub fn import_document(&mut self, document: BackupDocument) {
        let BackupDocument {
            initial_balance,
            target_total,
            transactions,
        } = document;

        self.selection.clear();
        self.settings = FundSettings {
            initial_balance: Some(initial_balance),
            target_total,
        };
        self.transactions.replace_all(transactions);
        self.persist_settings();
        self.persist_transactions();
        tracing::info!(count = self.transactions.len(), "backup imported");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::{decode_backup, write_backup};
    use crate::models::TransactionKind;
    use crate::error::ImportError;
    use crate::storage::MemoryStore;

    /// Reads nothing and refuses every write
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> PettyCashResult<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> PettyCashResult<()> {
            Err(PettyCashError::Storage(format!("disk full writing {}", key)))
        }
    }

    fn draft(date: &str, category: Category, kind: TransactionKind, amount: &str) -> TransactionDraft {
        TransactionDraft {
            date: Some(date.into()),
            category,
            kind,
            amount: Some(amount.into()),
            description: None,
        }
    }

    fn configured_app() -> LedgerApp<MemoryStore> {
        let mut app = LedgerApp::load(MemoryStore::new());
        app.complete_setup(Money::zero(), Money::from_units(30000))
            .unwrap();
        app
    }

    fn invoice(app: &mut LedgerApp<MemoryStore>, date: &str, amount: &str) -> TransactionId {
        app.add_transaction(&draft(
            date,
            Category::InvoiceReimbursement,
            TransactionKind::Expense,
            amount,
        ))
        .unwrap()
        .id
    }

    #[test]
    fn test_first_run_needs_setup() {
        let app = LedgerApp::load(MemoryStore::new());
        assert!(app.needs_setup());
        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(app.settings().target_total, Money::from_units(30000));
    }

    #[test]
    fn test_setup_persists_settings() {
        let app = configured_app();
        assert!(!app.needs_setup());
        assert_eq!(app.store().raw(keys::INITIAL_BALANCE), Some("0"));
        assert_eq!(app.store().raw(keys::TARGET_TOTAL), Some("30000"));
    }

    #[test]
    fn test_state_survives_reload() {
        let mut app = configured_app();
        invoice(&mut app, "2025-02-01", "12.5");
        app.toggle_category_filter(Category::FundSource);
        app.set_theme(Theme::Dark);

        let reloaded = LedgerApp::load(app.store().clone());
        assert_eq!(reloaded.transactions().len(), 1);
        assert_eq!(reloaded.transactions().all()[0].amount.cents(), 1250);
        assert!(!reloaded.visible_categories().contains(Category::FundSource));
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert!(!reloaded.needs_setup());
    }

    #[test]
    fn test_corrupt_store_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.insert_raw(keys::TRANSACTIONS, "[{\"broken\": true}]");
        store.insert_raw(keys::THEME, "\"purple\"");
        store.insert_raw(keys::TARGET_TOTAL, "12345");

        let app = LedgerApp::load(store);
        assert!(app.transactions().is_empty());
        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(app.settings().target_total, Money::from_units(12345));
    }

    #[test]
    fn test_invalid_draft_is_not_committed() {
        let mut app = configured_app();
        let result = app.add_transaction(&draft(
            "2025-01-01",
            Category::FundSource,
            TransactionKind::Income,
            "0",
        ));

        assert!(result.unwrap_err().is_validation());
        assert!(app.transactions().is_empty());
        assert_eq!(app.store().raw(keys::TRANSACTIONS), None);
    }

    #[test]
    fn test_scenario_invoice_reimbursement() {
        let mut app = configured_app();
        let id = invoice(&mut app, "2025-03-10", "5000");

        let summary = app.summary();
        assert_eq!(summary.unreimbursed_total, Money::from_units(5000));
        assert_eq!(summary.invoice_only_balance, Money::from_units(-5000));
        assert_eq!(summary.verification_total, Money::zero());

        app.toggle_selection(&id).unwrap();
        assert_eq!(app.selected_for_reimbursement(), Money::from_units(5000));
        assert_eq!(app.set_selected_reimbursed(true).unwrap(), 1);
        assert!(app.selection().is_empty());

        let summary = app.summary();
        assert_eq!(summary.invoice_only_balance, Money::zero());
        assert_eq!(summary.unreimbursed_total, Money::zero());
        assert_eq!(summary.verification_total, Money::zero());
    }

    #[test]
    fn test_reimburse_then_cancel_restores_summary() {
        let mut app = configured_app();
        let id = invoice(&mut app, "2025-03-10", "80");
        let original = app.summary();

        app.toggle_selection(&id).unwrap();
        app.set_selected_reimbursed(true).unwrap();
        app.toggle_selection(&id).unwrap();
        assert!(!app.can_reimburse());
        app.set_selected_reimbursed(false).unwrap();

        assert_eq!(app.summary(), original);
    }

    #[test]
    fn test_illegal_reimbursement_leaves_state() {
        let mut app = configured_app();
        let other = app
            .add_transaction(&draft(
                "2025-01-01",
                Category::OtherAdjustment,
                TransactionKind::Expense,
                "10",
            ))
            .unwrap();

        app.toggle_selection(&other.id).unwrap();
        let err = app.set_selected_reimbursed(true).unwrap_err();
        assert!(matches!(err, PettyCashError::IllegalAction(_)));
        assert_eq!(app.selection().len(), 1);
        assert!(!app.transactions().get(&other.id).unwrap().reimbursed);
    }

    #[test]
    fn test_delete_selected_transaction_updates_selection() {
        let mut app = configured_app();
        let a = invoice(&mut app, "2025-01-01", "1");
        let b = invoice(&mut app, "2025-01-02", "2");

        app.toggle_selection(&a).unwrap();
        app.toggle_selection(&b).unwrap();
        app.delete_transaction(&a).unwrap();

        assert!(app.transactions().get(&a).is_none());
        assert!(!app.selection().contains(&a));
        assert!(app.selection().contains(&b));
    }

    #[test]
    fn test_delete_selected() {
        let mut app = configured_app();
        let a = invoice(&mut app, "2025-01-01", "1");
        invoice(&mut app, "2025-01-02", "2");

        assert!(app.delete_selected().is_err());
        app.toggle_selection(&a).unwrap();
        assert_eq!(app.delete_selected().unwrap(), 1);
        assert_eq!(app.transactions().len(), 1);
        assert!(app.selection().is_empty());
    }

    #[test]
    fn test_update_keeps_reimbursed_and_clears_selection() {
        let mut app = configured_app();
        let id = invoice(&mut app, "2025-01-01", "40");
        app.toggle_selection(&id).unwrap();
        app.set_selected_reimbursed(true).unwrap();
        app.toggle_selection(&id).unwrap();

        let updated = app
            .update_transaction(
                &id,
                &draft(
                    "2025-02-02",
                    Category::InvoiceReimbursement,
                    TransactionKind::Expense,
                    "45",
                ),
            )
            .unwrap();

        assert!(updated.reimbursed);
        assert_eq!(updated.amount, Money::from_units(45));
        assert!(app.selection().is_empty());
    }

    #[test]
    fn test_filter_limits_listing_not_summary() {
        let mut app = configured_app();
        invoice(&mut app, "2025-01-01", "10");
        app.add_transaction(&draft(
            "2025-01-02",
            Category::FundSource,
            TransactionKind::Income,
            "100",
        ))
        .unwrap();
        let id = invoice(&mut app, "2025-01-03", "5");
        app.toggle_selection(&id).unwrap();

        assert!(!app.toggle_category_filter(Category::InvoiceReimbursement));
        assert!(app.selection().is_empty());

        let groups = app.month_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].transactions.len(), 1);
        assert_eq!(groups[0].net_total, Money::from_units(100));
        assert_eq!(app.summary().visible_balance, Money::from_units(85));
    }

    #[test]
    fn test_opening_an_entry_form_clears_selection() {
        let mut app = configured_app();
        let id = invoice(&mut app, "2025-01-01", "10");
        app.toggle_selection(&id).unwrap();

        invoice(&mut app, "2025-01-02", "10");
        assert!(app.selection().is_empty());
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut app = configured_app();
        assert!(app
            .toggle_selection(&TransactionId::new())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut app = configured_app();
        app.update_settings(Some(Money::from_cents(150_025)), Some(Money::from_units(2000)))
            .unwrap();
        let a = invoice(&mut app, "2025-01-01", "19.99");
        invoice(&mut app, "2025-04-01", "3");
        app.add_transaction(&draft(
            "2025-02-15",
            Category::StudentPayment,
            TransactionKind::Income,
            "250",
        ))
        .unwrap();
        app.toggle_selection(&a).unwrap();
        app.set_selected_reimbursed(true).unwrap();

        let exported = app.export_document();
        let mut bytes = Vec::new();
        write_backup(&exported, &mut bytes).unwrap();
        let decoded = decode_backup(std::str::from_utf8(&bytes).unwrap()).unwrap();

        let mut fresh = LedgerApp::load(MemoryStore::new());
        fresh.import_document(decoded);

        assert_eq!(fresh.transactions().all(), app.transactions().all());
        assert_eq!(fresh.settings(), app.settings());
        assert_eq!(fresh.summary(), app.summary());
    }

    #[test]
    fn test_import_resorts_transactions() {
        let mut app = configured_app();
        let document = decode_backup(
            r#"{"initialBalance": 5, "targetTotal": 10, "transactions": [
                {"id": "old", "date": "2024-01-01", "category": "fund_source", "amount": 1, "type": "income"},
                {"id": "new", "date": "2025-01-01", "category": "fund_source", "amount": 1, "type": "income"}
            ]}"#,
        )
        .unwrap();

        app.import_document(document);

        let ids: Vec<_> = app.transactions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(app.settings().initial_balance, Some(Money::from_units(5)));
        assert_eq!(app.store().raw(keys::TARGET_TOTAL), Some("10"));
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let mut app = LedgerApp::load(ReadOnlyStore);
        app.complete_setup(Money::from_units(100), Money::from_units(30000))
            .unwrap();

        let txn = app
            .add_transaction(&draft(
                "2025-01-01",
                Category::FundSource,
                TransactionKind::Income,
                "25",
            ))
            .unwrap();

        assert_eq!(app.transactions().get(&txn.id), Some(&txn));
        assert_eq!(app.settings().initial_balance, Some(Money::from_units(100)));
        assert_eq!(app.summary().visible_balance, Money::from_units(125));
        assert_eq!(app.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn test_max_amounts_summarize_without_overflow() {
        let max = Money::MAX_AMOUNT.units();
        let entry = |id: &str| {
            format!(
                r#"{{"id": "{}", "date": "2025-01-01", "category": "fund_source", "amount": {}, "type": "income"}}"#,
                id, max
            )
        };
        let payload = format!(
            r#"{{"initialBalance": {}, "targetTotal": {}, "transactions": [{}, {}, {}]}}"#,
            max,
            max,
            entry("a"),
            entry("b"),
            entry("c")
        );

        let mut app = configured_app();
        app.import_document(decode_backup(&payload).unwrap());

        let summary = app.summary();
        assert_eq!(summary.visible_balance.cents(), Money::MAX_AMOUNT.cents() * 4);
        assert_eq!(summary.receivable.cents(), Money::MAX_AMOUNT.cents() * 3);
    }

    #[test]
    fn test_oversized_import_is_rejected() {
        let payload = r#"{"initialBalance": 0, "targetTotal": 30000, "transactions": [
            {"id": "a", "date": "2025-01-01", "category": "fund_source", "amount": 40000000000000000, "type": "income"},
            {"id": "b", "date": "2025-01-01", "category": "fund_source", "amount": 40000000000000000, "type": "income"},
            {"id": "c", "date": "2025-01-01", "category": "fund_source", "amount": 40000000000000000, "type": "income"}
        ]}"#;
        assert!(matches!(
            decode_backup(payload),
            Err(ImportError::InvalidTransaction { index: 0, .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_cannot_be_imported() {
        let payload = r#"{"initialBalance": 0, "targetTotal": 30000, "transactions": [
            {"id": "dup", "date": "2025-01-01", "category": "invoice_reimbursement", "amount": 10, "type": "expense"},
            {"id": "dup", "date": "2025-01-02", "category": "invoice_reimbursement", "amount": 20, "type": "expense"}
        ]}"#;
        let mut app = configured_app();
        invoice(&mut app, "2025-01-01", "5");

        assert!(matches!(
            decode_backup(payload),
            Err(ImportError::DuplicateId { index: 1, .. })
        ));
        assert_eq!(app.transactions().len(), 1);
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let mut store = MemoryStore::new();
        store.insert_raw(
            keys::TRANSACTIONS,
            r#"[
                {"id": "dup", "date": "2025-01-02", "category": "invoice_reimbursement", "amount": 10, "type": "expense"},
                {"id": "dup", "date": "2025-01-01", "category": "invoice_reimbursement", "amount": 20, "type": "expense"}
            ]"#,
        );

        let mut app = LedgerApp::load(store);
        assert_eq!(app.transactions().len(), 1);

        let id = TransactionId::parse("dup").unwrap();
        app.toggle_selection(&id).unwrap();
        assert_eq!(app.selected_for_reimbursement(), Money::from_units(10));
        assert_eq!(app.set_selected_reimbursed(true).unwrap(), 1);
        assert_eq!(app.summary().unreimbursed_total, Money::zero());
    }
}
