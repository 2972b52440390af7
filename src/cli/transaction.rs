//! Transaction CLI commands
//!
//! Entry, editing, deletion, listing, and bulk reimbursement.

use clap::Subcommand;

use crate::app::LedgerApp;
use crate::display::{
    format_month_groups, format_selection_note, format_transaction_details,
};
use crate::error::{PettyCashError, PettyCashResult};
use crate::models::{Category, TransactionDraft, TransactionId, TransactionKind};
use crate::storage::KeyValueStore;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Category: fund, student, invoice or other
        category: Category,
        /// income or expense
        kind: TransactionKind,
        /// Positive amount (e.g., "120" or "19.99")
        amount: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Edit a transaction (unspecified fields are kept)
    Edit {
        /// Transaction ID or unique prefix
        id: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(short, long)]
        kind: Option<TransactionKind>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID or unique prefix
        id: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID or unique prefix
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Delete several transactions at once
    DeleteMany {
        /// Transaction IDs or unique prefixes
        #[arg(required = true)]
        ids: Vec<String>,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// List transactions grouped by month (honors the category filter)
    List,

    /// Mark invoice expenses as reimbursed
    Reimburse {
        /// Transaction IDs or unique prefixes
        #[arg(required = true)]
        ids: Vec<String>,
        /// Undo a previous reimbursement instead
        #[arg(long)]
        cancel: bool,
    },
}

fn resolve<S: KeyValueStore>(app: &LedgerApp<S>, identifier: &str) -> PettyCashResult<TransactionId> {
    Ok(app.transactions().find(identifier)?.id.clone())
}

/// Select each listed transaction, ignoring repeats
fn select_all<S: KeyValueStore>(app: &mut LedgerApp<S>, identifiers: &[String]) -> PettyCashResult<()> {
    for identifier in identifiers {
        let id = resolve(app, identifier)?;
        if !app.selection().contains(&id) {
            app.toggle_selection(&id)?;
        }
    }
    Ok(())
}

fn require_setup<S: KeyValueStore>(app: &LedgerApp<S>) -> PettyCashResult<()> {
    if app.needs_setup() {
        return Err(PettyCashError::Config(
            "The fund is not set up yet. Run 'pettycash setup <initial-balance>' first".into(),
        ));
    }
    Ok(())
}

/// Handle a transaction command
pub fn handle_transaction_command<S: KeyValueStore>(
    app: &mut LedgerApp<S>,
    cmd: TransactionCommands,
) -> PettyCashResult<()> {
    match cmd {
        TransactionCommands::Add {
            category,
            kind,
            amount,
            date,
            description,
        } => {
            require_setup(app)?;
            let draft = TransactionDraft {
                date: Some(date.unwrap_or_else(|| {
                    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
                })),
                category,
                kind,
                amount: Some(amount),
                description,
            };

            let txn = app.add_transaction(&draft)?;
            println!("Created transaction:");
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Edit {
            id,
            date,
            category,
            kind,
            amount,
            description,
        } => {
            let existing = app.transactions().find(&id)?.clone();
            let mut draft = TransactionDraft::from_transaction(&existing);
            if date.is_some() {
                draft.date = date;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            if let Some(kind) = kind {
                draft.kind = kind;
            }
            if amount.is_some() {
                draft.amount = amount;
            }
            if description.is_some() {
                draft.description = description;
            }

            let updated = app.update_transaction(&existing.id, &draft)?;
            println!("Updated transaction:");
            print!("{}", format_transaction_details(&updated));
        }

        TransactionCommands::Show { id } => {
            let txn = app.transactions().find(&id)?;
            print!("{}", format_transaction_details(txn));
        }

        TransactionCommands::Delete { id, force } => {
            let txn = app.transactions().find(&id)?.clone();

            if !force {
                println!("About to delete transaction:");
                print!("{}", format_transaction_details(&txn));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = app.delete_transaction(&txn.id)?;
            println!("Deleted transaction: {} ({})", deleted.id, deleted);
        }

        TransactionCommands::DeleteMany { ids, force } => {
            select_all(app, &ids)?;

            if !force {
                println!(
                    "About to delete {} transactions. Use --force to confirm deletion",
                    app.selection().len()
                );
                return Ok(());
            }

            let removed = app.delete_selected()?;
            println!("Deleted {} transactions", removed);
        }

        TransactionCommands::List => {
            let groups = app.month_groups();
            print!("{}", format_month_groups(&groups, app.selection()));

            let hidden: Vec<_> = Category::ALL
                .iter()
                .filter(|c| !app.visible_categories().contains(**c))
                .map(|c| c.label())
                .collect();
            if !hidden.is_empty() {
                println!("Hidden categories: {}", hidden.join(", "));
            }
        }

        TransactionCommands::Reimburse { ids, cancel } => {
            select_all(app, &ids)?;
            let count = app.selection().len();

            if !cancel {
                println!(
                    "{}",
                    format_selection_note(count, app.selected_for_reimbursement())
                );
            }

            let changed = app.set_selected_reimbursed(!cancel)?;
            if cancel {
                println!("Cancelled reimbursement of {} transactions", changed);
            } else {
                println!("Marked {} transactions as reimbursed", changed);
            }
        }
    }

    Ok(())
}
