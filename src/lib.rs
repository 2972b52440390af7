//! Petty cash ledger
//!
//! Bookkeeping for a small cash fund: income and expense transactions in four
//! fixed categories, running balances, and tracking of which out-of-pocket
//! invoice expenses have been reimbursed.
//!
//! # Architecture
//!
//! - `config`: path resolution and logging setup
//! - `error`: custom error types
//! - `models`: transactions, money, fund settings, display preferences
//! - `storage`: key-value persistence and the transaction repository
//! - `reports`: pure aggregation (summary figures, month groups)
//! - `services`: selection and bulk-action rules
//! - `backup`: export document and validating import
//! - `app`: the owned application state tying the above together
//! - `cli` / `display`: the command-line presentation
//!
//! # Example
//!
//! ```
//! use petty_cash::app::LedgerApp;
//! use petty_cash::models::{Category, Money, TransactionDraft, TransactionKind};
//! use petty_cash::storage::MemoryStore;
//!
//! let mut app = LedgerApp::load(MemoryStore::new());
//! app.complete_setup(Money::zero(), Money::from_units(30_000)).unwrap();
//! app.add_transaction(&TransactionDraft {
//!     date: Some("2025-03-01".into()),
//!     category: Category::FundSource,
//!     kind: TransactionKind::Income,
//!     amount: Some("1000".into()),
//!     description: None,
//! })
//! .unwrap();
//!
//! assert_eq!(app.summary().receivable, Money::from_units(1000));
//! ```

pub mod app;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PettyCashError, PettyCashResult};
