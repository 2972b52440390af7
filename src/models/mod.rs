//! Core data models for the petty cash ledger
//!
//! Transactions, the fund settings they are balanced against, and the
//! display preferences that are persisted with them.

pub mod ids;
pub mod money;
pub mod preferences;
pub mod settings;
pub mod transaction;

pub use ids::TransactionId;
pub use money::Money;
pub use preferences::{Theme, VisibleCategories};
pub use settings::FundSettings;
pub use transaction::{Category, Transaction, TransactionDraft, TransactionFields, TransactionKind};
