//! Display formatting utilities
//!
//! Plain-text rendering of the ledger for the terminal.

pub mod summary;
pub mod transaction;

pub use summary::{format_selection_note, format_summary};
pub use transaction::{format_month_groups, format_transaction_details, format_transaction_row};
