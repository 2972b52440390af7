//! Derived figures
//!
//! Pure functions over the transaction list and fund settings:
//!
//! - `summary`: balances, receivable, and the reconciliation figure
//! - `monthly`: per-month grouping with net subtotals

pub mod monthly;
pub mod summary;

pub use monthly::{group_by_month, MonthGroup};
pub use summary::{selected_for_reimbursement, Summary};
