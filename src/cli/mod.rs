//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the application state.

pub mod backup;
pub mod fund;
pub mod transaction;

pub use backup::{handle_backup_command, BackupCommands};
pub use fund::{handle_fund_command, FundCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
