//! Storage layer for the petty cash ledger
//!
//! A string-keyed backing store (one JSON value per key, written atomically
//! when file-backed) plus the in-memory transaction repository.

pub mod file_io;
pub mod kv;
pub mod persisted;
pub mod transactions;

pub use file_io::{read_optional, write_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use persisted::keys;
pub use transactions::TransactionRepository;

use crate::config::paths::PettyCashPaths;
use crate::error::PettyCashResult;

/// Open the file-backed store under the configured data directory
pub fn open_file_store(paths: &PettyCashPaths) -> PettyCashResult<FileStore> {
    paths.ensure_directories()?;
    Ok(FileStore::new(paths.data_dir()))
}
