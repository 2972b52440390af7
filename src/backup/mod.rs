//! Backup export and import
//!
//! - `document`: the backup file shape, its file name, and the writer
//! - `restore`: validating decoder for backup payloads

pub mod document;
pub mod restore;

pub use document::{backup_file_name, write_backup, BackupDocument};
pub use restore::decode_backup;
