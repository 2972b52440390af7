//! Path management for the petty cash ledger
//!
//! ## Path Resolution Order
//!
//! 1. `PETTY_CASH_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/petty-cash` or `~/.config/petty-cash`
//! 3. Windows: `%APPDATA%\petty-cash`

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::PettyCashError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "PETTY_CASH_DATA_DIR";

/// Manages all paths used by the ledger
#[derive(Debug, Clone)]
pub struct PettyCashPaths {
    base_dir: PathBuf,
}

impl PettyCashPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, PettyCashError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per persisted key
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default destination for exported backups
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Default export path for the given day
    pub fn default_export_file(&self, today: NaiveDate) -> PathBuf {
        self.backup_dir()
            .join(crate::backup::backup_file_name(today))
    }

    /// Ensure the data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), PettyCashError> {
        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PettyCashError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir()).map_err(|e| {
            PettyCashError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PettyCashError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                PettyCashError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("petty-cash"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PettyCashError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PettyCashError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("petty-cash"))
}
