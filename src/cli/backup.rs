//! Backup CLI commands
//!
//! Export the ledger to a JSON backup and restore it again.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::app::LedgerApp;
use crate::backup::{decode_backup, write_backup};
use crate::config::paths::PettyCashPaths;
use crate::error::{PettyCashError, PettyCashResult};
use crate::storage::KeyValueStore;

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Write a backup file
    Export {
        /// Output file (defaults to backups/petty-cash-backup-<date>.json)
        output: Option<PathBuf>,
    },

    /// Replace all ledger data with a backup file
    Import {
        /// Backup file to read
        file: PathBuf,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command<S: KeyValueStore>(
    app: &mut LedgerApp<S>,
    paths: &PettyCashPaths,
    cmd: BackupCommands,
) -> PettyCashResult<()> {
    match cmd {
        BackupCommands::Export { output } => {
            let output = match output {
                Some(path) => path,
                None => {
                    paths.ensure_directories()?;
                    paths.default_export_file(chrono::Local::now().date_naive())
                }
            };

            let file = File::create(&output).map_err(|e| {
                PettyCashError::Io(format!("Failed to create file {}: {}", output.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            let document = app.export_document();
            write_backup(&document, &mut writer)?;
            writer.flush()?;

            println!(
                "Exported {} transactions to: {}",
                document.transactions.len(),
                output.display()
            );
        }

        BackupCommands::Import { file, force } => {
            let payload = fs::read_to_string(&file).map_err(|e| {
                PettyCashError::Io(format!("Failed to read {}: {}", file.display(), e))
            })?;
            let document = decode_backup(&payload)?;

            if !force {
                println!("Backup is valid:");
                println!("  Initial balance: {}", document.initial_balance);
                println!("  Target total:    {}", document.target_total);
                println!("  Transactions:    {}", document.transactions.len());
                println!();
                println!(
                    "Importing replaces all {} current transactions and the fund settings.",
                    app.transactions().len()
                );
                println!("Use --force to confirm the import");
                return Ok(());
            }

            let count = document.transactions.len();
            app.import_document(document);
            println!("Imported {} transactions from: {}", count, file.display());
        }
    }

    Ok(())
}
