use anyhow::Result;
use clap::{Parser, Subcommand};

use petty_cash::app::LedgerApp;
use petty_cash::cli::{
    handle_backup_command, handle_fund_command, handle_transaction_command, BackupCommands,
    FundCommands, TransactionCommands,
};
use petty_cash::config::{init_tracing, PettyCashPaths};
use petty_cash::storage::open_file_store;

#[derive(Parser)]
#[command(
    name = "pettycash",
    version,
    about = "Terminal bookkeeping for a small petty cash fund",
    long_about = "Records income and expenses of a cash fund, keeps the running \
                  balance, and tracks which invoice expenses have been reimbursed."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Fund(FundCommands),

    #[command(flatten)]
    Transaction(TransactionCommands),

    #[command(flatten)]
    Backup(BackupCommands),

    /// Show where data is stored
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = PettyCashPaths::new()?;
    let store = open_file_store(&paths)?;
    let mut app = LedgerApp::load(store);

    match cli.command {
        Some(Commands::Fund(cmd)) => handle_fund_command(&mut app, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&mut app, cmd)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&mut app, &paths, cmd)?,
        Some(Commands::Config) => {
            println!("Petty Cash Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Theme:            {}", app.theme());
        }
        None => {
            println!("Petty Cash - bookkeeping for a small cash fund");
            println!();
            if app.needs_setup() {
                println!("Get started with 'pettycash setup <initial-balance>'.");
            }
            println!("Run 'pettycash --help' for usage information.");
        }
    }

    Ok(())
}
