//! Fund-level CLI commands
//!
//! First-run setup, settings, the summary view, and display preferences.

use clap::Subcommand;

use crate::app::LedgerApp;
use crate::display::format_summary;
use crate::error::{PettyCashError, PettyCashResult};
use crate::models::{Category, Money, Theme};
use crate::storage::KeyValueStore;

#[derive(Subcommand, Debug)]
pub enum FundCommands {
    /// Record the fund's opening balance (first run)
    Setup {
        /// Opening cash balance
        initial_balance: String,
        /// Expected total fund size
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Show or change the fund settings
    Settings {
        /// New opening balance
        #[arg(short, long)]
        initial: Option<String>,
        /// New target total
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Show balances and the reconciliation check
    Summary,

    /// Show or hide a category in listings
    Filter {
        /// Category to toggle: fund, student, invoice or other
        category: Category,
    },

    /// Show, set, or toggle the theme preference
    Theme {
        /// light or dark; omitted to toggle
        theme: Option<Theme>,
    },
}

fn parse_amount(label: &str, text: &str) -> PettyCashResult<Money> {
    Money::parse(text).map_err(|e| PettyCashError::Validation(format!("{}: {}", label, e)))
}

/// Handle a fund command
pub fn handle_fund_command<S: KeyValueStore>(
    app: &mut LedgerApp<S>,
    cmd: FundCommands,
) -> PettyCashResult<()> {
    match cmd {
        FundCommands::Setup {
            initial_balance,
            target,
        } => {
            if !app.needs_setup() {
                return Err(PettyCashError::Config(
                    "The fund is already set up. Use 'pettycash settings' to change it".into(),
                ));
            }
            let initial = parse_amount("Initial balance", &initial_balance)?;
            let target = match target {
                Some(text) => parse_amount("Target total", &text)?,
                None => app.settings().target_total,
            };

            app.complete_setup(initial, target)?;
            println!("Fund set up:");
            println!("  Initial balance: {}", initial);
            println!("  Target total:    {}", target);
        }

        FundCommands::Settings { initial, target } => {
            let initial = initial
                .map(|text| parse_amount("Initial balance", &text))
                .transpose()?;
            let target = target
                .map(|text| parse_amount("Target total", &text))
                .transpose()?;

            if initial.is_some() || target.is_some() {
                app.update_settings(initial, target)?;
                println!("Settings updated.");
            }

            let settings = app.settings();
            match settings.initial_balance {
                Some(balance) => println!("Initial balance: {}", balance),
                None => println!("Initial balance: (not set)"),
            }
            println!("Target total:    {}", settings.target_total);
        }

        FundCommands::Summary => {
            if app.needs_setup() {
                println!("The fund is not set up yet. Run 'pettycash setup <initial-balance>'.");
                println!();
            }
            print!("{}", format_summary(&app.summary(), app.settings()));
        }

        FundCommands::Filter { category } => {
            let visible = app.toggle_category_filter(category);
            println!(
                "{} transactions are now {}",
                category,
                if visible { "shown" } else { "hidden" }
            );
        }

        FundCommands::Theme { theme } => {
            let theme = match theme {
                Some(theme) => {
                    app.set_theme(theme);
                    theme
                }
                None => app.toggle_theme(),
            };
            println!("Theme: {}", theme);
        }
    }

    Ok(())
}
