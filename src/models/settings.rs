//! Fund settings
//!
//! The two scalars every balance is computed against: the opening balance of
//! the fund and the expected total fund size used for reconciliation.

use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::{PettyCashError, PettyCashResult};

/// Target fund size used until the user configures one
pub const DEFAULT_TARGET_TOTAL: Money = Money::from_units(30_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSettings {
    /// `None` until first-run setup has been completed
    pub initial_balance: Option<Money>,

    pub target_total: Money,
}

impl Default for FundSettings {
    fn default() -> Self {
        Self {
            initial_balance: None,
            target_total: DEFAULT_TARGET_TOTAL,
        }
    }
}

impl FundSettings {
    pub fn is_configured(&self) -> bool {
        self.initial_balance.is_some()
    }

    /// The opening balance, treating an unconfigured fund as empty
    pub fn opening_balance(&self) -> Money {
        self.initial_balance.unwrap_or_default()
    }

    /// Check a target total typed by the user
    pub fn validate_target(target_total: Money) -> PettyCashResult<Money> {
        if target_total.is_negative() {
            return Err(PettyCashError::Validation(format!(
                "Target total cannot be negative, got {}",
                target_total
            )));
        }
        Ok(target_total)
    }
}
