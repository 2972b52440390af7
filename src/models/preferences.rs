//! Display preferences persisted alongside the ledger

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transaction::Category;
use crate::error::PettyCashError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = PettyCashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(PettyCashError::Validation(format!(
                "Unknown theme '{}'. Use light or dark",
                s
            ))),
        }
    }
}

/// Which categories are listed; every category is visible by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibleCategories(Vec<Category>);

impl Default for VisibleCategories {
    fn default() -> Self {
        Self(Category::ALL.to_vec())
    }
}

impl VisibleCategories {
    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    /// Show a hidden category or hide a shown one; returns the new visibility
    pub fn toggle(&mut self, category: Category) -> bool {
        if let Some(pos) = self.0.iter().position(|c| *c == category) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(category);
            self.0.sort();
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }
}
