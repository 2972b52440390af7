//! Transaction model
//!
//! A petty cash movement: money coming into the fund or paid out of it,
//! tagged with one of four fixed categories. Invoice-reimbursement expenses
//! additionally carry a `reimbursed` flag.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use crate::error::{PettyCashError, PettyCashResult};

/// The fixed set of transaction categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Money owed by or to the fund's external source
    FundSource,
    /// Payments collected from students
    StudentPayment,
    /// Out-of-pocket expenses pending reimbursement
    InvoiceReimbursement,
    /// Anything else, typically corrections
    OtherAdjustment,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::FundSource,
        Category::StudentPayment,
        Category::InvoiceReimbursement,
        Category::OtherAdjustment,
    ];

    /// Stable identifier, identical to the serialized form
    pub fn key(&self) -> &'static str {
        match self {
            Self::FundSource => "fund_source",
            Self::StudentPayment => "student_payment",
            Self::InvoiceReimbursement => "invoice_reimbursement",
            Self::OtherAdjustment => "other_adjustment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FundSource => "Fund source",
            Self::StudentPayment => "Student payment",
            Self::InvoiceReimbursement => "Invoice reimbursement",
            Self::OtherAdjustment => "Other adjustment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = PettyCashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "fund_source" | "fund" => Ok(Self::FundSource),
            "student_payment" | "student" => Ok(Self::StudentPayment),
            "invoice_reimbursement" | "invoice" => Ok(Self::InvoiceReimbursement),
            "other_adjustment" | "other" => Ok(Self::OtherAdjustment),
            _ => Err(PettyCashError::Validation(format!(
                "Unknown category '{}'. Use fund, student, invoice or other",
                s
            ))),
        }
    }
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = PettyCashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            _ => Err(PettyCashError::Validation(format!(
                "Unknown transaction type '{}'. Use income or expense",
                s
            ))),
        }
    }
}

/// Validated transaction content, without identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFields {
    pub date: NaiveDate,
    pub category: Category,
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
}

/// A petty cash transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,

    pub date: NaiveDate,

    pub category: Category,

    pub description: String,

    /// Always positive; the direction is carried by `kind`
    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Only meaningful for invoice-reimbursement expenses
    pub reimbursed: bool,
}

/// Wire shape used to validate a transaction while decoding
#[derive(Deserialize)]
struct RawTransaction {
    id: TransactionId,
    date: NaiveDate,
    category: Category,
    #[serde(default)]
    description: Option<String>,
    amount: Money,
    #[serde(rename = "type")]
    kind: TransactionKind,
    #[serde(default)]
    reimbursed: bool,
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTransaction::deserialize(deserializer)?;
        if !raw.amount.is_positive() {
            return Err(serde::de::Error::custom(format!(
                "amount must be positive, got {}",
                raw.amount
            )));
        }
        Ok(Self {
            id: raw.id,
            date: raw.date,
            category: raw.category,
            description: raw.description.unwrap_or_default(),
            amount: raw.amount,
            kind: raw.kind,
            reimbursed: raw.reimbursed,
        })
    }
}

impl Transaction {
    /// Create a new, not yet reimbursed, transaction with a fresh id
    pub fn new(fields: TransactionFields) -> Self {
        Self {
            id: TransactionId::new(),
            date: fields.date,
            category: fields.category,
            description: fields.description,
            amount: fields.amount,
            kind: fields.kind,
            reimbursed: false,
        }
    }

    /// Replace the content, keeping identity and the reimbursed flag
    pub fn apply(&mut self, fields: TransactionFields) {
        self.date = fields.date;
        self.category = fields.category;
        self.description = fields.description;
        self.amount = fields.amount;
        self.kind = fields.kind;
    }

    pub fn fields(&self) -> TransactionFields {
        TransactionFields {
            date: self.date,
            category: self.category,
            kind: self.kind,
            amount: self.amount,
            description: self.description.clone(),
        }
    }

    pub fn is_invoice(&self) -> bool {
        self.category == Category::InvoiceReimbursement
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// An invoice expense that has already been paid back
    pub fn is_suppressed(&self) -> bool {
        self.is_invoice() && self.kind == TransactionKind::Expense && self.reimbursed
    }

    /// Contribution to a running balance
    ///
    /// Income adds, expense subtracts, and a reimbursed invoice expense
    /// contributes nothing.
    pub fn signed_amount(&self) -> Money {
        if self.is_suppressed() {
            Money::zero()
        } else if self.is_income() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Year-month grouping key (`YYYY-MM`)
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.kind,
            self.amount
        )
    }
}

/// Unvalidated user input for a new or edited transaction
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub date: Option<String>,
    pub category: Category,
    pub kind: TransactionKind,
    pub amount: Option<String>,
    pub description: Option<String>,
}

impl TransactionDraft {
    /// Start a draft from an existing transaction (for edits)
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            date: Some(txn.date.format("%Y-%m-%d").to_string()),
            category: txn.category,
            kind: txn.kind,
            amount: Some(txn.amount.to_decimal().to_string()),
            description: Some(txn.description.clone()),
        }
    }

    /// Check the draft and produce committed-ready fields
    ///
    /// A missing or malformed date and a missing, malformed, zero or negative
    /// amount are rejected.
    pub fn validate(&self) -> PettyCashResult<TransactionFields> {
        let date_text = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| PettyCashError::Validation("Date is required".into()))?;

        let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d").map_err(|_| {
            PettyCashError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD format",
                date_text
            ))
        })?;

        let amount_text = self
            .amount
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| PettyCashError::Validation("Amount is required".into()))?;

        let amount = Money::parse(amount_text)
            .map_err(|e| PettyCashError::Validation(e.to_string()))?;

        if !amount.is_positive() {
            return Err(PettyCashError::Validation(format!(
                "Amount must be greater than zero, got {}",
                amount
            )));
        }

        Ok(TransactionFields {
            date,
            category: self.category,
            kind: self.kind,
            amount,
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        })
    }
}
