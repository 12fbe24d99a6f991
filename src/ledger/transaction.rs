use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::InputError;

use super::category::Category;

/// Persisted and displayed date pattern (`15/04/2025`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest id accepted from storage. Ids are epoch milliseconds, so this
/// leaves room for every id issued after a load.
pub const MAX_TRANSACTION_ID: u64 = i64::MAX as u64;

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Applies the direction to a positive magnitude.
    pub fn signed(&self, magnitude: f64) -> f64 {
        match self {
            TransactionType::Income => magnitude,
            TransactionType::Expense => -magnitude,
        }
    }

    fn accepts(&self, amount: f64) -> bool {
        match self {
            TransactionType::Income => amount >= 0.0,
            TransactionType::Expense => amount <= 0.0,
        }
    }
}

impl FromStr for TransactionType {
    type Err = InputError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(InputError::MissingType);
        }
        match value.to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(InputError::InvalidType(value.to_string())),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single signed money movement. Immutable once created; the sign of
/// `amount` always agrees with `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    id: u64,
    amount: f64,
    category: Category,
    kind: TransactionType,
    date: NaiveDate,
}

impl Transaction {
    /// Builds a transaction from a positive magnitude; the stored amount is
    /// negated for expenses.
    pub fn new(
        id: u64,
        magnitude: f64,
        category: Category,
        kind: TransactionType,
        date: NaiveDate,
    ) -> Self {
        debug_assert!(
            magnitude.is_finite() && magnitude > 0.0,
            "transaction magnitude must be positive and finite"
        );
        Self {
            id,
            amount: kind.signed(magnitude),
            category,
            kind,
            date,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Signed amount: positive for income, negative for expenses.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }
}

/// On-disk shape of a transaction. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    id: u64,
    amount: f64,
    category: String,
    date: String,
    #[serde(rename = "type")]
    kind: TransactionType,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = String;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        if record.id > MAX_TRANSACTION_ID {
            return Err(format!(
                "transaction id {} exceeds the largest supported id {}",
                record.id, MAX_TRANSACTION_ID
            ));
        }
        if !record.amount.is_finite() {
            return Err(format!("transaction {} has a non-finite amount", record.id));
        }
        if !record.kind.accepts(record.amount) {
            return Err(format!(
                "transaction {} amount {} does not match type {}",
                record.id, record.amount, record.kind
            ));
        }
        let date = parse_date(&record.date).ok_or_else(|| {
            format!(
                "transaction {} has unreadable date `{}`",
                record.id, record.date
            )
        })?;
        Ok(Self {
            id: record.id,
            amount: record.amount,
            category: Category::from(record.category),
            kind: record.kind,
            date,
        })
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            amount: txn.amount,
            category: txn.category.into(),
            date: txn.date.format(DATE_FORMAT).to_string(),
            kind: txn.kind,
        }
    }
}

/// Accepts `dd/mm/yyyy` (padding optional) and ISO dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT))
        .ok()
}
