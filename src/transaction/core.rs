//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::database_id::TransactionId;

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was spent or earned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money was spent.
    #[default]
    Expense,
    /// Money was earned.
    Income,
}

impl TransactionType {
    /// Both transaction types, expenses first.
    pub const ALL: [TransactionType; 2] = [TransactionType::Expense, TransactionType::Income];

    /// The lowercase name used in forms, query strings and the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }

    /// The capitalised name for display.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Expense => "Expense",
            TransactionType::Income => "Income",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when a string is neither "expense" nor "income".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a transaction type, expected \"expense\" or \"income\"")]
pub struct InvalidTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = InvalidTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            other => Err(InvalidTransactionType(other.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// An expense or income as stored in the database.
///
/// New transactions are created from a validated [NewTransaction], the store
/// assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether this is an expense or an income.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// The category from the vocabulary of `transaction_type`.
    pub category: String,
    /// A text description of what the transaction was for, may be empty.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// When the transaction was recorded. Never changes after creation.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A transaction that passed validation and is ready to be stored.
///
/// The only ways to get one are [crate::transaction::validate_transaction_form]
/// and [NewTransaction::new], both of which enforce the record invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub(crate) transaction_type: TransactionType,
    pub(crate) amount: f64,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) date: Date,
}

#[allow(missing_docs)]
impl NewTransaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> Date {
        self.date
    }
}

/// A set of field changes to merge onto a stored transaction.
///
/// Fields left as `None` keep their stored value. The merged record is checked
/// against the record invariants before it is written, so a patch that changes
/// the type must also supply a category that is valid for the new type.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(missing_docs)]
pub struct TransactionPatch {
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<Date>,
}

#[allow(missing_docs)]
impl TransactionPatch {
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.trim().to_owned());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.trim().to_owned());
        self
    }

    pub fn date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    /// Whether the patch leaves every field unchanged.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Shallow merge onto `transaction`. `id` and `created_at` are never touched.
    pub(crate) fn apply(self, transaction: Transaction) -> Transaction {
        Transaction {
            transaction_type: self
                .transaction_type
                .unwrap_or(transaction.transaction_type),
            amount: self.amount.unwrap_or(transaction.amount),
            category: self.category.unwrap_or(transaction.category),
            description: self.description.unwrap_or(transaction.description),
            date: self.date.unwrap_or(transaction.date),
            ..transaction
        }
    }
}

impl From<NewTransaction> for TransactionPatch {
    /// A patch that overwrites every editable field.
    fn from(transaction: NewTransaction) -> Self {
        Self {
            transaction_type: Some(transaction.transaction_type),
            amount: Some(transaction.amount),
            category: Some(transaction.category),
            description: Some(transaction.description),
            date: Some(transaction.date),
        }
    }
}

// ============================================================================
// ROW MAPPING
// ============================================================================

/// Map a database row to a Transaction.
///
/// Expects the columns `id, type, amount, category, description, date, created_at`.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let transaction_type = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let description = row.get(4)?;
    let date = row.get(5)?;
    let created_at = row.get(6)?;

    Ok(Transaction {
        id,
        transaction_type,
        amount,
        category,
        description,
        date,
        created_at,
    })
}
