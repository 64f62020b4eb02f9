//! Summaries of transactions for the dashboard and analytics pages.
//!
//! Every function here is a pure function of the transactions it is given.
//! Records with an amount that is not a finite number greater than zero and at
//! most [MAX_AMOUNT] are rejected rather than counted.

use std::{cmp::Ordering, collections::BTreeMap};

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::transaction::{Field, MAX_AMOUNT, Transaction, TransactionType, ValidationError};

/// Income, expenses and what is left over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    /// The sum of all income.
    pub income_total: f64,
    /// The sum of all expenses.
    pub expense_total: f64,
    /// `income_total - expense_total`, negative when spending exceeds income.
    pub balance: f64,
}

/// Sum income and expenses separately.
///
/// # Errors
/// Returns a [ValidationError] naming the first record with an invalid amount.
pub fn totals(transactions: &[Transaction]) -> Result<Totals, ValidationError> {
    let mut totals = Totals::default();

    for transaction in transactions {
        let amount = checked_amount(transaction)?;

        match transaction.transaction_type {
            TransactionType::Income => totals.income_total += amount,
            TransactionType::Expense => totals.expense_total += amount,
        }
    }

    totals.balance = totals.income_total - totals.expense_total;

    Ok(totals)
}

/// Sum the amounts of the transactions of `transaction_type` per category.
///
/// Categories with no transactions of that type are left out.
///
/// # Errors
/// Returns a [ValidationError] naming the first record with an invalid amount.
pub fn by_category(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Result<BTreeMap<String, f64>, ValidationError> {
    let mut sums = BTreeMap::new();

    for transaction in transactions {
        let amount = checked_amount(transaction)?;

        if transaction.transaction_type == transaction_type {
            *sums.entry(transaction.category.clone()).or_insert(0.0) += amount;
        }
    }

    Ok(sums)
}

/// The length of the periods used to group transactions over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    /// Calendar days.
    Day,
    /// Weeks start on Monday.
    Week,
    /// Calendar months.
    #[default]
    Month,
    /// Calendar years.
    Year,
}

impl Granularity {
    /// Every granularity, shortest first.
    pub const ALL: [Granularity; 4] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    /// The name used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// The adjective for display, e.g. "Monthly".
    pub fn label(self) -> &'static str {
        match self {
            Granularity::Day => "Daily",
            Granularity::Week => "Weekly",
            Granularity::Month => "Monthly",
            Granularity::Year => "Yearly",
        }
    }

    /// The first day of the period that contains `date`.
    pub fn period_start(self, date: Date) -> Date {
        match self {
            Granularity::Day => date,
            Granularity::Week => {
                let days_since_monday = date.weekday().number_days_from_monday();
                date.checked_sub(Duration::days(days_since_monday.into()))
                    .unwrap_or(Date::MIN)
            }
            Granularity::Month => date.replace_day(1).unwrap_or(date),
            Granularity::Year => date.replace_ordinal(1).unwrap_or(date),
        }
    }
}

/// The income and expenses for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodTotals {
    /// The first day of the period.
    pub start: Date,
    /// The sum of income in the period.
    pub income: f64,
    /// The sum of expenses in the period.
    pub expenses: f64,
}

impl PeriodTotals {
    /// Income minus expenses.
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Group transactions into periods by date and sum income and expenses for each.
///
/// The result is sorted by period start, oldest first, no matter the order of
/// `transactions`. Periods without transactions are left out.
///
/// # Errors
/// Returns a [ValidationError] naming the first record with an invalid amount.
pub fn by_period(
    transactions: &[Transaction],
    granularity: Granularity,
) -> Result<Vec<PeriodTotals>, ValidationError> {
    let mut periods: BTreeMap<Date, PeriodTotals> = BTreeMap::new();

    for transaction in transactions {
        let amount = checked_amount(transaction)?;
        let start = granularity.period_start(transaction.date);

        let period = periods.entry(start).or_insert(PeriodTotals {
            start,
            income: 0.0,
            expenses: 0.0,
        });

        match transaction.transaction_type {
            TransactionType::Income => period.income += amount,
            TransactionType::Expense => period.expenses += amount,
        }
    }

    Ok(periods.into_values().collect())
}

/// A category's portion of the total for its transaction type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    /// The category name.
    pub category: String,
    /// The sum of the amounts in the category.
    pub amount: f64,
    /// Between 0 and 100.
    pub percentage: f64,
}

/// Convert per-category sums into percentages of their total, largest first.
///
/// Categories with equal sums are ordered by name.
pub fn category_shares(sums: &BTreeMap<String, f64>) -> Vec<CategoryShare> {
    let total: f64 = sums.values().sum();

    if total <= 0.0 {
        return Vec::new();
    }

    let mut shares: Vec<CategoryShare> = sums
        .iter()
        .map(|(category, &amount)| CategoryShare {
            category: category.clone(),
            amount,
            percentage: amount / total * 100.0,
        })
        .collect();

    shares.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });

    shares
}

fn checked_amount(transaction: &Transaction) -> Result<f64, ValidationError> {
    let amount = transaction.amount;

    if amount.is_finite() && amount > 0.0 && amount <= MAX_AMOUNT {
        Ok(amount)
    } else {
        tracing::error!(
            "transaction {} has an invalid amount {amount}",
            transaction.id
        );
        Err(ValidationError::new(
            Field::Amount,
            format!(
                "Transaction {} has the amount {amount}, expected a number greater than zero \
                and at most {MAX_AMOUNT:.0}.",
                transaction.id
            ),
        ))
    }
}
