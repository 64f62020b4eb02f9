//! The fixed category vocabularies for each transaction type.

use crate::transaction::TransactionType;

/// The categories an expense may be filed under.
pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Other",
];

/// The categories an income may be filed under.
pub const INCOME_CATEGORIES: [&str; 6] = [
    "Salary",
    "Freelance",
    "Investment",
    "Gift",
    "Bonus",
    "Other",
];

/// Get the allowed categories for `transaction_type`.
pub fn categories_for(transaction_type: TransactionType) -> &'static [&'static str] {
    match transaction_type {
        TransactionType::Expense => &EXPENSE_CATEGORIES,
        TransactionType::Income => &INCOME_CATEGORIES,
    }
}

/// Whether `category` is one of the allowed categories for `transaction_type`.
///
/// The comparison is exact, callers should trim user input first.
pub fn is_allowed_category(transaction_type: TransactionType, category: &str) -> bool {
    categories_for(transaction_type).contains(&category)
}
