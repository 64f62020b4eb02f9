//! Validation of user-entered transaction fields.
//!
//! Raw form input only reaches the store through [validate_transaction_form],
//! which checks every field and reports all problems at once.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{
    category::is_allowed_category,
    transaction::{NewTransaction, Transaction, TransactionType},
};

/// A field of the transaction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Expense or income.
    Type,
    /// How much money.
    Amount,
    /// The category from the vocabulary of the type.
    Category,
    /// When the transaction happened.
    Date,
}

impl Field {
    /// The name of the form input for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Amount => "amount",
            Field::Category => "category",
            Field::Date => "date",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated field and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// The field that failed validation.
    pub field: Field,
    /// A message for the user explaining how to fix the field.
    pub message: String,
}

/// One or more fields of a transaction were invalid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid transaction: {}", format_field_errors(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Create an error for a single field.
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }

    /// All the violated fields, in form order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether `field` is among the violated fields.
    pub fn has_field(&self, field: Field) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }
}

/// Collects field errors so that every check runs before reporting.
/// The largest amount a single transaction may have.
///
/// Keeps sums of many transactions far from overflowing to infinity.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

#[derive(Default)]
struct Violations(Vec<FieldError>);

impl Violations {
    fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(ValidationError { errors: self.0 })
        }
    }
}

/// The raw form data for creating or editing a transaction.
///
/// Every field is kept as text so that malformed input can be reported
/// alongside the other fields instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionForm {
    /// "expense" or "income".
    #[serde(rename = "type", default)]
    pub transaction_type: String,
    /// A decimal number greater than zero.
    #[serde(default)]
    pub amount: String,
    /// One of the categories for the type.
    #[serde(default)]
    pub category: String,
    /// Free text, may be empty.
    #[serde(default)]
    pub description: String,
    /// An ISO 8601 calendar date, e.g. "2025-01-31".
    #[serde(default)]
    pub date: String,
}

/// Check every field of `form` and normalize it into a [NewTransaction].
///
/// # Errors
/// Returns a [ValidationError] listing every field that failed:
/// - the type is not "expense" or "income",
/// - the amount is missing, not a number, not finite, or not greater than zero,
/// - the category is empty or not allowed for the type,
/// - the date is not a valid `YYYY-MM-DD` date.
pub fn validate_transaction_form(
    form: &TransactionForm,
) -> Result<NewTransaction, ValidationError> {
    let mut violations = Violations::default();

    let transaction_type = match form.transaction_type.trim().parse::<TransactionType>() {
        Ok(transaction_type) => Some(transaction_type),
        Err(_) => {
            violations.push(Field::Type, "Choose either expense or income.");
            None
        }
    };

    let amount = parse_amount(form.amount.trim(), &mut violations);
    let category = form.category.trim();
    check_category(transaction_type, category, &mut violations);

    let date = match parse_date(form.date.trim()) {
        Some(date) => {
            check_date(date, &mut violations);
            Some(date)
        }
        None => {
            violations.push(Field::Date, "Enter a valid date.");
            None
        }
    };

    match (transaction_type, amount, date) {
        (Some(transaction_type), Some(amount), Some(date)) if violations.0.is_empty() => {
            Ok(NewTransaction {
                transaction_type,
                amount,
                category: category.to_owned(),
                description: form.description.trim().to_owned(),
                date,
            })
        }
        _ => Err(ValidationError {
            errors: violations.0,
        }),
    }
}

impl NewTransaction {
    /// Create a validated transaction from already-typed values.
    ///
    /// # Errors
    /// Returns a [ValidationError] if the amount is not a finite number greater
    /// than zero and at most [MAX_AMOUNT], the category is not allowed for
    /// `transaction_type`, or the year of `date` is outside 1 to 9999.
    pub fn new(
        transaction_type: TransactionType,
        amount: f64,
        category: &str,
        description: &str,
        date: Date,
    ) -> Result<Self, ValidationError> {
        let mut violations = Violations::default();
        check_amount(amount, &mut violations);
        let category = category.trim();
        check_category(Some(transaction_type), category, &mut violations);
        check_date(date, &mut violations);

        violations.into_result(|| NewTransaction {
            transaction_type,
            amount,
            category: category.to_owned(),
            description: description.trim().to_owned(),
            date,
        })
    }
}

impl From<&Transaction> for TransactionForm {
    /// Prefill a form with the values of a stored transaction.
    fn from(transaction: &Transaction) -> Self {
        Self {
            transaction_type: transaction.transaction_type.as_str().to_owned(),
            amount: transaction.amount.to_string(),
            category: transaction.category.clone(),
            description: transaction.description.clone(),
            date: transaction.date.to_string(),
        }
    }
}

/// Check the invariants of a record that is about to be written.
pub(crate) fn check_transaction(transaction: &Transaction) -> Result<(), ValidationError> {
    let mut violations = Violations::default();
    check_amount(transaction.amount, &mut violations);
    check_category(
        Some(transaction.transaction_type),
        &transaction.category,
        &mut violations,
    );
    check_date(transaction.date, &mut violations);

    violations.into_result(|| ())
}

fn parse_amount(text: &str, violations: &mut Violations) -> Option<f64> {
    if text.is_empty() {
        violations.push(Field::Amount, "Enter an amount.");
        return None;
    }

    match text.parse::<f64>() {
        Ok(amount) => {
            check_amount(amount, violations);
            Some(amount)
        }
        Err(_) => {
            violations.push(Field::Amount, format!("\"{text}\" is not a number."));
            None
        }
    }
}

fn check_amount(amount: f64, violations: &mut Violations) {
    if !amount.is_finite() {
        violations.push(Field::Amount, "The amount must be a finite number.");
    } else if amount <= 0.0 {
        violations.push(Field::Amount, "The amount must be greater than zero.");
    } else if amount > MAX_AMOUNT {
        violations.push(
            Field::Amount,
            format!("The amount must be at most {MAX_AMOUNT:.0}."),
        );
    }
}

fn check_category(
    transaction_type: Option<TransactionType>,
    category: &str,
    violations: &mut Violations,
) {
    if category.is_empty() {
        violations.push(Field::Category, "Choose a category.");
        return;
    }

    // Membership can only be judged against a known type.
    if let Some(transaction_type) = transaction_type
        && !is_allowed_category(transaction_type, category)
    {
        violations.push(
            Field::Category,
            format!("\"{category}\" is not a valid {transaction_type} category."),
        );
    }
}

/// Dates are stored as ISO 8601 text and sorted as text, which only matches
/// calendar order for four digit, unsigned years.
fn check_date(date: Date, violations: &mut Violations) {
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        violations.push(
            Field::Date,
            format!("The year must be between {MIN_YEAR} and {MAX_YEAR}."),
        );
    }
}

fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use time::{Date, Month, macros::date};

    use crate::transaction::{
        NewTransaction, TransactionType,
        validation::{
            Field, MAX_AMOUNT, TransactionForm, ValidationError, validate_transaction_form,
        },
    };

    fn valid_form() -> TransactionForm {
        TransactionForm {
            transaction_type: "expense".to_owned(),
            amount: "12.50".to_owned(),
            category: "Food & Dining".to_owned(),
            description: "Lunch".to_owned(),
            date: "2025-06-01".to_owned(),
        }
    }

    #[track_caller]
    fn assert_fields(error: &ValidationError, want: &[Field]) {
        let got: Vec<Field> = error.errors().iter().map(|error| error.field).collect();
        assert_eq!(got, want, "want violated fields {want:?}, got {got:?}");
    }

    #[test]
    fn accepts_valid_form() {
        let got = validate_transaction_form(&valid_form()).unwrap();

        assert_eq!(got.transaction_type(), TransactionType::Expense);
        assert_eq!(got.amount(), 12.5);
        assert_eq!(got.category(), "Food & Dining");
        assert_eq!(got.description(), "Lunch");
        assert_eq!(got.date(), date!(2025 - 06 - 01));
    }

    #[test]
    fn normalizes_whitespace() {
        let form = TransactionForm {
            transaction_type: " income ".to_owned(),
            amount: " 1500 ".to_owned(),
            category: "  Salary\t".to_owned(),
            description: "  June pay  ".to_owned(),
            date: " 2025-06-30 ".to_owned(),
        };

        let got = validate_transaction_form(&form).unwrap();

        assert_eq!(got.transaction_type(), TransactionType::Income);
        assert_eq!(got.amount(), 1500.0);
        assert_eq!(got.category(), "Salary");
        assert_eq!(got.description(), "June pay");
    }

    #[test]
    fn reports_zero_amount_and_empty_category_together() {
        let form = TransactionForm {
            amount: "0".to_owned(),
            category: "".to_owned(),
            ..valid_form()
        };

        let error = validate_transaction_form(&form).unwrap_err();

        assert_fields(&error, &[Field::Amount, Field::Category]);
    }

    #[test]
    fn reports_negative_amount_and_empty_category_together() {
        let form = TransactionForm {
            amount: "-5".to_owned(),
            category: "   ".to_owned(),
            ..valid_form()
        };

        let error = validate_transaction_form(&form).unwrap_err();

        assert_fields(&error, &[Field::Amount, Field::Category]);
    }

    #[test]
    fn reports_every_field() {
        let form = TransactionForm {
            transaction_type: "refund".to_owned(),
            amount: "abc".to_owned(),
            category: "".to_owned(),
            description: "".to_owned(),
            date: "2025-02-30".to_owned(),
        };

        let error = validate_transaction_form(&form).unwrap_err();

        assert_fields(
            &error,
            &[Field::Type, Field::Amount, Field::Category, Field::Date],
        );
    }

    #[test]
    fn rejects_non_finite_amounts() {
        for amount in ["inf", "NaN", "-infinity"] {
            let form = TransactionForm {
                amount: amount.to_owned(),
                ..valid_form()
            };

            let error = validate_transaction_form(&form).unwrap_err();

            assert_fields(&error, &[Field::Amount]);
        }
    }

    #[test]
    fn rejects_missing_amount() {
        let form = TransactionForm {
            amount: "".to_owned(),
            ..valid_form()
        };

        let error = validate_transaction_form(&form).unwrap_err();

        assert_fields(&error, &[Field::Amount]);
    }

    #[test]
    fn rejects_category_from_other_type() {
        let form = TransactionForm {
            transaction_type: "income".to_owned(),
            category: "Shopping".to_owned(),
            ..valid_form()
        };

        let error = validate_transaction_form(&form).unwrap_err();

        assert_fields(&error, &[Field::Category]);
        assert!(error.errors()[0].message.contains("income"));
    }

    #[test]
    fn skips_category_membership_when_type_is_invalid() {
        let form = TransactionForm {
            transaction_type: "".to_owned(),
            ..valid_form()
        };

        let error = validate_transaction_form(&form).unwrap_err();

        assert_fields(&error, &[Field::Type]);
    }

    #[test]
    fn rejects_malformed_dates() {
        for date in ["", "01/06/2025", "2025-13-01", "yesterday"] {
            let form = TransactionForm {
                date: date.to_owned(),
                ..valid_form()
            };

            let error = validate_transaction_form(&form).unwrap_err();

            assert_fields(&error, &[Field::Date]);
        }
    }

    #[test]
    fn rejects_signed_and_zero_years() {
        for date in ["-0001-06-01", "-0002-06-01", "0000-06-01"] {
            let form = TransactionForm {
                date: date.to_owned(),
                ..valid_form()
            };

            let error = validate_transaction_form(&form).unwrap_err();

            assert_fields(&error, &[Field::Date]);
        }
    }

    #[test]
    fn accepts_first_and_last_four_digit_years() {
        for date in ["0001-01-01", "9999-12-31"] {
            let form = TransactionForm {
                date: date.to_owned(),
                ..valid_form()
            };

            assert!(validate_transaction_form(&form).is_ok(), "{date} should be valid");
        }
    }

    #[test]
    fn rejects_amounts_above_the_limit() {
        let form = TransactionForm {
            amount: "1e308".to_owned(),
            ..valid_form()
        };

        let error = validate_transaction_form(&form).unwrap_err();

        assert_fields(&error, &[Field::Amount]);

        let at_limit = TransactionForm {
            amount: "1000000000000".to_owned(),
            ..valid_form()
        };
        assert_eq!(validate_transaction_form(&at_limit).unwrap().amount(), MAX_AMOUNT);
    }

    #[test]
    fn description_is_optional() {
        let form = TransactionForm {
            description: "".to_owned(),
            ..valid_form()
        };

        let got = validate_transaction_form(&form).unwrap();

        assert_eq!(got.description(), "");
    }

    #[test]
    fn new_transaction_applies_same_checks() {
        let error = NewTransaction::new(
            TransactionType::Income,
            0.0,
            "Shopping",
            "",
            date!(2025 - 01 - 01),
        )
        .unwrap_err();

        assert_fields(&error, &[Field::Amount, Field::Category]);

        let error = NewTransaction::new(
            TransactionType::Income,
            10.0,
            "Salary",
            "",
            Date::from_calendar_date(-1, Month::June, 1).unwrap(),
        )
        .unwrap_err();

        assert_fields(&error, &[Field::Date]);
    }

    #[test]
    fn error_message_lists_all_fields() {
        let form = TransactionForm {
            amount: "0".to_owned(),
            category: "".to_owned(),
            ..valid_form()
        };

        let message = validate_transaction_form(&form).unwrap_err().to_string();

        assert!(message.contains("amount"), "{message}");
        assert!(message.contains("category"), "{message}");
    }
}
