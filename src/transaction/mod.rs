//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, validated `NewTransaction`s and `TransactionPatch`es
//! - Form validation that reports every invalid field at once
//! - The SQLite backed `TransactionStore`
//! - View handlers and endpoints for adding, editing and deleting transactions

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod store;
mod transactions_page;
mod validation;

pub use core::{
    InvalidTransactionType, NewTransaction, Transaction, TransactionPatch, TransactionType,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use form::get_category_options;
pub use store::TransactionStore;
pub use transactions_page::get_transactions_page;
pub use validation::{
    Field, FieldError, MAX_AMOUNT, TransactionForm, ValidationError, validate_transaction_form,
};

pub(crate) use create_page::create_transaction_modal;
pub(crate) use transactions_page::transaction_row_view;
