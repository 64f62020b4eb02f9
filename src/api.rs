//! JSON endpoints for reading transactions and their summary.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    dashboard::{Totals, by_category, totals},
    transaction::{Transaction, TransactionStore, TransactionType},
};

/// The state needed for the JSON API.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub store: TransactionStore,
}

impl FromRef<AppState> for ApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The totals and per-category sums over every transaction.
#[derive(Debug, Serialize)]
pub struct Summary {
    #[serde(flatten)]
    pub totals: Totals,
    pub expenses_by_category: BTreeMap<String, f64>,
    pub income_by_category: BTreeMap<String, f64>,
}

/// List every transaction, most recent first.
pub async fn list_transactions_api(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let transactions = state
        .store
        .list_all()
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok(Json(transactions))
}

/// Get the totals and the per-category sums for expenses and income.
pub async fn get_summary_api(State(state): State<ApiState>) -> Result<Json<Summary>, Error> {
    let transactions = state
        .store
        .list_all()
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok(Json(Summary {
        totals: totals(&transactions)?,
        expenses_by_category: by_category(&transactions, TransactionType::Expense)?,
        income_by_category: by_category(&transactions, TransactionType::Income)?,
    }))
}
