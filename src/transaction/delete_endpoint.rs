//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
};

use crate::{AppState, database_id::TransactionId, transaction::TransactionStore};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    store: TransactionStore,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// Responds with an empty body that htmx swaps in place of the deleted row.
/// Deleting a transaction that is already gone also succeeds, so a repeated
/// click or a stale page removes the row too.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.store.delete(transaction_id) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(true) => {
            tracing::info!("deleted transaction {transaction_id}");
            Html("").into_response()
        }
        Ok(false) => Html("").into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        test_utils::{assert_status, must_add, test_store},
        transaction::{
            TransactionStore, TransactionType,
            delete_endpoint::{DeleteTransactionState, delete_transaction_endpoint},
        },
    };

    #[tokio::test]
    async fn deletes_transaction() {
        let store = test_store();
        let id = must_add(
            &store,
            TransactionType::Expense,
            1.23,
            "Other",
            date!(2025 - 10 - 26),
        );
        let state = DeleteTransactionState {
            store: store.clone(),
        };

        let response = delete_transaction_endpoint(State(state), Path(id)).await;

        assert_status(&response, StatusCode::OK);
        assert_eq!(store.get(id), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn deleting_twice_succeeds() {
        let store = test_store();
        let id = must_add(
            &store,
            TransactionType::Income,
            9.0,
            "Gift",
            date!(2025 - 10 - 26),
        );
        let state = DeleteTransactionState { store };

        let first = delete_transaction_endpoint(State(state.clone()), Path(id)).await;
        let second = delete_transaction_endpoint(State(state), Path(id)).await;

        assert_status(&first, StatusCode::OK);
        assert_status(&second, StatusCode::OK);
    }

    #[tokio::test]
    async fn storage_failure_is_an_error() {
        let state = DeleteTransactionState {
            store: TransactionStore::new(Connection::open_in_memory().unwrap()),
        };

        let response = delete_transaction_endpoint(State(state), Path(1)).await;

        assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
