//! Defines the endpoint for updating an existing transaction.

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    transaction::{
        TransactionForm, TransactionPatch, TransactionStore, create_endpoint::RedirectQuery,
        validate_transaction_form,
    },
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    pub store: TransactionStore,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for replacing the fields of a transaction with the submitted form.
///
/// Redirects to `redirect_url` on success, otherwise responds with an alert.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<RedirectQuery>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let patch = match validate_transaction_form(&form) {
        Ok(transaction) => TransactionPatch::from(transaction),
        Err(error) => {
            tracing::debug!("rejected changes to transaction {transaction_id}: {error}");
            return Error::from(error).into_alert_response();
        }
    };

    if let Err(error) = state.store.update(transaction_id, patch) {
        tracing::error!("Could not update transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    (HxRedirect(query.into_redirect_url()), StatusCode::SEE_OTHER).into_response()
}
