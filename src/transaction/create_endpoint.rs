//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    transaction::{TransactionForm, TransactionStore, validate_transaction_form},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub store: TransactionStore,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Where to send the client after a successful write.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    redirect_url: Option<String>,
}

impl RedirectQuery {
    /// The requested URL if it is a path on this site, otherwise the transactions tab.
    pub(crate) fn into_redirect_url(self) -> String {
        match self.redirect_url {
            Some(url) if url.starts_with('/') && !url.starts_with("//") => url,
            _ => endpoints::TRANSACTIONS_VIEW.to_owned(),
        }
    }
}

/// A route handler for creating a new transaction.
///
/// Redirects to `redirect_url` on success. If any field is invalid nothing is
/// saved and the response is an alert listing every problem.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Query(query): Query<RedirectQuery>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match validate_transaction_form(&form) {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::debug!("rejected new transaction: {error}");
            return Error::from(error).into_alert_response();
        }
    };

    match state.store.add(transaction) {
        Ok(id) => tracing::info!("created transaction {id}"),
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            return error.into_alert_response();
        }
    }

    (HxRedirect(query.into_redirect_url()), StatusCode::SEE_OTHER).into_response()
}
