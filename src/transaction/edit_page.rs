//! The page for editing a transaction.

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    transaction::{
        Transaction, TransactionForm, TransactionStore,
        create_endpoint::RedirectQuery,
        form::{FormAction, transaction_form},
    },
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    pub store: TransactionStore,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

fn edit_transaction_view(transaction: &Transaction, redirect_url: String) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_TRANSACTION_VIEW).into_html();
    let action = FormAction::Update {
        url: format_endpoint(endpoints::TRANSACTION, transaction.id),
        redirect_url,
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Edit Transaction" }

            (transaction_form(&action, &TransactionForm::from(transaction)))

            p class="mt-4 text-sm text-gray-500 dark:text-gray-400"
            {
                "Recorded " (transaction.created_at.date())
            }
        }
    };

    base("Edit Transaction", &[dollar_input_styles()], &content)
}

/// Renders the page for editing the transaction with `transaction_id`.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<TransactionId>,
    Query(query): Query<RedirectQuery>,
) -> Result<Response, Error> {
    let transaction = state.store.get(transaction_id).inspect_err(|error| {
        tracing::error!("could not get transaction {transaction_id} for editing: {error}")
    })?;

    Ok(edit_transaction_view(&transaction, query.into_redirect_url()).into_response())
}
