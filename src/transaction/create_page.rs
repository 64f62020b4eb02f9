//! The views for adding a transaction: a standalone page and a modal shown over any tab.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles, modal},
    navigation::{NavBar, ViewState},
    timezone::local_today,
    transaction::{
        TransactionForm, TransactionType,
        form::{FormAction, transaction_form},
    },
};

/// An empty expense dated `today`.
fn blank_form(today: Date) -> TransactionForm {
    TransactionForm {
        transaction_type: TransactionType::Expense.as_str().to_owned(),
        date: today.to_string(),
        ..Default::default()
    }
}

/// The add transaction form drawn over the active tab.
///
/// Saving or closing the form returns to the tab it was opened from.
pub(crate) fn create_transaction_modal(view_state: &ViewState, today: Date) -> Markup {
    let action = FormAction::Create {
        redirect_url: view_state.close_form_url().to_owned(),
    };

    modal(
        "New Transaction",
        view_state.close_form_url(),
        &transaction_form(&action, &blank_form(today)),
    )
}

fn create_transaction_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let action = FormAction::Create {
        redirect_url: endpoints::TRANSACTIONS_VIEW.to_owned(),
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "New Transaction" }

            (transaction_form(&action, &blank_form(today)))
        }
    };

    base("Create Transaction", &[dollar_input_styles()], &content)
}

/// The state needed for create new transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating a transaction.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    Ok(create_transaction_view(today).into_response())
}
