//! The HTML form shared by the create and edit transaction views.

use axum::extract::Query;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    category::categories_for,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::{TransactionForm, TransactionType},
};

/// Where the form is sent and with which method.
pub enum FormAction {
    /// POST a new transaction.
    Create { redirect_url: String },
    /// PUT changes to an existing transaction.
    Update { url: String, redirect_url: String },
}

/// Render a complete transaction form, prefilled with `form`.
///
/// Errors from the server are swapped into the page's alert container.
pub fn transaction_form(action: &FormAction, form: &TransactionForm) -> Markup {
    let (hx_post, hx_put, submit_label) = match action {
        FormAction::Create { redirect_url } => (
            Some(format!(
                "{}?redirect_url={}",
                endpoints::TRANSACTIONS_API,
                redirect_url
            )),
            None,
            "Add Transaction",
        ),
        FormAction::Update { url, redirect_url } => (
            None,
            Some(format!("{url}?redirect_url={redirect_url}")),
            "Save Changes",
        ),
    };

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            class="w-full space-y-4 md:space-y-6"
        {
            (transaction_form_fields(form))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator"
                {
                    (loading_spinner())
                }
                " " (submit_label)
            }
        }
    }
}

/// The inputs for each field of a transaction.
///
/// Changing the type reloads the category choices for the new type.
pub fn transaction_form_fields(form: &TransactionForm) -> Markup {
    let selected_type = form
        .transaction_type
        .parse::<TransactionType>()
        .unwrap_or_default();

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for transaction_type in TransactionType::ALL {
                    @let id = format!("transaction-type-{transaction_type}");

                    div class="flex flex-1"
                    {
                        input
                            name="type"
                            id=(id)
                            type="radio"
                            value=(transaction_type.as_str())
                            checked[transaction_type == selected_type]
                            required
                            hx-get=(endpoints::CATEGORY_OPTIONS)
                            hx-target="#category"
                            hx-swap="innerHTML"
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id) class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (transaction_type.label())
                        }
                    }
                }
            }
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    autofocus
                    value=(form.amount)
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
            {
                (category_options(selected_type, &form.category))
            }
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="What was it for?"
                value=(form.description)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                required
                value=(form.date)
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// The `<option>`s for the categories of `transaction_type`, with `selected` preselected.
fn category_options(transaction_type: TransactionType, selected: &str) -> Markup {
    html! {
        option value="" disabled selected[selected.is_empty()] { "Select a category" }

        @for &category in categories_for(transaction_type) {
            option value=(category) selected[category == selected] { (category) }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryOptionsQuery {
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    #[serde(default)]
    category: String,
}

/// A route handler for the category choices of a transaction type.
pub async fn get_category_options(Query(query): Query<CategoryOptionsQuery>) -> Markup {
    category_options(query.transaction_type, &query.category)
}
