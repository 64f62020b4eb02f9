//! Defines the route handler for the page that displays transactions as a table.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, dollar_input_styles, edit_delete_action_links,
        signed_amount,
    },
    navigation::{NavBar, Tab, ViewQuery, ViewState},
    timezone::local_today,
    transaction::{
        Transaction, TransactionStore, TransactionType, create_page::create_transaction_modal,
    },
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    pub store: TransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Narrows the table to one transaction type.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsFilter {
    #[serde(rename = "type")]
    transaction_type: Option<TransactionType>,
}

/// Display every transaction, most recent first.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(view_query): Query<ViewQuery>,
    Query(filter): Query<TransactionsFilter>,
) -> Result<Response, Error> {
    let view_state = ViewState::new(Tab::Transactions, &view_query);

    let transactions: Vec<Transaction> = state
        .store
        .list_all()
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?
        .into_iter()
        .filter(|transaction| {
            filter
                .transaction_type
                .is_none_or(|transaction_type| transaction.transaction_type == transaction_type)
        })
        .collect();

    let modal = if view_state.show_form {
        Some(create_transaction_modal(
            &view_state,
            local_today(&state.local_timezone)?,
        ))
    } else {
        None
    };

    Ok(
        transactions_view(&view_state, filter.transaction_type, &transactions, modal)
            .into_response(),
    )
}

fn transactions_view(
    view_state: &ViewState,
    filter: Option<TransactionType>,
    transactions: &[Transaction],
    modal: Option<Markup>,
) -> Markup {
    let nav_bar = NavBar::new(view_state.active_tab.url()).into_html();
    let filter_links = [
        (None, "All"),
        (Some(TransactionType::Expense), "Expenses"),
        (Some(TransactionType::Income), "Income"),
    ]
    .map(|(transaction_type, label)| {
        let url = match transaction_type {
            Some(transaction_type) => {
                format!("{}?type={transaction_type}", endpoints::TRANSACTIONS_VIEW)
            }
            None => endpoints::TRANSACTIONS_VIEW.to_owned(),
        };

        (transaction_type, label, url)
    });

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    nav class="flex gap-4" aria-label="Filter by type"
                    {
                        @for (transaction_type, label, url) in filter_links {
                            @if transaction_type == filter {
                                span class="font-semibold" aria-current="page" { (label) }
                            } @else {
                                a href=(url) class=(LINK_STYLE) { (label) }
                            }
                        }
                    }

                    a href=(view_state.open_form_url()) class=(LINK_STYLE) { "Add Transaction" }
                }

                div class="overflow-x-auto rounded"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class="px-6 py-4 text-right" { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row_view(transaction))
                            }

                            @if transactions.is_empty() {
                                tr
                                {
                                    td colspan="5" data-empty-state="true" class="px-6 py-4 text-center"
                                    {
                                        "No transactions yet. Add one to get started."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        @if let Some(modal) = modal {
            (modal)
        }
    };

    base("Transactions", &[dollar_input_styles()], &content)
}

/// A table row for one transaction, with edit and delete actions.
pub(crate) fn transaction_row_view(transaction: &Transaction) -> Markup {
    let edit_url = format!(
        "{}?redirect_url={}",
        format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id),
        endpoints::TRANSACTIONS_VIEW
    );
    let delete_url = format_endpoint(endpoints::TRANSACTION, transaction.id);
    let confirm_message = format!(
        "Are you sure you want to delete the {} of {} on {}? This cannot be undone.",
        transaction.transaction_type, transaction.category, transaction.date
    );

    html! {
        tr
            id={ "transaction-" (transaction.id) }
            class=(TABLE_ROW_STYLE)
            data-transaction-row="true"
            data-transaction-type=(transaction.transaction_type)
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(transaction.date) { (transaction.date) }
            }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class="px-6 py-4 text-right"
            {
                (signed_amount(transaction.transaction_type, transaction.amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    (edit_delete_action_links(&edit_url, &delete_url, &confirm_message, "closest tr"))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        navigation::ViewQuery,
        test_utils::{
            assert_html_content_type, assert_status, assert_valid_html, must_add,
            parse_html_document, test_store,
        },
        transaction::{
            TransactionType,
            transactions_page::{TransactionsFilter, TransactionsPageState, get_transactions_page},
        },
    };

    fn row_ids(document: &Html) -> Vec<String> {
        document
            .select(&Selector::parse("tr[data-transaction-row]").unwrap())
            .filter_map(|row| row.value().attr("id"))
            .map(str::to_owned)
            .collect()
    }

    fn test_state() -> (TransactionsPageState, Vec<i64>) {
        let store = test_store();
        let ids = vec![
            must_add(&store, TransactionType::Expense, 5.0, "Shopping", date!(2025 - 01 - 10)),
            must_add(&store, TransactionType::Income, 50.0, "Salary", date!(2025 - 01 - 12)),
            must_add(&store, TransactionType::Expense, 7.5, "Healthcare", date!(2025 - 01 - 11)),
        ];

        (
            TransactionsPageState {
                store,
                local_timezone: "Etc/UTC".to_owned(),
            },
            ids,
        )
    }

    #[tokio::test]
    async fn lists_transactions_newest_first() {
        let (state, ids) = test_state();

        let response = get_transactions_page(
            State(state),
            Query(ViewQuery::default()),
            Query(TransactionsFilter::default()),
        )
        .await
        .unwrap();

        assert_status(&response, StatusCode::OK);
        assert_html_content_type(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_eq!(
            row_ids(&document),
            vec![
                format!("transaction-{}", ids[1]),
                format!("transaction-{}", ids[2]),
                format!("transaction-{}", ids[0]),
            ]
        );
        let dialogs = document.select(&Selector::parse("[role=dialog]").unwrap()).count();
        assert_eq!(dialogs, 0, "the add form should be closed");
    }

    #[tokio::test]
    async fn filters_by_type() {
        let (state, ids) = test_state();

        let response = get_transactions_page(
            State(state),
            Query(ViewQuery::default()),
            Query(TransactionsFilter {
                transaction_type: Some(TransactionType::Income),
            }),
        )
        .await
        .unwrap();

        let document = parse_html_document(response).await;
        assert_eq!(row_ids(&document), vec![format!("transaction-{}", ids[1])]);
    }

    #[tokio::test]
    async fn shows_add_form_when_requested() {
        let (state, _) = test_state();

        let response = get_transactions_page(
            State(state),
            Query(ViewQuery { new: true }),
            Query(TransactionsFilter::default()),
        )
        .await
        .unwrap();

        let document = parse_html_document(response).await;
        let dialog = document
            .select(&Selector::parse("[role=dialog] form").unwrap())
            .next();
        assert!(dialog.is_some(), "want the add transaction form in a dialog");
    }

    #[tokio::test]
    async fn rows_can_be_deleted() {
        let (state, ids) = test_state();

        let response = get_transactions_page(
            State(state),
            Query(ViewQuery::default()),
            Query(TransactionsFilter::default()),
        )
        .await
        .unwrap();

        let document = parse_html_document(response).await;
        let button = document
            .select(&Selector::parse(&format!("#transaction-{} button", ids[0])).unwrap())
            .next()
            .unwrap();
        assert_eq!(
            button.value().attr("hx-delete"),
            Some(format!("/api/transactions/{}", ids[0]).as_str())
        );
        assert_eq!(button.value().attr("hx-target"), Some("closest tr"));
    }

    #[tokio::test]
    async fn empty_store_shows_empty_state() {
        let state = TransactionsPageState {
            store: test_store(),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_transactions_page(
            State(state),
            Query(ViewQuery::default()),
            Query(TransactionsFilter::default()),
        )
        .await
        .unwrap();

        let document = parse_html_document(response).await;
        let empty = document
            .select(&Selector::parse("[data-empty-state]").unwrap())
            .count();
        assert_eq!(empty, 1);
    }
}
