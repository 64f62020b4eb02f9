//! Dashboard HTTP handler and view rendering.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{CategoryShare, Totals, by_category, category_shares, totals},
        cards::{category_breakdown_view, totals_cards_view},
        tables::recent_transactions_table,
    },
    endpoints,
    html::{HeadElement, LINK_STYLE, base, dollar_input_styles, link},
    navigation::{NavBar, Tab, ViewQuery, ViewState},
    timezone::local_today,
    transaction::{Transaction, TransactionStore, TransactionType, create_transaction_modal},
};

/// How many of the latest transactions the dashboard shows.
const RECENT_TRANSACTION_COUNT: usize = 5;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub store: TransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData<'a> {
    totals: Totals,
    expense_shares: Vec<CategoryShare>,
    income_shares: Vec<CategoryShare>,
    recent_transactions: &'a [Transaction],
}

/// Display a page with an overview of the user's spending and income.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(view_query): Query<ViewQuery>,
) -> Result<Response, Error> {
    let view_state = ViewState::new(Tab::Dashboard, &view_query);

    let transactions = state
        .store
        .list_all()
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    let modal = if view_state.show_form {
        Some(create_transaction_modal(
            &view_state,
            local_today(&state.local_timezone)?,
        ))
    } else {
        None
    };

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(&view_state, modal).into_response());
    }

    let data = build_dashboard_data(&transactions)?;

    Ok(dashboard_view(&view_state, &data, modal).into_response())
}

/// Summarise `transactions`, which must be sorted most recent first.
fn build_dashboard_data(transactions: &[Transaction]) -> Result<DashboardData<'_>, Error> {
    let totals = totals(transactions)?;
    let expense_shares = category_shares(&by_category(transactions, TransactionType::Expense)?);
    let income_shares = category_shares(&by_category(transactions, TransactionType::Income)?);
    let recent_count = transactions.len().min(RECENT_TRANSACTION_COUNT);

    Ok(DashboardData {
        totals,
        expense_shares,
        income_shares,
        recent_transactions: &transactions[..recent_count],
    })
}

fn head_elements() -> [HeadElement; 1] {
    [dollar_input_styles()]
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(view_state: &ViewState, modal: Option<Markup>) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let new_transaction_link = link(&view_state.open_form_url(), "adding a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p data-empty-state="true"
            {
                "Your totals will show up here once you record some expenses or income.
                Get started by " (new_transaction_link) "."
            }
        }

        @if let Some(modal) = modal {
            (modal)
        }
    );

    base("Dashboard", &head_elements(), &content)
}

/// Renders the dashboard with totals, category breakdowns and recent transactions.
fn dashboard_view(view_state: &ViewState, data: &DashboardData, modal: Option<Markup>) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center gap-8 px-2 lg:px-6 py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            div class="flex justify-between items-baseline w-full"
            {
                h2 class="text-2xl font-bold" { "Dashboard" }

                a href=(view_state.open_form_url()) class=(LINK_STYLE) { "Add Transaction" }
            }

            (totals_cards_view(&data.totals))

            (category_breakdown_view(TransactionType::Expense, &data.expense_shares))

            (category_breakdown_view(TransactionType::Income, &data.income_shares))

            section id="recent-transactions" class="w-full"
            {
                div class="flex justify-between items-baseline mb-4"
                {
                    h3 class="text-xl font-semibold" { "Recent Transactions" }

                    a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "View all" }
                }

                (recent_transactions_table(data.recent_transactions))
            }
        }

        @if let Some(modal) = modal {
            (modal)
        }
    );

    base("Dashboard", &head_elements(), &content)
}
