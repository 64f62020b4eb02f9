//! The analytics page: income and expenses over time and where the money went.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{
            CategoryShare, Granularity, PeriodTotals, by_category, by_period, category_shares,
        },
        cards::progress_bar,
        tables::period_table,
    },
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, dollar_input_styles, format_currency},
    navigation::{NavBar, Tab, ViewQuery, ViewState},
    timezone::local_today,
    transaction::{TransactionStore, TransactionType, create_transaction_modal},
};

/// The state needed for the analytics page.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    pub store: TransactionStore,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// How to group transactions over time.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default)]
    granularity: Granularity,
}

/// Display income and expenses per period and the share of each category.
pub async fn get_analytics_page(
    State(state): State<AnalyticsState>,
    Query(view_query): Query<ViewQuery>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Response, Error> {
    let view_state = ViewState::new(Tab::Analytics, &view_query);

    let transactions = state
        .store
        .list_all()
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    let periods = by_period(&transactions, query.granularity)?;
    let expense_shares = category_shares(&by_category(&transactions, TransactionType::Expense)?);
    let income_shares = category_shares(&by_category(&transactions, TransactionType::Income)?);

    let modal = if view_state.show_form {
        Some(create_transaction_modal(
            &view_state,
            local_today(&state.local_timezone)?,
        ))
    } else {
        None
    };

    Ok(analytics_view(
        &view_state,
        query.granularity,
        &periods,
        [
            (TransactionType::Expense, expense_shares.as_slice()),
            (TransactionType::Income, income_shares.as_slice()),
        ],
        modal,
    )
    .into_response())
}

fn granularity_links(selected: Granularity) -> Markup {
    html! {
        nav class="flex gap-4" aria-label="Group by"
        {
            @for granularity in Granularity::ALL {
                @if granularity == selected {
                    span class="font-semibold" aria-current="page" data-granularity=(granularity.as_str())
                    {
                        (granularity.label())
                    }
                } @else {
                    a
                        href={ (endpoints::ANALYTICS_VIEW) "?granularity=" (granularity.as_str()) }
                        class=(LINK_STYLE)
                        data-granularity=(granularity.as_str())
                    {
                        (granularity.label())
                    }
                }
            }
        }
    }
}

fn category_share_list(transaction_type: TransactionType, shares: &[CategoryShare]) -> Markup {
    let title = match transaction_type {
        TransactionType::Expense => "Spending by Category",
        TransactionType::Income => "Income by Category",
    };

    html! {
        section class="w-full" data-shares=(transaction_type)
        {
            h3 class="text-xl font-semibold mb-4" { (title) }

            @if shares.is_empty() {
                p class="text-gray-600 dark:text-gray-400" { "Nothing recorded yet." }
            } @else {
                ol class="space-y-3"
                {
                    @for share in shares {
                        li data-category=(share.category)
                        {
                            div class="flex justify-between text-sm mb-1"
                            {
                                span class="font-medium" { (share.category) }
                                span class="tabular-nums"
                                {
                                    (format_currency(share.amount)) " (" (format!("{:.1}", share.percentage)) "%)"
                                }
                            }

                            (progress_bar(share.percentage))
                        }
                    }
                }
            }
        }
    }
}

fn analytics_view(
    view_state: &ViewState,
    granularity: Granularity,
    periods: &[PeriodTotals],
    shares: [(TransactionType, &[CategoryShare]); 2],
    modal: Option<Markup>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::ANALYTICS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex flex-col gap-8 w-full lg:max-w-5xl"
            {
                div class="flex justify-between items-baseline"
                {
                    h2 class="text-2xl font-bold" { "Analytics" }

                    a href=(view_state.open_form_url()) class=(LINK_STYLE) { "Add Transaction" }
                }

                section id="periods" class="space-y-4"
                {
                    div class="flex justify-between flex-wrap items-baseline gap-4"
                    {
                        h3 class="text-xl font-semibold" { (granularity.label()) " Summary" }

                        (granularity_links(granularity))
                    }

                    (period_table(periods, granularity))
                }

                div class="grid grid-cols-1 md:grid-cols-2 gap-8"
                {
                    @for (transaction_type, shares) in shares {
                        (category_share_list(transaction_type, shares))
                    }
                }
            }
        }

        @if let Some(modal) = modal {
            (modal)
        }
    };

    base("Analytics", &[dollar_input_styles()], &content)
}
