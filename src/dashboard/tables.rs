//! Table views for the dashboard and analytics pages.

use maud::{Markup, html};
use time::Date;

use crate::{
    dashboard::aggregation::{Granularity, PeriodTotals},
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::{Transaction, transaction_row_view},
};

const TABLE_DATA_CELL_STYLE: &str = "px-6 py-4 text-right whitespace-nowrap tabular-nums";
const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for positive, red for negative).
fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    }
}

/// A human readable name for the period starting on `start`.
pub(super) fn period_label(granularity: Granularity, start: Date) -> String {
    match granularity {
        Granularity::Day => start.to_string(),
        Granularity::Week => format!("Week of {start}"),
        Granularity::Month => format!("{} {}", start.month(), start.year()),
        Granularity::Year => start.year().to_string(),
    }
}

/// Renders a table with the income, expenses and net income of each period,
/// most recent period first.
pub(super) fn period_table(periods: &[PeriodTotals], granularity: Granularity) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Period" }
                        th scope="col" class="px-6 py-3 text-right" { "Income" }
                        th scope="col" class="px-6 py-3 text-right" { "Expenses" }
                        th scope="col" class="px-6 py-3 text-right" { "Net Income" }
                    }
                }

                tbody
                {
                    @for period in periods.iter().rev() {
                        tr class=(TABLE_ROW_STYLE) data-period=(period.start)
                        {
                            th scope="row" class="px-6 py-4 font-medium text-gray-900 dark:text-white"
                            {
                                (period_label(granularity, period.start))
                            }
                            td class={ (TABLE_DATA_CELL_STYLE) " " (TABLE_CELL_GREEN_STYLE) }
                            {
                                (format_currency(period.income))
                            }
                            td class={ (TABLE_DATA_CELL_STYLE) " " (TABLE_CELL_RED_STYLE) }
                            {
                                (format_currency(period.expenses))
                            }
                            td class={ (TABLE_DATA_CELL_STYLE) " font-semibold " (amount_color_class(period.net())) }
                            {
                                (format_currency(period.net()))
                            }
                        }
                    }

                    @if periods.is_empty() {
                        tr
                        {
                            td colspan="4" data-empty-state="true" class="px-6 py-4 text-center"
                            {
                                "No transactions to summarise."
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the most recent transactions with the same rows as the transactions page.
pub(super) fn recent_transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
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
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn labels_each_granularity() {
        let start = date!(2025 - 03 - 03);

        assert_eq!(period_label(Granularity::Day, start), "2025-03-03");
        assert_eq!(period_label(Granularity::Week, start), "Week of 2025-03-03");
        assert_eq!(period_label(Granularity::Month, start), "March 2025");
        assert_eq!(period_label(Granularity::Year, start), "2025");
    }

    #[test]
    fn period_table_lists_newest_period_first() {
        let periods = vec![
            PeriodTotals {
                start: date!(2025 - 01 - 01),
                income: 100.0,
                expenses: 40.0,
            },
            PeriodTotals {
                start: date!(2025 - 02 - 01),
                income: 0.0,
                expenses: 25.0,
            },
        ];

        let html = period_table(&periods, Granularity::Month).into_string();

        let february = html.find("February 2025").unwrap();
        let january = html.find("January 2025").unwrap();
        assert!(february < january);
        assert!(html.contains("$60.00"));
        assert!(html.contains("-$25.00"));
    }

    #[test]
    fn period_table_shows_empty_state() {
        let html = period_table(&[], Granularity::Week).into_string();

        assert!(html.contains("data-empty-state"));
    }
}
