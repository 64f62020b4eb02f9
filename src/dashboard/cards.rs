//! Card components for the totals and the per-category breakdowns.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{CategoryShare, Totals},
    html::{amount_class, format_currency},
    transaction::TransactionType,
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

/// Formats a percentage value, avoiding "-0%" display.
fn format_percentage(value: f64) -> String {
    let rounded = value.round();
    if rounded.abs() < 0.5 {
        "0".to_string()
    } else {
        format!("{:.0}", rounded)
    }
}

/// Renders the income, expense and balance totals as a row of cards.
pub(super) fn totals_cards_view(totals: &Totals) -> Markup {
    let balance_class = if totals.balance < 0.0 {
        amount_class(TransactionType::Expense)
    } else {
        amount_class(TransactionType::Income)
    };

    html! {
        section class="grid grid-cols-1 sm:grid-cols-3 gap-4 w-full" aria-label="Totals"
        {
            (total_card("Income", "income", totals.income_total, amount_class(TransactionType::Income)))
            (total_card("Expenses", "expenses", totals.expense_total, amount_class(TransactionType::Expense)))
            (total_card("Balance", "balance", totals.balance, balance_class))
        }
    }
}

fn total_card(title: &str, key: &str, amount: f64, text_class: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) data-total=(key)
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-1" { (title) }
            div class={ "text-3xl font-bold tabular-nums " (text_class) }
            {
                (format_currency(amount))
            }
        }
    }
}

/// Renders one card per category with its amount and share of the total.
///
/// Shows an empty state if there are no transactions of `transaction_type`.
pub(super) fn category_breakdown_view(
    transaction_type: TransactionType,
    shares: &[CategoryShare],
) -> Markup {
    let (title, noun) = match transaction_type {
        TransactionType::Expense => ("Expenses by Category", "expenses"),
        TransactionType::Income => ("Income by Category", "income"),
    };

    html! {
        section
            class="w-full"
            data-breakdown=(transaction_type)
        {
            h3 class="text-xl font-semibold mb-4" { (title) }

            @if shares.is_empty() {
                p class="text-gray-600 dark:text-gray-400" data-empty-state="true"
                {
                    "No " (noun) " recorded yet."
                }
            } @else {
                div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4"
                {
                    @for share in shares {
                        (category_card(share, noun))
                    }
                }
            }
        }
    }
}

fn category_card(share: &CategoryShare, noun: &str) -> Markup {
    let percentage = format_percentage(share.percentage);

    html! {
        div
            class=(CARD_STYLE)
            data-category=(share.category)
            aria-label=(format!(
                "{}: {}, {}% of {}",
                share.category,
                format_currency(share.amount),
                percentage,
                noun
            ))
        {
            h4 class="text-lg font-semibold mb-2 truncate" title=(share.category)
            {
                (share.category)
            }

            div class="text-2xl font-bold mb-1 tabular-nums" { (format_currency(share.amount)) }

            div class="text-sm text-gray-600 dark:text-gray-400 mb-2"
            {
                (percentage) "% of " (noun)
            }

            (progress_bar(share.percentage))
        }
    }
}

/// Renders a horizontal progress bar for a percentage of a total.
pub(super) fn progress_bar(percentage: f64) -> Markup {
    let clamped = percentage.clamp(0.0, 100.0);

    // Minimum 3% width so the rounded corners are visible
    let display_percentage = if clamped > 0.0 && clamped < 3.0 {
        3.0
    } else {
        clamped
    };

    html! {
        div
            class="w-full bg-gray-200 dark:bg-gray-700 rounded-full h-2.5"
            role="progressbar"
            aria-valuenow=(format_percentage(clamped))
            aria-valuemin="0"
            aria-valuemax="100"
        {
            @if clamped > 0.0 {
                div
                    class="bg-blue-600 dark:bg-blue-500 h-2.5 rounded-full"
                    style=(format!("width: {:.1}%", display_percentage))
                {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(category: &str, amount: f64, percentage: f64) -> CategoryShare {
        CategoryShare {
            category: category.to_owned(),
            amount,
            percentage,
        }
    }

    #[test]
    fn format_percentage_avoids_negative_zero() {
        assert_eq!(format_percentage(0.0), "0");
        assert_eq!(format_percentage(-0.0), "0");
        assert_eq!(format_percentage(-0.4), "0");
        assert_eq!(format_percentage(0.4), "0");
        assert_eq!(format_percentage(33.4), "33");
        assert_eq!(format_percentage(66.6), "67");
    }

    #[test]
    fn totals_cards_show_each_total() {
        let totals = Totals {
            income_total: 100.0,
            expense_total: 40.0,
            balance: 60.0,
        };

        let html = totals_cards_view(&totals).into_string();

        assert!(html.contains("data-total=\"income\""));
        assert!(html.contains("$100.00"));
        assert!(html.contains("$40.00"));
        assert!(html.contains("$60.00"));
    }

    #[test]
    fn negative_balance_keeps_sign() {
        let totals = Totals {
            income_total: 10.0,
            expense_total: 40.0,
            balance: -30.0,
        };

        let html = totals_cards_view(&totals).into_string();

        assert!(html.contains("-$30.00"));
    }

    #[test]
    fn breakdown_renders_card_per_category() {
        let shares = vec![share("Food", 75.0, 75.0), share("Shopping", 25.0, 25.0)];

        let html = category_breakdown_view(TransactionType::Expense, &shares).into_string();

        assert!(html.contains("Expenses by Category"));
        assert!(html.contains("data-category=\"Food\""));
        assert!(html.contains("75% of expenses"));
        assert!(html.contains("data-category=\"Shopping\""));
        assert!(!html.contains("data-empty-state"));
    }

    #[test]
    fn breakdown_shows_empty_state() {
        let html = category_breakdown_view(TransactionType::Income, &[]).into_string();

        assert!(html.contains("No income recorded yet."));
    }

    #[test]
    fn progress_bar_has_minimum_width_for_small_percentages() {
        let html = progress_bar(0.5).into_string();
        assert!(html.contains("width: 3.0%"));
    }

    #[test]
    fn progress_bar_empty_for_zero_percentage() {
        let html = progress_bar(0.0).into_string();
        assert!(html.contains("progressbar"));
        assert!(!html.contains("bg-blue-600"));
    }

    #[test]
    fn progress_bar_clamps_over_100() {
        let html = progress_bar(150.0).into_string();
        assert!(html.contains("width: 100.0%"));
    }
}
