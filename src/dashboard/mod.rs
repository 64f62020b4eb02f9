//! Dashboard and analytics pages.
//!
//! Provides an overview page with totals, category breakdowns and recent
//! transactions, and an analytics page with totals over time.

mod aggregation;
mod analytics;
mod cards;
mod handlers;
mod tables;

pub use aggregation::{
    CategoryShare, Granularity, PeriodTotals, Totals, by_category, by_period, category_shares,
    totals,
};
pub use analytics::get_analytics_page;
pub use handlers::get_dashboard_page;
