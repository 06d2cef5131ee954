//! Derived spending statistics for the dashboard.

mod aggregation;
mod endpoint;

pub use aggregation::{CategoryTotal, MonthTotal, SpendingSummary, summarize};
pub use endpoint::get_summary_endpoint;
