//! The reports page and the chart data behind it.

mod aggregation;
mod charts;
mod reports_page;

pub use reports_page::get_reports_page;
