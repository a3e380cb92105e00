//! The landing page with a summary of the current month.

mod dashboard_page;

pub use dashboard_page::get_dashboard_page;
