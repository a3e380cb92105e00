//! Monthly spending limits per category.

mod budgets_page;
mod core;
mod create;
mod delete;
mod edit;
mod form;
mod service;

pub(crate) use budgets_page::load_month_budgets;
pub use budgets_page::get_budgets_page;
pub use core::{Budget, BudgetMonth};
pub use create::{create_budget_endpoint, get_new_budget_page};
pub use delete::delete_budget_endpoint;
pub use edit::{get_edit_budget_page, update_budget_endpoint};
pub use service::BudgetService;
