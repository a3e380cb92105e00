//! Savings goals and the money put towards them.

mod add_funds;
mod core;
mod create;
mod delete;
mod edit;
mod form;
mod goals_page;
mod service;

pub use add_funds::add_funds_endpoint;
pub use core::Goal;
pub use create::{create_goal_endpoint, get_new_goal_page};
pub use delete::delete_goal_endpoint;
pub use edit::{get_edit_goal_page, update_goal_endpoint};
pub use goals_page::get_goals_page;
pub use service::GoalService;
