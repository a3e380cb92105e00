//! Income and expense categories.

mod categories_page;
mod core;
mod create;
mod delete;
mod edit;
mod form;
mod service;

pub use categories_page::get_categories_page;
pub use core::{Category, CategoryType};
pub use create::{create_category_endpoint, get_new_category_page};
pub use delete::delete_category_endpoint;
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use service::CategoryService;
