//! Bank accounts: the record mapping, validation, pages and endpoints.

mod accounts_page;
mod core;
mod create;
mod delete;
mod edit;
mod form;
mod service;

pub use accounts_page::get_bank_accounts_page;
pub use core::{BankAccount, primary_total, totals_by_currency};
pub use create::{create_bank_account_endpoint, get_new_bank_account_page};
pub use delete::delete_bank_account_endpoint;
pub use edit::{get_edit_bank_account_page, update_bank_account_endpoint};
pub use service::BankAccountService;
