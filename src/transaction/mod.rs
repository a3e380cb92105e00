//! Income and expense transactions.

mod core;
mod create;
mod delete;
mod edit;
mod form;
mod service;
mod transactions_page;

pub use core::{Totals, Transaction, TransactionFilter, TransactionType};
pub use create::{create_transaction_endpoint, get_new_transaction_page};
pub use delete::delete_transaction_endpoint;
pub use edit::{get_edit_transaction_page, update_transaction_endpoint};
pub use service::TransactionService;
pub use transactions_page::get_transactions_page;
