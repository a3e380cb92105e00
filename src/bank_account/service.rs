//! Reads and writes bank accounts in the `bank_account_c` table.

use std::sync::Arc;

use axum::extract::FromRef;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    bank_account::core::{AccountType, BankAccount, BankAccountData},
    currency::Currency,
    records::{
        FetchParams, OrderBy, Record, RecordId, RecordStore, ensure_all_succeeded,
        into_stored_record, map_listing, record_id, record_number, record_text,
        record_text_or, select, to_record,
    },
};

const TABLE: &str = "bank_account_c";

const FIELDS: [&str; 6] = [
    "name_c",
    "account_number_c",
    "bank_name_c",
    "balance_c",
    "currency_c",
    "account_type_c",
];

/// The bank account operations the route handlers use.
#[derive(Debug, Clone)]
pub struct BankAccountService {
    store: Arc<dyn RecordStore>,
}

impl FromRef<AppState> for BankAccountService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.record_store.clone())
    }
}

impl BankAccountService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Every bank account, newest first.
    pub async fn get_all(&self) -> Result<Vec<BankAccount>, Error> {
        let params = FetchParams::new(select(&FIELDS)).order_by(OrderBy::descending("Id"));

        let records = self.store.fetch_records(TABLE, &params).await?;

        Ok(map_listing(TABLE, &records, map_record_to_account))
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<BankAccount, Error> {
        let params = FetchParams::new(select(&FIELDS));
        let record = self.store.get_record_by_id(TABLE, id, &params).await?;

        map_record_to_account(&record)
    }

    /// Create a bank account, returning it as stored.
    pub async fn create(&self, account: &BankAccountData) -> Result<BankAccount, Error> {
        let results = self
            .store
            .create_records(TABLE, vec![map_account_to_record(account)])
            .await?;

        map_record_to_account(&into_stored_record(results)?)
    }

    /// Replace the user editable fields of the account `id`, returning it as stored.
    pub async fn update(&self, id: RecordId, account: &BankAccountData) -> Result<BankAccount, Error> {
        let mut record = map_account_to_record(account);
        record.insert("Id".to_owned(), Value::from(id));

        let results = self.store.update_records(TABLE, vec![record]).await?;

        map_record_to_account(&into_stored_record(results)?)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), Error> {
        let results = self.store.delete_records(TABLE, &[id]).await?;

        ensure_all_succeeded(&results)
    }
}

fn map_account_to_record(account: &BankAccountData) -> Record {
    to_record(json!({
        "name_c": account.name,
        "account_number_c": account.account_number,
        "bank_name_c": account.bank_name,
        "balance_c": account.balance,
        "currency_c": account.currency.code(),
        "account_type_c": account.account_type.map(AccountType::label),
    }))
}

fn map_record_to_account(record: &Record) -> Result<BankAccount, Error> {
    Ok(BankAccount {
        id: record_id(record)?,
        name: record_text_or(record, "name_c", ""),
        account_number: record_text_or(record, "account_number_c", ""),
        bank_name: record_text_or(record, "bank_name_c", ""),
        balance: record_number(record, "balance_c").unwrap_or(0.0),
        currency: Currency::from_stored(record_text(record, "currency_c").as_deref()),
        account_type: record_text(record, "account_type_c")
            .and_then(|label| label.parse::<AccountType>().ok()),
    })
}
