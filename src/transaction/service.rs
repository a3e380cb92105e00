//! Reads and writes transactions in the `transaction_c` table.

use std::sync::Arc;

use axum::extract::FromRef;
use serde_json::json;
use time::Date;

use crate::{
    AppState, Error,
    records::{
        FetchParams, FieldSelection, Filter, OrderBy, Record, RecordId, RecordStore,
        ensure_all_succeeded, into_stored_record, map_listing, record_date, record_id,
        record_lookup, record_number, record_text, to_record,
    },
    transaction::core::{Transaction, TransactionData, TransactionFilter, TransactionType},
};

const TABLE: &str = "transaction_c";

fn fields() -> Vec<FieldSelection> {
    vec![
        FieldSelection::new("amount_c"),
        FieldSelection::lookup("category_c", "name_c"),
        FieldSelection::new("date_c"),
        FieldSelection::new("description_c"),
        FieldSelection::new("notes_c"),
        FieldSelection::new("type_c"),
    ]
}

/// The transaction operations the route handlers use.
///
/// Every listing is ordered by date, most recent first.
#[derive(Debug, Clone)]
pub struct TransactionService {
    store: Arc<dyn RecordStore>,
}

impl FromRef<AppState> for TransactionService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.record_store.clone())
    }
}

impl TransactionService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.get_filtered(&TransactionFilter::default()).await
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Transaction, Error> {
        let record = self
            .store
            .get_record_by_id(TABLE, id, &FetchParams::new(fields()))
            .await?;

        map_record_to_transaction(&record)
    }

    /// The transactions dated from `start` to `end`, including both.
    pub async fn get_by_date_range(&self, start: Date, end: Date) -> Result<Vec<Transaction>, Error> {
        self.get_filtered(&TransactionFilter {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        })
        .await
    }

    pub async fn get_by_category(&self, category_id: RecordId) -> Result<Vec<Transaction>, Error> {
        self.get_filtered(&TransactionFilter {
            category_id: Some(category_id),
            ..Default::default()
        })
        .await
    }

    pub async fn get_by_type(
        &self,
        transaction_type: TransactionType,
    ) -> Result<Vec<Transaction>, Error> {
        self.get_filtered(&TransactionFilter {
            transaction_type: Some(transaction_type),
            ..Default::default()
        })
        .await
    }

    /// The transactions matching every filter that is set in `filter`.
    pub async fn get_filtered(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error> {
        let mut params = FetchParams::new(fields());

        if let Some(start_date) = filter.start_date {
            params = params.filter(Filter::at_least("date_c", start_date.to_string()));
        }

        if let Some(end_date) = filter.end_date {
            params = params.filter(Filter::at_most("date_c", end_date.to_string()));
        }

        if let Some(category_id) = filter.category_id {
            params = params.filter(Filter::equal_to("category_c", category_id));
        }

        if let Some(transaction_type) = filter.transaction_type {
            params = params.filter(Filter::equal_to("type_c", transaction_type.as_str()));
        }

        let params = params
            .order_by(OrderBy::descending("date_c"))
            .order_by(OrderBy::descending("Id"));

        let records = self.store.fetch_records(TABLE, &params).await?;

        Ok(map_listing(TABLE, &records, map_record_to_transaction))
    }

    pub async fn create(&self, transaction: &TransactionData) -> Result<Transaction, Error> {
        let results = self
            .store
            .create_records(TABLE, vec![map_transaction_to_record(transaction)])
            .await?;

        map_record_to_transaction(&into_stored_record(results)?)
    }

    pub async fn update(
        &self,
        id: RecordId,
        transaction: &TransactionData,
    ) -> Result<Transaction, Error> {
        let mut record = map_transaction_to_record(transaction);
        record.insert("Id".to_owned(), id.into());

        let results = self.store.update_records(TABLE, vec![record]).await?;

        map_record_to_transaction(&into_stored_record(results)?)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), Error> {
        let results = self.store.delete_records(TABLE, &[id]).await?;

        ensure_all_succeeded(&results)
    }
}

/// Blank description, notes and category are sent as `null`.
fn map_transaction_to_record(transaction: &TransactionData) -> Record {
    to_record(json!({
        "category_c": transaction.category_id,
        "type_c": transaction.transaction_type.as_str(),
        "amount_c": transaction.amount,
        "date_c": transaction.date.to_string(),
        "description_c": transaction.description,
        "notes_c": transaction.notes,
    }))
}

fn map_record_to_transaction(record: &Record) -> Result<Transaction, Error> {
    let date =
        record_date(record, "date_c").ok_or_else(|| Error::MalformedRecord("date_c".to_owned()))?;

    Ok(Transaction {
        id: record_id(record)?,
        amount: record_number(record, "amount_c").unwrap_or(0.0),
        category: record_lookup(record, "category_c"),
        date,
        description: record_text(record, "description_c").filter(|text| !text.is_empty()),
        notes: record_text(record, "notes_c").filter(|text| !text.is_empty()),
        transaction_type: record_text(record, "type_c")
            .and_then(|text| text.parse().ok())
            .unwrap_or(TransactionType::Expense),
    })
}
