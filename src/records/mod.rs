//! The gateway to the remote record store.
//!
//! The record store is a low-code data store addressed by table name and
//! numeric record `Id`. Custom columns carry the `_c` suffix and every
//! record also has the system columns `Id` and `Name`. The services for each
//! table talk to the store through the [RecordStore] trait so that they can
//! be tested against an in-memory double.

mod fields;
mod http;
#[cfg(test)]
mod memory;
mod query;
mod response;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::Error;

pub use fields::{
    Lookup, record_date, record_id, record_lookup, record_number, record_text, record_text_or,
};
pub use http::{HttpRecordStore, RecordApiConfig};
#[cfg(test)]
pub use memory::InMemoryRecordStore;
pub use query::{FetchParams, FieldSelection, Filter, OrderBy, select};
pub use response::MutationResult;

/// The numeric ID the record store assigns to every record.
pub type RecordId = i64;

/// A raw record: a JSON object of field name to value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The five operations the record store offers against a named table.
#[async_trait]
pub trait RecordStore: Debug + Send + Sync {
    /// Fetch the records in `table` matching `params`.
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> Result<Vec<Record>, Error>;

    /// Fetch a single record.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no record with `id` in `table`.
    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        params: &FetchParams,
    ) -> Result<Record, Error>;

    /// Create `records` in `table`, returning one result per record.
    async fn create_records(
        &self,
        table: &str,
        records: Vec<Record>,
    ) -> Result<Vec<MutationResult>, Error>;

    /// Update `records` in `table`. Each record must carry its `Id`.
    async fn update_records(
        &self,
        table: &str,
        records: Vec<Record>,
    ) -> Result<Vec<MutationResult>, Error>;

    /// Delete the records with `ids` from `table`.
    async fn delete_records(
        &self,
        table: &str,
        ids: &[RecordId],
    ) -> Result<Vec<MutationResult>, Error>;
}

/// Convert a `json!` object literal into a [Record]. Other JSON values give an empty record.
pub fn to_record(fields: serde_json::Value) -> Record {
    match fields {
        serde_json::Value::Object(record) => record,
        _ => Record::new(),
    }
}

/// Map every record of a listing, skipping the records that `map` rejects.
///
/// Each skipped record is logged as a warning with its `Id` when it has one.
pub fn map_listing<T>(
    table: &str,
    records: &[Record],
    map: impl Fn(&Record) -> Result<T, Error>,
) -> Vec<T> {
    records
        .iter()
        .filter_map(|record| {
            map(record)
                .inspect_err(|error| {
                    tracing::warn!(
                        "skipping record {:?} in {table}: {error}",
                        record.get("Id")
                    );
                })
                .ok()
        })
        .collect()
}

/// Check that every per-record result of a mutation succeeded.
///
/// # Errors
/// Returns [Error::RecordsRejected] listing the field errors and messages of
/// every failed result.
pub fn ensure_all_succeeded(results: &[MutationResult]) -> Result<(), Error> {
    let rejections: Vec<String> = results
        .iter()
        .filter(|result| !result.success)
        .flat_map(MutationResult::failure_messages)
        .collect();

    if results.iter().any(|result| !result.success) {
        tracing::error!("record store rejected a change: {rejections:?}");
        return Err(Error::RecordsRejected(rejections));
    }

    Ok(())
}

/// Get the stored record from the results of a single-record create or update.
///
/// # Errors
/// Returns [Error::RecordsRejected] if any result failed, or
/// [Error::MissingMutationResult] if the store did not echo the record back.
pub fn into_stored_record(results: Vec<MutationResult>) -> Result<Record, Error> {
    ensure_all_succeeded(&results)?;

    results
        .into_iter()
        .find_map(|result| result.data)
        .ok_or(Error::MissingMutationResult)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        Error,
        records::{
            MutationResult, ensure_all_succeeded, into_stored_record, map_listing, record_id,
            response::FieldError, to_record,
        },
    };

    fn succeeded(data: serde_json::Value) -> MutationResult {
        MutationResult {
            success: true,
            data: data.as_object().cloned(),
            message: None,
            errors: Vec::new(),
        }
    }

    #[test]
    fn stored_record_is_first_result_data() {
        let results = vec![succeeded(json!({"Id": 7, "name_c": "Savings"}))];

        let record = into_stored_record(results).expect("Could not get stored record");

        assert_eq!(record.get("Id"), Some(&json!(7)));
    }

    #[test]
    fn any_failed_result_rejects_the_whole_mutation() {
        let results = vec![
            succeeded(json!({"Id": 1})),
            MutationResult {
                success: false,
                data: None,
                message: Some("Invalid record".to_owned()),
                errors: vec![FieldError {
                    field_label: "Balance".to_owned(),
                    message: "must be a number".to_owned(),
                }],
            },
        ];

        let error = into_stored_record(results).expect_err("Want a rejection");

        assert_eq!(
            error,
            Error::RecordsRejected(vec![
                "Balance: must be a number".to_owned(),
                "Invalid record".to_owned(),
            ])
        );
    }

    #[test]
    fn success_without_data_is_an_error() {
        let results = vec![MutationResult {
            success: true,
            data: None,
            message: None,
            errors: Vec::new(),
        }];

        assert_eq!(into_stored_record(results), Err(Error::MissingMutationResult));
    }

    #[test]
    fn empty_results_are_all_succeeded() {
        assert_eq!(ensure_all_succeeded(&[]), Ok(()));
    }

    #[test]
    fn map_listing_skips_rejected_records() {
        let records = [
            to_record(json!({"Id": 1})),
            to_record(json!({"Name": "no id"})),
            to_record(json!({"Id": 3})),
        ];

        let ids = map_listing("t", &records, record_id);

        assert_eq!(ids, [1, 3]);
    }
}
