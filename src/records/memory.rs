//! An in-memory [RecordStore] for tests.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};

use async_trait::async_trait;
use serde_json::Value;

use super::{
    FetchParams, Filter, MutationResult, Record, RecordId, RecordStore,
    query::{Operator, SortType},
    record_id,
    response::FieldError,
};
use crate::Error;

#[derive(Debug, Default)]
struct Tables {
    records: HashMap<String, BTreeMap<RecordId, Record>>,
    next_id: RecordId,
    failure: Option<String>,
    rejection: Option<FieldError>,
}

/// Stores records per table in memory and applies filters and ordering the
/// way the record API does.
///
/// Fetches return every stored field rather than only the selected ones.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: Mutex<Tables>,
}

impl InMemoryRecordStore {
    /// Store `record` in `table` as-is, assigning the next ID.
    pub fn insert(&self, table: &str, record: Value) -> RecordId {
        let mut record = match record {
            Value::Object(record) => record,
            _ => panic!("Test records must be JSON objects"),
        };

        let mut tables = self.tables.lock().unwrap();
        tables.next_id += 1;
        let id = tables.next_id;
        record.insert("Id".to_owned(), Value::from(id));
        tables
            .records
            .entry(table.to_owned())
            .or_default()
            .insert(id, record);

        id
    }

    /// Get a stored record without going through the trait.
    pub fn get(&self, table: &str, id: RecordId) -> Option<Record> {
        self.tables
            .lock()
            .unwrap()
            .records
            .get(table)
            .and_then(|records| records.get(&id))
            .cloned()
    }

    /// The number of records stored in `table`.
    pub fn count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .records
            .get(table)
            .map_or(0, BTreeMap::len)
    }

    /// Make every following request fail as if the envelope reported `success: false`.
    pub fn fail_requests(&self, message: &str) {
        self.tables.lock().unwrap().failure = Some(message.to_owned());
    }

    /// Make every following mutation come back with a failed result carrying `field_error`.
    pub fn reject_mutations(&self, field_label: &str, message: &str) {
        self.tables.lock().unwrap().rejection = Some(FieldError {
            field_label: field_label.to_owned(),
            message: message.to_owned(),
        });
    }

    fn check_failure(tables: &Tables) -> Result<(), Error> {
        match &tables.failure {
            Some(message) => Err(Error::RecordApiFailure(message.clone())),
            None => Ok(()),
        }
    }

    fn rejected(tables: &Tables) -> Option<MutationResult> {
        tables.rejection.as_ref().map(|error| MutationResult {
            success: false,
            data: None,
            message: Some("Record could not be saved".to_owned()),
            errors: vec![error.clone()],
        })
    }
}

fn not_found_result() -> MutationResult {
    MutationResult {
        success: false,
        data: None,
        message: Some("Record does not exist".to_owned()),
        errors: Vec::new(),
    }
}

fn stored_result(record: Record) -> MutationResult {
    MutationResult {
        success: true,
        data: Some(record),
        message: None,
        errors: Vec::new(),
    }
}

/// Compare a stored value with a filter or another stored value.
///
/// Lookups compare by their `Id` and numeric text compares as a number. A
/// date-time compared with a bare date compares on the date alone.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    let as_number = |value: &Value| match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.parse::<f64>().ok(),
        Value::Object(object) => object.get("Id").and_then(Value::as_f64),
        _ => None,
    };

    match (left, right) {
        (Value::String(left), Value::String(right)) => {
            if is_bare_date(left) != is_bare_date(right) {
                if let (Some(left), Some(right)) = (date_part(left), date_part(right)) {
                    return Some(left.cmp(right));
                }
            }

            Some(left.cmp(right))
        }
        _ => as_number(left)?.partial_cmp(&as_number(right)?),
    }
}

/// The `YYYY-MM-DD` at the start of `text`, if it starts with one.
fn date_part(text: &str) -> Option<&str> {
    let date = text.get(..10)?;
    let bytes = date.as_bytes();
    let is_date = bytes.iter().enumerate().all(|(index, byte)| match index {
        4 | 7 => *byte == b'-',
        _ => byte.is_ascii_digit(),
    });

    is_date.then_some(date)
}

fn is_bare_date(text: &str) -> bool {
    text.len() == 10 && date_part(text).is_some()
}

fn matches(record: &Record, filter: &Filter) -> bool {
    let Some(value) = record.get(&filter.field_name) else {
        return false;
    };

    filter.values.iter().any(|wanted| {
        let ordering = compare(value, wanted);
        match filter.operator {
            Operator::EqualTo => ordering == Some(Ordering::Equal),
            Operator::GreaterThanOrEqualTo => {
                matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
            }
            Operator::LessThanOrEqualTo => {
                matches!(ordering, Some(Ordering::Less | Ordering::Equal))
            }
        }
    })
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> Result<Vec<Record>, Error> {
        let tables = self.tables.lock().unwrap();
        Self::check_failure(&tables)?;

        let mut records: Vec<Record> = tables
            .records
            .get(table)
            .into_iter()
            .flat_map(BTreeMap::values)
            .filter(|record| params.filters.iter().all(|filter| matches(record, filter)))
            .cloned()
            .collect();

        records.sort_by(|left, right| {
            params
                .order_by
                .iter()
                .map(|order_by| {
                    let ordering = match (left.get(&order_by.field_name), right.get(&order_by.field_name)) {
                        (Some(left), Some(right)) => compare(left, right).unwrap_or(Ordering::Equal),
                        (Some(_), None) => Ordering::Less,
                        (None, Some(_)) => Ordering::Greater,
                        (None, None) => Ordering::Equal,
                    };

                    match order_by.sort_type {
                        SortType::Asc => ordering,
                        SortType::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        Ok(records)
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        _params: &FetchParams,
    ) -> Result<Record, Error> {
        let tables = self.tables.lock().unwrap();
        Self::check_failure(&tables)?;

        tables
            .records
            .get(table)
            .and_then(|records| records.get(&id))
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn create_records(
        &self,
        table: &str,
        records: Vec<Record>,
    ) -> Result<Vec<MutationResult>, Error> {
        {
            let tables = self.tables.lock().unwrap();
            Self::check_failure(&tables)?;
            if let Some(rejection) = Self::rejected(&tables) {
                return Ok(vec![rejection; records.len()]);
            }
        }

        let results = records
            .into_iter()
            .map(|record| {
                let id = self.insert(table, Value::Object(record));
                stored_result(self.get(table, id).unwrap_or_default())
            })
            .collect();

        Ok(results)
    }

    async fn update_records(
        &self,
        table: &str,
        records: Vec<Record>,
    ) -> Result<Vec<MutationResult>, Error> {
        let mut tables = self.tables.lock().unwrap();
        Self::check_failure(&tables)?;
        if let Some(rejection) = Self::rejected(&tables) {
            return Ok(vec![rejection; records.len()]);
        }

        let table = tables.records.entry(table.to_owned()).or_default();
        let results = records
            .into_iter()
            .map(|update| {
                let Some(stored) = record_id(&update)
                    .ok()
                    .and_then(|id| table.get_mut(&id))
                else {
                    return not_found_result();
                };

                stored.extend(update);
                stored_result(stored.clone())
            })
            .collect();

        Ok(results)
    }

    async fn delete_records(
        &self,
        table: &str,
        ids: &[RecordId],
    ) -> Result<Vec<MutationResult>, Error> {
        let mut tables = self.tables.lock().unwrap();
        Self::check_failure(&tables)?;

        let table = tables.records.entry(table.to_owned()).or_default();
        let results = ids
            .iter()
            .map(|id| match table.remove(id) {
                Some(_) => MutationResult {
                    success: true,
                    data: None,
                    message: None,
                    errors: Vec::new(),
                },
                None => not_found_result(),
            })
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::InMemoryRecordStore;
    use crate::records::{FetchParams, Filter, OrderBy, RecordStore, record_id};

    #[tokio::test]
    async fn filters_combine_and_order_applies() {
        let store = InMemoryRecordStore::default();
        store.insert("t", json!({"date_c": "2024-01-05", "type_c": "expense"}));
        store.insert("t", json!({"date_c": "2024-01-20", "type_c": "expense"}));
        store.insert("t", json!({"date_c": "2024-01-10", "type_c": "income"}));
        store.insert("t", json!({"date_c": "2024-02-01", "type_c": "expense"}));

        let params = FetchParams::default()
            .filter(Filter::at_least("date_c", "2024-01-01"))
            .filter(Filter::at_most("date_c", "2024-01-31"))
            .filter(Filter::equal_to("type_c", "expense"))
            .order_by(OrderBy::descending("date_c"));
        let records = store.fetch_records("t", &params).await.unwrap();

        let ids = records
            .iter()
            .map(|record| record_id(record).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(ids, [2, 1]);
    }

    #[tokio::test]
    async fn date_times_match_date_filters_on_their_day() {
        let store = InMemoryRecordStore::default();
        store.insert("t", json!({"date_c": "2026-10-15T09:30:00"}));
        store.insert("t", json!({"date_c": "2026-10-16T00:00:00"}));
        store.insert("t", json!({"date_c": "2026-10-14"}));

        let params = FetchParams::default()
            .filter(Filter::at_least("date_c", "2026-10-15"))
            .filter(Filter::at_most("date_c", "2026-10-15"));
        let records = store.fetch_records("t", &params).await.unwrap();

        let ids = records
            .iter()
            .map(|record| record_id(record).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(ids, [1]);
    }

    #[tokio::test]
    async fn lookup_objects_match_on_id() {
        let store = InMemoryRecordStore::default();
        store.insert("t", json!({"category_c": {"Id": 3, "Name": "Food"}}));
        store.insert("t", json!({"category_c": 4}));

        let params = FetchParams::default().filter(Filter::equal_to("category_c", 3));
        let records = store.fetch_records("t", &params).await.unwrap();

        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn update_merges_and_delete_reports_missing() {
        let store = InMemoryRecordStore::default();
        let id = store.insert("t", json!({"name_c": "Old", "amount_c": 1}));

        let update = json!({"Id": id, "name_c": "New"}).as_object().cloned().unwrap();
        let results = store.update_records("t", vec![update]).await.unwrap();
        assert!(results[0].success);
        let stored = store.get("t", id).unwrap();
        assert_eq!(stored["name_c"], json!("New"));
        assert_eq!(stored["amount_c"], json!(1));

        let results = store.delete_records("t", &[id, 99]).await.unwrap();
        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(store.count("t"), 0);
    }
}
