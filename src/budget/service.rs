//! Reads and writes budgets in the `budget_c` table.

use std::sync::Arc;

use axum::extract::FromRef;
use serde_json::json;

use crate::{
    AppState, Error,
    budget::core::{Budget, BudgetData, BudgetMonth},
    records::{
        FetchParams, FieldSelection, Filter, OrderBy, Record, RecordId, RecordStore,
        ensure_all_succeeded, into_stored_record, map_listing, record_id, record_lookup,
        record_number, record_text, to_record,
    },
};

const TABLE: &str = "budget_c";

fn fields() -> Vec<FieldSelection> {
    vec![
        FieldSelection::new("amount_c"),
        FieldSelection::new("month_c"),
        FieldSelection::lookup("category_id_c", "name_c"),
    ]
}

/// The budget operations the route handlers use.
#[derive(Debug, Clone)]
pub struct BudgetService {
    store: Arc<dyn RecordStore>,
}

impl FromRef<AppState> for BudgetService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.record_store.clone())
    }
}

impl BudgetService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Every budget, latest month first.
    pub async fn get_all(&self) -> Result<Vec<Budget>, Error> {
        self.fetch(FetchParams::new(fields())).await
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Budget, Error> {
        let record = self
            .store
            .get_record_by_id(TABLE, id, &FetchParams::new(fields()))
            .await?;

        map_record_to_budget(&record)
    }

    pub async fn get_by_month(&self, month: BudgetMonth) -> Result<Vec<Budget>, Error> {
        let params =
            FetchParams::new(fields()).filter(Filter::equal_to("month_c", month.to_string()));

        self.fetch(params).await
    }

    pub async fn get_by_category(&self, category_id: RecordId) -> Result<Vec<Budget>, Error> {
        let params =
            FetchParams::new(fields()).filter(Filter::equal_to("category_id_c", category_id));

        self.fetch(params).await
    }

    /// The budget for `category_id` in `month`, if there is one.
    pub async fn get_by_category_and_month(
        &self,
        category_id: RecordId,
        month: BudgetMonth,
    ) -> Result<Option<Budget>, Error> {
        let params = FetchParams::new(fields())
            .filter(Filter::equal_to("category_id_c", category_id))
            .filter(Filter::equal_to("month_c", month.to_string()));

        Ok(self.fetch(params).await?.into_iter().next())
    }

    /// Create a budget.
    ///
    /// # Errors
    /// Returns [Error::DuplicateBudget] if the category already has a budget for the month.
    pub async fn create(&self, budget: &BudgetData) -> Result<Budget, Error> {
        self.ensure_unique(None, budget).await?;

        let results = self
            .store
            .create_records(TABLE, vec![map_budget_to_record(budget)])
            .await?;

        map_record_to_budget(&into_stored_record(results)?)
    }

    /// Update the budget `id`.
    ///
    /// # Errors
    /// Returns [Error::DuplicateBudget] if another budget already covers the
    /// new category and month.
    pub async fn update(&self, id: RecordId, budget: &BudgetData) -> Result<Budget, Error> {
        self.ensure_unique(Some(id), budget).await?;

        let mut record = map_budget_to_record(budget);
        record.insert("Id".to_owned(), id.into());

        let results = self.store.update_records(TABLE, vec![record]).await?;

        map_record_to_budget(&into_stored_record(results)?)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), Error> {
        let results = self.store.delete_records(TABLE, &[id]).await?;

        ensure_all_succeeded(&results)
    }

    /// The budget `id` with its spent amount set to `spent`. Nothing is written.
    pub async fn update_spent_amount(&self, id: RecordId, spent: f64) -> Result<Budget, Error> {
        let budget = self.get_by_id(id).await?;

        Ok(Budget { spent, ..budget })
    }

    async fn ensure_unique(&self, id: Option<RecordId>, budget: &BudgetData) -> Result<(), Error> {
        let existing = self
            .get_by_category_and_month(budget.category_id, budget.month)
            .await?;

        match existing {
            Some(existing) if Some(existing.id) != id => Err(Error::DuplicateBudget {
                category_id: budget.category_id,
                month: budget.month.to_string(),
            }),
            _ => Ok(()),
        }
    }

    async fn fetch(&self, params: FetchParams) -> Result<Vec<Budget>, Error> {
        let params = params
            .order_by(OrderBy::descending("month_c"))
            .order_by(OrderBy::ascending("Id"));

        let records = self.store.fetch_records(TABLE, &params).await?;

        Ok(map_listing(TABLE, &records, map_record_to_budget))
    }
}

fn map_budget_to_record(budget: &BudgetData) -> Record {
    to_record(json!({
        "Name": format!("Budget - {}", budget.month),
        "amount_c": budget.amount,
        "month_c": budget.month.to_string(),
        "category_id_c": budget.category_id,
    }))
}

fn map_record_to_budget(record: &Record) -> Result<Budget, Error> {
    let month = record_text(record, "month_c")
        .and_then(|month| month.parse::<BudgetMonth>().ok())
        .ok_or_else(|| Error::MalformedRecord("month_c".to_owned()))?;
    let category = record_lookup(record, "category_id_c");

    Ok(Budget {
        id: record_id(record)?,
        amount: record_number(record, "amount_c").unwrap_or(0.0),
        month,
        category_id: category.as_ref().map(|category| category.id),
        category_name: category.and_then(|category| category.name),
        spent: 0.0,
    })
}
