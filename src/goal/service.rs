//! Reads and writes savings goals in the `goal_c` table.

use std::sync::Arc;

use axum::extract::FromRef;
use serde_json::json;

use crate::{
    AppState, Error,
    goal::core::{Goal, GoalData, GoalProgress},
    records::{
        FetchParams, OrderBy, Record, RecordId, RecordStore, ensure_all_succeeded,
        into_stored_record, map_listing, record_date, record_id, record_number,
        record_text_or, select, to_record,
    },
};

const TABLE: &str = "goal_c";
const FIELDS: [&str; 4] = ["name_c", "target_amount_c", "current_amount_c", "deadline_c"];

/// The savings goal operations the route handlers use.
#[derive(Debug, Clone)]
pub struct GoalService {
    store: Arc<dyn RecordStore>,
}

impl FromRef<AppState> for GoalService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.record_store.clone())
    }
}

impl GoalService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Goal>, Error> {
        let params = FetchParams::new(select(&FIELDS)).order_by(OrderBy::ascending("Id"));

        let records = self.store.fetch_records(TABLE, &params).await?;

        Ok(map_listing(TABLE, &records, map_record_to_goal))
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<Goal, Error> {
        let record = self
            .store
            .get_record_by_id(TABLE, id, &FetchParams::new(select(&FIELDS)))
            .await?;

        map_record_to_goal(&record)
    }

    /// The goals that have not reached their target.
    pub async fn get_active_goals(&self) -> Result<Vec<Goal>, Error> {
        let mut goals = self.get_all().await?;
        goals.retain(|goal| !goal.is_completed());

        Ok(goals)
    }

    /// The goals that have reached their target.
    pub async fn get_completed_goals(&self) -> Result<Vec<Goal>, Error> {
        let mut goals = self.get_all().await?;
        goals.retain(Goal::is_completed);

        Ok(goals)
    }

    pub async fn create(&self, goal: &GoalData) -> Result<Goal, Error> {
        let results = self
            .store
            .create_records(TABLE, vec![map_goal_to_record(goal)])
            .await?;

        map_record_to_goal(&into_stored_record(results)?)
    }

    pub async fn update(&self, id: RecordId, goal: &GoalData) -> Result<Goal, Error> {
        let mut record = map_goal_to_record(goal);
        record.insert("Id".to_owned(), id.into());

        let results = self.store.update_records(TABLE, vec![record]).await?;

        map_record_to_goal(&into_stored_record(results)?)
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), Error> {
        let results = self.store.delete_records(TABLE, &[id]).await?;

        ensure_all_succeeded(&results)
    }

    /// Add `amount` to the goal's current amount and store the result.
    pub async fn add_funds(&self, id: RecordId, amount: f64) -> Result<Goal, Error> {
        let goal = self.get_by_id(id).await?;

        let mut data = GoalData::from(&goal);
        data.current_amount += amount;

        self.update(id, &data).await
    }

    pub async fn get_goal_progress(&self, id: RecordId) -> Result<GoalProgress, Error> {
        Ok(self.get_by_id(id).await?.progress())
    }
}

fn map_goal_to_record(goal: &GoalData) -> Record {
    let name = if goal.name.is_empty() {
        "Untitled Goal"
    } else {
        goal.name.as_str()
    };

    to_record(json!({
        "Name": name,
        "name_c": goal.name,
        "target_amount_c": goal.target_amount,
        "current_amount_c": goal.current_amount,
        "deadline_c": goal.deadline.map(|deadline| deadline.to_string()),
    }))
}

fn map_record_to_goal(record: &Record) -> Result<Goal, Error> {
    Ok(Goal {
        id: record_id(record)?,
        name: record_text_or(record, "name_c", "Untitled Goal"),
        target_amount: record_number(record, "target_amount_c").unwrap_or(0.0),
        current_amount: record_number(record, "current_amount_c").unwrap_or(0.0),
        deadline: record_date(record, "deadline_c"),
    })
}
