use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, budget::service::BudgetService, records::RecordId};

/// Deletes a budget. The card is removed by htmx when the alert comes back.
pub async fn delete_budget_endpoint(
    State(service): State<BudgetService>,
    Path(budget_id): Path<RecordId>,
) -> Response {
    match service.delete(budget_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Budget deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not delete budget {budget_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use serde_json::json;

    use crate::{
        budget::{delete::delete_budget_endpoint, service::BudgetService},
        records::InMemoryRecordStore,
        test_utils::{must_get_alert_message, parse_html_fragment},
    };

    #[tokio::test]
    async fn deletes_budget() {
        let store = Arc::new(InMemoryRecordStore::default());
        let id = store.insert("budget_c", json!({"amount_c": 10, "month_c": "2026-10"}));

        let response =
            delete_budget_endpoint(State(BudgetService::new(store.clone())), Path(id)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_eq!(must_get_alert_message(&html), "Budget deleted successfully");
        assert_eq!(store.count("budget_c"), 0);
    }

    #[tokio::test]
    async fn missing_budget_is_rejected() {
        let store = Arc::new(InMemoryRecordStore::default());

        let response = delete_budget_endpoint(State(BudgetService::new(store)), Path(8)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
