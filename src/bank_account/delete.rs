//! Defines the endpoint for deleting a bank account.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, bank_account::service::BankAccountService, records::RecordId};

/// A route handler for deleting a bank account, responds with an alert.
///
/// The status code has to be 200 OK or htmx will not remove the card.
pub async fn delete_bank_account_endpoint(
    State(service): State<BankAccountService>,
    Path(account_id): Path<RecordId>,
) -> Response {
    match service.delete(account_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Bank account deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not delete bank account {account_id}: {error}");
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
        bank_account::{delete::delete_bank_account_endpoint, service::BankAccountService},
        records::InMemoryRecordStore,
        test_utils::{must_get_alert_message, parse_html_fragment},
    };

    #[tokio::test]
    async fn deletes_account() {
        let store = Arc::new(InMemoryRecordStore::default());
        let id = store.insert("bank_account_c", json!({"name_c": "Old"}));

        let response =
            delete_bank_account_endpoint(State(BankAccountService::new(store.clone())), Path(id))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_eq!(
            must_get_alert_message(&html),
            "Bank account deleted successfully"
        );
        assert_eq!(store.count("bank_account_c"), 0);
    }

    #[tokio::test]
    async fn store_failure_shows_error_alert() {
        let store = Arc::new(InMemoryRecordStore::default());
        store.fail_requests("maintenance");

        let response =
            delete_bank_account_endpoint(State(BankAccountService::new(store)), Path(1)).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = parse_html_fragment(response).await;
        assert_eq!(
            must_get_alert_message(&html),
            "The record store reported an error"
        );
    }
}
