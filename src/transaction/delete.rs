use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, records::RecordId, transaction::service::TransactionService};

/// Deletes a transaction and responds with an alert. The table row is
/// removed by htmx.
pub async fn delete_transaction_endpoint(
    State(service): State<TransactionService>,
    Path(transaction_id): Path<RecordId>,
) -> Response {
    match service.delete(transaction_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Transaction deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
