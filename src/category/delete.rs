use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, category::service::CategoryService, records::RecordId};

/// Deletes a category and responds with an alert.
pub async fn delete_category_endpoint(
    State(service): State<CategoryService>,
    Path(category_id): Path<RecordId>,
) -> Response {
    match service.delete(category_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Category deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not delete category {category_id}: {error}");
            error.into_alert_response()
        }
    }
}
