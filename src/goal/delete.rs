use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, goal::service::GoalService, records::RecordId};

pub async fn delete_goal_endpoint(
    State(service): State<GoalService>,
    Path(goal_id): Path<RecordId>,
) -> Response {
    match service.delete(goal_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Goal deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not delete goal {goal_id}: {error}");
            error.into_alert_response()
        }
    }
}
