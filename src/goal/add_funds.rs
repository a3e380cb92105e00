//! Putting money towards a goal from its card.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    endpoints,
    goal::{core::AddFundsForm, form::add_funds_form_view, service::GoalService},
    records::RecordId,
};

/// Adds the submitted amount to the goal and reloads the goals page, since
/// the goal may have moved to the completed section.
pub async fn add_funds_endpoint(
    State(service): State<GoalService>,
    Path(goal_id): Path<RecordId>,
    Form(form): Form<AddFundsForm>,
) -> Response {
    let amount = match form.validate() {
        Ok(amount) => amount,
        Err(errors) => return add_funds_form_view(goal_id, &form, &errors).into_response(),
    };

    match service.add_funds(goal_id, amount).await {
        Ok(goal) => {
            tracing::info!("added {amount} to goal {goal_id}, now {}", goal.current_amount);

            (
                HxRedirect(endpoints::GOALS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not add funds to goal {goal_id}: {error}");
            error.into_alert_response()
        }
    }
}
