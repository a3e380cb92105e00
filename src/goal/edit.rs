//! The page and endpoint for editing a savings goal.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    endpoints::{self, format_endpoint},
    form::{FieldErrors, FormTarget},
    goal::{core::GoalForm, form::goal_form_view, service::GoalService},
    html::form_page,
    records::RecordId,
};

pub async fn get_edit_goal_page(
    State(service): State<GoalService>,
    Path(goal_id): Path<RecordId>,
) -> Response {
    let goal = match service.get_by_id(goal_id).await {
        Ok(goal) => goal,
        Err(error) => {
            tracing::error!("could not load goal {goal_id}: {error}");
            return error.into_response();
        }
    };

    let form = goal_form_view(
        &GoalForm::from_goal(&goal),
        &FieldErrors::default(),
        &FormTarget::Update(format_endpoint(endpoints::GOAL_API, goal_id)),
    );

    form_page("Edit Savings Goal", endpoints::EDIT_GOAL_VIEW, &form).into_response()
}

pub async fn update_goal_endpoint(
    State(service): State<GoalService>,
    Path(goal_id): Path<RecordId>,
    Form(form): Form<GoalForm>,
) -> Response {
    let goal = match form.validate() {
        Ok(goal) => goal,
        Err(errors) => {
            let target = FormTarget::Update(format_endpoint(endpoints::GOAL_API, goal_id));
            return goal_form_view(&form, &errors, &target).into_response();
        }
    };

    match service.update(goal_id, &goal).await {
        Ok(_) => (
            HxRedirect(endpoints::GOALS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not update goal {goal_id}: {error}");
            error.into_alert_response()
        }
    }
}
