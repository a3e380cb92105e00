//! The page and endpoint for adding a savings goal.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    endpoints,
    form::{FieldErrors, FormTarget},
    goal::{core::GoalForm, form::goal_form_view, service::GoalService},
    html::form_page,
};

/// Renders the page for adding a savings goal.
pub async fn get_new_goal_page() -> Response {
    let form = goal_form_view(
        &GoalForm::default(),
        &FieldErrors::default(),
        &FormTarget::Create(endpoints::GOALS_API.to_owned()),
    );

    form_page("Add Savings Goal", endpoints::NEW_GOAL_VIEW, &form).into_response()
}

pub async fn create_goal_endpoint(
    State(service): State<GoalService>,
    Form(form): Form<GoalForm>,
) -> Response {
    let goal = match form.validate() {
        Ok(goal) => goal,
        Err(errors) => {
            let target = FormTarget::Create(endpoints::GOALS_API.to_owned());
            return goal_form_view(&form, &errors, &target).into_response();
        }
    };

    match service.create(&goal).await {
        Ok(goal) => {
            tracing::info!("created goal {}", goal.id);

            (
                HxRedirect(endpoints::GOALS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not create goal: {error}");
            error.into_alert_response()
        }
    }
}
