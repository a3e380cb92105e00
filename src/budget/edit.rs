//! The page and endpoint for changing a budget.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    budget::{
        core::BudgetForm,
        create::{BudgetFormState, budgets_redirect},
        form::budget_form_view,
    },
    endpoints::{self, format_endpoint},
    form::{FieldErrors, FormTarget},
    html::form_page,
    records::RecordId,
};

fn update_target(budget_id: RecordId) -> FormTarget {
    FormTarget::Update(format_endpoint(endpoints::BUDGET_API, budget_id))
}

pub async fn get_edit_budget_page(
    State(state): State<BudgetFormState>,
    Path(budget_id): Path<RecordId>,
) -> Response {
    let budget = match state.budgets.get_by_id(budget_id).await {
        Ok(budget) => budget,
        Err(error) => {
            tracing::error!("could not load budget {budget_id}: {error}");
            return error.into_response();
        }
    };

    let categories = state.expense_categories().await;
    let form = budget_form_view(
        &BudgetForm::from_budget(&budget),
        &FieldErrors::default(),
        &update_target(budget_id),
        &categories,
    );

    form_page("Edit Budget", endpoints::EDIT_BUDGET_VIEW, &form).into_response()
}

pub async fn update_budget_endpoint(
    State(state): State<BudgetFormState>,
    Path(budget_id): Path<RecordId>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let budget = match form.validate() {
        Ok(budget) => budget,
        Err(errors) => {
            let categories = state.expense_categories().await;
            return budget_form_view(&form, &errors, &update_target(budget_id), &categories)
                .into_response();
        }
    };

    match state.budgets.update(budget_id, &budget).await {
        Ok(updated) => budgets_redirect(updated.month),
        Err(error) => {
            tracing::error!("could not update budget {budget_id}: {error}");
            error.into_alert_response()
        }
    }
}
