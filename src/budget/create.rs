//! The page and endpoint for setting a budget.

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    budget::{
        budgets_page::BudgetsQuery,
        core::{BudgetForm, BudgetMonth},
        form::budget_form_view,
        service::BudgetService,
    },
    category::{Category, CategoryService},
    endpoints,
    form::{FieldErrors, FormTarget},
    html::form_page,
    timezone::local_today,
};

/// The state needed by the budget create and edit routes.
#[derive(Debug, Clone)]
pub struct BudgetFormState {
    pub budgets: BudgetService,
    pub categories: CategoryService,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budgets: BudgetService::from_ref(state),
            categories: CategoryService::from_ref(state),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl BudgetFormState {
    pub(super) async fn expense_categories(&self) -> Vec<Category> {
        self.categories
            .get_expense_categories()
            .await
            .inspect_err(|error| tracing::error!("could not load categories for form: {error}"))
            .unwrap_or_default()
    }
}

/// Where to send the browser after a budget for `month` is saved.
pub(super) fn budgets_redirect(month: BudgetMonth) -> Response {
    (
        HxRedirect(format!("{}?month={month}", endpoints::BUDGETS_VIEW)),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

fn create_target() -> FormTarget {
    FormTarget::Create(endpoints::BUDGETS_API.to_owned())
}

/// Renders the page for setting a budget. The month defaults to the one in
/// the query string, or the current month.
pub async fn get_new_budget_page(
    State(state): State<BudgetFormState>,
    Query(query): Query<BudgetsQuery>,
) -> Response {
    let month = match query.month.parse::<BudgetMonth>() {
        Ok(month) => month,
        Err(_) => match local_today(&state.local_timezone) {
            Ok(today) => BudgetMonth::from_date(today),
            Err(error) => return error.into_response(),
        },
    };

    let categories = state.expense_categories().await;
    let form = budget_form_view(
        &BudgetForm::new_budget(month),
        &FieldErrors::default(),
        &create_target(),
        &categories,
    );

    form_page("Add Budget", endpoints::NEW_BUDGET_VIEW, &form).into_response()
}

/// Validates and stores a new budget.
///
/// A second budget for the same category and month is answered with an
/// error alert.
pub async fn create_budget_endpoint(
    State(state): State<BudgetFormState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let budget = match form.validate() {
        Ok(budget) => budget,
        Err(errors) => {
            let categories = state.expense_categories().await;
            return budget_form_view(&form, &errors, &create_target(), &categories).into_response();
        }
    };

    match state.budgets.create(&budget).await {
        Ok(created) => {
            tracing::info!("created budget {} for {}", created.id, created.month);
            budgets_redirect(created.month)
        }
        Err(error) => {
            tracing::error!("could not create budget: {error}");
            error.into_alert_response()
        }
    }
}
