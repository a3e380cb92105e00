//! The page and endpoint for editing a category.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    category::{core::CategoryForm, form::category_form_view, service::CategoryService},
    endpoints::{self, format_endpoint},
    form::{FieldErrors, FormTarget},
    html::form_page,
    records::RecordId,
};

fn update_target(category_id: RecordId) -> FormTarget {
    FormTarget::Update(format_endpoint(endpoints::CATEGORY_API, category_id))
}

pub async fn get_edit_category_page(
    State(service): State<CategoryService>,
    Path(category_id): Path<RecordId>,
) -> Response {
    match service.get_by_id(category_id).await {
        Ok(category) => {
            let form = category_form_view(
                &CategoryForm::from_category(&category),
                &FieldErrors::default(),
                &update_target(category_id),
            );

            form_page("Edit Category", endpoints::EDIT_CATEGORY_VIEW, &form).into_response()
        }
        Err(error) => {
            tracing::error!("could not load category {category_id}: {error}");
            error.into_response()
        }
    }
}

pub async fn update_category_endpoint(
    State(service): State<CategoryService>,
    Path(category_id): Path<RecordId>,
    Form(form): Form<CategoryForm>,
) -> Response {
    let category = match form.validate() {
        Ok(category) => category,
        Err(errors) => {
            return category_form_view(&form, &errors, &update_target(category_id))
                .into_response();
        }
    };

    match service.update(category_id, &category).await {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not update category {category_id}: {error}");
            error.into_alert_response()
        }
    }
}
