//! The page and endpoint for adding a category.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    category::{core::CategoryForm, form::category_form_view, service::CategoryService},
    endpoints,
    form::{FieldErrors, FormTarget},
    html::form_page,
};

fn create_target() -> FormTarget {
    FormTarget::Create(endpoints::CATEGORIES_API.to_owned())
}

/// Renders the page for adding a category.
pub async fn get_new_category_page() -> Response {
    let form = category_form_view(
        &CategoryForm::new_category(),
        &FieldErrors::default(),
        &create_target(),
    );

    form_page("Add Category", endpoints::NEW_CATEGORY_VIEW, &form).into_response()
}

/// Validates and stores a new category, then redirects to the categories page.
pub async fn create_category_endpoint(
    State(service): State<CategoryService>,
    Form(form): Form<CategoryForm>,
) -> Response {
    let category = match form.validate() {
        Ok(category) => category,
        Err(errors) => return category_form_view(&form, &errors, &create_target()).into_response(),
    };

    match service.create(&category).await {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not create category: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Form, extract::State};
    use serde_json::json;

    use crate::{
        category::{
            core::CategoryForm,
            create::{create_category_endpoint, get_new_category_page},
            service::CategoryService,
        },
        endpoints,
        records::InMemoryRecordStore,
        test_utils::{
            assert_field_error, assert_form_input, assert_hx_endpoint, assert_hx_redirect,
            assert_status_ok, assert_valid_html, must_get_form, parse_html_document,
            parse_html_fragment,
        },
    };

    #[tokio::test]
    async fn render_page() {
        let response = get_new_category_page().await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::CATEGORIES_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "type", "radio");
    }

    #[tokio::test]
    async fn creates_category() {
        let store = Arc::new(InMemoryRecordStore::default());
        let form = CategoryForm {
            name: "Salary".to_owned(),
            category_type: "income".to_owned(),
            color: "#10B981".to_owned(),
            icon: "Briefcase".to_owned(),
        };

        let response =
            create_category_endpoint(State(CategoryService::new(store.clone())), Form(form)).await;

        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);
        let stored = store.get("category_c", 1).expect("Category not stored");
        assert_eq!(stored["type_c"], json!("income"));
        assert_eq!(stored["color_c"], json!("#10B981"));
    }

    #[tokio::test]
    async fn missing_type_is_rejected() {
        let store = Arc::new(InMemoryRecordStore::default());
        let form = CategoryForm {
            name: "Salary".to_owned(),
            ..Default::default()
        };

        let response =
            create_category_endpoint(State(CategoryService::new(store.clone())), Form(form)).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_field_error(&must_get_form(&html), "type", "Category type is required");
        assert_eq!(store.count("category_c"), 0);
    }
}
