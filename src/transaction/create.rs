//! The page and endpoint for recording a transaction.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    category::{Category, CategoryService},
    endpoints,
    form::{FieldErrors, FormTarget},
    html::form_page,
    timezone::local_today,
    transaction::{core::TransactionForm, form::transaction_form_view, service::TransactionService},
};

/// The state needed by the transaction create and edit routes.
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    pub transactions: TransactionService,
    pub categories: CategoryService,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: TransactionService::from_ref(state),
            categories: CategoryService::from_ref(state),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl TransactionFormState {
    /// The categories for the category select. The form still works without them.
    pub(super) async fn categories_for_form(&self) -> Vec<Category> {
        self.categories
            .get_all()
            .await
            .inspect_err(|error| tracing::error!("could not load categories for form: {error}"))
            .unwrap_or_default()
    }
}

fn create_target() -> FormTarget {
    FormTarget::Create(endpoints::TRANSACTIONS_API.to_owned())
}

/// Renders the page for recording a transaction, dated today.
pub async fn get_new_transaction_page(State(state): State<TransactionFormState>) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    let categories = state.categories_for_form().await;
    let form = transaction_form_view(
        &TransactionForm::new_transaction(today),
        &FieldErrors::default(),
        &create_target(),
        &categories,
    );

    form_page("Add Transaction", endpoints::NEW_TRANSACTION_VIEW, &form).into_response()
}

pub async fn create_transaction_endpoint(
    State(state): State<TransactionFormState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(errors) => {
            let categories = state.categories_for_form().await;
            return transaction_form_view(&form, &errors, &create_target(), &categories)
                .into_response();
        }
    };

    match state.transactions.create(&transaction).await {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Form, extract::State, http::StatusCode};
    use serde_json::json;
    use time::OffsetDateTime;

    use crate::{
        category::CategoryService,
        endpoints,
        records::InMemoryRecordStore,
        test_utils::{
            assert_field_error, assert_form_input_with_value, assert_hx_endpoint,
            assert_hx_redirect, assert_status_ok, assert_valid_html, must_get_form,
            parse_html_document, parse_html_fragment,
        },
        transaction::{
            core::TransactionForm,
            create::{TransactionFormState, create_transaction_endpoint, get_new_transaction_page},
            service::TransactionService,
        },
    };

    fn state(store: Arc<InMemoryRecordStore>, timezone: &str) -> TransactionFormState {
        TransactionFormState {
            transactions: TransactionService::new(store.clone()),
            categories: CategoryService::new(store),
            local_timezone: timezone.to_owned(),
        }
    }

    #[tokio::test]
    async fn page_defaults_to_today() {
        let store = Arc::new(InMemoryRecordStore::default());

        let response = get_new_transaction_page(State(state(store, "Etc/UTC"))).await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        let today = OffsetDateTime::now_utc().date().to_string();
        assert_form_input_with_value(&form, "date", "date", &today);
    }

    #[tokio::test]
    async fn invalid_timezone_is_500() {
        let store = Arc::new(InMemoryRecordStore::default());

        let response = get_new_transaction_page(State(state(store, "Nowhere/Special"))).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn creates_transaction() {
        let store = Arc::new(InMemoryRecordStore::default());
        let form = TransactionForm {
            transaction_type: "expense".to_owned(),
            amount: "15.25".to_owned(),
            date: "2026-10-18".to_owned(),
            description: "Lunch".to_owned(),
            notes: String::new(),
            category: String::new(),
        };

        let response =
            create_transaction_endpoint(State(state(store.clone(), "Etc/UTC")), Form(form)).await;

        assert_hx_redirect(&response, endpoints::TRANSACTIONS_VIEW);
        let stored = store.get("transaction_c", 1).expect("Transaction not stored");
        assert_eq!(stored["amount_c"], json!(15.25));
        assert_eq!(stored["description_c"], json!("Lunch"));
        assert_eq!(stored["notes_c"], json!(null));
    }

    #[tokio::test]
    async fn invalid_form_is_re_rendered() {
        let store = Arc::new(InMemoryRecordStore::default());
        let form = TransactionForm {
            transaction_type: "expense".to_owned(),
            amount: "abc".to_owned(),
            date: "2026-10-18".to_owned(),
            ..Default::default()
        };

        let response =
            create_transaction_endpoint(State(state(store.clone(), "Etc/UTC")), Form(form)).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_field_error(&must_get_form(&html), "amount", "Amount must be greater than zero");
        assert_eq!(store.count("transaction_c"), 0);
    }
}
