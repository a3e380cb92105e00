//! The page and endpoint for editing a transaction.

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
    html::form_page,
    records::RecordId,
    transaction::{
        core::TransactionForm, create::TransactionFormState, form::transaction_form_view,
    },
};

fn update_target(transaction_id: RecordId) -> FormTarget {
    FormTarget::Update(format_endpoint(endpoints::TRANSACTION_API, transaction_id))
}

pub async fn get_edit_transaction_page(
    State(state): State<TransactionFormState>,
    Path(transaction_id): Path<RecordId>,
) -> Response {
    let transaction = match state.transactions.get_by_id(transaction_id).await {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::error!("could not load transaction {transaction_id}: {error}");
            return error.into_response();
        }
    };

    let categories = state.categories_for_form().await;
    let form = transaction_form_view(
        &TransactionForm::from_transaction(&transaction),
        &FieldErrors::default(),
        &update_target(transaction_id),
        &categories,
    );

    form_page("Edit Transaction", endpoints::EDIT_TRANSACTION_VIEW, &form).into_response()
}

pub async fn update_transaction_endpoint(
    State(state): State<TransactionFormState>,
    Path(transaction_id): Path<RecordId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(errors) => {
            let categories = state.categories_for_form().await;
            return transaction_form_view(&form, &errors, &update_target(transaction_id), &categories)
                .into_response();
        }
    };

    match state.transactions.update(transaction_id, &transaction).await {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not update transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
