//! The page and endpoint for editing a bank account.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    bank_account::{core::BankAccountForm, form::bank_account_form_view, service::BankAccountService},
    endpoints::{self, format_endpoint},
    form::{FieldErrors, FormTarget},
    html::form_page,
    records::RecordId,
};

/// Renders the page for editing the bank account `account_id`.
pub async fn get_edit_bank_account_page(
    State(service): State<BankAccountService>,
    Path(account_id): Path<RecordId>,
) -> Response {
    let account = match service.get_by_id(account_id).await {
        Ok(account) => account,
        Err(error) => {
            tracing::error!("could not load bank account {account_id}: {error}");
            return error.into_response();
        }
    };

    let target = FormTarget::Update(format_endpoint(endpoints::BANK_ACCOUNT_API, account_id));
    let form = bank_account_form_view(
        &BankAccountForm::from_account(&account),
        &FieldErrors::default(),
        &target,
    );

    form_page("Edit Bank Account", endpoints::EDIT_BANK_ACCOUNT_VIEW, &form).into_response()
}

/// Validates the form and replaces the stored bank account.
pub async fn update_bank_account_endpoint(
    State(service): State<BankAccountService>,
    Path(account_id): Path<RecordId>,
    Form(form): Form<BankAccountForm>,
) -> Response {
    let account = match form.validate() {
        Ok(account) => account,
        Err(errors) => {
            let target =
                FormTarget::Update(format_endpoint(endpoints::BANK_ACCOUNT_API, account_id));
            return bank_account_form_view(&form, &errors, &target).into_response();
        }
    };

    match service.update(account_id, &account).await {
        Ok(_) => (
            HxRedirect(endpoints::BANK_ACCOUNTS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not update bank account {account_id}: {error}");
            error.into_alert_response()
        }
    }
}
