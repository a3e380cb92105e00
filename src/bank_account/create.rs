//! The page and endpoint for adding a bank account.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    bank_account::{core::BankAccountForm, form::bank_account_form_view, service::BankAccountService},
    endpoints,
    form::{FieldErrors, FormTarget},
    html::form_page,
};

/// Renders the page for adding a bank account.
pub async fn get_new_bank_account_page() -> Response {
    let form = bank_account_form_view(
        &BankAccountForm::new_account(),
        &FieldErrors::default(),
        &FormTarget::Create(endpoints::BANK_ACCOUNTS_API.to_owned()),
    );

    form_page("Add Bank Account", endpoints::NEW_BANK_ACCOUNT_VIEW, &form).into_response()
}

/// Validates and stores a new bank account.
///
/// Invalid input re-renders the form with the field errors. On success the
/// client is redirected to the bank accounts page.
pub async fn create_bank_account_endpoint(
    State(service): State<BankAccountService>,
    Form(form): Form<BankAccountForm>,
) -> Response {
    let account = match form.validate() {
        Ok(account) => account,
        Err(errors) => {
            let target = FormTarget::Create(endpoints::BANK_ACCOUNTS_API.to_owned());
            return bank_account_form_view(&form, &errors, &target).into_response();
        }
    };

    match service.create(&account).await {
        Ok(account) => {
            tracing::info!("created bank account {}", account.id);

            (
                HxRedirect(endpoints::BANK_ACCOUNTS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not create bank account: {error}");
            error.into_alert_response()
        }
    }
}
