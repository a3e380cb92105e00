//! The form shared by the create and edit bank account pages.

use maud::{Markup, html};

use crate::{
    bank_account::core::{AccountType, BankAccountForm},
    currency::Currency,
    form::{FieldErrors, FormTarget},
    html::{FORM_TEXT_INPUT_STYLE, labelled_field, submit_button},
};

pub(super) fn bank_account_form_view(
    form: &BankAccountForm,
    errors: &FieldErrors,
    target: &FormTarget,
) -> Markup {
    let submit_text = match target {
        FormTarget::Create(_) => "Add Account",
        FormTarget::Update(_) => "Save Changes",
    };

    html! {
        form
            hx-post=[target.post_url()]
            hx-put=[target.put_url()]
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (labelled_field("name", "Account Name", html! {
                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="e.g., Main Checking"
                    value=(form.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }, errors.get("name")))

            (labelled_field("bank_name", "Bank Name", html! {
                input
                    id="bank_name"
                    type="text"
                    name="bank_name"
                    placeholder="e.g., Chase Bank"
                    value=(form.bank_name)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }, errors.get("bank_name")))

            (labelled_field("account_number", "Account Number", html! {
                input
                    id="account_number"
                    type="text"
                    name="account_number"
                    placeholder="e.g., ****1234"
                    value=(form.account_number)
                    required
                    autocomplete="off"
                    class=(FORM_TEXT_INPUT_STYLE);
            }, errors.get("account_number")))

            div class="grid grid-cols-2 gap-4"
            {
                (labelled_field("balance", "Balance", html! {
                    input
                        id="balance"
                        type="number"
                        name="balance"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        value=(form.balance)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }, errors.get("balance")))

                (labelled_field("currency", "Currency", html! {
                    select id="currency" name="currency" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for currency in Currency::ALL {
                            option value=(currency.code()) selected[form.currency == currency.code()]
                            {
                                (currency.label())
                            }
                        }
                    }
                }, errors.get("currency")))
            }

            (labelled_field("account_type", "Account Type", html! {
                select id="account_type" name="account_type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[form.account_type.is_empty()] { "Select type (optional)" }

                    @for account_type in AccountType::ALL {
                        option
                            value=(account_type.label())
                            selected[form.account_type == account_type.label()]
                        {
                            (account_type.label())
                        }
                    }
                }
            }, errors.get("account_type")))

            (submit_button(submit_text))
        }
    }
}
