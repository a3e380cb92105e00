//! The form shared by the create and edit transaction pages.

use maud::{Markup, html};

use crate::{
    category::{Category, CategoryType},
    form::{FieldErrors, FormTarget},
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, field_error, labelled_field, submit_button,
    },
    transaction::core::TransactionForm,
};

pub(super) fn transaction_form_view(
    form: &TransactionForm,
    errors: &FieldErrors,
    target: &FormTarget,
    categories: &[Category],
) -> Markup {
    let submit_text = match target {
        FormTarget::Create(_) => "Add Transaction",
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
            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for transaction_type in CategoryType::ALL {
                        @let id = format!("type-{transaction_type}");

                        div class="flex-1"
                        {
                            input
                                id=(id)
                                type="radio"
                                name="type"
                                value=(transaction_type.as_str())
                                checked[form.transaction_type == transaction_type.as_str()]
                                required
                                class=(FORM_RADIO_INPUT_STYLE);

                            label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (transaction_type.label()) }
                        }
                    }
                }

                (field_error("type", errors.get("type")))
            }

            div class="grid grid-cols-2 gap-4"
            {
                (labelled_field("amount", "Amount", html! {
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        value=(form.amount)
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }, errors.get("amount")))

                (labelled_field("date", "Date", html! {
                    input
                        id="date"
                        type="date"
                        name="date"
                        value=(form.date)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }, errors.get("date")))
            }

            (labelled_field("category", "Category", html! {
                select id="category" name="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[form.category.is_empty()] { "No category" }

                    @for category_type in CategoryType::ALL {
                        optgroup label=(category_type.label())
                        {
                            @for category in categories.iter().filter(|category| category.category_type == category_type) {
                                @let value = category.id.to_string();

                                option value=(value) selected[form.category == value]
                                {
                                    (category.name)
                                }
                            }
                        }
                    }
                }
            }, errors.get("category")))

            (labelled_field("description", "Description", html! {
                input
                    id="description"
                    type="text"
                    name="description"
                    placeholder="e.g., Weekly groceries"
                    value=(form.description)
                    class=(FORM_TEXT_INPUT_STYLE);
            }, errors.get("description")))

            (labelled_field("notes", "Notes", html! {
                textarea id="notes" name="notes" rows="3" class=(FORM_TEXT_INPUT_STYLE)
                {
                    (form.notes)
                }
            }, errors.get("notes")))

            (submit_button(submit_text))
        }
    }
}
