//! The form shared by the create and edit budget pages.

use maud::{Markup, html};

use crate::{
    budget::core::BudgetForm,
    category::Category,
    form::{FieldErrors, FormTarget},
    html::{FORM_TEXT_INPUT_STYLE, labelled_field, submit_button},
};

/// `categories` should be the expense categories, since only spending counts
/// against a budget.
pub(super) fn budget_form_view(
    form: &BudgetForm,
    errors: &FieldErrors,
    target: &FormTarget,
    categories: &[Category],
) -> Markup {
    let submit_text = match target {
        FormTarget::Create(_) => "Add Budget",
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
            (labelled_field("category_id", "Category", html! {
                select id="category_id" name="category_id" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" disabled selected[form.category_id.is_empty()]
                    {
                        "Select a category"
                    }

                    @for category in categories {
                        @let value = category.id.to_string();

                        option value=(value) selected[form.category_id == value]
                        {
                            (category.name)
                        }
                    }
                }
            }, errors.get("category_id")))

            @if categories.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Add an expense category before creating a budget."
                }
            }

            (labelled_field("amount", "Budget Amount", html! {
                input
                    id="amount"
                    type="number"
                    name="amount"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    value=(form.amount)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }, errors.get("amount")))

            (labelled_field("month", "Month", html! {
                input
                    id="month"
                    type="month"
                    name="month"
                    placeholder="YYYY-MM"
                    value=(form.month)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }, errors.get("month")))

            (submit_button(submit_text))
        }
    }
}
