//! The goal form and the add funds form.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    form::{FieldErrors, FormTarget},
    goal::core::{AddFundsForm, GoalForm},
    html::{BUTTON_LINK_STYLE, FORM_TEXT_INPUT_STYLE, field_error, labelled_field, submit_button},
    records::RecordId,
};

pub(super) fn goal_form_view(form: &GoalForm, errors: &FieldErrors, target: &FormTarget) -> Markup {
    let submit_text = match target {
        FormTarget::Create(_) => "Add Goal",
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
            (labelled_field("name", "Goal Name", html! {
                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="e.g., Emergency fund"
                    value=(form.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }, errors.get("name")))

            div class="grid grid-cols-2 gap-4"
            {
                (labelled_field("target_amount", "Target Amount", html! {
                    input
                        id="target_amount"
                        type="number"
                        name="target_amount"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        value=(form.target_amount)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }, errors.get("target_amount")))

                (labelled_field("current_amount", "Saved So Far", html! {
                    input
                        id="current_amount"
                        type="number"
                        name="current_amount"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        value=(form.current_amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }, errors.get("current_amount")))
            }

            (labelled_field("deadline", "Deadline (optional)", html! {
                input
                    id="deadline"
                    type="date"
                    name="deadline"
                    value=(form.deadline)
                    class=(FORM_TEXT_INPUT_STYLE);
            }, errors.get("deadline")))

            (submit_button(submit_text))
        }
    }
}

/// The inline form on a goal card for putting money towards the goal.
pub(crate) fn add_funds_form_view(
    goal_id: RecordId,
    form: &AddFundsForm,
    errors: &FieldErrors,
) -> Markup {
    let input_id = format!("add-funds-{goal_id}");

    html! {
        form
            hx-post=(format_endpoint(endpoints::GOAL_FUNDS_API, goal_id))
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="space-y-1"
            data-add-funds-form
        {
            div class="flex gap-2"
            {
                label for=(input_id) class="sr-only" { "Amount to add" }

                input
                    id=(input_id)
                    type="number"
                    name="amount"
                    step="0.01"
                    min="0.01"
                    placeholder="Amount"
                    value=(form.amount)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                button type="submit" class={ (BUTTON_LINK_STYLE) " whitespace-nowrap" }
                {
                    "Add Funds"
                }
            }

            (field_error("amount", errors.get("amount")))
        }
    }
}
