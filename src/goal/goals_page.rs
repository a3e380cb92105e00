//! Lists savings goals split into active and completed.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{Date, macros::format_description};

use crate::{
    currency::Currency,
    endpoints::{self, format_endpoint},
    form::FieldErrors,
    goal::{
        core::{AddFundsForm, Goal},
        form::add_funds_form_view,
        service::GoalService,
    },
    html::{
        BADGE_STYLE, BUTTON_LINK_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, base,
        edit_delete_action_links, empty_state, error_state, format_currency, progress_bar,
        stat_card,
    },
    navigation::NavBar,
};

/// Renders the goals page.
pub async fn get_goals_page(State(service): State<GoalService>) -> Response {
    match service.get_all().await {
        Ok(goals) => page(&goals_view(&goals)).into_response(),
        Err(error) => {
            tracing::error!("could not load goals: {error}");

            let content = error_state("Failed to load goals", endpoints::GOALS_VIEW);
            (StatusCode::INTERNAL_SERVER_ERROR, page(&content)).into_response()
        }
    }
}

fn page(content: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::GOALS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    div
                    {
                        h1 class="text-xl font-bold" { "Savings Goals" }
                        p class="text-sm text-gray-500 dark:text-gray-400"
                        {
                            "Track progress towards the things you are saving for"
                        }
                    }

                    a href=(endpoints::NEW_GOAL_VIEW) class=(BUTTON_LINK_STYLE)
                    {
                        "Add Goal"
                    }
                }

                (content)
            }
        }
    };

    base("Goals", &[], &content)
}

fn goals_view(goals: &[Goal]) -> Markup {
    if goals.is_empty() {
        return empty_state(
            "No savings goals yet",
            "Set a target to start saving towards it.",
            Some((endpoints::NEW_GOAL_VIEW, "Add Goal")),
        );
    }

    let (completed, active): (Vec<&Goal>, Vec<&Goal>) =
        goals.iter().partition(|goal| goal.is_completed());
    let saved: f64 = goals.iter().map(|goal| goal.current_amount).sum();
    let target: f64 = goals.iter().map(|goal| goal.target_amount).sum();

    html! {
        div class="grid grid-cols-1 sm:grid-cols-3 gap-4" data-stat-cards
        {
            (stat_card("Total Saved", &format_currency(saved, Currency::default())))
            (stat_card("Total Target", &format_currency(target, Currency::default())))
            (stat_card("Completed", &format!("{} of {}", completed.len(), goals.len())))
        }

        (goal_section("active", "Active Goals", "No active goals", &active))
        (goal_section("completed", "Completed Goals", "No completed goals yet", &completed))
    }
}

fn goal_section(key: &str, title: &str, empty_message: &str, goals: &[&Goal]) -> Markup {
    html! {
        section class="space-y-3" data-goal-section=(key)
        {
            h2 class="text-lg font-semibold" { (title) }

            @if goals.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { (empty_message) }
            } @else {
                ul class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    @for goal in goals {
                        (goal_card(goal))
                    }
                }
            }
        }
    }
}

/// "Dec 1, 2026".
fn format_deadline(deadline: Date) -> String {
    deadline
        .format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_else(|_| deadline.to_string())
}

fn goal_card(goal: &Goal) -> Markup {
    let progress = goal.progress();
    let edit_url = format_endpoint(endpoints::EDIT_GOAL_VIEW, goal.id);
    let delete_url = format_endpoint(endpoints::GOAL_API, goal.id);

    html! {
        li class={ (CARD_STYLE) " space-y-3" } data-goal-card="true"
        {
            div class="flex justify-between items-start gap-2"
            {
                div
                {
                    h3 class="font-semibold" { (goal.name) }

                    p class="text-sm text-gray-500 dark:text-gray-400" data-goal-deadline
                    {
                        @match goal.deadline {
                            Some(deadline) => { "Due " (format_deadline(deadline)) }
                            None => { "No deadline" }
                        }
                    }
                }

                @if progress.is_completed {
                    span class=(BADGE_STYLE) { "Completed" }
                }
            }

            (progress_bar(progress.progress, false))

            div class="flex justify-between text-sm"
            {
                span class="tabular-nums" data-goal-amounts
                {
                    (format_currency(goal.current_amount, Currency::default()))
                    " of "
                    (format_currency(goal.target_amount, Currency::default()))
                }

                span class="font-medium" data-goal-progress { (format!("{:.0}%", progress.progress.floor())) }
            }

            p class="text-sm text-gray-600 dark:text-gray-300" data-goal-remaining
            {
                (format_currency(progress.remaining, Currency::default())) " to go"
            }

            (add_funds_form_view(goal.id, &AddFundsForm::default(), &FieldErrors::default()))

            (edit_delete_action_links(
                &edit_url,
                &delete_url,
                &format!("Are you sure you want to delete \"{}\"?", goal.name),
                "closest [data-goal-card='true']",
                "delete",
            ))
        }
    }
}
