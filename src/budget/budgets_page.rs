//! Shows a month's budgets and how much of each has been spent.

use std::collections::HashMap;

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    budget::{
        core::{Budget, BudgetMonth},
        service::BudgetService,
    },
    currency::Currency,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_LINK_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
        edit_delete_action_links, empty_state, error_state, format_currency, progress_bar,
        stat_card,
    },
    navigation::NavBar,
    records::RecordId,
    timezone::local_today,
    transaction::{Transaction, TransactionFilter, TransactionService, TransactionType},
};

/// The state needed by the budgets page.
#[derive(Debug, Clone)]
pub struct BudgetsPageState {
    pub budgets: BudgetService,
    pub transactions: TransactionService,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budgets: BudgetService::from_ref(state),
            transactions: TransactionService::from_ref(state),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string of the budgets page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BudgetsQuery {
    /// The month to show, written `YYYY-MM`. Defaults to the current month.
    pub month: String,
}

/// The budgets for `month` with their spent amounts filled in from the
/// month's expense transactions.
pub(crate) async fn load_month_budgets(
    budgets: &BudgetService,
    transactions: &TransactionService,
    month: BudgetMonth,
) -> Result<Vec<Budget>, Error> {
    let budgets = budgets.get_by_month(month).await?;

    if budgets.is_empty() {
        return Ok(budgets);
    }

    let expenses = transactions
        .get_filtered(&TransactionFilter {
            start_date: Some(month.first_day()),
            end_date: Some(month.last_day()),
            transaction_type: Some(TransactionType::Expense),
            ..Default::default()
        })
        .await?;

    Ok(with_spending(budgets, &expenses))
}

fn with_spending(budgets: Vec<Budget>, expenses: &[Transaction]) -> Vec<Budget> {
    let mut spent_by_category: HashMap<RecordId, f64> = HashMap::new();

    for expense in expenses {
        if let Some(category) = &expense.category {
            *spent_by_category.entry(category.id).or_default() += expense.amount;
        }
    }

    budgets
        .into_iter()
        .map(|budget| {
            let spent = budget
                .category_id
                .and_then(|id| spent_by_category.get(&id).copied())
                .unwrap_or(0.0);

            Budget { spent, ..budget }
        })
        .collect()
}

/// Renders the budgets page for the month in the query string.
///
/// A missing or malformed month shows the current local month.
pub async fn get_budgets_page(
    State(state): State<BudgetsPageState>,
    Query(query): Query<BudgetsQuery>,
) -> Response {
    let month = match query.month.parse::<BudgetMonth>() {
        Ok(month) => month,
        Err(_) => match local_today(&state.local_timezone) {
            Ok(today) => BudgetMonth::from_date(today),
            Err(error) => return error.into_response(),
        },
    };

    match load_month_budgets(&state.budgets, &state.transactions, month).await {
        Ok(budgets) => page(month, &budgets_view(month, &budgets)).into_response(),
        Err(error) => {
            tracing::error!("could not load budgets for {month}: {error}");

            let content = error_state("Failed to load budgets", &month_url(month));
            (StatusCode::INTERNAL_SERVER_ERROR, page(month, &content)).into_response()
        }
    }
}

fn month_url(month: BudgetMonth) -> String {
    format!("{}?month={month}", endpoints::BUDGETS_VIEW)
}

fn new_budget_url(month: BudgetMonth) -> String {
    format!("{}?month={month}", endpoints::NEW_BUDGET_VIEW)
}

fn page(month: BudgetMonth, content: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGETS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-5xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Budgets" }

                    a href=(new_budget_url(month)) class=(BUTTON_LINK_STYLE)
                    {
                        "Add Budget"
                    }
                }

                nav class="flex items-center justify-between" data-month-nav
                {
                    a href=(month_url(month.previous())) class=(LINK_STYLE) rel="prev"
                    {
                        "← " (month.previous().label())
                    }

                    h2 class="text-lg font-semibold" data-month { (month.label()) }

                    a href=(month_url(month.next())) class=(LINK_STYLE) rel="next"
                    {
                        (month.next().label()) " →"
                    }
                }

                (content)
            }
        }
    };

    base("Budgets", &[], &content)
}

fn budgets_view(month: BudgetMonth, budgets: &[Budget]) -> Markup {
    if budgets.is_empty() {
        let new_url = new_budget_url(month);

        return empty_state(
            &format!("No budgets for {}", month.label()),
            "Set a spending limit for a category to track it here.",
            Some((&new_url, "Add Budget")),
        );
    }

    let budgeted: f64 = budgets.iter().map(|budget| budget.amount).sum();
    let spent: f64 = budgets.iter().map(|budget| budget.spent).sum();

    html! {
        div class="grid grid-cols-1 sm:grid-cols-3 gap-4" data-stat-cards
        {
            (stat_card("Total Budgeted", &format_currency(budgeted, Currency::default())))
            (stat_card("Total Spent", &format_currency(spent, Currency::default())))
            (stat_card("Remaining", &format_currency(budgeted - spent, Currency::default())))
        }

        ul class="grid grid-cols-1 md:grid-cols-2 gap-4"
        {
            @for budget in budgets {
                (budget_card(budget))
            }
        }
    }
}

fn budget_card(budget: &Budget) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_BUDGET_VIEW, budget.id);
    let delete_url = format_endpoint(endpoints::BUDGET_API, budget.id);
    let category_name = budget.category_name.as_deref().unwrap_or("Uncategorized");
    let is_over = budget.is_over_budget();
    let (border, remaining_style) = if is_over {
        ("border-2 border-red-500", "font-medium tabular-nums text-red-600")
    } else {
        ("border border-transparent", "font-medium tabular-nums")
    };

    html! {
        li class={ (CARD_STYLE) " space-y-3 " (border) }
            data-budget-card="true"
            data-over-budget[is_over]
        {
            div class="flex justify-between items-start gap-2"
            {
                h3 class="font-semibold" { (category_name) }

                (edit_delete_action_links(
                    &edit_url,
                    &delete_url,
                    &format!("Are you sure you want to delete the {category_name} budget?"),
                    "closest [data-budget-card='true']",
                    "delete",
                ))
            }

            (progress_bar(budget.percent_spent(), is_over))

            dl class="grid grid-cols-3 gap-2 text-sm"
            {
                div
                {
                    dt class="text-gray-500 dark:text-gray-400" { "Budget" }
                    dd class="font-medium tabular-nums" data-budget-amount
                    {
                        (format_currency(budget.amount, Currency::default()))
                    }
                }

                div
                {
                    dt class="text-gray-500 dark:text-gray-400" { "Spent" }
                    dd class="font-medium tabular-nums" data-budget-spent
                    {
                        (format_currency(budget.spent, Currency::default()))
                    }
                }

                div
                {
                    dt class="text-gray-500 dark:text-gray-400" { "Remaining" }
                    dd class=(remaining_style) data-budget-remaining
                    {
                        (format_currency(budget.remaining(), Currency::default()))
                    }
                }
            }

            @if is_over {
                p class="text-sm text-red-600 dark:text-red-400" { "Over budget" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use scraper::Selector;
    use serde_json::json;

    use crate::{
        budget::{
            budgets_page::{BudgetsPageState, BudgetsQuery, get_budgets_page},
            service::BudgetService,
        },
        records::InMemoryRecordStore,
        test_utils::{
            assert_status_ok, assert_valid_html, parse_html_document, select_texts,
        },
        transaction::TransactionService,
    };

    fn state(store: Arc<InMemoryRecordStore>) -> BudgetsPageState {
        BudgetsPageState {
            budgets: BudgetService::new(store.clone()),
            transactions: TransactionService::new(store),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn query(month: &str) -> Query<BudgetsQuery> {
        Query(BudgetsQuery {
            month: month.to_owned(),
        })
    }

    fn seeded_store() -> Arc<InMemoryRecordStore> {
        let store = Arc::new(InMemoryRecordStore::default());
        store.insert(
            "budget_c",
            json!({"amount_c": 400, "month_c": "2026-10",
                   "category_id_c": {"Id": 10, "Name": "Groceries"}}),
        );
        store.insert(
            "budget_c",
            json!({"amount_c": 50, "month_c": "2026-10",
                   "category_id_c": {"Id": 11, "Name": "Dining"}}),
        );
        store.insert(
            "budget_c",
            json!({"amount_c": 999, "month_c": "2026-09",
                   "category_id_c": {"Id": 10, "Name": "Groceries"}}),
        );

        for (amount, date, kind, category) in [
            (120, "2026-10-03", "expense", 10),
            (40, "2026-10-31", "expense", 10),
            (80, "2026-10-12", "expense", 11),
            (500, "2026-10-12", "income", 10),
            (70, "2026-09-30", "expense", 10),
        ] {
            store.insert(
                "transaction_c",
                json!({"amount_c": amount, "date_c": date, "type_c": kind,
                       "category_c": {"Id": category, "Name": "x"}}),
            );
        }

        store
    }

    #[tokio::test]
    async fn spent_counts_only_the_months_expenses_in_the_category() {
        let store = seeded_store();

        let response = get_budgets_page(State(state(store)), query("2026-10")).await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(select_texts(&html, "[data-month]"), ["October 2026"]);
        assert_eq!(
            select_texts(&html, "[data-budget-card] h3"),
            ["Groceries", "Dining"]
        );
        assert_eq!(
            select_texts(&html, "[data-budget-spent]"),
            ["$160.00", "$80.00"]
        );
        assert_eq!(
            select_texts(&html, "[data-budget-remaining]"),
            ["$240.00", "-$30.00"]
        );
        assert_eq!(
            select_texts(&html, "[data-stat-cards] [data-stat-value]"),
            ["$450.00", "$240.00", "$210.00"]
        );
    }

    #[tokio::test]
    async fn over_budget_cards_are_highlighted() {
        let store = seeded_store();

        let response = get_budgets_page(State(state(store)), query("2026-10")).await;

        let html = parse_html_document(response).await;
        let over = Selector::parse("[data-budget-card][data-over-budget] h3").unwrap();
        let names: Vec<String> = html
            .select(&over)
            .map(|element| element.text().collect())
            .collect();
        assert_eq!(names, ["Dining"]);

        let bars = Selector::parse("[role='progressbar']").unwrap();
        let values: Vec<&str> = html
            .select(&bars)
            .filter_map(|bar| bar.value().attr("aria-valuenow"))
            .collect();
        assert_eq!(values, ["40", "100"]);
    }

    #[tokio::test]
    async fn links_to_neighbouring_months() {
        let store = Arc::new(InMemoryRecordStore::default());

        let response = get_budgets_page(State(state(store)), query("2026-01")).await;

        let html = parse_html_document(response).await;
        let prev = Selector::parse("[data-month-nav] a[rel='prev']").unwrap();
        let next = Selector::parse("[data-month-nav] a[rel='next']").unwrap();
        assert_eq!(
            html.select(&prev).next().unwrap().value().attr("href"),
            Some("/budgets?month=2025-12")
        );
        assert_eq!(
            html.select(&next).next().unwrap().value().attr("href"),
            Some("/budgets?month=2026-02")
        );
        assert_eq!(
            select_texts(&html, "[data-empty-state] h2"),
            ["No budgets for January 2026"]
        );
    }

    #[tokio::test]
    async fn malformed_month_shows_current_month() {
        let store = Arc::new(InMemoryRecordStore::default());
        let today = time::OffsetDateTime::now_utc().date();
        let want = format!("{} {}", today.month(), today.year());

        let response = get_budgets_page(State(state(store)), query("next month")).await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_eq!(select_texts(&html, "[data-month]"), [want]);
    }

    #[tokio::test]
    async fn load_failure_shows_error_state() {
        let store = Arc::new(InMemoryRecordStore::default());
        store.fail_requests("down");

        let response = get_budgets_page(State(state(store)), query("2026-10")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        let retry = Selector::parse("[data-error-state] a").unwrap();
        assert_eq!(
            html.select(&retry).next().unwrap().value().attr("href"),
            Some("/budgets?month=2026-10")
        );
    }
}
