//! Charts of income and spending over time.

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState,
    budget::BudgetMonth,
    currency::Currency,
    endpoints,
    form::parse_date,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        empty_state, error_state, format_currency,
    },
    navigation::NavBar,
    reports::{
        aggregation::{expenses_by_category, last_twelve_months},
        charts::{
            ECHARTS_SCRIPT_URL, ReportChart, charts_script, charts_view,
            expenses_by_category_chart, income_expenses_chart,
        },
    },
    timezone::local_today,
    transaction::{Transaction, TransactionFilter, TransactionService, TransactionType},
};

/// The state needed by the reports page.
#[derive(Debug, Clone)]
pub struct ReportsState {
    pub transactions: TransactionService,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ReportsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: TransactionService::from_ref(state),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The date range for the category breakdown, as `YYYY-MM-DD` dates.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportsQuery {
    pub start_date: String,
    pub end_date: String,
}

impl ReportsQuery {
    /// The range to report on. Missing dates default to the start of the
    /// current month and today. A reversed range is swapped.
    fn date_range(&self, today: Date) -> (Date, Date) {
        let start = parse_date(&self.start_date)
            .unwrap_or_else(|| BudgetMonth::from_date(today).first_day());
        let end = parse_date(&self.end_date).unwrap_or(today);

        if start <= end { (start, end) } else { (end, start) }
    }
}

struct ReportData {
    yearly: Vec<Transaction>,
    range_expenses: Vec<Transaction>,
}

pub async fn get_reports_page(
    State(state): State<ReportsState>,
    Query(query): Query<ReportsQuery>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };
    let (start, end) = query.date_range(today);
    let months = last_twelve_months(BudgetMonth::from_date(today));

    let yearly_filter = TransactionFilter {
        start_date: months.first().map(|month| month.first_day()),
        end_date: months.last().map(|month| month.last_day()),
        ..Default::default()
    };
    let range_filter = TransactionFilter {
        start_date: Some(start),
        end_date: Some(end),
        transaction_type: Some(TransactionType::Expense),
        ..Default::default()
    };

    let loaded = tokio::try_join!(
        state.transactions.get_filtered(&yearly_filter),
        state.transactions.get_filtered(&range_filter),
    );

    let data = match loaded {
        Ok((yearly, range_expenses)) => ReportData {
            yearly,
            range_expenses,
        },
        Err(error) => {
            tracing::error!("could not load transactions for reports: {error}");

            let content = error_state("Failed to load reports", endpoints::REPORTS_VIEW);
            return (StatusCode::INTERNAL_SERVER_ERROR, page(&content, &[])).into_response();
        }
    };

    if data.yearly.is_empty() && data.range_expenses.is_empty() {
        let content = empty_state(
            "Nothing to report yet",
            "Charts will show up here once you add some transactions.",
            Some((endpoints::NEW_TRANSACTION_VIEW, "Add Transaction")),
        );
        return page(&content, &[]).into_response();
    }

    let category_totals = expenses_by_category(&data.range_expenses);
    let charts = [
        ReportChart {
            id: "income-expenses-chart",
            options: income_expenses_chart(&data.yearly, &months).to_string(),
        },
        ReportChart {
            id: "expenses-by-category-chart",
            options: expenses_by_category_chart(&category_totals, &format!("{start} to {end}"))
                .to_string(),
        },
    ];

    let content = html! {
        (range_form(start, end))
        (charts_view(&charts))
        (category_breakdown(&category_totals))
    };

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(&charts),
    ];

    page(&content, &scripts).into_response()
}

fn page(content: &Markup, scripts: &[HeadElement]) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-screen-xl space-y-6"
            {
                h1 class="text-xl font-bold" { "Reports" }

                (content)
            }
        }
    };

    base("Reports", scripts, &content)
}

fn range_form(start: Date, end: Date) -> Markup {
    html! {
        form method="get" action=(endpoints::REPORTS_VIEW) class=(CARD_STYLE) data-range-form
        {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4 items-end"
            {
                div
                {
                    label for="start_date" class=(FORM_LABEL_STYLE) { "From" }
                    input id="start_date" type="date" name="start_date" value=(start.to_string())
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="end_date" class=(FORM_LABEL_STYLE) { "To" }
                    input id="end_date" type="date" name="end_date" value=(end.to_string())
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
            }
        }
    }
}

fn category_breakdown(category_totals: &[(String, f64)]) -> Markup {
    let total: f64 = category_totals.iter().map(|(_, amount)| amount).sum();

    html! {
        section class="relative overflow-x-auto shadow-md rounded-lg" data-category-breakdown
        {
            @if category_totals.is_empty() {
                p class="p-4 text-sm text-gray-500 dark:text-gray-400" { "No expenses in this range" }
            } @else {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Spent" }
                            th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Share" }
                        }
                    }

                    tbody
                    {
                        @for (category, amount) in category_totals {
                            tr class=(TABLE_ROW_STYLE) data-category-total="true"
                            {
                                td class=(TABLE_CELL_STYLE) { (category) }
                                td class={ (TABLE_CELL_STYLE) " text-right tabular-nums" }
                                {
                                    (format_currency(*amount, Currency::default()))
                                }
                                td class={ (TABLE_CELL_STYLE) " text-right tabular-nums" }
                                {
                                    (format!("{:.0}%", amount / total * 100.0))
                                }
                            }
                        }
                    }
                }
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
    use serde_json::json;
    use time::{OffsetDateTime, macros::date};

    use crate::{
        records::InMemoryRecordStore,
        reports::reports_page::{ReportsQuery, ReportsState, get_reports_page},
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document, select_texts},
        transaction::TransactionService,
    };

    fn state(store: Arc<InMemoryRecordStore>) -> ReportsState {
        ReportsState {
            transactions: TransactionService::new(store),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn query(start_date: &str, end_date: &str) -> Query<ReportsQuery> {
        Query(ReportsQuery {
            start_date: start_date.to_owned(),
            end_date: end_date.to_owned(),
        })
    }

    #[test]
    fn date_range_defaults_to_month_to_date() {
        let today = date!(2026 - 10 - 18);

        assert_eq!(
            ReportsQuery::default().date_range(today),
            (date!(2026 - 10 - 01), today)
        );
        assert_eq!(
            ReportsQuery {
                start_date: "2026-09-30".to_owned(),
                end_date: "2026-09-01".to_owned(),
            }
            .date_range(today),
            (date!(2026 - 09 - 01), date!(2026 - 09 - 30))
        );
    }

    #[tokio::test]
    async fn shows_charts_and_category_breakdown() {
        let store = Arc::new(InMemoryRecordStore::default());
        for (amount, kind, category) in [(300, "expense", "Rent"), (100, "expense", "Dining"), (900, "income", "Salary")] {
            store.insert(
                "transaction_c",
                json!({"amount_c": amount, "date_c": "2026-06-10", "type_c": kind,
                       "category_c": {"Id": 1, "Name": category}}),
            );
        }

        let response =
            get_reports_page(State(state(store)), query("2026-06-01", "2026-06-30")).await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(select_texts(&html, "[data-chart]").len(), 2);
        assert_eq!(
            select_texts(&html, "[data-category-total] td:first-child"),
            ["Rent", "Dining"]
        );
        assert_eq!(
            select_texts(&html, "[data-category-total] td:last-child"),
            ["75%", "25%"]
        );
    }

    #[tokio::test]
    async fn no_transactions_shows_empty_state() {
        let store = Arc::new(InMemoryRecordStore::default());

        let response = get_reports_page(State(state(store)), query("", "")).await;

        let html = parse_html_document(response).await;
        assert_eq!(
            select_texts(&html, "[data-empty-state] h2"),
            ["Nothing to report yet"]
        );
    }

    #[tokio::test]
    async fn recent_income_without_expenses_still_renders_charts() {
        let store = Arc::new(InMemoryRecordStore::default());
        let today = OffsetDateTime::now_utc().date();
        store.insert(
            "transaction_c",
            json!({"amount_c": 50, "date_c": today.to_string(), "type_c": "income"}),
        );

        let response = get_reports_page(State(state(store)), query("", "")).await;

        let html = parse_html_document(response).await;
        assert_eq!(select_texts(&html, "[data-chart]").len(), 2);
        assert_eq!(
            select_texts(&html, "[data-category-breakdown] p"),
            ["No expenses in this range"]
        );
    }

    #[tokio::test]
    async fn load_failure_shows_error_state() {
        let store = Arc::new(InMemoryRecordStore::default());
        store.fail_requests("down");

        let response = get_reports_page(State(state(store)), query("", "")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
