//! Dashboard handler and view rendering.
//!
//! The dashboard shows the current month at a glance:
//! - income, expenses and net for the month plus the total account balance
//! - the most recent transactions
//! - this month's budgets and how much of each is spent
//! - progress towards active savings goals

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    bank_account::{BankAccount, BankAccountService, primary_total, totals_by_currency},
    budget::{Budget, BudgetMonth, BudgetService, load_month_budgets},
    currency::Currency,
    endpoints,
    goal::{Goal, GoalService},
    html::{
        CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, error_state, format_currency, link,
        progress_bar, stat_card,
    },
    navigation::NavBar,
    timezone::local_today,
    transaction::{Totals, Transaction, TransactionService},
};

/// The number of transactions listed under "Recent Transactions".
const RECENT_TRANSACTION_COUNT: usize = 5;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub transactions: TransactionService,
    pub accounts: BankAccountService,
    pub budgets: BudgetService,
    pub goals: GoalService,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: TransactionService::from_ref(state),
            accounts: BankAccountService::from_ref(state),
            budgets: BudgetService::from_ref(state),
            goals: GoalService::from_ref(state),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    month: BudgetMonth,
    month_totals: Totals,
    balance: (Currency, f64),
    recent_transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    active_goals: Vec<Goal>,
}

/// Display a page with an overview of the current month.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    match load_dashboard_data(&state, BudgetMonth::from_date(today)).await {
        Ok(data) => page(&dashboard_view(&data)).into_response(),
        Err(error) => {
            tracing::error!("could not load dashboard: {error}");

            let content = error_state("Failed to load dashboard", endpoints::DASHBOARD_VIEW);
            (StatusCode::INTERNAL_SERVER_ERROR, page(&content)).into_response()
        }
    }
}

async fn load_dashboard_data(
    state: &DashboardState,
    month: BudgetMonth,
) -> Result<DashboardData, Error> {
    let (month_transactions, mut all_transactions, accounts, budgets, active_goals) = tokio::try_join!(
        state
            .transactions
            .get_by_date_range(month.first_day(), month.last_day()),
        state.transactions.get_all(),
        state.accounts.get_all(),
        load_month_budgets(&state.budgets, &state.transactions, month),
        state.goals.get_active_goals(),
    )?;

    all_transactions.truncate(RECENT_TRANSACTION_COUNT);

    Ok(DashboardData {
        month,
        month_totals: Totals::from_transactions(&month_transactions),
        balance: total_balance(&accounts),
        recent_transactions: all_transactions,
        budgets,
        active_goals,
    })
}

fn total_balance(accounts: &[BankAccount]) -> (Currency, f64) {
    primary_total(&totals_by_currency(accounts))
}

fn page(content: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-screen-xl space-y-6"
            {
                h1 class="text-xl font-bold" { "Dashboard" }

                (content)
            }
        }
    };

    base("Dashboard", &[], &content)
}

fn dashboard_view(data: &DashboardData) -> Markup {
    let currency = Currency::default();
    let (balance_currency, balance) = data.balance;

    html! {
        p class="text-sm text-gray-500 dark:text-gray-400" data-month { (data.month.label()) }

        div class="grid grid-cols-2 lg:grid-cols-4 gap-4" data-stat-cards
        {
            (stat_card("Income", &format_currency(data.month_totals.income, currency)))
            (stat_card("Expenses", &format_currency(data.month_totals.expenses, currency)))
            (stat_card("Net", &format_currency(data.month_totals.net(), currency)))
            (stat_card("Total Balance", &format_currency(balance, balance_currency)))
        }

        div class="grid grid-cols-1 lg:grid-cols-3 gap-6"
        {
            (recent_transactions_panel(&data.recent_transactions))
            (budgets_panel(data.month, &data.budgets))
            (goals_panel(&data.active_goals))
        }
    }
}

fn panel(title: &str, view_all_url: &str, key: &str, content: Markup) -> Markup {
    html! {
        section class={ (CARD_STYLE) " space-y-4" } data-panel=(key)
        {
            header class="flex justify-between items-center"
            {
                h2 class="text-lg font-semibold" { (title) }
                a href=(view_all_url) class=(LINK_STYLE) { "View all" }
            }

            (content)
        }
    }
}

fn recent_transactions_panel(transactions: &[Transaction]) -> Markup {
    let content = html! {
        @if transactions.is_empty() {
            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                "No transactions yet. "
                (link(endpoints::NEW_TRANSACTION_VIEW, "Add one"))
            }
        } @else {
            ul class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for transaction in transactions {
                    @let signed_amount = transaction.signed_amount();
                    @let amount_style = if signed_amount < 0.0 {
                        "text-red-600 dark:text-red-400"
                    } else {
                        "text-green-600 dark:text-green-400"
                    };

                    li class="flex justify-between gap-3 py-2" data-recent-transaction
                    {
                        div
                        {
                            p class="font-medium"
                            {
                                (transaction.description.as_deref()
                                    .or(transaction.category_name())
                                    .unwrap_or("Transaction"))
                            }
                            p class="text-xs text-gray-500 dark:text-gray-400"
                            {
                                (transaction.date.to_string())
                            }
                        }

                        span class={ "tabular-nums " (amount_style) }
                        {
                            (format_currency(signed_amount, Currency::default()))
                        }
                    }
                }
            }
        }
    };

    panel("Recent Transactions", endpoints::TRANSACTIONS_VIEW, "transactions", content)
}

fn budgets_panel(month: BudgetMonth, budgets: &[Budget]) -> Markup {
    let content = html! {
        @if budgets.is_empty() {
            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                "No budgets set for " (month.label()) "."
            }
        } @else {
            ul class="space-y-4"
            {
                @for budget in budgets {
                    li class="space-y-1" data-dashboard-budget
                    {
                        div class="flex justify-between text-sm"
                        {
                            span class="font-medium"
                            {
                                (budget.category_name.as_deref().unwrap_or("Uncategorized"))
                            }
                            span class="tabular-nums" data-budget-usage
                            {
                                (format_currency(budget.spent, Currency::default()))
                                " / "
                                (format_currency(budget.amount, Currency::default()))
                            }
                        }

                        (progress_bar(budget.percent_spent(), budget.is_over_budget()))
                    }
                }
            }
        }
    };

    panel("Budgets", endpoints::BUDGETS_VIEW, "budgets", content)
}

fn goals_panel(goals: &[Goal]) -> Markup {
    let content = html! {
        @if goals.is_empty() {
            p class="text-sm text-gray-500 dark:text-gray-400" { "No active savings goals." }
        } @else {
            ul class="space-y-4"
            {
                @for goal in goals {
                    @let progress = goal.progress();

                    li class="space-y-1" data-dashboard-goal
                    {
                        div class="flex justify-between text-sm"
                        {
                            span class="font-medium" { (goal.name) }
                            span class="tabular-nums" { (format!("{:.0}%", progress.progress.floor())) }
                        }

                        (progress_bar(progress.progress, false))
                    }
                }
            }
        }
    };

    panel("Savings Goals", endpoints::GOALS_VIEW, "goals", content)
}
