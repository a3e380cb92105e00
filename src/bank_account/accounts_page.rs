//! Displays bank accounts, their balances and per-currency totals.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    bank_account::{
        core::{BankAccount, primary_total, totals_by_currency},
        service::BankAccountService,
    },
    currency::Currency,
    endpoints::{self, format_endpoint},
    html::{
        BADGE_STYLE, BUTTON_LINK_STYLE, CARD_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        base, edit_delete_action_links, empty_state, error_state, format_currency, stat_card,
    },
    navigation::NavBar,
};

/// The query string of the bank accounts page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BankAccountsQuery {
    /// Only show accounts whose text fields contain this, ignoring case.
    pub search: String,
}

/// Renders the bank accounts page.
///
/// A failure to load the accounts is shown in place of the list with a link
/// to try again.
pub async fn get_bank_accounts_page(
    State(service): State<BankAccountService>,
    Query(query): Query<BankAccountsQuery>,
) -> Response {
    match service.get_all().await {
        Ok(accounts) => bank_accounts_view(&accounts, &query.search).into_response(),
        Err(error) => {
            tracing::error!("could not load bank accounts: {error}");

            let content = error_state("Failed to load bank accounts", endpoints::BANK_ACCOUNTS_VIEW);
            (StatusCode::INTERNAL_SERVER_ERROR, page(&content)).into_response()
        }
    }
}

fn page(content: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::BANK_ACCOUNTS_VIEW).into_html();

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
                        h1 class="text-xl font-bold" { "Bank Accounts" }
                        p class="text-sm text-gray-500 dark:text-gray-400"
                        {
                            "Manage your bank accounts and balances"
                        }
                    }

                    a href=(endpoints::NEW_BANK_ACCOUNT_VIEW) class=(BUTTON_LINK_STYLE)
                    {
                        "Add Account"
                    }
                }

                (content)
            }
        }
    };

    base("Bank Accounts", &[], &content)
}

fn bank_accounts_view(accounts: &[BankAccount], search: &str) -> Markup {
    if accounts.is_empty() {
        return page(&empty_state(
            "No bank accounts yet",
            "Add your first bank account to start tracking your balances.",
            Some((endpoints::NEW_BANK_ACCOUNT_VIEW, "Add Account")),
        ));
    }

    let totals = totals_by_currency(accounts);
    let (primary_currency, primary_balance) = primary_total(&totals);
    let matching: Vec<&BankAccount> = accounts
        .iter()
        .filter(|account| account.matches_search(search))
        .collect();

    let content = html! {
        div class="grid grid-cols-1 sm:grid-cols-3 gap-4" data-stat-cards
        {
            (stat_card("Total Balance", &format_currency(primary_balance, primary_currency)))
            (stat_card("Total Accounts", &accounts.len().to_string()))
            (stat_card("Currencies", &totals.len().to_string()))
        }

        @if totals.len() > 1 {
            (currency_breakdown_view(&totals))
        }

        form method="get" action=(endpoints::BANK_ACCOUNTS_VIEW) role="search"
        {
            input
                type="search"
                name="search"
                value=(search)
                placeholder="Search accounts..."
                aria-label="Search accounts"
                class=(FORM_TEXT_INPUT_STYLE);
        }

        @if matching.is_empty() {
            (empty_state(
                "No accounts match your search",
                "Try a different name, bank or account number.",
                None,
            ))
        } @else {
            ul class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4"
            {
                @for account in matching {
                    (account_card(account))
                }
            }
        }
    };

    page(&content)
}

fn currency_breakdown_view(totals: &[(Currency, f64)]) -> Markup {
    html! {
        section class=(CARD_STYLE) data-currency-breakdown
        {
            h2 class="mb-3 text-lg font-semibold" { "Balance by Currency" }

            ul class="grid grid-cols-2 md:grid-cols-4 gap-3"
            {
                @for (currency, total) in totals {
                    li class="flex items-center gap-2"
                    {
                        span class="text-xl" { (currency.symbol()) }
                        div
                        {
                            p class="text-xs text-gray-500 dark:text-gray-400" { (currency.code()) }
                            p class="font-semibold tabular-nums" { (format_currency(*total, *currency)) }
                        }
                    }
                }
            }
        }
    }
}

fn account_card(account: &BankAccount) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_BANK_ACCOUNT_VIEW, account.id);
    let delete_url = format_endpoint(endpoints::BANK_ACCOUNT_API, account.id);

    html! {
        li class=(CARD_STYLE) data-account-card="true"
        {
            div class="flex items-start justify-between gap-3"
            {
                div
                {
                    h3 class="font-semibold" { (account.name) }
                    p class="text-sm text-gray-500 dark:text-gray-400" { (account.bank_name) }
                }

                @if let Some(account_type) = account.account_type {
                    span class=(BADGE_STYLE) { (account_type.label()) }
                }
            }

            p class="mt-2 text-sm font-mono text-gray-500 dark:text-gray-400" { (account.account_number) }

            p class="mt-2 text-2xl font-bold tabular-nums" data-balance
            {
                (format_currency(account.balance, account.currency))
            }

            div class="mt-3 text-sm"
            {
                (edit_delete_action_links(
                    &edit_url,
                    &delete_url,
                    &format!("Are you sure you want to delete \"{}\"?", account.name),
                    "closest [data-account-card='true']",
                    "delete",
                ))
            }
        }
    }
}
