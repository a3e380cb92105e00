//! The transactions page: a filter bar, totals for the filtered transactions
//! and a paginated table.

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    category::{Category, CategoryService, CategoryType},
    currency::Currency,
    endpoints::{self, format_endpoint},
    form::parse_date,
    html::{
        BUTTON_LINK_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, edit_delete_action_links, empty_state,
        error_state, format_currency, stat_card,
    },
    navigation::NavBar,
    pagination::{PaginationConfig, create_pagination_indicators, paginate, pagination_view},
    records::RecordId,
    transaction::{
        core::{Totals, Transaction, TransactionFilter},
        service::TransactionService,
    },
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    pub transactions: TransactionService,
    pub categories: CategoryService,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: TransactionService::from_ref(state),
            categories: CategoryService::from_ref(state),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The filters and page number of the transactions page.
///
/// Values that cannot be parsed are ignored rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionsQuery {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub end_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub transaction_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
}

impl TransactionsQuery {
    fn to_filter(&self) -> TransactionFilter {
        TransactionFilter {
            start_date: parse_date(&self.start_date),
            end_date: parse_date(&self.end_date),
            category_id: self.category.trim().parse::<RecordId>().ok(),
            transaction_type: self.transaction_type.parse().ok(),
        }
    }

    fn has_filters(&self) -> bool {
        self.to_filter() != TransactionFilter::default()
    }

    /// The URL of page `page` with the same filters.
    fn page_url(&self, page: u64) -> String {
        let query = TransactionsQuery {
            page: Some(page),
            ..self.clone()
        };

        match serde_urlencoded::to_string(&query) {
            Ok(query) => format!("{}?{query}", endpoints::TRANSACTIONS_VIEW),
            Err(error) => {
                tracing::warn!("could not encode transactions query: {error}");
                endpoints::TRANSACTIONS_VIEW.to_owned()
            }
        }
    }
}

/// Renders the transactions matching the query filters, one page at a time.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(query): Query<TransactionsQuery>,
) -> Response {
    let transactions = match state.transactions.get_filtered(&query.to_filter()).await {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not load transactions: {error}");

            let content = error_state("Failed to load transactions", endpoints::TRANSACTIONS_VIEW);
            return (StatusCode::INTERNAL_SERVER_ERROR, page(&content)).into_response();
        }
    };

    // The filter bar still works without the category list.
    let categories = state
        .categories
        .get_all()
        .await
        .inspect_err(|error| tracing::error!("could not load categories for filters: {error}"))
        .unwrap_or_default();

    page(&transactions_view(
        &transactions,
        &categories,
        &query,
        &state.pagination_config,
    ))
    .into_response()
}

fn page(content: &Markup) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-6xl space-y-6"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(BUTTON_LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                (content)
            }
        }
    };

    base("Transactions", &[], &content)
}

fn transactions_view(
    transactions: &[Transaction],
    categories: &[Category],
    query: &TransactionsQuery,
    pagination_config: &PaginationConfig,
) -> Markup {
    if transactions.is_empty() && !query.has_filters() {
        return empty_state(
            "No transactions yet",
            "Record your income and expenses to see them here.",
            Some((endpoints::NEW_TRANSACTION_VIEW, "Add Transaction")),
        );
    }

    let totals = Totals::from_transactions(transactions);
    let page = paginate(
        transactions,
        query.page.unwrap_or(1),
        pagination_config.page_size,
    );
    let indicators =
        create_pagination_indicators(page.page, page.page_count, pagination_config.max_pages);

    html! {
        (filter_bar(query, categories))

        div class="grid grid-cols-1 sm:grid-cols-3 gap-4" data-totals
        {
            (stat_card("Income", &format_currency(totals.income, Currency::default())))
            (stat_card("Expenses", &format_currency(totals.expenses, Currency::default())))
            (stat_card("Net", &format_currency(totals.net(), Currency::default())))
        }

        @if transactions.is_empty() {
            (empty_state(
                "No transactions match your filters",
                "Try widening the date range or clearing the filters.",
                Some((endpoints::TRANSACTIONS_VIEW, "Clear Filters")),
            ))
        } @else {
            div class="relative overflow-x-auto shadow-md rounded-lg"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class="px-6 py-4 text-right" { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                        }
                    }

                    tbody
                    {
                        @for transaction in page.items {
                            (transaction_row(transaction))
                        }
                    }
                }
            }

            @if page.page_count > 1 {
                (pagination_view(&indicators, |page| query.page_url(page)))
            }
        }
    }
}

fn filter_bar(query: &TransactionsQuery, categories: &[Category]) -> Markup {
    html! {
        form method="get" action=(endpoints::TRANSACTIONS_VIEW) class=(CARD_STYLE) data-filter-bar
        {
            div class="grid grid-cols-2 md:grid-cols-5 gap-4 items-end"
            {
                div
                {
                    label for="start_date" class=(FORM_LABEL_STYLE) { "From" }
                    input id="start_date" type="date" name="start_date" value=(query.start_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="end_date" class=(FORM_LABEL_STYLE) { "To" }
                    input id="end_date" type="date" name="end_date" value=(query.end_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    select id="category" name="category" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" { "All categories" }

                        @for category in categories {
                            @let value = category.id.to_string();
                            option value=(value) selected[query.category == value] { (category.name) }
                        }
                    }
                }

                div
                {
                    label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                    select id="type" name="type" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" { "All types" }

                        @for transaction_type in CategoryType::ALL {
                            option
                                value=(transaction_type.as_str())
                                selected[query.transaction_type == transaction_type.as_str()]
                            {
                                (transaction_type.label())
                            }
                        }
                    }
                }

                div class="flex items-center gap-4"
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Filter" }
                    a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Clear" }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_url = format_endpoint(endpoints::TRANSACTION_API, transaction.id);
    let signed_amount = transaction.signed_amount();
    let amount_class = if signed_amount < 0.0 {
        "px-6 py-4 text-right text-red-700 dark:text-red-300"
    } else {
        "px-6 py-4 text-right text-green-700 dark:text-green-300"
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(transaction.date.to_string()) { (transaction.date.to_string()) }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.description.as_deref().unwrap_or("-")) }
            td class=(TABLE_CELL_STYLE) { (transaction.category_name().unwrap_or("Uncategorized")) }
            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type.label()) }
            td class=(amount_class) data-amount
            {
                (format_currency(signed_amount, Currency::default()))
            }
            td class=(TABLE_CELL_STYLE)
            {
                (edit_delete_action_links(
                    &edit_url,
                    &delete_url,
                    "Are you sure you want to delete this transaction? This cannot be undone.",
                    "closest tr",
                    "delete",
                ))
            }
        }
    }
}
