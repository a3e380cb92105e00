//! The page and API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/goals/{goal_id}/edit', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with this month's summary.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing and filtering transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The page for a month's budgets.
pub const BUDGETS_VIEW: &str = "/budgets";
/// The page for creating a new budget.
pub const NEW_BUDGET_VIEW: &str = "/budgets/new";
/// The page for editing an existing budget.
pub const EDIT_BUDGET_VIEW: &str = "/budgets/{budget_id}/edit";
/// The page for listing savings goals.
pub const GOALS_VIEW: &str = "/goals";
/// The page for creating a new savings goal.
pub const NEW_GOAL_VIEW: &str = "/goals/new";
/// The page for editing an existing savings goal.
pub const EDIT_GOAL_VIEW: &str = "/goals/{goal_id}/edit";
/// The page for listing categories.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/categories/new";
/// The page for editing an existing category.
pub const EDIT_CATEGORY_VIEW: &str = "/categories/{category_id}/edit";
/// The page with income and expense charts.
pub const REPORTS_VIEW: &str = "/reports";
/// The page for listing bank accounts.
pub const BANK_ACCOUNTS_VIEW: &str = "/bank-accounts";
/// The page for creating a new bank account.
pub const NEW_BANK_ACCOUNT_VIEW: &str = "/bank-accounts/new";
/// The page for editing an existing bank account.
pub const EDIT_BANK_ACCOUNT_VIEW: &str = "/bank-accounts/{account_id}/edit";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a transaction.
pub const TRANSACTION_API: &str = "/api/transactions/{transaction_id}";
/// The route to create a budget.
pub const BUDGETS_API: &str = "/api/budgets";
/// The route to update or delete a budget.
pub const BUDGET_API: &str = "/api/budgets/{budget_id}";
/// The route to create a savings goal.
pub const GOALS_API: &str = "/api/goals";
/// The route to update or delete a savings goal.
pub const GOAL_API: &str = "/api/goals/{goal_id}";
/// The route to add funds to a savings goal.
pub const GOAL_FUNDS_API: &str = "/api/goals/{goal_id}/funds";
/// The route to create a category.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route to update or delete a category.
pub const CATEGORY_API: &str = "/api/categories/{category_id}";
/// The route to create a bank account.
pub const BANK_ACCOUNTS_API: &str = "/api/bank-accounts";
/// The route to update or delete a bank account.
pub const BANK_ACCOUNT_API: &str = "/api/bank-accounts/{account_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace, e.g.
/// '{goal_id}' in '/goals/{goal_id}/edit'. Only the first parameter is
/// replaced. If no parameter is found, the original path is returned.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map(|offset| start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end..])
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    #[track_caller]
    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        for endpoint in [
            endpoints::ROOT,
            endpoints::DASHBOARD_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::NEW_TRANSACTION_VIEW,
            endpoints::BUDGETS_VIEW,
            endpoints::NEW_BUDGET_VIEW,
            endpoints::GOALS_VIEW,
            endpoints::NEW_GOAL_VIEW,
            endpoints::CATEGORIES_VIEW,
            endpoints::NEW_CATEGORY_VIEW,
            endpoints::REPORTS_VIEW,
            endpoints::BANK_ACCOUNTS_VIEW,
            endpoints::NEW_BANK_ACCOUNT_VIEW,
            endpoints::STATIC,
            endpoints::TRANSACTIONS_API,
            endpoints::BUDGETS_API,
            endpoints::GOALS_API,
            endpoints::CATEGORIES_API,
            endpoints::BANK_ACCOUNTS_API,
        ] {
            assert_endpoint_is_valid_uri(endpoint);
        }
    }

    #[test]
    fn parameterised_endpoints_format_to_valid_uris() {
        for endpoint in [
            endpoints::EDIT_TRANSACTION_VIEW,
            endpoints::EDIT_BUDGET_VIEW,
            endpoints::EDIT_GOAL_VIEW,
            endpoints::EDIT_CATEGORY_VIEW,
            endpoints::EDIT_BANK_ACCOUNT_VIEW,
            endpoints::TRANSACTION_API,
            endpoints::BUDGET_API,
            endpoints::GOAL_API,
            endpoints::GOAL_FUNDS_API,
            endpoints::CATEGORY_API,
            endpoints::BANK_ACCOUNT_API,
        ] {
            let formatted = format_endpoint(endpoint, 42);
            assert!(!formatted.contains('{'), "{formatted} still has a parameter");
            assert_endpoint_is_valid_uri(&formatted);
        }
    }

    #[test]
    fn replaces_parameter() {
        assert_eq!(format_endpoint("/hello/{world_id}", 1), "/hello/1");
        assert_eq!(format_endpoint("/hello/{world}/bye", 1), "/hello/1/bye");
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        assert_eq!(format_endpoint("/hello/world", 1), "/hello/world");
    }
}
