//! Totals per month and per category for the report charts.

use std::collections::HashMap;

use time::macros::format_description;

use crate::{
    budget::BudgetMonth,
    transaction::{Totals, Transaction, TransactionType},
};

/// The label for expenses without a category.
pub(super) const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// The twelve months ending with `current`, oldest first.
pub(super) fn last_twelve_months(current: BudgetMonth) -> Vec<BudgetMonth> {
    let mut months = Vec::with_capacity(12);
    let mut month = current;

    for _ in 0..12 {
        months.push(month);
        month = month.previous();
    }

    months.reverse();
    months
}

/// Income and expense totals for each of `months`, in the same order.
/// Transactions outside `months` are ignored.
pub(super) fn totals_by_month(transactions: &[Transaction], months: &[BudgetMonth]) -> Vec<Totals> {
    let mut by_month: HashMap<BudgetMonth, Vec<&Transaction>> = HashMap::new();

    for transaction in transactions {
        by_month
            .entry(BudgetMonth::from_date(transaction.date))
            .or_default()
            .push(transaction);
    }

    months
        .iter()
        .map(|month| {
            by_month
                .get(month)
                .map(|transactions| Totals::from_transactions(transactions.iter().copied()))
                .unwrap_or_default()
        })
        .collect()
}

/// Short month labels for a chart axis, e.g. "Oct 2026".
pub(super) fn format_month_labels(months: &[BudgetMonth]) -> Vec<String> {
    months
        .iter()
        .map(|month| {
            month
                .first_day()
                .format(format_description!("[month repr:short] [year]"))
                .unwrap_or_else(|_| month.to_string())
        })
        .collect()
}

/// The total spent per category, largest first. Uncategorized spending is
/// always listed last.
pub(super) fn expenses_by_category(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense)
    {
        let category = transaction.category_name().unwrap_or(UNCATEGORIZED_LABEL);
        *totals.entry(category).or_insert(0.0) += transaction.amount;
    }

    let uncategorized = totals.remove(UNCATEGORIZED_LABEL);

    let mut sorted: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(category, total)| (category.to_owned(), total))
        .collect();
    sorted.sort_by(|(a_name, a), (b_name, b)| b.total_cmp(a).then_with(|| a_name.cmp(b_name)));

    if let Some(total) = uncategorized {
        sorted.push((UNCATEGORIZED_LABEL.to_owned(), total));
    }

    sorted
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        budget::BudgetMonth,
        records::Lookup,
        reports::aggregation::{
            expenses_by_category, format_month_labels, last_twelve_months, totals_by_month,
        },
        transaction::{Transaction, TransactionType},
    };

    fn transaction(
        amount: f64,
        date: Date,
        transaction_type: TransactionType,
        category: Option<&str>,
    ) -> Transaction {
        Transaction {
            id: 1,
            amount,
            category: category.map(|name| Lookup {
                id: 1,
                name: Some(name.to_owned()),
            }),
            date,
            description: None,
            notes: None,
            transaction_type,
        }
    }

    #[test]
    fn twelve_months_end_with_current_month() {
        let months = last_twelve_months(BudgetMonth::from_date(date!(2026 - 03 - 18)));

        assert_eq!(months.len(), 12);
        assert_eq!(months[0].to_string(), "2025-04");
        assert_eq!(months[11].to_string(), "2026-03");
    }

    #[test]
    fn totals_each_month_including_empty_ones() {
        let months = [
            BudgetMonth::from_date(date!(2026 - 01 - 01)),
            BudgetMonth::from_date(date!(2026 - 02 - 01)),
            BudgetMonth::from_date(date!(2026 - 03 - 01)),
        ];
        let transactions = [
            transaction(1000.0, date!(2026 - 01 - 31), TransactionType::Income, None),
            transaction(200.0, date!(2026 - 01 - 02), TransactionType::Expense, None),
            transaction(50.0, date!(2026 - 03 - 15), TransactionType::Expense, None),
            transaction(75.0, date!(2025 - 12 - 31), TransactionType::Expense, None),
        ];

        let totals = totals_by_month(&transactions, &months);

        assert_eq!(totals[0].income, 1000.0);
        assert_eq!(totals[0].expenses, 200.0);
        assert_eq!(totals[1].net(), 0.0);
        assert_eq!(totals[2].expenses, 50.0);
    }

    #[test]
    fn labels_months_with_year() {
        let months = [BudgetMonth::from_date(date!(2026 - 10 - 05))];

        assert_eq!(format_month_labels(&months), ["Oct 2026"]);
    }

    #[test]
    fn groups_expenses_by_category_largest_first() {
        let day = date!(2026 - 10 - 01);
        let transactions = [
            transaction(30.0, day, TransactionType::Expense, Some("Dining")),
            transaction(500.0, day, TransactionType::Expense, None),
            transaction(120.0, day, TransactionType::Expense, Some("Groceries")),
            transaction(40.0, day, TransactionType::Expense, Some("Dining")),
            transaction(2000.0, day, TransactionType::Income, Some("Salary")),
        ];

        let totals = expenses_by_category(&transactions);

        assert_eq!(
            totals,
            [
                ("Groceries".to_owned(), 120.0),
                ("Dining".to_owned(), 70.0),
                ("Uncategorized".to_owned(), 500.0),
            ]
        );
    }
}
