//! The transaction domain model, filters, totals and form validation.

use serde::Deserialize;
use time::Date;

use crate::{
    category::CategoryType,
    form::{FieldErrors, non_blank, parse_amount, parse_date},
    records::{Lookup, RecordId},
};

/// Whether a transaction is money in or money out. Shares its values with
/// category types.
pub type TransactionType = CategoryType;

/// The category a transaction is filed under, with the category's name when
/// the record store returned it.
pub type CategoryRef = Lookup;

/// An income or expense entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: RecordId,
    /// The amount of money, always positive. The type says which way it went.
    pub amount: f64,
    pub category: Option<CategoryRef>,
    pub date: Date,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// The amount with expenses negated.
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category
            .as_ref()
            .and_then(|category| category.name.as_deref())
    }
}

/// Narrows a transaction listing. Every filter that is set must match.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransactionFilter {
    /// The earliest date to include.
    pub start_date: Option<Date>,
    /// The latest date to include.
    pub end_date: Option<Date>,
    pub category_id: Option<RecordId>,
    pub transaction_type: Option<TransactionType>,
}

/// Income, expenses and their difference for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

impl Totals {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        transactions
            .into_iter()
            .fold(Totals::default(), |mut totals, transaction| {
                match transaction.transaction_type {
                    TransactionType::Income => totals.income += transaction.amount,
                    TransactionType::Expense => totals.expenses += transaction.amount,
                }

                totals
            })
    }

    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// A validated transaction, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionData {
    pub amount: f64,
    pub category_id: Option<RecordId>,
    pub date: Date,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub transaction_type: TransactionType,
}

/// The raw transaction form as submitted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransactionForm {
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub amount: String,
    pub date: String,
    pub description: String,
    pub notes: String,
    /// The category ID, or blank for no category.
    pub category: String,
}

impl TransactionForm {
    /// A blank expense dated `today`.
    pub fn new_transaction(today: Date) -> Self {
        Self {
            transaction_type: TransactionType::Expense.as_str().to_owned(),
            date: today.to_string(),
            ..Default::default()
        }
    }

    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            transaction_type: transaction.transaction_type.as_str().to_owned(),
            amount: transaction.amount.to_string(),
            date: transaction.date.to_string(),
            description: transaction.description.clone().unwrap_or_default(),
            notes: transaction.notes.clone().unwrap_or_default(),
            category: transaction
                .category
                .as_ref()
                .map(|category| category.id.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<TransactionData, FieldErrors> {
        let mut errors = FieldErrors::default();

        let transaction_type = self.transaction_type.parse::<TransactionType>().ok();
        if transaction_type.is_none() {
            errors.add("type", "Transaction type is required");
        }

        let amount = parse_amount(&self.amount).filter(|amount| *amount > 0.0);
        if amount.is_none() {
            errors.add("amount", "Amount must be greater than zero");
        }

        let date = parse_date(&self.date);
        if date.is_none() {
            errors.add("date", "Date is required");
        }

        let category_id = match non_blank(&self.category) {
            None => None,
            Some(category) => {
                let id = category.parse::<RecordId>().ok();
                if id.is_none() {
                    errors.add("category", "Choose a category from the list");
                }
                id
            }
        };

        match (transaction_type, amount, date) {
            (Some(transaction_type), Some(amount), Some(date)) if errors.is_empty() => {
                Ok(TransactionData {
                    amount,
                    category_id,
                    date,
                    description: non_blank(&self.description),
                    notes: non_blank(&self.notes),
                    transaction_type,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{Totals, Transaction, TransactionForm, TransactionType};
    use crate::records::Lookup;

    fn transaction(amount: f64, transaction_type: TransactionType) -> Transaction {
        Transaction {
            id: 1,
            amount,
            category: None,
            date: date!(2026 - 10 - 01),
            description: None,
            notes: None,
            transaction_type,
        }
    }

    #[test]
    fn totals_income_and_expenses() {
        let transactions = [
            transaction(1000.0, TransactionType::Income),
            transaction(250.0, TransactionType::Expense),
            transaction(50.0, TransactionType::Expense),
        ];

        let totals = Totals::from_transactions(&transactions);

        assert_eq!(totals.income, 1000.0);
        assert_eq!(totals.expenses, 300.0);
        assert_eq!(totals.net(), 700.0);
    }

    #[test]
    fn expenses_are_negative_when_signed() {
        assert_eq!(transaction(5.0, TransactionType::Expense).signed_amount(), -5.0);
        assert_eq!(transaction(5.0, TransactionType::Income).signed_amount(), 5.0);
    }

    #[test]
    fn validates_amount_date_and_type() {
        let errors = TransactionForm {
            transaction_type: "refund".to_owned(),
            amount: "-3".to_owned(),
            date: "yesterday".to_owned(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        assert_eq!(errors.get("type"), Some("Transaction type is required"));
        assert_eq!(errors.get("amount"), Some("Amount must be greater than zero"));
        assert_eq!(errors.get("date"), Some("Date is required"));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let data = TransactionForm {
            transaction_type: "expense".to_owned(),
            amount: "12.5".to_owned(),
            date: "2026-10-18".to_owned(),
            description: "  ".to_owned(),
            notes: String::new(),
            category: String::new(),
        }
        .validate()
        .unwrap();

        assert_eq!(data.amount, 12.5);
        assert_eq!(data.date, date!(2026 - 10 - 18));
        assert_eq!(data.description, None);
        assert_eq!(data.notes, None);
        assert_eq!(data.category_id, None);
    }

    #[test]
    fn form_round_trips_category_id() {
        let mut stored = transaction(20.0, TransactionType::Income);
        stored.category = Some(Lookup {
            id: 9,
            name: Some("Salary".to_owned()),
        });

        let form = TransactionForm::from_transaction(&stored);

        assert_eq!(form.category, "9");
        assert_eq!(form.date, "2026-10-01");
        assert_eq!(stored.category_name(), Some("Salary"));
        assert_eq!(form.validate().unwrap().category_id, Some(9));
    }
}
