//! The budget domain model, the month a budget covers and validation.

use std::{fmt::Display, str::FromStr};

use serde::Deserialize;
use time::{Date, Duration, Month};

use crate::{
    form::{FieldErrors, parse_amount},
    records::RecordId,
};

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BudgetMonth(Date);

impl BudgetMonth {
    /// The month containing `date`.
    pub fn from_date(date: Date) -> Self {
        Self(date - Duration::days(i64::from(date.day()) - 1))
    }

    pub fn first_day(self) -> Date {
        self.0
    }

    pub fn last_day(self) -> Date {
        let next = self.next().0;

        if next == self.0 {
            self.0
        } else {
            next - Duration::days(1)
        }
    }

    /// The month before this one. The earliest representable month has no
    /// previous month and returns itself.
    pub fn previous(self) -> Self {
        self.0
            .previous_day()
            .map_or(self, BudgetMonth::from_date)
    }

    /// The month after this one. The latest representable month returns itself.
    pub fn next(self) -> Self {
        self.0
            .checked_add(Duration::days(31))
            .map_or(self, BudgetMonth::from_date)
    }

    /// The month name and year, e.g. "October 2026".
    pub fn label(self) -> String {
        format!("{} {}", self.0.month(), self.0.year())
    }
}

impl Display for BudgetMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.0.year(), u8::from(self.0.month()))
    }
}

/// The error for text that is not a month written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidMonth;

impl FromStr for BudgetMonth {
    type Err = InvalidMonth;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (year, month) = text.trim().split_once('-').ok_or(InvalidMonth)?;

        let all_digits = |part: &str, len| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(year, 4) || !all_digits(month, 2) {
            return Err(InvalidMonth);
        }

        let year = year.parse::<i32>().map_err(|_| InvalidMonth)?;
        let month = month
            .parse::<u8>()
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .ok_or(InvalidMonth)?;

        Date::from_calendar_date(year, month, 1)
            .map(BudgetMonth)
            .map_err(|_| InvalidMonth)
    }
}

/// A spending limit for one category in one month.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: RecordId,
    pub amount: f64,
    pub month: BudgetMonth,
    pub category_id: Option<RecordId>,
    pub category_name: Option<String>,
    /// The amount spent in the category during the month. This is worked out
    /// from transactions and is never stored.
    pub spent: f64,
}

impl Budget {
    pub fn remaining(&self) -> f64 {
        self.amount - self.spent
    }

    /// How much of the budget has been spent, as a percentage. May exceed 100.
    pub fn percent_spent(&self) -> f64 {
        if self.amount <= 0.0 {
            return if self.spent > 0.0 { 100.0 } else { 0.0 };
        }

        self.spent / self.amount * 100.0
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.amount
    }
}

/// A validated budget, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetData {
    pub amount: f64,
    pub month: BudgetMonth,
    pub category_id: RecordId,
}

/// The raw budget form as submitted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BudgetForm {
    pub amount: String,
    pub month: String,
    pub category_id: String,
}

impl BudgetForm {
    pub fn new_budget(month: BudgetMonth) -> Self {
        Self {
            month: month.to_string(),
            ..Default::default()
        }
    }

    pub fn from_budget(budget: &Budget) -> Self {
        Self {
            amount: budget.amount.to_string(),
            month: budget.month.to_string(),
            category_id: budget
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<BudgetData, FieldErrors> {
        let mut errors = FieldErrors::default();

        let amount = parse_amount(&self.amount).filter(|amount| *amount > 0.0);
        if amount.is_none() {
            errors.add("amount", "Amount must be greater than zero");
        }

        let month = self.month.parse::<BudgetMonth>().ok();
        if month.is_none() {
            errors.add("month", "Month must be in the format YYYY-MM");
        }

        let category_id = self.category_id.trim().parse::<RecordId>().ok();
        if category_id.is_none() {
            errors.add("category_id", "Category is required");
        }

        match (amount, month, category_id) {
            (Some(amount), Some(month), Some(category_id)) => Ok(BudgetData {
                amount,
                month,
                category_id,
            }),
            _ => Err(errors),
        }
    }
}
