//! The savings goal domain model, progress and validation.

use serde::Deserialize;
use time::Date;

use crate::{
    form::{FieldErrors, non_blank, parse_amount, parse_date},
    records::RecordId,
};

/// An amount of money being saved towards.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: RecordId,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<Date>,
}

impl Goal {
    pub fn progress(&self) -> GoalProgress {
        GoalProgress::new(self.current_amount, self.target_amount)
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

/// How far along a goal is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    /// The percentage saved, clamped to [0, 100].
    pub progress: f64,
    /// The amount left to save, never negative.
    pub remaining: f64,
    pub is_completed: bool,
}

impl GoalProgress {
    pub fn new(current_amount: f64, target_amount: f64) -> Self {
        let progress = if target_amount <= 0.0 {
            100.0
        } else {
            (current_amount / target_amount * 100.0).clamp(0.0, 100.0)
        };

        Self {
            progress,
            remaining: (target_amount - current_amount).max(0.0),
            is_completed: current_amount >= target_amount,
        }
    }
}

/// A validated goal, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalData {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<Date>,
}

impl From<&Goal> for GoalData {
    fn from(goal: &Goal) -> Self {
        Self {
            name: goal.name.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            deadline: goal.deadline,
        }
    }
}

/// The raw goal form as submitted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GoalForm {
    pub name: String,
    pub target_amount: String,
    /// Blank means nothing saved yet.
    pub current_amount: String,
    /// Blank means no deadline.
    pub deadline: String,
}

impl GoalForm {
    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            name: goal.name.clone(),
            target_amount: goal.target_amount.to_string(),
            current_amount: goal.current_amount.to_string(),
            deadline: goal
                .deadline
                .map(|deadline| deadline.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<GoalData, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = non_blank(&self.name);
        if name.is_none() {
            errors.add("name", "Goal name is required");
        }

        let target_amount = parse_amount(&self.target_amount).filter(|amount| *amount > 0.0);
        if target_amount.is_none() {
            errors.add("target_amount", "Target amount must be greater than zero");
        }

        let current_amount = if self.current_amount.trim().is_empty() {
            Some(0.0)
        } else {
            parse_amount(&self.current_amount).filter(|amount| *amount >= 0.0)
        };
        if current_amount.is_none() {
            errors.add("current_amount", "Current amount cannot be negative");
        }

        let deadline = match non_blank(&self.deadline) {
            None => None,
            Some(text) => {
                let deadline = parse_date(&text);
                if deadline.is_none() {
                    errors.add("deadline", "Deadline must be a valid date");
                }
                deadline
            }
        };

        match (name, target_amount, current_amount) {
            (Some(name), Some(target_amount), Some(current_amount)) if errors.is_empty() => {
                Ok(GoalData {
                    name,
                    target_amount,
                    current_amount,
                    deadline,
                })
            }
            _ => Err(errors),
        }
    }
}

/// The form for putting money towards a goal.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AddFundsForm {
    pub amount: String,
}

impl AddFundsForm {
    pub fn validate(&self) -> Result<f64, FieldErrors> {
        match parse_amount(&self.amount).filter(|amount| *amount > 0.0) {
            Some(amount) => Ok(amount),
            None => {
                let mut errors = FieldErrors::default();
                errors.add("amount", "Amount must be greater than zero");
                Err(errors)
            }
        }
    }
}
