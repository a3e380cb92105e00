//! The category domain model and its validation.

use std::{fmt::Display, str::FromStr};

use serde::Deserialize;

use crate::{
    form::{FieldErrors, non_blank},
    records::RecordId,
};

/// The colour given to categories created without one.
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// The icon given to categories created without one.
pub const DEFAULT_ICON: &str = "ShoppingCart";

/// The icon names offered on the category form.
pub const ICONS: [&str; 12] = [
    "ShoppingCart",
    "Home",
    "Car",
    "Utensils",
    "Zap",
    "Heart",
    "Plane",
    "Gift",
    "GraduationCap",
    "Briefcase",
    "TrendingUp",
    "DollarSign",
];

/// Whether money comes in or goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    pub const ALL: [CategoryType; 2] = [CategoryType::Income, CategoryType::Expense];

    /// The value stored in the record store and submitted by forms.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryType::Income => "Income",
            CategoryType::Expense => "Expense",
        }
    }
}

impl Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = ();

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_lowercase().as_str() {
            "income" => Ok(CategoryType::Income),
            "expense" => Ok(CategoryType::Expense),
            _ => Err(()),
        }
    }
}

/// A transaction category, e.g. "Groceries".
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub category_type: CategoryType,
    pub color: String,
    pub icon: String,
}

/// A validated category, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryData {
    pub name: String,
    pub category_type: CategoryType,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// The raw category form as submitted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: String,
    pub color: String,
    pub icon: String,
}

impl CategoryForm {
    /// A blank expense category with the default colour and icon.
    pub fn new_category() -> Self {
        Self {
            category_type: CategoryType::Expense.as_str().to_owned(),
            color: DEFAULT_COLOR.to_owned(),
            icon: DEFAULT_ICON.to_owned(),
            ..Default::default()
        }
    }

    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            category_type: category.category_type.as_str().to_owned(),
            color: category.color.clone(),
            icon: category.icon.clone(),
        }
    }

    pub fn validate(&self) -> Result<CategoryData, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = non_blank(&self.name);
        if name.is_none() {
            errors.add("name", "Category name is required");
        }

        let category_type = self.category_type.parse::<CategoryType>().ok();
        if category_type.is_none() {
            errors.add("type", "Category type is required");
        }

        let color = non_blank(&self.color);
        if color.as_deref().is_some_and(|color| !is_hex_colour(color)) {
            errors.add("color", "Color must be a hex colour like #3B82F6");
        }

        errors.into_result(|| CategoryData {
            name: name.unwrap_or_default(),
            category_type: category_type.unwrap_or(CategoryType::Expense),
            color,
            icon: non_blank(&self.icon),
        })
    }
}

/// Whether `text` is a colour of the form `#RRGGBB`.
fn is_hex_colour(text: &str) -> bool {
    text.strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
