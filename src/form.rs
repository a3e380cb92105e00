//! Field-level validation errors shared by the create and edit forms.

use std::collections::BTreeMap;

use time::{Date, macros::format_description};

/// Validation messages keyed by the name of the form field they belong to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Record `message` against `field`. The first message for a field wins.
    pub fn add(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_owned());
    }

    /// The message for `field`, if it failed validation.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when no field failed, otherwise the errors.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Where a create or edit form submits to.
#[derive(Debug, Clone, PartialEq)]
pub enum FormTarget {
    /// `hx-post` to the collection endpoint.
    Create(String),
    /// `hx-put` to the record's own endpoint.
    Update(String),
}

impl FormTarget {
    pub fn post_url(&self) -> Option<&str> {
        match self {
            FormTarget::Create(url) => Some(url),
            FormTarget::Update(_) => None,
        }
    }

    pub fn put_url(&self) -> Option<&str> {
        match self {
            FormTarget::Create(_) => None,
            FormTarget::Update(url) => Some(url),
        }
    }
}

/// Parse a decimal amount typed into a form, ignoring surrounding whitespace.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Parse a date written `YYYY-MM-DD`, as submitted by date inputs.
pub fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Trim `text`, mapping blank text to `None`.
pub fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_owned())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{FieldErrors, non_blank, parse_amount, parse_date};

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::default();
        errors.add("balance", "Valid balance is required");
        errors.add("balance", "Balance cannot be negative");

        assert_eq!(errors.get("balance"), Some("Valid balance is required"));
        assert_eq!(errors.get("name"), None);
        assert!(errors.into_result(|| ()).is_err());
    }

    #[test]
    fn empty_errors_are_ok() {
        assert_eq!(FieldErrors::default().into_result(|| 5), Ok(5));
    }

    #[test]
    fn parses_amounts() {
        assert_eq!(parse_amount(" 12.50 "), Some(12.5));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn blank_text_is_none() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" Rent "), Some("Rent".to_owned()));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2026-02-28"), Some(date!(2026 - 02 - 28)));
        assert_eq!(parse_date("2026-02-30"), None);
        assert_eq!(parse_date(""), None);
    }
}
