//! Helpers for reading the loosely typed values the record store returns.
//!
//! Numbers may arrive as JSON numbers or numeric strings, and lookups as a
//! bare record ID or an object with the referenced record's `Id` and `Name`.

use serde_json::Value;
use time::{Date, macros::format_description};

use super::{Record, RecordId};
use crate::Error;

/// A reference to another record, as stored in a lookup field.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub id: RecordId,
    pub name: Option<String>,
}

/// Read the system `Id` column.
///
/// # Errors
/// Returns [Error::MalformedRecord] if the record has no usable `Id`.
pub fn record_id(record: &Record) -> Result<RecordId, Error> {
    record
        .get("Id")
        .and_then(value_as_id)
        .ok_or_else(|| Error::MalformedRecord("Id".to_owned()))
}

/// Read a text field. Numbers are converted to text, null and missing fields are `None`.
pub fn record_text(record: &Record, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}

/// Read a text field, using `default` when it is missing or blank.
pub fn record_text_or(record: &Record, field: &str, default: &str) -> String {
    record_text(record, field)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Read a numeric field stored either as a number or as numeric text.
///
/// Text is read the way a lenient float parser would: leading whitespace is
/// skipped and the longest numeric prefix is used, so "12.5 USD" reads as 12.5.
pub fn record_number(record: &Record, field: &str) -> Option<f64> {
    match record.get(field)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_float(text),
        _ => None,
    }
}

/// Read a lookup field stored either as a record ID or as `{"Id":..,"Name":..}`.
pub fn record_lookup(record: &Record, field: &str) -> Option<Lookup> {
    match record.get(field)? {
        Value::Object(object) => {
            let id = object.get("Id").and_then(value_as_id)?;
            let name = ["Name", "name_c"]
                .into_iter()
                .find_map(|key| object.get(key).and_then(Value::as_str))
                .map(str::to_owned);

            Some(Lookup { id, name })
        }
        value => value_as_id(value).map(|id| Lookup { id, name: None }),
    }
}

/// Read a date field stored as `YYYY-MM-DD`, optionally followed by a time.
pub fn record_date(record: &Record, field: &str) -> Option<Date> {
    let text = record.get(field)?.as_str()?;
    let date_part = text.get(..10)?;

    Date::parse(date_part, format_description!("[year]-[month]-[day]")).ok()
}

fn value_as_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as RecordId)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn parse_float(text: &str) -> Option<f64> {
    let text = text.trim_start();

    text[..numeric_prefix_len(text)]
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// The byte length of the longest prefix of `text` shaped like a decimal
/// number: an optional sign, digits with an optional fraction, and an
/// optional exponent.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = digits_from(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits_from(end + 1);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits == 0 && fraction_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_digits = digits_from(end + 1 + sign);
        if exponent_digits > 0 {
            end += 1 + sign + exponent_digits;
        }
    }

    end
}
