//! Helpers for turning raw client input into validated field values.

use time::{Date, macros::format_description};

use crate::Error;

/// Trim `value` and return it, or `None` if it is absent or blank.
///
/// Browsers send empty strings for empty inputs, and those mean "not given".
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parse a calendar date sent as `YYYY-MM-DD`.
///
/// A trailing time component (`2025-01-05T00:00:00.000Z`) is ignored, since
/// some clients send the timestamps they were given back to the server.
///
/// # Errors
/// Returns an [Error::InvalidField] naming `field` if the date cannot be parsed.
pub fn parse_date(field: &'static str, value: &str) -> Result<Date, Error> {
    let date_part = value.split('T').next().unwrap_or(value).trim();

    Date::parse(date_part, format_description!("[year]-[month]-[day]")).map_err(|error| {
        Error::InvalidField {
            field,
            reason: format!("\"{value}\" is not a YYYY-MM-DD date: {error}"),
        }
    })
}
