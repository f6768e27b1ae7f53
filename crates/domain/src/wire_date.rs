// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Serde helpers for calendar dates on the wire.
//!
//! The backend sends dates either as `YYYY-MM-DD` or as a full timestamp
//! (`2026-03-01T10:15:00.000000Z`, `2026-03-01 10:15:00`). Only the
//! calendar date is kept. Dates are always written back as `YYYY-MM-DD`.

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// The `YYYY-MM-DD` format used for every date sent to the backend.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses the calendar date at the start of `value`.
///
/// # Errors
///
/// Returns the parse error text if the leading ten characters are not a
/// valid `YYYY-MM-DD` date.
pub fn parse(value: &str) -> Result<Date, String> {
    let head: &str = value.get(..10).unwrap_or(value);
    Date::parse(head, DATE_FORMAT).map_err(|e| format!("invalid date '{value}': {e}"))
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serializes a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(*date))
}

/// Deserializes a date or timestamp string, keeping the date part.
///
/// # Errors
///
/// Fails if the value is not a string starting with a valid date.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let raw: String = String::deserialize(deserializer)?;
    parse(&raw).map_err(D::Error::custom)
}

/// The same helpers for optional dates, where `null` means "not yet".
pub mod option {
    use super::{Date, Deserialize, Deserializer, Serializer, format, parse};
    use serde::de::Error as _;

    /// Serializes `Some(date)` as `YYYY-MM-DD` and `None` as `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&format(*date)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional date; `null` and empty strings become `None`.
    ///
    /// # Errors
    ///
    /// Fails if a non-empty value does not start with a valid date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(value) if !value.trim().is_empty() => {
                parse(&value).map(Some).map_err(D::Error::custom)
            }
            _ => Ok(None),
        }
    }
}
