// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Timestamp parsing for the date shapes seen in asset records.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Parse a record timestamp into an instant.
///
/// Accepted forms, tried in order:
/// - RFC 3339 (`2024-06-01T10:00:00Z`, `2024-06-01T10:00:00+02:00`)
/// - `2024-06-01 10:00:00` and `2024-06-01T10:00:00`, read as UTC
/// - `2024-06-01`, read as midnight UTC
///
/// Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use damdesk::utils::parse_timestamp;
///
/// let a = parse_timestamp("2024-06-01").unwrap();
/// let b = parse_timestamp("2024-06-01T00:00:00Z").unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(dt);
    }

    let spaced = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let t_separated = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    for format in [spaced, t_separated] {
        if let Ok(dt) = PrimitiveDateTime::parse(raw, format) {
            return Some(dt.assume_utc());
        }
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|d| d.midnight().assume_utc())
}

/// Short calendar date used in listings, e.g. `2024-06-01`.
pub fn format_date(dt: OffsetDateTime) -> String {
    dt.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| dt.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_rfc3339_with_offset() {
        assert_eq!(
            parse_timestamp("2024-06-01T12:00:00+02:00"),
            Some(datetime!(2024-06-01 10:00 UTC))
        );
    }

    #[test]
    fn parses_cms_post_dates_as_utc() {
        assert_eq!(
            parse_timestamp("2024-06-02 08:30:00"),
            Some(datetime!(2024-06-02 08:30 UTC))
        );
        assert_eq!(
            parse_timestamp("2024-06-02T08:30:00"),
            Some(datetime!(2024-06-02 08:30 UTC))
        );
    }

    #[test]
    fn parses_date_only() {
        assert_eq!(
            parse_timestamp("2024-06-03"),
            Some(datetime!(2024-06-03 0:00 UTC))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("June 3rd"), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
    }

    #[test]
    fn format_date_is_calendar_only() {
        assert_eq!(format_date(datetime!(2024-06-03 17:45 UTC)), "2024-06-03");
    }
}
