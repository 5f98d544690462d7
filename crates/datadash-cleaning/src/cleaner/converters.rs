//! Conversions from text cells to typed cells.

use crate::types::CellValue;
use crate::utils::parse_finite_number;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;

/// Date-only layouts accepted by [`parse_date`].
static DATE_FORMATS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%m-%d-%Y",
        "%B %d, %Y",
        "%b %d, %Y",
        "%B %d %Y",
        "%b %d %Y",
        "%d %B %Y",
        "%d %b %Y",
        "%a %b %d %Y",
    ]
});

/// Naive date-time layouts accepted by [`parse_date`]. The time is discarded.
static DATETIME_FORMATS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ]
});

/// Layouts that carry a UTC offset.
static ZONED_FORMATS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f %z"]);

/// Parse a text value as a finite number.
pub(crate) fn text_to_number(value: &str) -> Option<CellValue> {
    parse_finite_number(value).map(CellValue::Number)
}

/// Parse `true`/`false` (any case) as a boolean.
pub(crate) fn text_to_boolean(value: &str) -> Option<CellValue> {
    if value.eq_ignore_ascii_case("true") {
        Some(CellValue::Boolean(true))
    } else if value.eq_ignore_ascii_case("false") {
        Some(CellValue::Boolean(false))
    } else {
        None
    }
}

/// Parse a date or timestamp, keeping only the calendar date.
///
/// Timestamps with an offset are converted to UTC first, so
/// `2024-01-15T23:30:00-05:00` becomes `2024-01-16`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for format in ZONED_FORMATS.iter() {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc).date_naive());
        }
    }
    for format in DATETIME_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    for format in DATE_FORMATS.iter() {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    None
}

/// Parse a date and render it as `YYYY-MM-DD`.
pub(crate) fn text_to_iso_date(value: &str) -> Option<CellValue> {
    parse_date(value).map(|date| CellValue::DateIso(date.format("%Y-%m-%d").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_number() {
        assert_eq!(text_to_number("42"), Some(CellValue::Number(42.0)));
        assert_eq!(text_to_number("-0.5"), Some(CellValue::Number(-0.5)));
        assert_eq!(text_to_number("12kg"), None);
        assert_eq!(text_to_number("Infinity"), None);
    }

    #[test]
    fn test_text_to_boolean() {
        assert_eq!(text_to_boolean("TRUE"), Some(CellValue::Boolean(true)));
        assert_eq!(text_to_boolean("False"), Some(CellValue::Boolean(false)));
        assert_eq!(text_to_boolean("yes"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_date("2024-01-15"), expected);
        assert_eq!(parse_date("2024/01/15"), expected);
        assert_eq!(parse_date("01/15/2024"), expected);
        assert_eq!(parse_date("January 15, 2024"), expected);
        assert_eq!(parse_date("15 Jan 2024"), expected);
        assert_eq!(parse_date("2024-01-15 08:30:00"), expected);
        assert_eq!(parse_date("2024-01-15T08:30:00Z"), expected);
    }

    #[test]
    fn test_parse_date_converts_offsets_to_utc() {
        assert_eq!(
            parse_date("2024-01-15T23:30:00-05:00"),
            NaiveDate::from_ymd_opt(2024, 1, 16)
        );
    }

    #[test]
    fn test_parse_date_rejects_non_dates() {
        assert_eq!(parse_date("not a value"), None);
        assert_eq!(parse_date("2024-13-45"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_text_to_iso_date() {
        assert_eq!(
            text_to_iso_date("March 3, 2023"),
            Some(CellValue::DateIso("2023-03-03".to_string()))
        );
    }
}
