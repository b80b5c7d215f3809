//! Calendar dates in the fixed `dd/MM/yyyy` text format.
//!
//! Every date in the store is free text. [`parse_date`] is strict and reports
//! failures; [`is_in_range`] and [`compare`] degrade to a neutral answer
//! instead, so a malformed row can never abort a report.

use std::cmp::Ordering;

use chrono::{Local, NaiveDate};
use thiserror::Error;

/// chrono format string for `dd/MM/yyyy`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("'{0}' does not match dd/MM/yyyy")]
    Format(String),

    #[error("'{0}' is not a valid calendar date")]
    Calendar(String),
}

/// Parse a `dd/MM/yyyy` date.
///
/// Exactly two day digits, two month digits and four year digits separated by
/// `/` are required; chrono alone would also accept unpadded fields.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());

    if !shape_ok {
        return Err(DateParseError::Format(s.to_string()));
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| DateParseError::Calendar(s.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// True iff all three parse and `start <= date <= end`.
pub fn is_in_range(date: &str, start: &str, end: &str) -> bool {
    match (parse_date(date), parse_date(start), parse_date(end)) {
        (Ok(date), Ok(start), Ok(end)) => start <= date && date <= end,
        _ => false,
    }
}

/// Chronological comparison. Returns `Equal` when either side fails to parse.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}

/// The caller's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_string() -> String {
    format_date(today())
}

/// Treat `None` and `""` alike as "no date". Whitespace is not blank.
pub fn is_blank(date: Option<&str>) -> bool {
    date.map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let date = parse_date("05/03/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_parse_rejects_unpadded_fields() {
        assert!(matches!(parse_date("5/3/2024"), Err(DateParseError::Format(_))));
        assert!(matches!(parse_date("05/03/24"), Err(DateParseError::Format(_))));
    }

    #[test]
    fn test_parse_rejects_other_separators_and_noise() {
        assert!(parse_date("05-03-2024").is_err());
        assert!(parse_date("2024/03/05").is_err());
        assert!(parse_date(" 05/03/2024").is_err());
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(matches!(parse_date("31/02/2024"), Err(DateParseError::Calendar(_))));
        assert!(matches!(parse_date("00/01/2024"), Err(DateParseError::Calendar(_))));
        assert!(parse_date("29/02/2024").is_ok());
        assert!(parse_date("29/02/2023").is_err());
    }

    #[test]
    fn test_format_round_trips_through_parse() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(format_date(date), "01/12/2025");
        assert_eq!(parse_date(&format_date(date)).unwrap(), date);
    }

    #[test]
    fn test_compare_is_chronological_not_lexical() {
        // Lexically "02/01/2025" < "31/12/2024"
        assert_eq!(compare("31/12/2024", "02/01/2025"), Ordering::Less);
        assert_eq!(compare("02/01/2025", "31/12/2024"), Ordering::Greater);
        assert_eq!(compare("15/06/2024", "15/06/2024"), Ordering::Equal);
    }

    #[test]
    fn test_compare_degrades_to_equal() {
        assert_eq!(compare("garbage", "15/06/2024"), Ordering::Equal);
        assert_eq!(compare("15/06/2024", ""), Ordering::Equal);
    }

    #[test]
    fn test_range_is_inclusive() {
        assert!(is_in_range("10/01/2024", "10/01/2024", "12/01/2024"));
        assert!(is_in_range("12/01/2024", "10/01/2024", "12/01/2024"));
        assert!(is_in_range("11/01/2024", "10/01/2024", "12/01/2024"));
        assert!(!is_in_range("09/01/2024", "10/01/2024", "12/01/2024"));
        assert!(!is_in_range("13/01/2024", "10/01/2024", "12/01/2024"));
    }

    #[test]
    fn test_range_false_when_any_side_is_malformed() {
        assert!(!is_in_range("bad", "10/01/2024", "12/01/2024"));
        assert!(!is_in_range("11/01/2024", "bad", "12/01/2024"));
        assert!(!is_in_range("11/01/2024", "10/01/2024", "bad"));
    }

    #[test]
    fn test_range_with_inverted_bounds_is_empty() {
        assert!(!is_in_range("11/01/2024", "12/01/2024", "10/01/2024"));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(!is_blank(Some("  ")));
        assert!(!is_blank(Some("01/01/2024")));
    }
}
