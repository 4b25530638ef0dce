//! Calendar date helpers
//!
//! Business dates (payment date, expense date, course start/end) travel as
//! `YYYY-MM-DD` strings. Handlers validate them here; the repository layer
//! stores them as given so lexical order equals date order.

use chrono::NaiveDate;

use super::{AppError, AppResult, ErrorCode};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid date format: {date}"))
    })
}

/// Validate and normalize a date string to `YYYY-MM-DD`
pub fn normalize_date(date: &str) -> AppResult<String> {
    Ok(parse_date(date)?.format(DATE_FORMAT).to_string())
}

/// Validate and normalize an optional date string
pub fn normalize_optional_date(date: Option<&str>) -> AppResult<Option<String>> {
    date.map(normalize_date).transpose()
}

/// Parse an inclusive date range, rejecting `start > end`
pub fn parse_date_range(start: &str, end: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(AppError::validation(format!(
            "Start date {start} is after end date {end}"
        )));
    }
    Ok((start, end))
}

/// Date part (`YYYY-MM-DD`) of a stored date or datetime string
pub fn date_part(value: &str) -> &str {
    value.get(..10).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_normalize() {
        assert_eq!(normalize_date("2025-01-05").unwrap(), "2025-01-05");
        assert_eq!(normalize_date(" 2025-01-05 ").unwrap(), "2025-01-05");
        assert_eq!(parse_date("05/01/2025").unwrap_err().code, ErrorCode::InvalidFormat);
        assert_eq!(normalize_optional_date(None).unwrap(), None);
    }

    #[test]
    fn test_date_range() {
        assert!(parse_date_range("2025-01-01", "2025-01-01").is_ok());
        let err = parse_date_range("2025-02-01", "2025-01-01").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_date_part() {
        assert_eq!(date_part("2025-03-04T10:00:00Z"), "2025-03-04");
        assert_eq!(date_part("2025-03-04"), "2025-03-04");
        assert_eq!(date_part("bad"), "bad");
    }
}
