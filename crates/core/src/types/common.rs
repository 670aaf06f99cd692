//! Display helpers shared across domain models

use crate::validation::ValidationError;
use chrono::NaiveDate;

/// `chrono` pattern for the `dd.mm.yyyy` display form
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Formats a date as `dd.mm.yyyy`
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a `dd.mm.yyyy` string back into a date
///
/// Only the exact ten-character form is accepted: `1.6.1965` or
/// `01.06.65` are rejected even though `chrono` alone would take some of them.
pub fn parse_display_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || {
        ValidationError::with_value(
            "publication_date",
            "must be a valid date in dd.mm.yyyy format",
            input,
        )
    };

    let text = input.trim();
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'.',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_date() {
        let date = NaiveDate::from_ymd_opt(1949, 6, 8).unwrap();
        assert_eq!(format_display_date(date), "08.06.1949");
    }

    #[test]
    fn test_parse_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let parsed = parse_display_date(&format_display_date(date)).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed = parse_display_date(" 01.06.1965 ").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(1965, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_rejects_other_patterns() {
        for input in ["1.6.1965", "1965-06-01", "01/06/1965", "01.06.65", "", "aa.bb.cccc"] {
            assert!(parse_display_date(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(parse_display_date("30.02.2024").is_err());
        assert!(parse_display_date("29.02.2023").is_err());
        assert!(parse_display_date("00.01.2000").is_err());
    }

    #[test]
    fn test_parse_error_names_field() {
        let err = parse_display_date("tomorrow").unwrap_err();
        assert_eq!(err.field, "publication_date");
        assert_eq!(err.value.as_deref(), Some("tomorrow"));
    }
}
