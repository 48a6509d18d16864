//! Event date validation and formatting.
//!
//! Users type dates as `MM-DD-YYYY`; the store keeps them in long form
//! ("January 5, 2025").

use chrono::NaiveDate;
use regex::Regex;

/// Strict `MM-DD-YYYY`: month 01-12, day 01-31, four-digit year.
fn date_pattern() -> &'static Regex {
    use std::sync::OnceLock;
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])-(\d{4})$")
            .expect("date pattern is a valid regex")
    })
}

/// Parse a `MM-DD-YYYY` string into a real calendar date.
///
/// Returns `None` when the text does not match the strict pattern or names a day
/// that does not exist (e.g. `02-30-2025`).
pub fn parse_event_date(input: &str) -> Option<NaiveDate> {
    let captures = date_pattern().captures(input)?;
    let month = captures[1].parse::<u32>().ok()?;
    let day = captures[2].parse::<u32>().ok()?;
    let year = captures[3].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Long display form, e.g. "January 5, 2025".
pub fn format_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Validate and reformat user input in one step.
pub fn reformat_event_date(input: &str) -> Option<String> {
    parse_event_date(input).map(format_long)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_date_reformatted() {
        assert_eq!(
            reformat_event_date("01-05-2025"),
            Some("January 5, 2025".to_string())
        );
        assert_eq!(
            reformat_event_date("12-31-1999"),
            Some("December 31, 1999".to_string())
        );
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(
            reformat_event_date("02-29-2024"),
            Some("February 29, 2024".to_string())
        );
        assert_eq!(reformat_event_date("02-29-2025"), None);
    }

    #[test]
    fn test_pattern_match_but_not_a_real_day() {
        assert_eq!(reformat_event_date("02-30-2025"), None);
        assert_eq!(reformat_event_date("04-31-2025"), None);
    }

    #[test]
    fn test_rejects_loose_formats() {
        for input in [
            "1-5-2025",
            "01/05/2025",
            "13-01-2025",
            "00-10-2025",
            "01-00-2025",
            "01-32-2025",
            "01-05-25",
            " 01-05-2025",
            "01-05-2025 ",
            "q",
            "",
        ] {
            assert_eq!(reformat_event_date(input), None, "accepted {:?}", input);
        }
    }

    #[test]
    fn test_parse_returns_calendar_date() {
        let date = parse_event_date("06-19-2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 19).unwrap());
    }
}
