//! Release-date parsing.
//!
//! Dates are only used to bucket releases into months, so everything is
//! reduced to a calendar date in local time. `YYYY-MM-DD` is read as a local
//! calendar date directly (never through UTC midnight, which would move
//! `2025-03-01` into February west of Greenwich). Looser textual forms are
//! tried next; anything unreadable falls back to today's date.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Textual formats accepted after strict ISO and RFC 3339 fail.
const LOOSE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const LOOSE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a release date, falling back to today when the string is empty or unreadable.
pub fn parse_release_date(raw: &str) -> NaiveDate {
    match try_parse_release_date(raw) {
        Some(date) => date,
        None => {
            tracing::warn!(raw, "unreadable release date, using today");
            today()
        }
    }
}

/// Parse a release date without a fallback.
pub fn try_parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(date) = parse_iso_date(raw) {
        return Some(date);
    }
    // Offsets are honoured and then converted, so the month reflects the viewer's clock.
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    for fmt in LOOSE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in LOOSE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    // Year-month only: first of the month.
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()
}

/// Strict `YYYY-MM-DD` (zero padded) as a local calendar date.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !(digits(year, 4) && digits(month, 2) && digits(day, 2)) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_date_is_local_calendar_date() {
        assert_eq!(try_parse_release_date("2025-03-01"), Some(ymd(2025, 3, 1)));
        assert_eq!(try_parse_release_date("2025-12-31"), Some(ymd(2025, 12, 31)));
    }

    #[test]
    fn test_invalid_iso_date_is_rejected() {
        assert_eq!(try_parse_release_date("2025-02-30"), None);
        assert_eq!(try_parse_release_date("2025-13-01"), None);
    }

    #[test]
    fn test_loose_formats() {
        assert_eq!(try_parse_release_date("March 5, 2025"), Some(ymd(2025, 3, 5)));
        assert_eq!(try_parse_release_date("Mar 5, 2025"), Some(ymd(2025, 3, 5)));
        assert_eq!(try_parse_release_date("03/05/2025"), Some(ymd(2025, 3, 5)));
        assert_eq!(try_parse_release_date("2025/03/05"), Some(ymd(2025, 3, 5)));
        assert_eq!(try_parse_release_date("2025-3-5"), Some(ymd(2025, 3, 5)));
        assert_eq!(try_parse_release_date("2025-07"), Some(ymd(2025, 7, 1)));
    }

    #[test]
    fn test_naive_datetime_keeps_its_date() {
        assert_eq!(
            try_parse_release_date("2025-06-30T23:30:00"),
            Some(ymd(2025, 6, 30))
        );
    }

    #[test]
    fn test_rfc3339_is_converted_to_local() {
        let date = try_parse_release_date("2025-06-15T12:00:00Z").unwrap();
        // Noon UTC is the 15th everywhere except beyond +12:00.
        assert!(date.day() == 15 || date.day() == 16);
        assert_eq!(date.month(), 6);
    }

    #[test]
    fn test_garbage_falls_back_to_today() {
        assert_eq!(try_parse_release_date("soon™"), None);
        assert_eq!(try_parse_release_date("   "), None);
        assert_eq!(parse_release_date("not a date"), today());
        assert_eq!(parse_release_date(""), today());
    }
}
