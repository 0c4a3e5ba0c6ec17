use chrono::{Days, NaiveDate};

/// Date formats accepted in the listing's date column, tried in order.
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%y-%m-%d"];

/// Parse a listing date cell. The first matching format wins; anything else is `None`.
pub fn parse_listing_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Oldest date still inside a lookback window ending on `today`.
///
/// Windows reaching past the earliest representable date start at `NaiveDate::MIN`.
pub fn window_start(today: NaiveDate, lookback_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Whether `date` falls on or after `today - lookback_days`.
///
/// Comparison is by calendar date, so a posting dated exactly
/// `lookback_days` ago is still inside the window.
pub fn within_lookback(date: Option<NaiveDate>, today: NaiveDate, lookback_days: u32) -> bool {
    match date {
        Some(d) => d >= window_start(today, lookback_days),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_all_formats_parse_to_same_date() {
        let expected = ymd(2024, 5, 1);
        for text in ["2024-05-01", "2024.05.01", "2024/05/01", "24-05-01"] {
            assert_eq!(parse_listing_date(text), Some(expected), "format: {}", text);
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_listing_date("  2024.05.01\n"), Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn test_unparseable_text_is_none() {
        assert_eq!(parse_listing_date(""), None);
        assert_eq!(parse_listing_date("어제"), None);
        assert_eq!(parse_listing_date("2024-13-01"), None);
        assert_eq!(parse_listing_date("01/05/2024"), None);
    }

    #[test]
    fn test_within_lookback_boundary_is_inclusive() {
        let today = ymd(2024, 6, 30);
        assert!(within_lookback(Some(ymd(2024, 5, 31)), today, 30));
        assert!(!within_lookback(Some(ymd(2024, 5, 30)), today, 30));
        assert!(within_lookback(Some(today), today, 30));
    }

    #[test]
    fn test_oversized_window_saturates() {
        let today = ymd(2024, 6, 30);
        assert_eq!(window_start(today, 200_000_000), NaiveDate::MIN);
        assert_eq!(window_start(today, u32::MAX), NaiveDate::MIN);
        assert!(within_lookback(Some(ymd(1900, 1, 1)), today, u32::MAX));
    }

    #[test]
    fn test_absent_date_is_never_within_lookback() {
        assert!(!within_lookback(None, ymd(2024, 6, 30), 30));
    }
}
