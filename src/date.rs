//! Reference dates and the day window
//!
//! A run is judged against a single reference date, captured once at startup.
//! By default that is the local date, but `--date` accepts the same small set
//! of expressions a person would write: `today`, an ISO or US date, or a
//! weekday with an optional week offset.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use crate::error::{Error, Result};

/// Date expression types
#[derive(Debug, Clone, PartialEq)]
pub enum DateExpression {
    /// Use today's date
    Today,
    /// Use an explicit date
    Explicit(NaiveDate),
    /// Use next occurrence of a day of week with optional offset
    DayOfWeek { day: Weekday, offset: u32 },
}

/// Parse a date expression string into a DateExpression
///
/// Supported formats:
/// - `""` (empty) or `"today"` → Today
/// - `"2024-11-20"` → Explicit date (ISO format)
/// - `"11/20/2024"` → Explicit date (US format)
/// - `"Tuesday"` → Next Tuesday (or today if today is Tuesday)
/// - `"Tuesday+3"` → 4th upcoming Tuesday (next + 3 weeks)
pub fn parse_date_expression(expr: &str) -> Result<DateExpression> {
    let expr = expr.trim();

    if expr.is_empty() || expr.eq_ignore_ascii_case("today") {
        return Ok(DateExpression::Today);
    }

    // ISO format: 2024-11-20
    if let Ok(date) = NaiveDate::parse_from_str(expr, "%Y-%m-%d") {
        return Ok(DateExpression::Explicit(date));
    }

    // US format: 11/20/2024
    if let Ok(date) = NaiveDate::parse_from_str(expr, "%m/%d/%Y") {
        return Ok(DateExpression::Explicit(date));
    }

    if let Some((day_str, offset_str)) = expr.split_once('+') {
        let day = parse_weekday(day_str)?;
        let offset: u32 = offset_str.trim().parse()
            .map_err(|_| Error::InvalidDateExpression(format!("Invalid offset: {}", offset_str)))?;
        return Ok(DateExpression::DayOfWeek { day, offset });
    }

    if let Ok(day) = parse_weekday(expr) {
        return Ok(DateExpression::DayOfWeek { day, offset: 0 });
    }

    Err(Error::InvalidDateExpression(format!("Unable to parse date expression: {}", expr)))
}

/// Parse a weekday name (case-insensitive)
fn parse_weekday(s: &str) -> Result<Weekday> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "monday" | "mon" => Ok(Weekday::Mon),
        "tuesday" | "tue" => Ok(Weekday::Tue),
        "wednesday" | "wed" => Ok(Weekday::Wed),
        "thursday" | "thu" => Ok(Weekday::Thu),
        "friday" | "fri" => Ok(Weekday::Fri),
        "saturday" | "sat" => Ok(Weekday::Sat),
        "sunday" | "sun" => Ok(Weekday::Sun),
        _ => Err(Error::InvalidDateExpression(format!("Unknown weekday: {}", s))),
    }
}

/// The local calendar date right now
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve a DateExpression against the date the run treats as "now"
///
/// Fails when a week offset reaches past the last date chrono can represent.
pub fn resolve_date(expr: &DateExpression, today: NaiveDate) -> Result<NaiveDate> {
    match expr {
        DateExpression::Today => Ok(today),
        DateExpression::Explicit(date) => Ok(*date),
        DateExpression::DayOfWeek { day, offset } => find_next_weekday(today, *day, *offset)
            .ok_or_else(|| {
                Error::InvalidDateExpression(format!("Week offset out of range: {}", offset))
            }),
    }
}

/// Find the next occurrence of a given weekday, with optional offset
///
/// If offset is 0, returns the next occurrence (or today if today is that day)
/// If offset is n, returns the (n+1)th occurrence (next + n more weeks)
fn find_next_weekday(today: NaiveDate, target_day: Weekday, offset: u32) -> Option<NaiveDate> {
    let today_num = today.weekday().num_days_from_monday();
    let target_num = target_day.num_days_from_monday();
    let days_until = u64::from((target_num + 7 - today_num) % 7);

    let total_days = days_until + u64::from(offset) * 7;
    today.checked_add_days(Days::new(total_days))
}

/// The `days` consecutive calendar dates starting at `start`
///
/// Stops early only near the last date chrono can represent.
pub fn window(start: NaiveDate, days: usize) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_empty_is_today() {
        assert_eq!(parse_date_expression("").unwrap(), DateExpression::Today);
        assert_eq!(parse_date_expression("   ").unwrap(), DateExpression::Today);
    }

    #[test]
    fn test_parse_today() {
        assert_eq!(parse_date_expression("today").unwrap(), DateExpression::Today);
        assert_eq!(parse_date_expression("TODAY").unwrap(), DateExpression::Today);
    }

    #[test]
    fn test_parse_explicit_dates() {
        assert_eq!(
            parse_date_expression("2024-04-26").unwrap(),
            DateExpression::Explicit(ymd(2024, 4, 26))
        );
        assert_eq!(
            parse_date_expression("12/31/2023").unwrap(),
            DateExpression::Explicit(ymd(2023, 12, 31))
        );
    }

    #[test]
    fn test_parse_weekday_with_offset() {
        let expr = parse_date_expression("Friday + 2").unwrap();
        assert_eq!(expr, DateExpression::DayOfWeek { day: Weekday::Fri, offset: 2 });

        let expr = parse_date_expression("sun").unwrap();
        assert_eq!(expr, DateExpression::DayOfWeek { day: Weekday::Sun, offset: 0 });
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_date_expression("NotADay").is_err());
        assert!(parse_date_expression("2024-13-01").is_err());
        assert!(parse_date_expression("Tuesday+abc").is_err());
    }

    #[test]
    fn test_resolve_against_reference() {
        // 2024-04-26 is a Friday
        let today = ymd(2024, 4, 26);
        assert_eq!(resolve_date(&DateExpression::Today, today).unwrap(), today);

        let friday = DateExpression::DayOfWeek { day: Weekday::Fri, offset: 0 };
        assert_eq!(resolve_date(&friday, today).unwrap(), today);

        let monday = DateExpression::DayOfWeek { day: Weekday::Mon, offset: 0 };
        assert_eq!(resolve_date(&monday, today).unwrap(), ymd(2024, 4, 29));

        let thursday_next = DateExpression::DayOfWeek { day: Weekday::Thu, offset: 1 };
        assert_eq!(resolve_date(&thursday_next, today).unwrap(), ymd(2024, 5, 9));
    }

    #[test]
    fn test_resolve_huge_week_offset_is_an_error() {
        let today = ymd(2024, 4, 26);

        let expr = parse_date_expression("friday+100000000").unwrap();
        assert!(matches!(
            resolve_date(&expr, today),
            Err(Error::InvalidDateExpression(_))
        ));

        // offset * 7 no longer fits in a u32
        let expr = parse_date_expression("friday+4000000000").unwrap();
        assert!(matches!(
            resolve_date(&expr, today),
            Err(Error::InvalidDateExpression(_))
        ));
    }

    #[test]
    fn test_window_rolls_over_year() {
        let days: Vec<_> = window(ymd(2023, 12, 30), 3).collect();
        assert_eq!(days, vec![ymd(2023, 12, 30), ymd(2023, 12, 31), ymd(2024, 1, 1)]);
    }

    #[test]
    fn test_window_leap_day() {
        let leap: Vec<_> = window(ymd(2024, 2, 28), 3).collect();
        assert_eq!(leap, vec![ymd(2024, 2, 28), ymd(2024, 2, 29), ymd(2024, 3, 1)]);

        let plain: Vec<_> = window(ymd(2023, 2, 28), 2).collect();
        assert_eq!(plain, vec![ymd(2023, 2, 28), ymd(2023, 3, 1)]);
    }

    #[test]
    fn test_window_empty() {
        assert_eq!(window(ymd(2024, 4, 26), 0).count(), 0);
    }
}
