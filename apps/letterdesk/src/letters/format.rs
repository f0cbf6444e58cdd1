//! Date, tenure and currency formatting shared by every letter template.
//!
//! Tenure uses a fixed 365-day year and 30-day month. It is an approximation,
//! not a calendar-accurate duration.

use chrono::NaiveDate;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;
const RUPEE: char = '₹';

/// Parses a form date (`YYYY-MM-DD`). Returns `None` for blank or invalid input.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Formats `YYYY-MM-DD` as `D Month YYYY`.
///
/// Empty input yields an empty string; input that is not a date is returned as-is.
pub fn format_date(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match parse_date(trimmed) {
        Some(date) => date.format("%-d %B %Y").to_string(),
        None => trimmed.to_string(),
    }
}

/// Approximate employment duration between two dates, order-insensitive.
///
/// Zero years and months are omitted; days are always printed when nothing
/// else was, so equal dates give `"0 days"`. Years and months pluralize when
/// the count is greater than one, days whenever the count is not one.
pub fn calculate_tenure(start: NaiveDate, end: NaiveDate) -> String {
    let total_days = (end - start).num_days().abs();
    let years = total_days / DAYS_PER_YEAR;
    let months = (total_days % DAYS_PER_YEAR) / DAYS_PER_MONTH;
    let days = (total_days % DAYS_PER_YEAR) % DAYS_PER_MONTH;

    let mut parts: Vec<String> = Vec::new();
    if years > 0 {
        parts.push(format!("{years} year{}", if years > 1 { "s" } else { "" }));
    }
    if months > 0 {
        parts.push(format!("{months} month{}", if months > 1 { "s" } else { "" }));
    }
    if days > 0 || parts.is_empty() {
        parts.push(format!("{days} day{}", if days != 1 { "s" } else { "" }));
    }
    parts.join(" ")
}

/// Tenure between two form date strings; `None` when either does not parse.
pub fn tenure_between(start: &str, end: &str) -> Option<String> {
    Some(calculate_tenure(parse_date(start)?, parse_date(end)?))
}

/// Parses a salary field. Currency symbols, `Rs.` and grouping commas are ignored.
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .trim_start_matches("Rs.")
        .chars()
        .filter(|c| *c != ',' && *c != RUPEE && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Indian Rupee with zero decimals and lakh/crore digit grouping, e.g. `₹1,50,000`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{RUPEE}0");
    }
    let rounded = amount.round();
    if rounded == 0.0 {
        return format!("{RUPEE}0");
    }
    let grouped = group_indian(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{RUPEE}{grouped}")
    } else {
        format!("{RUPEE}{grouped}")
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Last three digits, then groups of two: 12345678 -> 1,23,45,678.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).expect("test date should parse")
    }

    // ── format_date ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_date_human_readable() {
        assert_eq!(format_date("2024-03-05"), "5 March 2024");
        assert_eq!(format_date("2023-12-31"), "31 December 2023");
    }

    #[test]
    fn test_format_date_empty_is_empty() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("   "), "");
    }

    #[test]
    fn test_format_date_passes_through_garbage() {
        assert_eq!(format_date("next tuesday"), "next tuesday");
    }

    // ── calculate_tenure ────────────────────────────────────────────────────

    #[test]
    fn test_tenure_same_day_is_zero_days() {
        let d = date("2022-06-15");
        assert_eq!(calculate_tenure(d, d), "0 days");
    }

    #[test]
    fn test_tenure_three_calendar_years_uses_365_day_years() {
        // 1096 days: 3 x 365 + 1
        assert_eq!(
            calculate_tenure(date("2020-01-01"), date("2023-01-01")),
            "3 years 1 day"
        );
    }

    #[test]
    fn test_tenure_singular_units() {
        // 365 + 30 + 1 days
        assert_eq!(
            calculate_tenure(date("2021-01-01"), date("2022-01-01") + chrono::Duration::days(31)),
            "1 year 1 month 1 day"
        );
    }

    #[test]
    fn test_tenure_is_order_insensitive() {
        let a = date("2019-05-01");
        let b = date("2021-08-20");
        assert_eq!(calculate_tenure(a, b), calculate_tenure(b, a));
    }

    #[test]
    fn test_tenure_months_and_days_only() {
        // 75 days -> 2 months 15 days
        assert_eq!(
            calculate_tenure(date("2024-01-01"), date("2024-03-16")),
            "2 months 15 days"
        );
    }

    #[test]
    fn test_tenure_never_empty_for_ordered_dates() {
        let start = date("2020-01-01");
        for offset in [0, 1, 29, 30, 31, 364, 365, 366, 3000] {
            let end = start + chrono::Duration::days(offset);
            assert!(!calculate_tenure(start, end).is_empty(), "offset {offset}");
        }
    }

    #[test]
    fn test_tenure_between_requires_both_dates() {
        assert_eq!(tenure_between("2020-01-01", ""), None);
        assert_eq!(
            tenure_between("2020-01-01", "2020-01-03").as_deref(),
            Some("2 days")
        );
    }

    // ── currency ────────────────────────────────────────────────────────────

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(50000.0), "₹50,000");
        assert_eq!(format_currency(999.0), "₹999");
    }

    #[test]
    fn test_format_currency_uses_lakh_grouping() {
        assert_eq!(format_currency(150000.0), "₹1,50,000");
        assert_eq!(format_currency(12345678.0), "₹1,23,45,678");
    }

    #[test]
    fn test_format_currency_zero_and_rounding() {
        assert_eq!(format_currency(0.0), "₹0");
        assert_eq!(format_currency(0.4), "₹0");
        assert_eq!(format_currency(1234.5), "₹1,235");
        assert_eq!(format_currency(f64::NAN), "₹0");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-2500.0), "-₹2,500");
    }

    #[test]
    fn test_parse_amount_tolerates_symbols() {
        assert_eq!(parse_amount("₹1,50,000"), Some(150000.0));
        assert_eq!(parse_amount("Rs. 500"), Some(500.0));
        assert_eq!(parse_amount(" 42.5 "), Some(42.5));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_format_percentage_two_decimals() {
        assert_eq!(format_percentage(25.0), "25.00%");
        assert_eq!(format_percentage(12.346), "12.35%");
    }
}
