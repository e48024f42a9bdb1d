//! Common utility functions.
use chrono::{Datelike, NaiveDate};

pub(crate) type PatternValueType = u16;

/// Converts a string of ASCII digits into unsigned number with bounds validation.
pub(crate) fn parse_digital_value(
    input: &str,
    min: PatternValueType,
    max: PatternValueType,
) -> Option<PatternValueType> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    input
        .parse::<PatternValueType>()
        .ok()
        .filter(|value| (min..=max).contains(value))
}

/// Converts string with mnemonic value representation into zero-based position in `values`.
///
/// Comparison is case-sensitive.
pub(crate) fn parse_string_value(input: &str, values: &[&str]) -> Option<PatternValueType> {
    values
        .iter()
        .position(|&x| x == input)
        .map(|i| i as PatternValueType)
}

/// Returns number of days in specified month, or `None` if month is invalid.
pub(crate) fn days_in_month(year: PatternValueType, month: PatternValueType) -> Option<PatternValueType> {
    let first = NaiveDate::from_ymd_opt(year as i32, month as u32, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year as i32 + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year as i32, month as u32 + 1, 1)?
    };

    Some(next.signed_duration_since(first).num_days() as PatternValueType)
}

/// Day of week number of the specified date, `1` is Sunday and `7` is Saturday.
pub(crate) fn day_of_week(year: PatternValueType, month: PatternValueType, day: PatternValueType) -> Option<PatternValueType> {
    NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32).map(|date| weekday_number(&date))
}

/// Day of week number of any `Datelike` value, `1` is Sunday and `7` is Saturday.
#[inline]
pub(crate) fn weekday_number<D: Datelike>(date: &D) -> PatternValueType {
    date.weekday().num_days_from_sunday() as PatternValueType + 1
}

/// Returns date (day in the month) of the N-th specified day of the week,
/// or `None` if the month has no such day.
pub(crate) fn nth_dow(
    year: PatternValueType,
    month: PatternValueType,
    dow: PatternValueType,
    n: PatternValueType,
) -> Option<PatternValueType> {
    if !(1..=7).contains(&dow) || !(1..=5).contains(&n) {
        return None;
    }

    let first_dow = day_of_week(year, month, 1)?;
    let day = 1 + (dow + 7 - first_dow) % 7 + (n - 1) * 7;

    (day <= days_in_month(year, month)?).then_some(day)
}

/// Returns date of the weekday (not Sunday or Saturday) nearest to the specified date in the same month.
///
/// Returns `None` if the specified day doesn't exist in the month.
pub(crate) fn nearest_weekday(
    year: PatternValueType,
    month: PatternValueType,
    day: PatternValueType,
) -> Option<PatternValueType> {
    let dow = day_of_week(year, month, day)?;
    let days_in_month = days_in_month(year, month)?;

    let weekday = match dow {
        // sunday
        1 if day == days_in_month => day - 2,
        1 => day + 1,
        // saturday
        7 if day > 1 => day - 1,
        7 => day + 2,
        _ => day,
    };

    Some(weekday)
}
