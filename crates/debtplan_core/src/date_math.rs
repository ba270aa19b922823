//! Calendar-month arithmetic for schedule dates.
//!
//! Schedules step one calendar month at a time for up to 600 months. jiff
//! `Span` arithmetic is correct but heavier than needed for that loop, so the
//! helpers here do direct year/month arithmetic and clamp the day to the
//! length of the target month (Jan 31 + 1 month = Feb 28/29).

use jiff::civil::Date;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days in a month without constructing a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Add `months` calendar months to `d`, clamping the day to the month length.
///
/// `None` when the result falls past the last date jiff can represent.
#[inline]
pub fn add_months(d: Date, months: u32) -> Option<Date> {
    let zero_based = i64::from(d.year()) * 12 + i64::from(d.month() - 1) + i64::from(months);
    let year = i16::try_from(zero_based.div_euclid(12)).ok()?;
    let month = (zero_based.rem_euclid(12) + 1) as i8;
    let day = d.day().min(days_in_month(year, month));
    Date::new(year, month, day).ok()
}

/// Whole calendar months from `start` to `end` (floor), zero when `end <= start`.
///
/// Inverse of [`add_months`]: the result `m` is the largest value with
/// `add_months(start, m) <= end`.
pub fn months_between(start: Date, end: Date) -> u32 {
    if end <= start {
        return 0;
    }
    let raw = (end.year() as i32 - start.year() as i32) * 12
        + (end.month() as i32 - start.month() as i32);
    let mut months = raw.max(0) as u32;
    while months > 0 && add_months(start, months).is_none_or(|d| d > end) {
        months -= 1;
    }
    months
}
