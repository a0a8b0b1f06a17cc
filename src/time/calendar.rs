//! Calendar date and Julian day number conversion functions
//!
//! Dates before 1582-10-15 are in the Julian calendar, later dates in the
//! Gregorian calendar. The ten civil days 1582-10-05 through 1582-10-14 never
//! existed and are rejected with `SkyError::InvalidDate`.

use crate::constants::GREGORIAN_START;
use crate::{Result, SkyError};

/// Returns true when the given civil date falls in the 1582 calendar gap
pub fn in_gregorian_gap(year: i32, month: u32, day: u32) -> bool {
    year == 1582 && month == 10 && (5..=14).contains(&day)
}

/// Leap year rule of the calendar in force during `year`
pub fn is_leap_year(year: i32) -> bool {
    if year < 1582 {
        year.rem_euclid(4) == 0
    } else {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }
}

/// Number of days in a month of the calendar in force
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Convert a civil date to a Julian day number (the JD of noon on that date)
///
/// # Errors
///
/// `InvalidDate` for a month or day outside the calendar, or for a date in the
/// 1582 Julian/Gregorian gap.
///
/// # Examples
///
/// ```rust
/// use skyreduce::time::calendar::day_number;
///
/// assert_eq!(day_number(2000, 1, 1).unwrap(), 2_451_545);
/// assert_eq!(day_number(1582, 10, 4).unwrap(), 2_299_160);
/// assert_eq!(day_number(1582, 10, 15).unwrap(), 2_299_161);
/// assert!(day_number(1582, 10, 10).is_err());
/// ```
pub fn day_number(year: i32, month: u32, day: u32) -> Result<i32> {
    validate_date(year, month, day)?;
    Ok(day_number_unchecked(year, month, day))
}

/// Convert a Julian day number back to a civil (year, month, day)
///
/// Day numbers before `GREGORIAN_START` come back in the Julian calendar, so
/// the result never lands inside the 1582 gap.
pub fn calendar_date(jd_integer: i32) -> (i32, u32, u32) {
    // See the Explanatory Supplement to the Astronomical Almanac 15.11.
    let mut f = jd_integer + 1401;
    if jd_integer >= GREGORIAN_START {
        f += (4 * jd_integer + 274_277) / 146_097 * 3 / 4 - 38;
    }

    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;
    let day = (h % 153) / 5 + 1;
    let month = (h / 153 + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;

    (year, month as u32, day as u32)
}

pub(crate) fn validate_date(year: i32, month: u32, day: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(SkyError::invalid_date(
            f64::NAN,
            format!("month {} is outside 1..=12", month),
        ));
    }
    if day == 0 || day > days_in_month(year, month) {
        return Err(SkyError::invalid_date(
            f64::NAN,
            format!("{:04}-{:02} has no day {}", year, month, day),
        ));
    }
    if in_gregorian_gap(year, month, day) {
        return Err(SkyError::invalid_date(
            day_number_unchecked(year, month, day) as f64,
            format!(
                "{:04}-{:02}-{:02} falls in the Julian/Gregorian calendar gap",
                year, month, day
            ),
        ));
    }
    Ok(())
}

/// Day number without validation; callers must have checked the date
pub(crate) fn day_number_unchecked(year: i32, month: u32, day: u32) -> i32 {
    // See the Explanatory Supplement to the Astronomical Almanac 15.11.
    let janfeb = month <= 2;
    let g = year + 4716 - if janfeb { 1 } else { 0 };
    let f = (month + 9) % 12;
    let e = 1461 * g / 4 + day as i32 - 1402;
    let mut j = e + (153 * f as i32 + 2) / 5;

    if j >= GREGORIAN_START {
        j += 38 - (g + 184) / 100 * 3 / 4;
    }
    j
}
