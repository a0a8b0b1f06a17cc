//! Time module for astronomical time calculations
//!
//! This module provides calendar instants (`AstroDate`), the time scales the
//! reduction works in, and the `Timescale` converter that maps an instant in
//! one scale to a Julian day in another. It is inspired by the Python
//! Skyfield library's time handling.

pub mod calendar;

use crate::constants::{DAY_S, J2000, TT_MINUS_TAI_S};
use crate::earthlib::ObserverLocation;
use crate::{Result, SkyError};
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fmt;

const MICROSECONDS_PER_DAY: u64 = 86_400_000_000;

/// The time scales an instant can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TimeScale {
    /// Universal Time, tied to Earth rotation
    Ut1,
    /// Coordinated Universal Time
    Utc,
    /// Terrestrial Time
    TerrestrialTime,
    /// Barycentric Dynamical Time
    BarycentricDynamicalTime,
    /// Observer's civil time: UTC shifted by the observer's time zone
    Local,
}

/// A calendar instant: civil date plus the elapsed fraction of that day
///
/// The fraction is stored directly, so `AstroDate::from_jd(d.jd()).jd()`
/// reproduces `d.jd()` exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AstroDate {
    year: i32,
    month: u32,
    day: u32,
    /// Fraction of the civil day elapsed since midnight, in [0, 1)
    day_fraction: f64,
}

impl AstroDate {
    /// Create a date from calendar fields
    ///
    /// # Errors
    ///
    /// `InvalidDate` for fields outside the calendar or for a date in the
    /// 1582-10-05..=1582-10-14 gap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skyreduce::time::AstroDate;
    ///
    /// let j2000 = AstroDate::new(2000, 1, 1, 12, 0, 0.0).unwrap();
    /// assert_eq!(j2000.jd(), 2_451_545.0);
    /// assert!(AstroDate::new(1582, 10, 10, 0, 0, 0.0).is_err());
    /// ```
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self> {
        calendar::validate_date(year, month, day)?;
        if hour > 23 || minute > 59 || !(0.0..61.0).contains(&second) {
            return Err(SkyError::invalid_date(
                f64::NAN,
                format!("time of day {:02}:{:02}:{} is out of range", hour, minute, second),
            ));
        }
        let seconds_of_day = hour as f64 * 3600.0 + minute as f64 * 60.0 + second;
        Ok(Self {
            year,
            month,
            day,
            day_fraction: (seconds_of_day / DAY_S).min(1.0 - f64::EPSILON),
        })
    }

    /// Create a date from a Julian day
    pub fn from_jd(jd: f64) -> Result<Self> {
        if !jd.is_finite() || !(0.0..5.0e8).contains(&jd) {
            return Err(SkyError::invalid_date(jd, "Julian day is outside the supported range"));
        }
        let shifted = jd + 0.5;
        let whole = shifted.floor();
        let (year, month, day) = calendar::calendar_date(whole as i32);
        Ok(Self {
            year,
            month,
            day,
            day_fraction: shifted - whole,
        })
    }

    /// Julian day of this instant
    pub fn jd(&self) -> f64 {
        calendar::day_number_unchecked(self.year, self.month, self.day) as f64 - 0.5
            + self.day_fraction
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Fraction of the day elapsed since midnight
    pub fn day_fraction(&self) -> f64 {
        self.day_fraction
    }

    /// Time of day as whole microseconds since midnight
    fn microseconds(&self) -> u64 {
        let us = (self.day_fraction * DAY_S * 1e6).round() as u64;
        us.min(MICROSECONDS_PER_DAY - 1)
    }

    pub fn hour(&self) -> u32 {
        (self.microseconds() / 3_600_000_000) as u32
    }

    pub fn minute(&self) -> u32 {
        (self.microseconds() / 60_000_000 % 60) as u32
    }

    pub fn second(&self) -> f64 {
        (self.microseconds() % 60_000_000) as f64 * 1e-6
    }
}

impl fmt::Display for AstroDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let us = self.microseconds() % 60_000_000;
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            self.year,
            self.month,
            self.day,
            self.hour(),
            self.minute(),
            us / 1_000_000,
            us % 1_000_000 / 1_000
        )
    }
}

/// An instant together with the scale it is expressed in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeElement {
    pub date: AstroDate,
    pub scale: TimeScale,
}

impl TimeElement {
    pub fn new(date: AstroDate, scale: TimeScale) -> Self {
        Self { date, scale }
    }

    pub fn from_jd(jd: f64, scale: TimeScale) -> Result<Self> {
        Ok(Self::new(AstroDate::from_jd(jd)?, scale))
    }

    /// Julian day in this element's own scale
    pub fn jd(&self) -> f64 {
        self.date.jd()
    }
}

impl From<DateTime<Utc>> for TimeElement {
    fn from(dt: DateTime<Utc>) -> Self {
        let seconds_of_day = dt.num_seconds_from_midnight() as f64
            + dt.timestamp_subsec_nanos() as f64 * 1e-9;
        let date = AstroDate {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            day_fraction: (seconds_of_day / DAY_S).min(1.0 - f64::EPSILON),
        };
        TimeElement::new(date, TimeScale::Utc)
    }
}

/// Converts instants between time scales
///
/// UTC is linked to TAI through the leap second table from 1972 on; earlier
/// UTC (and UT1 without Earth-orientation data) goes through ΔT.
#[derive(Debug, Clone)]
pub struct Timescale {
    /// Delta T table with TT times
    delta_t_table: Option<(Vec<f64>, Vec<f64>)>,
    /// Julian dates (UTC) at which each TAI-UTC offset starts
    leap_dates: Vec<f64>,
    leap_offsets: Vec<i32>,
}

impl Default for Timescale {
    fn default() -> Self {
        let mut ts = Self {
            delta_t_table: None,
            leap_dates: Vec::new(),
            leap_offsets: Vec::new(),
        };
        ts.init_basic_leap_seconds();
        ts
    }
}

impl Timescale {
    /// Create a timescale with a custom ΔT table and leap second data
    pub fn new(
        delta_t_table: Option<(Vec<f64>, Vec<f64>)>,
        leap_dates: Vec<f64>,
        leap_offsets: Vec<i32>,
    ) -> Self {
        Self {
            delta_t_table,
            leap_dates,
            leap_offsets,
        }
    }

    /// Use a tabulated ΔT (TT Julian days, seconds) instead of the polynomial
    pub fn with_delta_t_table(mut self, tt: Vec<f64>, delta_t: Vec<f64>) -> Self {
        self.delta_t_table = Some((tt, delta_t));
        self
    }

    /// Initialize basic leap second data
    fn init_basic_leap_seconds(&mut self) {
        // (Julian date of 0h UTC, TAI-UTC from that date on)
        const LEAPS: [(f64, i32); 28] = [
            (2441317.5, 10), // 1972-01-01
            (2441499.5, 11), // 1972-07-01
            (2441683.5, 12), // 1973-01-01
            (2442048.5, 13), // 1974-01-01
            (2442413.5, 14), // 1975-01-01
            (2442778.5, 15), // 1976-01-01
            (2443144.5, 16), // 1977-01-01
            (2443509.5, 17), // 1978-01-01
            (2443874.5, 18), // 1979-01-01
            (2444239.5, 19), // 1980-01-01
            (2444786.5, 20), // 1981-07-01
            (2445151.5, 21), // 1982-07-01
            (2445516.5, 22), // 1983-07-01
            (2446247.5, 23), // 1985-07-01
            (2447161.5, 24), // 1988-01-01
            (2447892.5, 25), // 1990-01-01
            (2448257.5, 26), // 1991-01-01
            (2448804.5, 27), // 1992-07-01
            (2449169.5, 28), // 1993-07-01
            (2449534.5, 29), // 1994-07-01
            (2450083.5, 30), // 1996-01-01
            (2450630.5, 31), // 1997-07-01
            (2451179.5, 32), // 1999-01-01
            (2453736.5, 33), // 2006-01-01
            (2454832.5, 34), // 2009-01-01
            (2456109.5, 35), // 2012-07-01
            (2457204.5, 36), // 2015-07-01
            (2457754.5, 37), // 2017-01-01
        ];
        for (date, offset) in LEAPS {
            self.leap_dates.push(date);
            self.leap_offsets.push(offset);
        }
    }

    /// TAI-UTC in seconds at a UTC Julian date, or None before 1972
    pub fn tai_minus_utc(&self, jd_utc: f64) -> Option<f64> {
        let idx = self.leap_dates.partition_point(|&d| d <= jd_utc);
        if idx == 0 {
            None
        } else {
            Some(self.leap_offsets[idx - 1] as f64)
        }
    }

    /// Calculate delta_t (TT - UT1) in seconds
    pub fn delta_t(&self, jd_tt: f64) -> f64 {
        if let Some((table_tt, table_delta_t)) = &self.delta_t_table {
            Self::interpolate(jd_tt, table_tt, table_delta_t, f64::NAN, f64::NAN)
        } else {
            let year = 2000.0 + (jd_tt - J2000) / 365.25;
            delta_t_approx(year)
        }
    }

    /// TDB - TT in seconds (dominant periodic term)
    pub fn tdb_minus_tt(&self, jd_tt: f64) -> f64 {
        let g = (357.53 + 0.985_600_28 * (jd_tt - J2000)).to_radians();
        0.001_657 * g.sin() + 0.000_014 * (2.0 * g).sin()
    }

    /// Julian day of `time` in the `target` scale
    pub fn to_julian_day(
        &self,
        time: &TimeElement,
        observer: &ObserverLocation,
        target: TimeScale,
    ) -> Result<f64> {
        self.to_julian_day_with(time, observer, target, None)
    }

    /// Like `to_julian_day`, with an optional UT1-UTC (seconds) from
    /// Earth-orientation data replacing the ΔT estimate for UT1
    pub fn to_julian_day_with(
        &self,
        time: &TimeElement,
        observer: &ObserverLocation,
        target: TimeScale,
        dut1: Option<f64>,
    ) -> Result<f64> {
        let jd = time.jd();
        if time.scale == target {
            return Ok(jd);
        }
        let tt = self.to_tt(jd, time.scale, observer, dut1);
        let out = self.from_tt(tt, target, observer, dut1);
        if !out.is_finite() {
            return Err(SkyError::invalid_date(jd, "time scale conversion overflowed"));
        }
        Ok(out)
    }

    fn to_tt(&self, jd: f64, scale: TimeScale, observer: &ObserverLocation, dut1: Option<f64>) -> f64 {
        match scale {
            TimeScale::TerrestrialTime => jd,
            TimeScale::BarycentricDynamicalTime => jd - self.tdb_minus_tt(jd) / DAY_S,
            TimeScale::Utc => self.utc_to_tt(jd),
            TimeScale::Local => self.utc_to_tt(jd - observer.time_zone() / 24.0),
            TimeScale::Ut1 => match (dut1, self.tai_minus_utc(jd)) {
                (Some(dut1), Some(_)) => self.utc_to_tt(jd - dut1 / DAY_S),
                _ => self.ut1_to_tt(jd),
            },
        }
    }

    fn from_tt(&self, tt: f64, scale: TimeScale, observer: &ObserverLocation, dut1: Option<f64>) -> f64 {
        match scale {
            TimeScale::TerrestrialTime => tt,
            TimeScale::BarycentricDynamicalTime => tt + self.tdb_minus_tt(tt) / DAY_S,
            TimeScale::Utc => self.tt_to_utc(tt),
            TimeScale::Local => self.tt_to_utc(tt) + observer.time_zone() / 24.0,
            TimeScale::Ut1 => {
                let utc = self.tt_to_utc(tt);
                match (dut1, self.tai_minus_utc(utc)) {
                    (Some(dut1), Some(_)) => utc + dut1 / DAY_S,
                    _ => tt - self.delta_t(tt) / DAY_S,
                }
            }
        }
    }

    fn utc_to_tt(&self, utc: f64) -> f64 {
        match self.tai_minus_utc(utc) {
            Some(leap) => utc + (leap + TT_MINUS_TAI_S) / DAY_S,
            // Before 1972 UTC tracked UT1 closely enough
            None => self.ut1_to_tt(utc),
        }
    }

    fn tt_to_utc(&self, tt: f64) -> f64 {
        let tai = tt - TT_MINUS_TAI_S / DAY_S;
        // Two passes settle the offset across a leap boundary
        let guess = match self.tai_minus_utc(tai) {
            Some(leap) => tai - leap / DAY_S,
            None => return tt - self.delta_t(tt) / DAY_S,
        };
        match self.tai_minus_utc(guess) {
            Some(leap) => tai - leap / DAY_S,
            None => tt - self.delta_t(tt) / DAY_S,
        }
    }

    fn ut1_to_tt(&self, ut1: f64) -> f64 {
        // ΔT is a function of TT; one refinement pass is plenty
        let first = ut1 + self.delta_t(ut1) / DAY_S;
        ut1 + self.delta_t(first) / DAY_S
    }

    /// Linear interpolation helper
    pub fn interpolate(
        x: f64,
        x_values: &[f64],
        y_values: &[f64],
        extrapolate_low: f64,
        extrapolate_high: f64,
    ) -> f64 {
        if x_values.is_empty() || y_values.is_empty() || x_values.len() != y_values.len() {
            return f64::NAN;
        }

        let i = x_values.partition_point(|&val| val < x);
        if i < x_values.len() && x_values[i] == x {
            return y_values[i];
        }
        if i == 0 {
            if extrapolate_low.is_nan() {
                y_values[0]
            } else {
                extrapolate_low
            }
        } else if i >= x_values.len() {
            if extrapolate_high.is_nan() {
                y_values[y_values.len() - 1]
            } else {
                extrapolate_high
            }
        } else {
            let x0 = x_values[i - 1];
            let x1 = x_values[i];
            let y0 = y_values[i - 1];
            let y1 = y_values[i];

            let t = (x - x0) / (x1 - x0);
            y0 + t * (y1 - y0)
        }
    }
}

/// Approximate delta_t (TT - UT1, seconds) from a decimal year
///
/// Piecewise polynomials of Espenak & Meeus.
pub fn delta_t_approx(year: f64) -> f64 {
    if year < -500.0 {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    } else if year < 500.0 {
        let t = year / 100.0;
        10583.6 - 1014.41 * t + 33.78311 * t * t - 5.952053 * t.powi(3) - 0.1798452 * t.powi(4)
            + 0.022174192 * t.powi(5)
            + 0.0090316521 * t.powi(6)
    } else if year < 1600.0 {
        let t = (year - 1000.0) / 100.0;
        1574.2 - 556.01 * t + 71.23472 * t * t + 0.319781 * t.powi(3)
            - 0.8503463 * t.powi(4)
            - 0.005050998 * t.powi(5)
            + 0.0083572073 * t.powi(6)
    } else if year < 1700.0 {
        let t = year - 1600.0;
        120.0 - 0.9808 * t - 0.01532 * t * t + t.powi(3) / 7129.0
    } else if year < 1800.0 {
        let t = year - 1700.0;
        8.83 + 0.1603 * t - 0.0059285 * t * t + 0.00013336 * t.powi(3) - t.powi(4) / 1174000.0
    } else if year < 1860.0 {
        let t = year - 1800.0;
        13.72 - 0.332447 * t + 0.0068612 * t * t + 0.0041116 * t.powi(3)
            - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7)
    } else if year < 1900.0 {
        let t = year - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t * t + 0.01680668 * t.powi(3) - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233174.0
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t * t + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t * t + 0.0020936 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t * t / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t * t / 260.0 - t.powi(3) / 718.0
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t * t
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else if year < 2150.0 {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - year)
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}
