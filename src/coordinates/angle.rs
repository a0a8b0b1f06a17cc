//! # Angle normalization and sexagesimal formatting
//!
//! Right ascension is reported in hours/minutes/seconds and declination in
//! degrees/arcminutes/arcseconds. `Sexagesimal` keeps the sign apart from the
//! magnitude so that -0° 30' is not printed as 0° 30'.

use crate::constants::{RAD2DEG, TAU};
use std::f64::consts::PI;
use std::fmt;

/// Wraps an angle into [0, 2π)
pub fn normalize_radians(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Wraps an angle into [-π, π)
pub fn normalize_signed_radians(angle: f64) -> f64 {
    let a = normalize_radians(angle);
    if a >= PI {
        a - TAU
    } else {
        a
    }
}

/// Sign, whole units, whole minutes and fractional seconds of an angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub units: u32,
    pub minutes: u32,
    pub seconds: f64,
    /// Decimals printed for the seconds field
    pub places: usize,
    hours: bool,
}

impl Sexagesimal {
    /// Splits an angle in radians into hours, minutes and seconds of time
    pub fn hours(angle: f64, places: usize) -> Self {
        Self::split(angle * RAD2DEG / 15.0, places, true)
    }

    /// Splits an angle in radians into degrees, arcminutes and arcseconds
    pub fn degrees(angle: f64, places: usize) -> Self {
        Self::split(angle * RAD2DEG, places, false)
    }

    fn split(value: f64, places: usize, hours: bool) -> Self {
        let negative = value < 0.0;
        // Round once at the requested precision so 59.9999" never prints as 60"
        let scale = 10f64.powi(places as i32);
        let total = (value.abs() * 3600.0 * scale).round() / scale;

        let units = (total / 3600.0).floor();
        let rest = total - units * 3600.0;
        let minutes = (rest / 60.0).floor();
        let seconds = rest - minutes * 60.0;

        Self {
            negative,
            units: units as u32,
            minutes: minutes as u32,
            seconds,
            places,
            hours,
        }
    }

    /// Value back in decimal units (hours or degrees)
    pub fn to_decimal(&self) -> f64 {
        let v = self.units as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;
        if self.negative {
            -v
        } else {
            v
        }
    }
}

impl fmt::Display for Sexagesimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = if self.places == 0 { 2 } else { self.places + 3 };
        if self.hours {
            write!(
                f,
                "{}{:02}h {:02}m {:0width$.prec$}s",
                if self.negative { "-" } else { "" },
                self.units,
                self.minutes,
                self.seconds,
                width = width,
                prec = self.places
            )
        } else {
            write!(
                f,
                "{}{:02}° {:02}' {:0width$.prec$}\"",
                if self.negative { "-" } else { "+" },
                self.units,
                self.minutes,
                self.seconds,
                width = width,
                prec = self.places
            )
        }
    }
}
