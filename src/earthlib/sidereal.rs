//! Sidereal time
//!
//! The elementary-rotation precession models pair with the IAU 1982 GMST
//! expression; the IAU 2000/2006 models use the Earth rotation angle plus the
//! IAU 2006 polynomial and add the complementary terms to the equation of
//! the equinoxes.

use crate::constants::{ASEC2RAD, J2000, JULIAN_CENTURY, TAU};
use crate::nutationlib::iau2000b::fundamental_arguments;
use crate::nutationlib::Nutation;
use crate::precessionlib::{mean_obliquity, PrecessionModel};

/// Earth rotation angle at `jd_ut1`, radians in [0, 2π)
pub fn earth_rotation_angle(jd_ut1: f64) -> f64 {
    let du = jd_ut1 - J2000;
    // Split the day count so the fractional turn keeps its precision
    let turns = 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * du + du.fract();
    (TAU * turns).rem_euclid(TAU)
}

/// Greenwich mean sidereal time, IAU 1982 expression, radians
pub fn gmst_1982(jd_ut1: f64) -> f64 {
    let d = jd_ut1 - J2000;
    let t = d / JULIAN_CENTURY;
    let degrees = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    degrees.rem_euclid(360.0).to_radians()
}

/// Greenwich mean sidereal time from the Earth rotation angle, IAU 2006
pub fn gmst_2006(jd_ut1: f64, jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000) / JULIAN_CENTURY;
    let arcsec = 0.014_506
        + t * (4612.156_534 + t * (1.391_581_7 + t * (-0.000_000_44 + t * (-0.000_029_956 + t * -0.000_000_036_8))));
    (earth_rotation_angle(jd_ut1) + arcsec * ASEC2RAD).rem_euclid(TAU)
}

/// Greenwich mean sidereal time for the given precession model
pub fn mean_sidereal_time(jd_ut1: f64, jd_tt: f64, model: PrecessionModel) -> f64 {
    if model.is_matrix_model() {
        gmst_2006(jd_ut1, jd_tt)
    } else {
        gmst_1982(jd_ut1)
    }
}

/// Equation of the equinoxes (apparent minus mean sidereal time), radians
pub fn equation_of_equinoxes(jd_tt: f64, model: PrecessionModel, nutation: &dyn Nutation) -> f64 {
    let angles = nutation.angles(jd_tt);
    let eps = mean_obliquity(jd_tt, model) + angles.deps;
    let mut ee = angles.dpsi * eps.cos();
    if model.is_matrix_model() {
        let omega = fundamental_arguments((jd_tt - J2000) / JULIAN_CENTURY)[4];
        ee += (0.002_640_96 * omega.sin() + 0.000_063_52 * (2.0 * omega).sin()) * ASEC2RAD;
    }
    ee
}

/// Greenwich apparent sidereal time, radians in [0, 2π)
pub fn apparent_sidereal_time(
    jd_ut1: f64,
    jd_tt: f64,
    model: PrecessionModel,
    nutation: &dyn Nutation,
) -> f64 {
    (mean_sidereal_time(jd_ut1, jd_tt, model) + equation_of_equinoxes(jd_tt, model, nutation))
        .rem_euclid(TAU)
}

/// Local sidereal time for an east longitude (radians)
pub fn local_sidereal_time(greenwich: f64, longitude: f64) -> f64 {
    (greenwich + longitude).rem_euclid(TAU)
}
