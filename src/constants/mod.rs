//! Constants module for astrometric reduction

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in meters (per IAU 2012 Resolution B2)
pub const AU_M: f64 = 149_597_870_700.0;
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// B1950 epoch as Julian date
pub const B1950: f64 = 2_433_282.423_5;
/// Days in a Julian century
pub const JULIAN_CENTURY: f64 = 36_525.0;
/// Days in a Julian millennium
pub const JULIAN_MILLENNIUM: f64 = 365_250.0;
/// TT minus TAI in seconds
pub const TT_MINUS_TAI_S: f64 = 32.184;
/// TT minus TAI in days
pub const TT_MINUS_TAI: f64 = TT_MINUS_TAI_S / DAY_S;
/// Length of the mean sidereal day in solar days
pub const SIDEREAL_DAY: f64 = 0.997_269_566_329_084;

// Angles
/// Arcseconds in a complete circle
pub const ASEC360: f64 = 1_296_000.0;
/// Arcseconds to radians conversion factor
pub const ASEC2RAD: f64 = 4.848_136_811_095_36e-6;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Physics
/// Speed of light in m/s
pub const C: f64 = 299_792_458.0;
/// Heliocentric gravitational constant in m^3/s^2
pub const GS: f64 = 1.327_124_400_179_87e+20;
/// Gaussian gravitational constant (AU^(3/2) / day)
pub const GAUSS_K: f64 = 0.017_202_098_95;
/// Schwarzschild radius of the Sun (2GM/c^2) in AU
pub const SUN_SCHWARZSCHILD_AU: f64 = 2.0 * GS / (C * C) / AU_M;

// Earth constants
/// Earth's angular velocity in radians/s
pub const EARTH_ANGVEL: f64 = 7.292_115_0e-5;
/// Earth's equatorial radius in meters
pub const EARTH_RADIUS: f64 = 6_378_136.6;
/// IERS 2010 inverse Earth flattening
pub const IERS_2010_INVERSE_EARTH_FLATTENING: f64 = 298.25642;
/// Earth/Moon mass ratio (DE405)
pub const EARTH_MOON_MASS_RATIO: f64 = 81.300_568;

// Derived constants
/// Speed of light in AU/day
pub const C_AUDAY: f64 = C * DAY_S / AU_M;
/// Light time for one AU, in days
pub const AU_LIGHT_TIME: f64 = 1.0 / C_AUDAY;

// Calendar constants
/// First day of Gregorian calendar in Julian day number (1582-10-15)
pub const GREGORIAN_START: i32 = 2_299_161;
