//! Horizontal coordinates and atmospheric refraction

use super::ObserverLocation;
use crate::coordinates::normalize_radians;

/// Below this geometric elevation (degrees) no refraction is applied
pub const REFRACTION_LIMIT_DEG: f64 = -1.0;

/// Azimuth (from north through east), elevation and parallactic angle,
/// all in radians
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Horizontal {
    pub azimuth: f64,
    pub elevation: f64,
    pub parallactic_angle: f64,
}

/// Converts a true-of-date right ascension and declination to horizontal
/// coordinates for local apparent sidereal time `lst`
///
/// With `refract` set, the elevation is raised by [`refraction`] for the
/// observer's pressure and temperature.
pub fn horizontal_coordinates(
    ra: f64,
    dec: f64,
    lst: f64,
    observer: &ObserverLocation,
    refract: bool,
) -> Horizontal {
    let hour_angle = lst - ra;
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_d, cos_d) = dec.sin_cos();
    let (sin_phi, cos_phi) = observer.latitude().sin_cos();

    let sin_el = (sin_phi * sin_d + cos_phi * cos_d * cos_h).clamp(-1.0, 1.0);
    let mut elevation = sin_el.asin();
    let azimuth = normalize_radians((-cos_d * sin_h).atan2(sin_d * cos_phi - cos_d * cos_h * sin_phi));
    let parallactic_angle = sin_h.atan2(sin_phi / cos_phi.max(f64::MIN_POSITIVE) * cos_d - sin_d * cos_h);

    if refract {
        elevation += refraction(elevation, observer.pressure(), observer.temperature());
    }

    Horizontal {
        azimuth,
        elevation,
        parallactic_angle,
    }
}

/// Refraction (radians, positive upward) for a geometric elevation in
/// radians, pressure in millibars and temperature in °C
///
/// Bennett's formula with Sæmundsson's pressure/temperature scaling.
pub fn refraction(elevation: f64, pressure: f64, temperature: f64) -> f64 {
    let h = elevation.to_degrees();
    if h < REFRACTION_LIMIT_DEG {
        return 0.0;
    }
    let degrees = (pressure / 1010.0) * (283.0 / (273.0 + temperature)) * 1.02
        / (60.0 * (h + 10.3 / (h + 5.11)).to_radians().tan());
    degrees.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn site(lat: f64) -> ObserverLocation {
        ObserverLocation::from_degrees(0.0, lat, 0.0).unwrap()
    }

    #[test]
    fn test_meridian_transit() {
        // On the meridian a southern object has azimuth 180° and elevation
        // 90° - φ + δ
        let obs = site(50.0);
        let dec = 10f64.to_radians();
        let h = horizontal_coordinates(1.0, dec, 1.0, &obs, false);
        assert_abs_diff_eq!(h.azimuth, PI, epsilon = 1e-12);
        assert_abs_diff_eq!(h.elevation.to_degrees(), 50.0, epsilon = 1e-10);
        assert_abs_diff_eq!(h.parallactic_angle, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pole_star_direction() {
        let obs = site(40.0);
        let h = horizontal_coordinates(0.3, FRAC_PI_2, 2.0, &obs, false);
        assert_abs_diff_eq!(h.elevation.to_degrees(), 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(h.azimuth.min(2.0 * PI - h.azimuth), 0.0, epsilon = 1e-7);
    }

    #[test]
    fn test_rising_in_the_east() {
        // Equatorial object six hours before transit rises due east
        let obs = site(30.0);
        let h = horizontal_coordinates(FRAC_PI_2, 0.0, 0.0, &obs, false);
        assert_abs_diff_eq!(h.azimuth, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(h.elevation, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_refraction_at_horizon_and_altitude() {
        // About 29 arcminutes at the horizon under standard conditions
        let r0 = refraction(0.0, 1010.0, 10.0).to_degrees() * 60.0;
        assert!((r0 - 29.0).abs() < 1.0, "{}", r0);
        // About one arcminute at 45°
        let r45 = refraction(45f64.to_radians(), 1010.0, 10.0).to_degrees() * 60.0;
        assert!((r45 - 1.0).abs() < 0.05, "{}", r45);
        // None well below the horizon
        assert_eq!(refraction(-5f64.to_radians(), 1010.0, 10.0), 0.0);
    }

    #[test]
    fn test_refraction_raises_elevation() {
        let obs = site(45.0);
        let plain = horizontal_coordinates(0.0, 0.0, 1.4, &obs, false);
        let refracted = horizontal_coordinates(0.0, 0.0, 1.4, &obs, true);
        assert!(refracted.elevation > plain.elevation);
        assert_eq!(refracted.azimuth, plain.azimuth);
    }
}
