//! # Spherical positions
//!
//! Longitude/latitude/radius triples, used both for equatorial
//! (right ascension/declination/distance) and ecliptic coordinates.
//!
//! A zero-length vector, or one along the polar axis, has no defined
//! longitude: it is reported as 0 with the latitude pinned to ±π/2 by the
//! sign of the z-component (non-negative z maps to +π/2).

use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI};

/// Spherical coordinates: angles in radians, radius in AU
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SphericalPosition {
    /// Longitude (or right ascension) in [0, 2π)
    pub longitude: f64,
    /// Latitude (or declination) in [-π/2, π/2]
    pub latitude: f64,
    /// Distance from the origin
    pub radius: f64,
}

impl SphericalPosition {
    pub fn new(longitude: f64, latitude: f64, radius: f64) -> Self {
        Self {
            longitude,
            latitude,
            radius,
        }
    }

    /// Converts a rectangular vector to spherical coordinates
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nalgebra::Vector3;
    /// use skyreduce::coordinates::SphericalPosition;
    ///
    /// let pole = SphericalPosition::from_rectangular(&Vector3::new(0.0, 0.0, -2.0));
    /// assert_eq!(pole.longitude, 0.0);
    /// assert_eq!(pole.latitude, -std::f64::consts::FRAC_PI_2);
    /// assert_eq!(pole.radius, 2.0);
    /// ```
    pub fn from_rectangular(v: &Vector3<f64>) -> Self {
        let radius = v.norm();
        let rho = v.x.hypot(v.y);

        if radius == 0.0 || rho == 0.0 {
            let latitude = if v.z < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 };
            return Self::new(0.0, latitude, radius);
        }

        let mut longitude = v.y.atan2(v.x);
        if longitude < 0.0 {
            longitude += 2.0 * PI;
        }
        Self::new(longitude, v.z.atan2(rho), radius)
    }

    /// Converts back to a rectangular vector
    pub fn to_rectangular(&self) -> Vector3<f64> {
        let cos_lat = self.latitude.cos();
        Vector3::new(
            self.radius * cos_lat * self.longitude.cos(),
            self.radius * cos_lat * self.longitude.sin(),
            self.radius * self.latitude.sin(),
        )
    }

    /// Unit vector in the same direction
    pub fn direction(&self) -> Vector3<f64> {
        Self::new(self.longitude, self.latitude, 1.0).to_rectangular()
    }
}
