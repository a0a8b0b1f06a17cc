//! Equatorial and ecliptic frames sharing an equinox
//!
//! The two differ by a rotation about the equinox direction through the
//! obliquity of that equinox.

use crate::coordinates::rotation::r1;
use crate::coordinates::SphericalPosition;
use nalgebra::{Matrix3, Vector3};

/// Equatorial to ecliptic rotation for obliquity `eps` (radians)
pub fn equatorial_to_ecliptic_matrix(eps: f64) -> Matrix3<f64> {
    r1(eps)
}

/// Rotates an equatorial vector into the ecliptic frame of the same equinox
pub fn equatorial_to_ecliptic(v: &Vector3<f64>, eps: f64) -> Vector3<f64> {
    equatorial_to_ecliptic_matrix(eps) * v
}

/// Rotates an ecliptic vector into the equatorial frame of the same equinox
pub fn ecliptic_to_equatorial(v: &Vector3<f64>, eps: f64) -> Vector3<f64> {
    equatorial_to_ecliptic_matrix(eps).transpose() * v
}

/// Ecliptic longitude, latitude and radius of an equatorial vector
pub fn ecliptic_spherical(v: &Vector3<f64>, eps: f64) -> SphericalPosition {
    SphericalPosition::from_rectangular(&equatorial_to_ecliptic(v, eps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::Rng;
    use rand::SeedableRng;
    use std::f64::consts::FRAC_PI_2;

    const EPS_J2000: f64 = 0.409_092_804_222_329;

    #[test]
    fn test_round_trip() {
        let mut rng = StdRng::seed_from_u64(424242);
        for _ in 0..100 {
            let v = Vector3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
            );
            let back = ecliptic_to_equatorial(&equatorial_to_ecliptic(&v, EPS_J2000), EPS_J2000);
            assert_relative_eq!(back, v, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_celestial_pole_in_ecliptic_frame() {
        // The north celestial pole lies at ecliptic longitude 90°, latitude 90° - ε
        let pole = ecliptic_spherical(&Vector3::new(0.0, 0.0, 1.0), EPS_J2000);
        assert_relative_eq!(pole.longitude, FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(pole.latitude, FRAC_PI_2 - EPS_J2000, epsilon = 1e-12);
    }

    #[test]
    fn test_summer_solstice_point() {
        // Ecliptic longitude 90° maps to declination +ε
        let eq = ecliptic_to_equatorial(&Vector3::new(0.0, 1.0, 0.0), EPS_J2000);
        assert_relative_eq!(eq.z.asin(), EPS_J2000, epsilon = 1e-12);
    }
}
