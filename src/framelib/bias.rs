//! Frame bias between the ICRS and the dynamical mean equator and equinox of
//! J2000
//!
//! The ICRS-to-J2000 matrix carries the second-order diagonal and cross
//! terms. The reverse matrix keeps the second-order diagonal but only the
//! first-order off-diagonal terms, so the pair is inverse to first order only.

use crate::constants::ASEC2RAD;
use lazy_static::lazy_static;
use nalgebra::{Matrix3, Vector3};

/// Offset of the ICRS pole from the J2000 mean pole in x, milliarcseconds
pub const XI0_MAS: f64 = -16.6170;
/// Offset of the ICRS pole from the J2000 mean pole in y, milliarcseconds
pub const ETA0_MAS: f64 = -6.8192;
/// Offset of the ICRS right ascension origin from the J2000 equinox,
/// milliarcseconds
pub const DA0_MAS: f64 = -14.6;

lazy_static! {
    /// ICRS to dynamical J2000
    static ref ICRS_TO_J2000: Matrix3<f64> = {
        let (xi, eta, da) = bias_angles();
        Matrix3::new(
            1.0 - 0.5 * (da * da + xi * xi),
            da,
            -xi,
            -da - eta * xi,
            1.0 - 0.5 * (da * da + eta * eta),
            -eta,
            xi - eta * da,
            eta + xi * da,
            1.0 - 0.5 * (eta * eta + xi * xi),
        )
    };

    /// Dynamical J2000 to ICRS
    static ref J2000_TO_ICRS: Matrix3<f64> = {
        let (xi, eta, da) = bias_angles();
        Matrix3::new(
            1.0 - 0.5 * (da * da + xi * xi),
            -da,
            xi,
            da,
            1.0 - 0.5 * (da * da + eta * eta),
            eta,
            -xi,
            -eta,
            1.0 - 0.5 * (eta * eta + xi * xi),
        )
    };
}

fn bias_angles() -> (f64, f64, f64) {
    let mas = ASEC2RAD / 1000.0;
    (XI0_MAS * mas, ETA0_MAS * mas, DA0_MAS * mas)
}

/// Rotates an ICRS vector onto the dynamical mean equator and equinox of J2000
pub fn to_j2000_frame(v: &Vector3<f64>) -> Vector3<f64> {
    *ICRS_TO_J2000 * v
}

/// Rotates a dynamical J2000 vector onto the ICRS
pub fn to_icrs_frame(v: &Vector3<f64>) -> Vector3<f64> {
    *J2000_TO_ICRS * v
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bias_is_milliarcsecond_sized() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let b = to_j2000_frame(&v);
        let shift = (b - v).norm() / ASEC2RAD;
        assert!(shift > 0.010 && shift < 0.030, "{}", shift);
    }

    #[test]
    fn test_equinox_offset() {
        // The ICRS x axis sits dα0 away from the J2000 equinox
        let b = to_j2000_frame(&Vector3::new(1.0, 0.0, 0.0));
        let ra_mas = b.y.atan2(b.x) / ASEC2RAD * 1000.0;
        assert_relative_eq!(ra_mas, -DA0_MAS, epsilon = 1e-5);
    }

    #[test]
    fn test_round_trip_is_first_order() {
        let v = Vector3::new(0.3, -0.4, 0.866);
        let back = to_icrs_frame(&to_j2000_frame(&v));
        // Inverse to first order: residual is second order in the bias angles
        let residual = (back - v).norm();
        assert!(residual < 1e-14, "{}", residual);
    }

    #[test]
    fn test_pair_is_not_exactly_inverse() {
        let product = *J2000_TO_ICRS * *ICRS_TO_J2000;
        let off = (product - Matrix3::identity()).abs().max();
        assert!(off > 0.0);
        assert!(off < 1e-14);
    }
}
