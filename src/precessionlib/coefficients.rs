//! Polynomial coefficient tables for the precession and obliquity models
//!
//! Elementary-rotation series are in Julian millennia from J2000 and are
//! stored highest power first, ready for Horner evaluation.

/// Series for the elementary-rotation precession models
#[derive(Debug, Clone, Copy)]
pub struct RotationSeries {
    /// General precession in longitude, arcseconds per millennium
    pub longitude: [f64; 10],
    /// Node of the moving ecliptic on the J2000 ecliptic, radians
    pub node: [f64; 11],
    /// Inclination of the moving ecliptic on the J2000 ecliptic, radians
    pub inclination: [f64; 11],
}

/// Laskar (1986), as used with DE403
pub const LASKAR_1986: RotationSeries = RotationSeries {
    longitude: [
        -8.66e-10, -4.759e-8, 2.424e-7, 1.3095e-5, 1.7451e-4, -1.8055e-3, -0.235316, 0.07732,
        111.1971, 50290.966,
    ],
    node: [
        6.6402e-16,
        -2.69151e-15,
        -1.547021e-12,
        7.521313e-12,
        6.3190131e-10,
        -3.48388152e-9,
        -1.813065896e-7,
        2.75036225e-8,
        7.4394531426e-5,
        -0.042078604317,
        3.052112654975,
    ],
    inclination: [
        1.2147e-16,
        7.3759e-17,
        -8.26287e-14,
        2.503410e-13,
        2.4650839e-11,
        -5.4000441e-11,
        1.32115526e-9,
        -6.012e-7,
        -1.62442e-5,
        0.00227850649,
        0.0,
    ],
};

/// Simon et al. (1994)
pub const SIMON_1994: RotationSeries = RotationSeries {
    longitude: [
        -8.66e-10, -4.759e-8, 2.424e-7, 1.3095e-5, 1.7451e-4, -1.8055e-3, -0.235316, 0.07732,
        111.2022, 50288.200,
    ],
    node: [
        6.6402e-16,
        -2.69151e-15,
        -1.547021e-12,
        7.521313e-12,
        1.9e-10,
        -3.54e-9,
        -1.8103e-7,
        2.579e-8,
        7.4379679e-5,
        -0.0420782900,
        3.0521126906,
    ],
    inclination: [
        1.2147e-16,
        7.3759e-17,
        -8.26287e-14,
        2.503410e-13,
        2.4650839e-11,
        -5.4000441e-11,
        1.32115526e-9,
        -5.99908e-7,
        -1.624383e-5,
        0.002278492868,
        0.0,
    ],
};

/// Williams (1994)
pub const WILLIAMS_1994: RotationSeries = RotationSeries {
    longitude: [
        -8.66e-10, -4.759e-8, 2.424e-7, 1.3095e-5, 1.7451e-4, -1.8055e-3, -0.235316, 0.076,
        110.5414, 50287.91959,
    ],
    node: [
        6.6402e-16,
        -2.69151e-15,
        -1.547021e-12,
        7.521313e-12,
        1.9e-10,
        -3.54e-9,
        -1.8103e-7,
        1.26e-7,
        7.436169e-5,
        -0.04207794833,
        3.052115282424,
    ],
    inclination: [
        1.2147e-16,
        7.3759e-17,
        -8.26287e-14,
        2.503410e-13,
        2.4650839e-11,
        -5.4000441e-11,
        1.32115526e-9,
        -6.012e-7,
        -1.62442e-5,
        0.00227850649,
        0.0,
    ],
};

/// Angle polynomials of the matrix models, arcseconds, ascending powers of
/// Julian centuries
#[derive(Debug, Clone, Copy)]
pub struct MatrixSeries {
    /// Obliquity at J2000 (ε0)
    pub epsilon0: f64,
    /// Precession of the equator in longitude (ψ_A)
    pub psi: [f64; 5],
    /// Inclination of the mean equator on the J2000 ecliptic (ω_A)
    pub omega: [f64; 5],
    /// Precession of the ecliptic along the equator (χ_A)
    pub chi: [f64; 5],
}

/// IAU 2000 precession (Lieske 1977 with the IAU 2000 rate corrections)
pub const IAU_2000: MatrixSeries = MatrixSeries {
    epsilon0: 84381.448,
    psi: [0.0, 5038.47875, -1.07259, -0.001147, 0.0],
    omega: [84381.448, -0.02524, 0.05127, -0.007726, 0.0],
    chi: [0.0, 10.5526, -2.38064, -0.001125, 0.0],
};

/// IAU 2006 (P03) precession, truncated after the fourth power
pub const IAU_2006: MatrixSeries = MatrixSeries {
    epsilon0: 84381.406,
    psi: [0.0, 5038.481507, -1.0790069, -0.00114045, 0.000132851],
    omega: [84381.406, -0.025754, 0.0512623, -0.00772503, -0.000000467],
    chi: [0.0, 10.556403, -2.3814292, -0.00121197, 0.000170663],
};

/// Mean obliquity fit: constant plus ten terms in Julian millennia
#[derive(Debug, Clone, Copy)]
pub struct ObliquitySeries {
    /// Value at J2000, arcseconds
    pub constant: f64,
    /// Coefficients of T^10 down to T^1, arcseconds
    pub terms: [f64; 10],
}

pub const OBLIQUITY_LASKAR_1986: ObliquitySeries = ObliquitySeries {
    constant: 84381.448,
    terms: [
        2.45e-10, 5.79e-9, 2.787e-7, 7.12e-7, -3.905e-5, -2.4967e-3, -5.138e-3, 1.99925, -0.0155,
        -468.093,
    ],
};

pub const OBLIQUITY_SIMON_1994: ObliquitySeries = ObliquitySeries {
    constant: 84381.412,
    terms: [
        2.45e-10, 5.79e-9, 2.787e-7, 7.12e-7, -3.905e-5, -2.4967e-3, -5.138e-3, 1.9989, -0.0152,
        -468.0927,
    ],
};

pub const OBLIQUITY_WILLIAMS_1994: ObliquitySeries = ObliquitySeries {
    constant: 84381.406173,
    terms: [
        2.45e-10, 5.79e-9, 2.787e-7, 7.12e-7, -3.905e-5, -2.4967e-3, -5.138e-3, 1.9989, -0.0175,
        -468.33960,
    ],
};

/// IAU 1976 obliquity with the IAU 2000 precession-rate correction
pub const OBLIQUITY_IAU_2000: ObliquitySeries = ObliquitySeries {
    constant: 84381.448,
    terms: [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.813, -0.059, -468.4024],
};

pub const OBLIQUITY_IAU_2006: ObliquitySeries = ObliquitySeries {
    constant: 84381.406,
    terms: [0.0, 0.0, 0.0, 0.0, 0.0, -0.00434, -0.00576, 2.00340, -0.01831, -468.36769],
};

/// Evaluates a polynomial stored highest power first
pub fn horner(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * t + c)
}

/// Evaluates a polynomial stored in ascending powers
pub fn ascending(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polynomial_orders_agree() {
        let c = [1.0, -2.0, 3.0];
        // 1 - 2t + 3t^2 at t = 2
        assert_relative_eq!(ascending(&c, 2.0), 9.0);
        // t^2 - 2t + 3 at t = 2
        assert_relative_eq!(horner(&c, 2.0), 3.0);
    }

    #[test]
    fn test_general_precession_rate() {
        // Roughly 50.29 arcseconds per year for every elementary model
        for series in [LASKAR_1986, SIMON_1994, WILLIAMS_1994] {
            let rate = series.longitude[9] / 1000.0;
            assert!((rate - 50.29).abs() < 0.01);
        }
    }
}
