//! Conic orbits and Kepler's equation
//!
//! Elliptic orbits solve `M = E - e sin E`, hyperbolic orbits
//! `M = e sinh H - H`, both by Newton's method to [`KEPLER_TOLERANCE`]
//! within [`KEPLER_MAX_ITERATIONS`] steps.

use crate::coordinates::rotation::{r1, r3};
use crate::coordinates::StateVector;
use crate::{Result, SkyError};
use log::trace;
use nalgebra::Vector3;
use std::f64::consts::{PI, TAU};

/// Convergence tolerance on the anomaly, radians
pub const KEPLER_TOLERANCE: f64 = 1e-12;
/// Newton iteration cap
pub const KEPLER_MAX_ITERATIONS: usize = 50;

/// Solve Kepler's equation M = E - e*sin(E) for the eccentric anomaly
///
/// # Errors
///
/// `NonConvergence` when Newton's method has not met the tolerance after
/// [`KEPLER_MAX_ITERATIONS`] steps, `InvalidInput` for `e` outside [0, 1).
pub fn solve_elliptic(mean_anomaly: f64, e: f64) -> Result<f64> {
    if !(0.0..1.0).contains(&e) {
        return Err(SkyError::InvalidInput(format!(
            "elliptic eccentricity {} is outside [0, 1)",
            e
        )));
    }
    let m = mean_anomaly.rem_euclid(TAU);

    let mut anomaly = if e < 0.8 { m } else { PI };
    for iteration in 0..KEPLER_MAX_ITERATIONS {
        let (sin_e, cos_e) = anomaly.sin_cos();
        let delta = (anomaly - e * sin_e - m) / (1.0 - e * cos_e);
        anomaly -= delta;
        trace!("elliptic Kepler step {}: E={} dE={}", iteration, anomaly, delta);
        if delta.abs() < KEPLER_TOLERANCE {
            return Ok(anomaly);
        }
    }
    Err(SkyError::NonConvergence {
        what: "Elliptic Kepler equation".to_string(),
        iterations: KEPLER_MAX_ITERATIONS,
    })
}

/// Solve M = e*sinh(H) - H for the hyperbolic anomaly
///
/// # Errors
///
/// `NonConvergence` when the iteration cap is hit, `InvalidInput` for
/// `e <= 1`.
pub fn solve_hyperbolic(mean_anomaly: f64, e: f64) -> Result<f64> {
    if e.is_nan() || e <= 1.0 {
        return Err(SkyError::InvalidInput(format!(
            "hyperbolic eccentricity {} must exceed 1",
            e
        )));
    }
    let m = mean_anomaly;
    let mut anomaly = m.signum() * (2.0 * m.abs() / e + 1.8).ln();
    for iteration in 0..KEPLER_MAX_ITERATIONS {
        let delta = (e * anomaly.sinh() - anomaly - m) / (e * anomaly.cosh() - 1.0);
        anomaly -= delta;
        trace!("hyperbolic Kepler step {}: H={} dH={}", iteration, anomaly, delta);
        if delta.abs() < KEPLER_TOLERANCE * anomaly.abs().max(1.0) {
            return Ok(anomaly);
        }
    }
    Err(SkyError::NonConvergence {
        what: "Hyperbolic Kepler equation".to_string(),
        iterations: KEPLER_MAX_ITERATIONS,
    })
}

/// Keplerian elements of a conic orbit about the Sun
///
/// Angles in radians on the reference plane of the elements, distances in
/// AU, rates per day. `semi_major_axis` is negative for hyperbolic orbits.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConicOrbit {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub ascending_node: f64,
    pub argument_of_periapsis: f64,
    /// Mean anomaly at `epoch`
    pub mean_anomaly: f64,
    /// Mean motion, radians per day
    pub mean_motion: f64,
    /// Epoch of the elements, Julian day
    pub epoch: f64,
}

impl ConicOrbit {
    /// Heliocentric state at `jd` on the reference plane of the elements
    pub fn state_at(&self, jd: f64) -> Result<StateVector> {
        let e = self.eccentricity;
        let a = self.semi_major_axis.abs();
        let n = self.mean_motion;
        let m = self.mean_anomaly + n * (jd - self.epoch);

        let (position, velocity) = if e < 1.0 {
            let big_e = solve_elliptic(m, e)?;
            let (sin_e, cos_e) = big_e.sin_cos();
            let root = (1.0 - e * e).sqrt();
            let rate = n / (1.0 - e * cos_e);
            (
                Vector3::new(a * (cos_e - e), a * root * sin_e, 0.0),
                Vector3::new(-a * sin_e * rate, a * root * cos_e * rate, 0.0),
            )
        } else {
            let h = solve_hyperbolic(m, e)?;
            let (sinh_h, cosh_h) = (h.sinh(), h.cosh());
            let root = (e * e - 1.0).sqrt();
            let rate = n / (e * cosh_h - 1.0);
            (
                Vector3::new(a * (e - cosh_h), a * root * sinh_h, 0.0),
                Vector3::new(-a * sinh_h * rate, a * root * cosh_h * rate, 0.0),
            )
        };

        let to_reference = r3(-self.ascending_node)
            * r1(-self.inclination)
            * r3(-self.argument_of_periapsis);
        Ok(StateVector::with_velocity(
            to_reference * position,
            to_reference * velocity,
        ))
    }
}
