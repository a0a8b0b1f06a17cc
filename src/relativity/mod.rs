//! Relativistic corrections to apparent directions
//!
//! Gravitational light deflection by a massive body and the aberration
//! caused by the observer's velocity. Both operate on rectangular vectors in
//! AU (velocities in AU/day) and return new vectors.

use crate::constants::{C_AUDAY, SUN_SCHWARZSCHILD_AU};
use nalgebra::Vector3;

/// Deflection is skipped when the object and observer directions, seen from
/// the deflector, are this close to parallel or antiparallel
pub const DEFLECTION_GUARD: f64 = 0.99999999999;

/// Bends the observer-to-object vector `p` for the gravity of one body
///
/// `observer` and `target` are the observer and object positions relative
/// to the reference body (normally the Sun). The deflecting body sits at
/// `deflector_offset` from that reference, and `relative_mass` is its mass in
/// units of the reference body's mass.
///
/// Near conjunction or opposition the correction is undefined and `p` is
/// returned unchanged.
pub fn deflection_correction(
    p: &Vector3<f64>,
    observer: &Vector3<f64>,
    target: &Vector3<f64>,
    deflector_offset: &Vector3<f64>,
    relative_mass: f64,
) -> Vector3<f64> {
    let e = observer - deflector_offset;
    let q = target - deflector_offset;

    let (pmag, emag, qmag) = (p.norm(), e.norm(), q.norm());
    if pmag == 0.0 || emag == 0.0 || qmag == 0.0 {
        return *p;
    }
    let (pu, eu, qu) = (p / pmag, e / emag, q / qmag);

    let qe = qu.dot(&eu);
    if qe.abs() > DEFLECTION_GUARD {
        return *p;
    }
    let pq = pu.dot(&qu);
    let ep = eu.dot(&pu);

    let c = relative_mass * SUN_SCHWARZSCHILD_AU / (emag * (1.0 + qe));
    p + pmag * c * (pq * eu - ep * qu)
}

/// Deflection by the Sun, with heliocentric `observer` and `target`
pub fn solar_deflection(
    p: &Vector3<f64>,
    observer: &Vector3<f64>,
    target: &Vector3<f64>,
) -> Vector3<f64> {
    deflection_correction(p, observer, target, &Vector3::zeros(), 1.0)
}

/// Relativistic aberration of the direction `p` for an observer moving with
/// `velocity` (AU/day)
///
/// The result keeps the length `light_time · c` when `light_time` is
/// positive, otherwise the length of `p`. Observer speeds are assumed to be
/// far below c.
pub fn aberration(p: &Vector3<f64>, velocity: &Vector3<f64>, light_time: f64) -> Vector3<f64> {
    let pmag = p.norm();
    if pmag == 0.0 {
        return *p;
    }
    let u = p / pmag;
    let v = velocity / C_AUDAY;

    let beta = (1.0 - v.norm_squared()).sqrt();
    let pv = u.dot(&v);
    let a = 1.0 + pv / (1.0 + beta);
    let b = 1.0 + pv;

    let direction = (beta * u + a * v) / b;
    let distance = if light_time > 0.0 {
        light_time * C_AUDAY
    } else {
        pmag
    };
    direction * distance
}
