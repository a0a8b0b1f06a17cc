//! Diurnal parallax and diurnal aberration

use super::ObserverLocation;
use crate::constants::{AU_M, DAY_S, EARTH_ANGVEL};
use crate::coordinates::StateVector;
use crate::relativity::aberration;
use nalgebra::Vector3;

/// Geocentric position (AU) and velocity (AU/day) of the observer on the
/// true equator of date, for local sidereal time `lst` (radians)
pub fn observer_state(observer: &ObserverLocation, lst: f64) -> StateVector {
    let r = observer.geocentric_radius() * observer.ellipsoid().a / AU_M;
    let (sin_phi, cos_phi) = observer.geocentric_latitude().sin_cos();
    let (sin_t, cos_t) = lst.sin_cos();
    let position = Vector3::new(r * cos_phi * cos_t, r * cos_phi * sin_t, r * sin_phi);

    let omega = Vector3::new(0.0, 0.0, EARTH_ANGVEL * DAY_S);
    StateVector::with_velocity(position, omega.cross(&position))
}

/// Moves a geocentric apparent vector `p` to the observer's position and
/// applies diurnal aberration
pub fn topocentric_correction(p: &Vector3<f64>, observer: &ObserverLocation, lst: f64) -> Vector3<f64> {
    let site = observer_state(observer, lst);
    let shifted = p - site.position;
    aberration(&shifted, &site.velocity_or_zero(), 0.0)
}
