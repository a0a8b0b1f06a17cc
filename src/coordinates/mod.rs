//! Rectangular and spherical coordinate primitives used throughout the reduction

pub mod angle;
pub mod rotation;
pub mod spherical;
pub mod state;

pub use angle::{normalize_radians, normalize_signed_radians, Sexagesimal};
pub use spherical::SphericalPosition;
pub use state::StateVector;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f64::consts::PI;

    #[test]
    fn test_state_and_spherical_agree() {
        let state = StateVector::new(Vector3::new(0.0, 2.0, 0.0));
        let sph = SphericalPosition::from_rectangular(&state.position);

        assert_relative_eq!(sph.longitude, PI / 2.0, epsilon = 1e-15);
        assert_relative_eq!(sph.latitude, 0.0, epsilon = 1e-15);
        assert_relative_eq!(sph.radius, state.distance(), epsilon = 1e-15);
    }
}
