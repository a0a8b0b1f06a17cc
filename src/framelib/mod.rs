//! Reference frames and the rotations between them

pub mod bias;
pub mod inertial;

pub use bias::{to_icrs_frame, to_j2000_frame};
pub use inertial::{ecliptic_spherical, ecliptic_to_equatorial, equatorial_to_ecliptic};

use nalgebra::Vector3;

/// Frame in which J2000 positions are delivered or requested
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum ReferenceFrame {
    /// Mean equator and dynamical equinox of J2000
    #[default]
    DynamicalMeanEquinox,
    /// International Celestial Reference System
    Icrs,
}

/// Re-expresses a J2000 vector given in `from` in the frame `to`
pub fn apply_frame_bias(v: &Vector3<f64>, from: ReferenceFrame, to: ReferenceFrame) -> Vector3<f64> {
    match (from, to) {
        (ReferenceFrame::Icrs, ReferenceFrame::DynamicalMeanEquinox) => to_j2000_frame(v),
        (ReferenceFrame::DynamicalMeanEquinox, ReferenceFrame::Icrs) => to_icrs_frame(v),
        _ => *v,
    }
}
