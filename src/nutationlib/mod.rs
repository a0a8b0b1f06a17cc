//! Nutation: the short-period motion of the true pole about the mean pole
//!
//! The reduction only needs Δψ and Δε at an epoch; anything that can supply
//! them implements [`Nutation`]. [`Iau2000B`] is the bundled series.

pub mod iau2000b;

pub use iau2000b::Iau2000B;

use crate::coordinates::rotation::{r1, r3};
use crate::precessionlib::{mean_obliquity, PrecessionModel};
use nalgebra::{Matrix3, Vector3};

/// Nutation in longitude and obliquity, radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutationAngles {
    pub dpsi: f64,
    pub deps: f64,
}

/// A nutation theory
pub trait Nutation {
    /// Δψ and Δε at `jd_tt`
    fn angles(&self, jd_tt: f64) -> NutationAngles;

    /// Rotates a mean-of-date vector to the true equator and equinox of date
    fn apply(&self, jd_tt: f64, v: &Vector3<f64>, model: PrecessionModel) -> Vector3<f64> {
        nutation_matrix(mean_obliquity(jd_tt, model), self.angles(jd_tt)) * v
    }
}

/// Mean-to-true rotation `R1(-ε-Δε)·R3(-Δψ)·R1(ε)` for mean obliquity `eps`
pub fn nutation_matrix(eps: f64, angles: NutationAngles) -> Matrix3<f64> {
    r1(-(eps + angles.deps)) * r3(-angles.dpsi) * r1(eps)
}

/// A nutation theory with observed celestial pole offsets added on top
#[derive(Clone, Copy)]
pub struct PoleCorrected<'a> {
    inner: &'a dyn Nutation,
    offsets: NutationAngles,
}

impl<'a> PoleCorrected<'a> {
    pub fn new(inner: &'a dyn Nutation, offsets: NutationAngles) -> Self {
        Self { inner, offsets }
    }
}

impl Nutation for PoleCorrected<'_> {
    fn angles(&self, jd_tt: f64) -> NutationAngles {
        let base = self.inner.angles(jd_tt);
        NutationAngles {
            dpsi: base.dpsi + self.offsets.dpsi,
            deps: base.deps + self.offsets.deps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ASEC2RAD, J2000};
    use approx::assert_relative_eq;

    struct Fixed(NutationAngles);

    impl Nutation for Fixed {
        fn angles(&self, _jd_tt: f64) -> NutationAngles {
            self.0
        }
    }

    #[test]
    fn test_zero_nutation_is_identity() {
        let n = Fixed(NutationAngles::default());
        let v = Vector3::new(0.4, -0.3, 0.8);
        assert_relative_eq!(
            n.apply(J2000 + 100.0, &v, PrecessionModel::Iau2006),
            v,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_equinox_shift_along_ecliptic() {
        // A pure Δψ moves the equinox direction by Δψ·cos ε in right ascension
        let dpsi = 10.0 * ASEC2RAD;
        let eps = 23.44_f64.to_radians();
        let m = nutation_matrix(eps, NutationAngles { dpsi, deps: 0.0 });
        let x = m * Vector3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(x.y.atan2(x.x), dpsi * eps.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_is_orthonormal() {
        let m = nutation_matrix(
            0.409,
            NutationAngles {
                dpsi: -6.7e-5,
                deps: -2.8e-5,
            },
        );
        assert_relative_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_pole_offsets_add() {
        let base = Iau2000B::new();
        let offsets = NutationAngles {
            dpsi: 1e-7,
            deps: -2e-7,
        };
        let corrected = PoleCorrected::new(&base, offsets);
        let a = base.angles(J2000);
        let b = corrected.angles(J2000);
        assert_relative_eq!(b.dpsi - a.dpsi, 1e-7, epsilon = 1e-18);
        assert_relative_eq!(b.deps - a.deps, -2e-7, epsilon = 1e-18);
    }
}
