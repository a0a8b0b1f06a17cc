//! Precession of the equator and ecliptic
//!
//! Two families of models are available. The matrix models (IAU 2000 and
//! IAU 2006) build one rotation matrix from the ψ_A, ω_A and χ_A angle
//! polynomials. The elementary-rotation models (Laskar 1986, Simon 1994 and
//! Williams 1994) chain five axis rotations through the ecliptic of J2000,
//! taking the obliquity at both ends from [`mean_obliquity`].
//!
//! Every transformation goes through J2000: [`precess`] is
//! [`precess_to_j2000`] followed by [`precess_from_j2000`].

pub mod coefficients;
pub mod obliquity;

pub use obliquity::{mean_obliquity, true_obliquity};

use crate::constants::{ASEC2RAD, J2000, JULIAN_CENTURY, JULIAN_MILLENNIUM};
use crate::coordinates::rotation::{r1, r3, rotate_x, rotate_z};
use coefficients::{MatrixSeries, RotationSeries};
use log::trace;
use nalgebra::{Matrix3, Vector3};

/// Selectable precession/obliquity model
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum PrecessionModel {
    #[default]
    Laskar1986,
    Simon1994,
    Williams1994,
    Iau2000,
    Iau2006,
}

/// The computational strategy behind a model
enum Strategy {
    Elementary(&'static RotationSeries),
    Matrix(&'static MatrixSeries),
}

impl PrecessionModel {
    fn strategy(self) -> Strategy {
        match self {
            PrecessionModel::Laskar1986 => Strategy::Elementary(&coefficients::LASKAR_1986),
            PrecessionModel::Simon1994 => Strategy::Elementary(&coefficients::SIMON_1994),
            PrecessionModel::Williams1994 => Strategy::Elementary(&coefficients::WILLIAMS_1994),
            PrecessionModel::Iau2000 => Strategy::Matrix(&coefficients::IAU_2000),
            PrecessionModel::Iau2006 => Strategy::Matrix(&coefficients::IAU_2006),
        }
    }

    /// True for the IAU 2000/2006 matrix models
    pub fn is_matrix_model(self) -> bool {
        matches!(self.strategy(), Strategy::Matrix(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    ToJ2000,
    FromJ2000,
}

/// Precesses `v` from the mean equator and equinox of `from_jd` to that of
/// `to_jd` (both TT Julian days)
///
/// Returns `v` unchanged when the two epochs are equal.
///
/// ```rust
/// use nalgebra::Vector3;
/// use skyreduce::precessionlib::{precess, PrecessionModel};
///
/// let v = Vector3::new(0.2, -0.7, 0.4);
/// assert_eq!(precess(2_460_000.5, 2_460_000.5, &v, PrecessionModel::Iau2006), v);
/// ```
pub fn precess(from_jd: f64, to_jd: f64, v: &Vector3<f64>, model: PrecessionModel) -> Vector3<f64> {
    if from_jd == to_jd {
        return *v;
    }
    let at_j2000 = precess_to_j2000(from_jd, v, model);
    precess_from_j2000(to_jd, &at_j2000, model)
}

/// Precesses from the equinox of `jd` to J2000
pub fn precess_to_j2000(jd: f64, v: &Vector3<f64>, model: PrecessionModel) -> Vector3<f64> {
    if jd == J2000 {
        return *v;
    }
    match model.strategy() {
        Strategy::Matrix(series) => matrix_for(series, jd).transpose() * v,
        Strategy::Elementary(series) => elementary(series, model, jd, v, Direction::ToJ2000),
    }
}

/// Precesses from J2000 to the equinox of `jd`
pub fn precess_from_j2000(jd: f64, v: &Vector3<f64>, model: PrecessionModel) -> Vector3<f64> {
    if jd == J2000 {
        return *v;
    }
    match model.strategy() {
        Strategy::Matrix(series) => matrix_for(series, jd) * v,
        Strategy::Elementary(series) => elementary(series, model, jd, v, Direction::FromJ2000),
    }
}

/// J2000-to-date rotation matrix for the matrix models, or `None` for the
/// elementary-rotation models
pub fn precession_matrix(jd: f64, model: PrecessionModel) -> Option<Matrix3<f64>> {
    match model.strategy() {
        Strategy::Matrix(series) => Some(matrix_for(series, jd)),
        Strategy::Elementary(_) => None,
    }
}

fn matrix_for(series: &MatrixSeries, jd: f64) -> Matrix3<f64> {
    let t = (jd - J2000) / JULIAN_CENTURY;
    let psi = coefficients::ascending(&series.psi, t) * ASEC2RAD;
    let omega = coefficients::ascending(&series.omega, t) * ASEC2RAD;
    let chi = coefficients::ascending(&series.chi, t) * ASEC2RAD;
    let eps0 = series.epsilon0 * ASEC2RAD;

    r3(chi) * r1(-omega) * r3(-psi) * r1(eps0)
}

fn elementary(
    series: &RotationSeries,
    model: PrecessionModel,
    jd: f64,
    v: &Vector3<f64>,
    direction: Direction,
) -> Vector3<f64> {
    let t = (jd - J2000) / JULIAN_MILLENNIUM;
    let p_a = coefficients::horner(&series.longitude, t) * ASEC2RAD * t;
    let node = coefficients::horner(&series.node, t);
    let incl = coefficients::horner(&series.inclination, t);

    let eps_date = mean_obliquity(jd, model);
    let eps_j2000 = mean_obliquity(J2000, model);
    trace!(
        "elementary precession {:?} T={} pA={} W={} i={}",
        model,
        t,
        p_a,
        node,
        incl
    );

    let (eps_in, eps_out, to_node, tilt, from_node) = match direction {
        Direction::ToJ2000 => (eps_date, eps_j2000, node + p_a, -incl, -node),
        Direction::FromJ2000 => (eps_j2000, eps_date, node, incl, -node - p_a),
    };

    let mut x = *v;
    // Equator to ecliptic
    rotate_x(&mut x, eps_in);
    // To the node, across the inclination of the moving ecliptic, and back
    rotate_z(&mut x, to_node);
    rotate_x(&mut x, tilt);
    rotate_z(&mut x, from_node);
    // Ecliptic to equator
    rotate_x(&mut x, -eps_out);
    x
}
