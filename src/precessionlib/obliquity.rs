//! Obliquity of the ecliptic

use super::coefficients::{self, ObliquitySeries};
use super::PrecessionModel;
use crate::constants::{ASEC2RAD, J2000, JULIAN_MILLENNIUM};
use crate::nutationlib::Nutation;

/// Mean obliquity of the ecliptic at `jd_tt`, in radians
///
/// ```rust
/// use skyreduce::precessionlib::{mean_obliquity, PrecessionModel};
///
/// let eps = mean_obliquity(2_451_545.0, PrecessionModel::Iau2006);
/// assert!((eps.to_degrees() - 23.439279).abs() < 1e-6);
/// ```
pub fn mean_obliquity(jd_tt: f64, model: PrecessionModel) -> f64 {
    let series = series(model);
    let t = (jd_tt - J2000) / JULIAN_MILLENNIUM;
    (coefficients::horner(&series.terms, t) * t + series.constant) * ASEC2RAD
}

/// True obliquity: mean obliquity plus the nutation in obliquity
pub fn true_obliquity(jd_tt: f64, model: PrecessionModel, nutation: &dyn Nutation) -> f64 {
    mean_obliquity(jd_tt, model) + nutation.angles(jd_tt).deps
}

fn series(model: PrecessionModel) -> &'static ObliquitySeries {
    match model {
        PrecessionModel::Laskar1986 => &coefficients::OBLIQUITY_LASKAR_1986,
        PrecessionModel::Simon1994 => &coefficients::OBLIQUITY_SIMON_1994,
        PrecessionModel::Williams1994 => &coefficients::OBLIQUITY_WILLIAMS_1994,
        PrecessionModel::Iau2000 => &coefficients::OBLIQUITY_IAU_2000,
        PrecessionModel::Iau2006 => &coefficients::OBLIQUITY_IAU_2006,
    }
}
