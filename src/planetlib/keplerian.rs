//! Low-precision planetary positions from mean Keplerian elements
//!
//! Uses JPL's "Keplerian Elements for Approximate Positions of the Major
//! Planets" (Standish), valid 1800-2050 AD. Elements refer to the mean
//! ecliptic and equinox of J2000 and give positions good to a few
//! arcminutes. The Earth is the Earth-Moon barycentre moved to the
//! geocentre with a low-precision lunar offset; the Moon itself is not a
//! supported target.

use super::kepler::ConicOrbit;
use super::lunar::geocentre_offset;
use super::{Body, PositionSource};
use crate::constants::{DEG2RAD, J2000, JULIAN_CENTURY};
use crate::coordinates::StateVector;
use crate::framelib::ecliptic_to_equatorial;
use crate::Result;
use nalgebra::Vector3;

/// First Julian day covered (1800-01-01)
pub const KEPLERIAN_START: f64 = 2_378_496.5;
/// Last Julian day covered (2050-12-31)
pub const KEPLERIAN_END: f64 = 2_469_807.5;
/// Obliquity used to rotate the elements onto the equator, degrees
pub const ELEMENTS_OBLIQUITY_DEG: f64 = 23.439_28;
/// Half-step of the central difference for the geocentre offset velocity, days
const OFFSET_STEP: f64 = 0.01;

/// Mean elements and their rates per Julian century:
/// `[a, e, I, L, varpi, Omega]` (AU, -, degrees)
type ElementRow = ([f64; 6], [f64; 6]);

#[rustfmt::skip]
const EMB: ElementRow = (
    [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
);
#[rustfmt::skip]
const MERCURY: ElementRow = (
    [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
    [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
);
#[rustfmt::skip]
const VENUS: ElementRow = (
    [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
    [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
);
#[rustfmt::skip]
const MARS: ElementRow = (
    [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
    [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
);
#[rustfmt::skip]
const JUPITER: ElementRow = (
    [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
    [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
);
#[rustfmt::skip]
const SATURN: ElementRow = (
    [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
    [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
);
#[rustfmt::skip]
const URANUS: ElementRow = (
    [19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03],
    [-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89],
);
#[rustfmt::skip]
const NEPTUNE: ElementRow = (
    [30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74],
    [0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64],
);
#[rustfmt::skip]
const PLUTO: ElementRow = (
    [39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84],
    [-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82],
);

/// Position source built on mean Keplerian elements
#[derive(Debug, Clone, Copy, Default)]
pub struct KeplerianSource;

impl KeplerianSource {
    pub fn new() -> Self {
        Self
    }

    fn elements(body: Body) -> Option<&'static ElementRow> {
        match body {
            Body::Mercury => Some(&MERCURY),
            Body::Venus => Some(&VENUS),
            Body::Earth => Some(&EMB),
            Body::Mars => Some(&MARS),
            Body::Jupiter => Some(&JUPITER),
            Body::Saturn => Some(&SATURN),
            Body::Uranus => Some(&URANUS),
            Body::Neptune => Some(&NEPTUNE),
            Body::Pluto => Some(&PLUTO),
            Body::Sun | Body::Moon | Body::Catalog(_) => None,
        }
    }

    /// Osculating-style orbit for `body` at `jd`, on the J2000 ecliptic
    pub fn orbit(body: Body, jd: f64) -> Option<ConicOrbit> {
        let (base, rate) = Self::elements(body)?;
        let t = (jd - J2000) / JULIAN_CENTURY;
        let el: Vec<f64> = base.iter().zip(rate.iter()).map(|(b, r)| b + r * t).collect();
        let (a, e, incl, mean_longitude, perihelion, node) = (el[0], el[1], el[2], el[3], el[4], el[5]);

        Some(ConicOrbit {
            semi_major_axis: a,
            eccentricity: e,
            inclination: incl * DEG2RAD,
            ascending_node: node * DEG2RAD,
            argument_of_periapsis: (perihelion - node) * DEG2RAD,
            mean_anomaly: (mean_longitude - perihelion) * DEG2RAD,
            mean_motion: rate[3] * DEG2RAD / JULIAN_CENTURY,
            epoch: jd,
        })
    }
}

impl PositionSource for KeplerianSource {
    fn name(&self) -> &str {
        "Keplerian elements"
    }

    fn validity(&self) -> (f64, f64) {
        (KEPLERIAN_START, KEPLERIAN_END)
    }

    fn supports(&self, body: Body) -> bool {
        body == Body::Sun || Self::elements(body).is_some()
    }

    fn heliocentric_state(&self, body: Body, jd_tdb: f64) -> Result<StateVector> {
        self.check_target(body)?;
        let orbit = match Self::orbit(body, jd_tdb) {
            Some(orbit) => orbit,
            None => return Ok(StateVector::with_velocity(Vector3::zeros(), Vector3::zeros())),
        };
        let ecliptic = orbit.state_at(jd_tdb)?;
        let mut position = ecliptic.position;
        let mut velocity = ecliptic.velocity_or_zero();
        if body == Body::Earth {
            position += geocentre_offset(jd_tdb);
            velocity += (geocentre_offset(jd_tdb + OFFSET_STEP)
                - geocentre_offset(jd_tdb - OFFSET_STEP))
                / (2.0 * OFFSET_STEP);
        }
        let eps = ELEMENTS_OBLIQUITY_DEG * DEG2RAD;
        Ok(StateVector::with_velocity(
            ecliptic_to_equatorial(&position, eps),
            ecliptic_to_equatorial(&velocity, eps),
        ))
    }
}
