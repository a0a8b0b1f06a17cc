//! Low-precision geocentric Moon, used to split the Earth from the
//! Earth-Moon barycentre
//!
//! Leading terms of the lunar theory in longitude, latitude and horizontal
//! parallax. Good to a few hundredths of a degree, which puts the Earth within
//! a few kilometres of its true offset from the barycentre.

use crate::constants::{AU_M, DEG2RAD, EARTH_MOON_MASS_RATIO, EARTH_RADIUS, J2000, JULIAN_CENTURY};
use nalgebra::Vector3;

/// General precession in longitude, degrees per Julian century
const PRECESSION_RATE_DEG: f64 = 1.396_971;

/// Geocentric Moon on the mean ecliptic and equinox of J2000, AU
pub fn moon_ecliptic(jd_tdb: f64) -> Vector3<f64> {
    let t = (jd_tdb - J2000) / JULIAN_CENTURY;

    let mean_longitude = 218.316_447_7 + 481_267.881_234_21 * t;
    let elongation = (297.850_192_1 + 445_267.111_403_4 * t) * DEG2RAD;
    let sun_anomaly = (357.529_109_2 + 35_999.050_290_9 * t) * DEG2RAD;
    let anomaly = (134.963_396_4 + 477_198.867_505_5 * t) * DEG2RAD;
    let latitude_argument = (93.272_095 + 483_202.017_523_3 * t) * DEG2RAD;

    let longitude = mean_longitude
        + 6.289 * anomaly.sin()
        + 1.274 * (2.0 * elongation - anomaly).sin()
        + 0.658 * (2.0 * elongation).sin()
        + 0.214 * (2.0 * anomaly).sin()
        - 0.186 * sun_anomaly.sin()
        - 0.114 * (2.0 * latitude_argument).sin()
        - PRECESSION_RATE_DEG * t;
    let latitude = 5.128 * latitude_argument.sin()
        + 0.281 * (anomaly + latitude_argument).sin()
        + 0.278 * (anomaly - latitude_argument).sin();
    let parallax = 0.9508
        + 0.0518 * anomaly.cos()
        + 0.0095 * (2.0 * elongation - anomaly).cos()
        + 0.0078 * (2.0 * elongation).cos()
        + 0.0028 * (2.0 * anomaly).cos();

    let distance = EARTH_RADIUS / AU_M / (parallax * DEG2RAD).sin();
    let (lon, lat) = (longitude * DEG2RAD, latitude * DEG2RAD);
    Vector3::new(
        distance * lat.cos() * lon.cos(),
        distance * lat.cos() * lon.sin(),
        distance * lat.sin(),
    )
}

/// Geocentre minus Earth-Moon barycentre, on the J2000 ecliptic, AU
pub fn geocentre_offset(jd_tdb: f64) -> Vector3<f64> {
    -moon_ecliptic(jd_tdb) / (1.0 + EARTH_MOON_MASS_RATIO)
}
