//! The Earth as an observing platform
//!
//! Observer sites on a reference ellipsoid, sidereal time, the topocentric
//! correction, horizontal coordinates with refraction, and the
//! Earth-orientation cache feeding UT1 and celestial pole offsets into the
//! reduction.

pub mod eop;
pub mod horizontal;
pub mod sidereal;
pub mod topocentric;

pub use eop::{EarthOrientationSource, EopCache, EopRecord, EopTable};
pub use horizontal::{horizontal_coordinates, refraction, Horizontal};
pub use sidereal::{apparent_sidereal_time, equation_of_equinoxes, mean_sidereal_time};
pub use topocentric::{observer_state, topocentric_correction};

use crate::constants::{EARTH_RADIUS, IERS_2010_INVERSE_EARTH_FLATTENING};
use crate::{Result, SkyError};

/// Reference ellipsoid: equatorial radius and inverse flattening
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Inverse flattening 1/f
    pub inverse_flattening: f64,
}

impl Ellipsoid {
    pub const IERS2010: Ellipsoid = Ellipsoid::new(EARTH_RADIUS, IERS_2010_INVERSE_EARTH_FLATTENING);
    pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 298.257_223_563);
    pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 298.257_222_101);

    pub const fn new(a: f64, inverse_flattening: f64) -> Self {
        Self {
            a,
            inverse_flattening,
        }
    }

    /// Flattening f
    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    /// Geocentric `(ρ cos φ', ρ sin φ')` in units of `a` for a geodetic
    /// latitude (radians) and height above the ellipsoid (metres)
    pub fn geocentric_components(&self, latitude: f64, height: f64) -> (f64, f64) {
        let one_minus_f = 1.0 - self.flattening();
        let (sin_phi, cos_phi) = latitude.sin_cos();
        let c = 1.0 / (cos_phi * cos_phi + one_minus_f * one_minus_f * sin_phi * sin_phi).sqrt();
        let s = one_minus_f * one_minus_f * c;
        (
            (self.a * c + height) * cos_phi / self.a,
            (self.a * s + height) * sin_phi / self.a,
        )
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::IERS2010
    }
}

/// Standard sea-level pressure, millibars
pub const STANDARD_PRESSURE: f64 = 1010.0;
/// Standard temperature, degrees Celsius
pub const STANDARD_TEMPERATURE: f64 = 10.0;

/// Site description as it appears in configuration files
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Site {
    /// East longitude, degrees
    pub longitude: f64,
    /// Geodetic latitude, degrees
    pub latitude: f64,
    /// Height above the ellipsoid, metres
    pub height: f64,
    /// Pressure, millibars
    pub pressure: f64,
    /// Temperature, degrees Celsius
    pub temperature: f64,
    /// Civil time zone, hours east of Greenwich
    pub time_zone: f64,
    pub ellipsoid: Ellipsoid,
    /// Place the observer at the centre of the Earth
    pub geocenter: bool,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            height: 0.0,
            pressure: STANDARD_PRESSURE,
            temperature: STANDARD_TEMPERATURE,
            time_zone: 0.0,
            ellipsoid: Ellipsoid::default(),
            geocenter: false,
        }
    }
}

/// An observer on (or at the centre of) the Earth
///
/// The geocentric latitude and radius are derived from the geodetic inputs
/// when the location is built and cannot be set independently.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Site", into = "Site")]
pub struct ObserverLocation {
    site: Site,
    longitude: f64,
    latitude: f64,
    geocentric_latitude: f64,
    /// Geocentric distance in units of the equatorial radius
    geocentric_radius: f64,
}

impl ObserverLocation {
    /// Observer at the centre of the Earth
    pub fn geocenter() -> Self {
        Self::derive(Site {
            geocenter: true,
            ..Site::default()
        })
    }

    /// Observer from geodetic east longitude and latitude (degrees) and
    /// height (metres), on the IERS 2010 ellipsoid
    ///
    /// # Errors
    ///
    /// `InvalidInput` when a value is not finite or the latitude is outside
    /// ±90°.
    ///
    /// ```rust
    /// use skyreduce::earthlib::ObserverLocation;
    ///
    /// let greenwich = ObserverLocation::from_degrees(0.0, 51.4779, 46.0).unwrap();
    /// assert!(greenwich.geocentric_latitude().to_degrees() < 51.4779);
    /// assert!(ObserverLocation::from_degrees(0.0, 95.0, 0.0).is_err());
    /// ```
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Result<Self> {
        Self::try_from(Site {
            longitude,
            latitude,
            height,
            ..Site::default()
        })
    }

    /// Same site on another reference ellipsoid
    pub fn with_ellipsoid(self, ellipsoid: Ellipsoid) -> Self {
        Self::derive(Site {
            ellipsoid,
            ..self.site
        })
    }

    /// Local pressure (millibars) and temperature (°C) for refraction
    pub fn with_atmosphere(mut self, pressure: f64, temperature: f64) -> Self {
        self.site.pressure = pressure;
        self.site.temperature = temperature;
        self
    }

    /// Civil time zone in hours east of Greenwich, used by `TimeScale::Local`
    pub fn with_time_zone(mut self, hours: f64) -> Self {
        self.site.time_zone = hours;
        self
    }

    fn derive(site: Site) -> Self {
        let longitude = site.longitude.to_radians();
        let latitude = site.latitude.to_radians();
        let (rho_cos, rho_sin) = if site.geocenter {
            (0.0, 0.0)
        } else {
            site.ellipsoid.geocentric_components(latitude, site.height)
        };
        Self {
            site,
            longitude,
            latitude,
            geocentric_latitude: rho_sin.atan2(rho_cos),
            geocentric_radius: rho_cos.hypot(rho_sin),
        }
    }

    /// East longitude, radians
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Geodetic latitude, radians
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Height above the ellipsoid, metres
    pub fn height(&self) -> f64 {
        self.site.height
    }

    pub fn pressure(&self) -> f64 {
        self.site.pressure
    }

    pub fn temperature(&self) -> f64 {
        self.site.temperature
    }

    /// Civil time zone, hours east of Greenwich
    pub fn time_zone(&self) -> f64 {
        self.site.time_zone
    }

    pub fn ellipsoid(&self) -> Ellipsoid {
        self.site.ellipsoid
    }

    /// Geocentric latitude φ', radians
    pub fn geocentric_latitude(&self) -> f64 {
        self.geocentric_latitude
    }

    /// Distance from the geocentre in equatorial radii
    pub fn geocentric_radius(&self) -> f64 {
        self.geocentric_radius
    }

    /// True for the observer at the centre of the Earth
    pub fn is_geocenter(&self) -> bool {
        self.site.geocenter
    }
}

impl TryFrom<Site> for ObserverLocation {
    type Error = SkyError;

    fn try_from(site: Site) -> Result<Self> {
        let values = [
            site.longitude,
            site.latitude,
            site.height,
            site.pressure,
            site.temperature,
            site.time_zone,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SkyError::InvalidInput(
                "observer location fields must be finite".to_string(),
            ));
        }
        if site.latitude.abs() > 90.0 {
            return Err(SkyError::InvalidInput(format!(
                "latitude {} is outside ±90°",
                site.latitude
            )));
        }
        if !(site.ellipsoid.a > 0.0 && site.ellipsoid.inverse_flattening > 1.0) {
            return Err(SkyError::InvalidInput("degenerate reference ellipsoid".to_string()));
        }
        Ok(Self::derive(site))
    }
}

impl From<ObserverLocation> for Site {
    fn from(observer: ObserverLocation) -> Self {
        observer.site
    }
}

impl Default for ObserverLocation {
    fn default() -> Self {
        Self::geocenter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_geocenter_has_no_radius() {
        let g = ObserverLocation::geocenter();
        assert!(g.is_geocenter());
        assert_eq!(g.geocentric_radius(), 0.0);

        let json = serde_json::to_string(&g).unwrap();
        let back: ObserverLocation = serde_json::from_str(&json).unwrap();
        assert!(back.is_geocenter());
    }

    #[test]
    fn test_geocentric_latitude_at_45() {
        // φ - φ' peaks near 11.5 arcminutes at 45°
        let obs = ObserverLocation::from_degrees(0.0, 45.0, 0.0).unwrap();
        let diff = (obs.latitude() - obs.geocentric_latitude()).to_degrees() * 60.0;
        assert_relative_eq!(diff, 11.54, epsilon = 0.02);
        assert!(obs.geocentric_radius() < 1.0);
    }

    #[test]
    fn test_pole_radius_is_polar_axis() {
        let obs = ObserverLocation::from_degrees(0.0, 90.0, 0.0).unwrap();
        let e = Ellipsoid::IERS2010;
        assert_relative_eq!(obs.geocentric_radius(), 1.0 - e.flattening(), epsilon = 1e-12);
        assert_relative_eq!(
            obs.geocentric_latitude(),
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_height_raises_radius() {
        let low = ObserverLocation::from_degrees(10.0, 30.0, 0.0).unwrap();
        let high = ObserverLocation::from_degrees(10.0, 30.0, 6378.1366).unwrap();
        assert_relative_eq!(
            high.geocentric_radius() - low.geocentric_radius(),
            0.001,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_ellipsoids_differ_slightly() {
        let iers = ObserverLocation::from_degrees(0.0, 40.0, 0.0).unwrap();
        let wgs = iers.with_ellipsoid(Ellipsoid::WGS84);
        let grs = iers.with_ellipsoid(Ellipsoid::GRS80);
        assert!((iers.geocentric_latitude() - wgs.geocentric_latitude()).abs() < 2e-8);
        assert!((wgs.geocentric_latitude() - grs.geocentric_latitude()).abs() < 1e-10);
    }

    #[test]
    fn test_serde_rederives_geocentric_fields() {
        let obs = ObserverLocation::from_degrees(-70.4, -24.6, 2635.0)
            .unwrap()
            .with_time_zone(-4.0);
        let json = serde_json::to_string(&obs).unwrap();
        let back: ObserverLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obs);

        let bad = r#"{"latitude": 120.0}"#;
        assert!(serde_json::from_str::<ObserverLocation>(bad).is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(ObserverLocation::from_degrees(f64::NAN, 0.0, 0.0).is_err());
        assert!(ObserverLocation::from_degrees(0.0, -90.5, 0.0).is_err());
    }
}
