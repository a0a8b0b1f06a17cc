//! Solar system bodies and the sources that position them
//!
//! A [`PositionSource`] evaluates some orbital theory: heliocentric states
//! on the mean equator and equinox of J2000 (or the ICRS), in AU and AU/day,
//! over a declared span of TDB Julian days. The reduction pipeline drives
//! it through the light-time iteration.

pub mod kepler;
pub mod keplerian;
pub mod lunar;

pub use kepler::{solve_elliptic, solve_hyperbolic, ConicOrbit};
pub use keplerian::KeplerianSource;

use crate::coordinates::StateVector;
use crate::framelib::ReferenceFrame;
use crate::{Result, SkyError};
use nalgebra::Vector3;
use std::fmt;

/// Enum representing the major solar system bodies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum Body {
    #[default]
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    /// Object identified by a source-specific catalog number
    Catalog(u32),
}

impl Body {
    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Catalog(_) => "Catalog object",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Catalog(n) => write!(f, "Catalog object {}", n),
            other => f.write_str(other.name()),
        }
    }
}

/// An orbital theory evaluator
pub trait PositionSource {
    /// Human-readable name used in error messages
    fn name(&self) -> &str;

    /// Frame of the J2000 vectors this source delivers
    fn frame(&self) -> ReferenceFrame {
        ReferenceFrame::DynamicalMeanEquinox
    }

    /// First and last TDB Julian day the theory is valid for
    fn validity(&self) -> (f64, f64);

    /// Whether `body` is modelled
    fn supports(&self, body: Body) -> bool;

    /// Heliocentric state of `body` at `jd_tdb`
    fn heliocentric_state(&self, body: Body, jd_tdb: f64) -> Result<StateVector>;

    /// Heliocentric state of the observing platform (the Earth)
    fn observer_state(&self, jd_tdb: f64) -> Result<StateVector> {
        self.heliocentric_state(Body::Earth, jd_tdb)
    }

    /// Position of `body` at `jd_tdb - light_time` relative to the observing
    /// platform at `jd_tdb`
    fn geocentric_position(&self, body: Body, jd_tdb: f64, light_time: f64) -> Result<Vector3<f64>> {
        let target = self.heliocentric_state(body, jd_tdb - light_time)?;
        let earth = self.observer_state(jd_tdb)?;
        Ok(target.position - earth.position)
    }

    /// `InvalidDate` unless `jd_tdb` lies in the validity span
    fn check_epoch(&self, jd_tdb: f64) -> Result<()> {
        let (first, last) = self.validity();
        if jd_tdb.is_finite() && (first..=last).contains(&jd_tdb) {
            Ok(())
        } else {
            Err(SkyError::invalid_date(
                jd_tdb,
                format!(
                    "outside the validity span {}..{} of {}",
                    first,
                    last,
                    self.name()
                ),
            ))
        }
    }

    /// `UnsupportedTarget` unless `body` is modelled
    fn check_target(&self, body: Body) -> Result<()> {
        if self.supports(body) {
            Ok(())
        } else {
            Err(SkyError::UnsupportedTarget {
                body: body.to_string(),
                source_name: self.name().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl PositionSource for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn validity(&self) -> (f64, f64) {
            (2_400_000.5, 2_500_000.5)
        }

        fn supports(&self, body: Body) -> bool {
            matches!(body, Body::Earth | Body::Catalog(_))
        }

        fn heliocentric_state(&self, body: Body, jd_tdb: f64) -> Result<StateVector> {
            Ok(match body {
                Body::Earth => StateVector::new(Vector3::new(1.0, 0.0, 0.0)),
                _ => StateVector::new(Vector3::new(0.0, jd_tdb - 2_451_545.0, 0.0)),
            })
        }
    }

    #[test]
    fn test_body_display() {
        assert_eq!(Body::Mars.to_string(), "Mars");
        assert_eq!(Body::Catalog(7).to_string(), "Catalog object 7");
    }

    #[test]
    fn test_default_checks() {
        let s = Fixed;
        assert!(s.check_epoch(2_451_545.0).is_ok());
        assert!(matches!(
            s.check_epoch(2_600_000.0),
            Err(SkyError::InvalidDate { .. })
        ));
        assert!(s.check_epoch(f64::NAN).is_err());
        let err = s.check_target(Body::Moon).unwrap_err();
        assert!(matches!(err, SkyError::UnsupportedTarget { .. }));
        assert!(err.to_string().contains("Moon"));
    }

    #[test]
    fn test_geocentric_position_uses_retarded_target() {
        let s = Fixed;
        let p = s
            .geocentric_position(Body::Catalog(1), 2_451_555.0, 2.0)
            .unwrap();
        assert_eq!(p, Vector3::new(-1.0, 8.0, 0.0));
    }
}
