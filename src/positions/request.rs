//! Ephemeris request configuration

use crate::almanac::{EventWindow, HorizonEvent};
use crate::framelib::ReferenceFrame;
use crate::planetlib::Body;
use crate::precessionlib::PrecessionModel;
use crate::{Result, SkyError};

/// How far the reduction goes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum EphemerisKind {
    /// Instantaneous position, no light-time correction
    Geometric,
    /// Light-time corrected
    Astrometric,
    /// Light-time, deflection, aberration and nutation applied
    #[default]
    Apparent,
}

/// Equinox the output coordinates refer to
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub enum Equinox {
    /// The epoch of the request
    #[default]
    OfDate,
    /// A fixed epoch, TT Julian day
    JulianDay(f64),
}

impl Equinox {
    pub const J2000: Equinox = Equinox::JulianDay(crate::constants::J2000);

    /// Concrete Julian day for a request at `jd_tt`
    pub fn resolve(&self, jd_tt: f64) -> f64 {
        match *self {
            Equinox::OfDate => jd_tt,
            Equinox::JulianDay(jd) => jd,
        }
    }
}

/// What to compute, for which body, and in which frame
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EphemerisRequest {
    pub target: Body,
    pub kind: EphemerisKind,
    pub equinox: Equinox,
    pub topocentric: bool,
    pub precession_model: PrecessionModel,
    pub frame: ReferenceFrame,
    /// Also solve for rise, set and transit
    pub events: bool,
    pub horizon_event: HorizonEvent,
    pub window: EventWindow,
}

impl Default for EphemerisRequest {
    fn default() -> Self {
        Self {
            target: Body::Sun,
            kind: EphemerisKind::default(),
            equinox: Equinox::default(),
            topocentric: false,
            precession_model: PrecessionModel::default(),
            frame: ReferenceFrame::default(),
            events: false,
            horizon_event: HorizonEvent::default(),
            window: EventWindow::default(),
        }
    }
}

impl EphemerisRequest {
    /// Apparent, geocentric, equinox-of-date request for `target`
    pub fn new(target: Body) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: EphemerisKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_equinox(mut self, equinox: Equinox) -> Self {
        self.equinox = equinox;
        self
    }

    pub fn with_topocentric(mut self, topocentric: bool) -> Self {
        self.topocentric = topocentric;
        self
    }

    pub fn with_precession_model(mut self, model: PrecessionModel) -> Self {
        self.precession_model = model;
        self
    }

    pub fn with_frame(mut self, frame: ReferenceFrame) -> Self {
        self.frame = frame;
        self
    }

    /// Request rise, set and transit for `event` in `window`
    pub fn with_events(mut self, event: HorizonEvent, window: EventWindow) -> Self {
        self.events = true;
        self.horizon_event = event;
        self.window = window;
        self
    }

    /// Checks the values serde cannot
    pub fn validate(&self) -> Result<()> {
        if let Equinox::JulianDay(jd) = self.equinox {
            if !jd.is_finite() {
                return Err(SkyError::InvalidInput(format!("equinox {} is not finite", jd)));
            }
        }
        if let HorizonEvent::Custom(altitude) = self.horizon_event {
            if !altitude.is_finite() || altitude.abs() > 90.0 {
                return Err(SkyError::InvalidInput(format!(
                    "horizon altitude {} is outside ±90°",
                    altitude
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a request from JSON
    ///
    /// ```rust
    /// use skyreduce::positions::{EphemerisKind, EphemerisRequest};
    /// use skyreduce::planetlib::Body;
    ///
    /// let r = EphemerisRequest::from_json(r#"{"target": "Jupiter", "kind": "Astrometric"}"#).unwrap();
    /// assert_eq!(r.target, Body::Jupiter);
    /// assert_eq!(r.kind, EphemerisKind::Astrometric);
    /// assert!(!r.topocentric);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(json)
            .map_err(|e| SkyError::InvalidInput(format!("bad ephemeris request: {}", e)))?;
        request.validate()?;
        Ok(request)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SkyError::InvalidInput(format!("cannot serialize request: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let r = EphemerisRequest::default();
        assert_eq!(r.kind, EphemerisKind::Apparent);
        assert_eq!(r.equinox, Equinox::OfDate);
        assert_eq!(r.precession_model, PrecessionModel::Laskar1986);
        assert_eq!(r.frame, ReferenceFrame::DynamicalMeanEquinox);
        assert_eq!(r.horizon_event, HorizonEvent::Horizon);
        assert_eq!(r.window, EventWindow::Nearest);
        assert!(!r.topocentric && !r.events);
    }

    #[test]
    fn test_json_round_trip() {
        let r = EphemerisRequest::new(Body::Catalog(42))
            .with_equinox(Equinox::J2000)
            .with_topocentric(true)
            .with_precession_model(PrecessionModel::Iau2006)
            .with_frame(ReferenceFrame::Icrs)
            .with_events(HorizonEvent::Custom(-3.5), EventWindow::Next);
        let back = EphemerisRequest::from_json(&r.to_json().unwrap()).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_bad_json_is_invalid_input() {
        assert!(matches!(
            EphemerisRequest::from_json("{\"target\": \"Vulcan\"}"),
            Err(SkyError::InvalidInput(_))
        ));
        assert!(EphemerisRequest::from_json(r#"{"horizon_event": {"Custom": 120.0}}"#).is_err());
    }

    #[test]
    fn test_equinox_resolution() {
        assert_eq!(Equinox::OfDate.resolve(2_455_000.5), 2_455_000.5);
        assert_eq!(Equinox::J2000.resolve(2_455_000.5), 2_451_545.0);
    }
}
