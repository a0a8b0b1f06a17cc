//! The published result of a reduction

use crate::almanac::EventTime;
use crate::coordinates::Sexagesimal;
use crate::earthlib::Horizontal;
use crate::planetlib::Body;
use crate::{Result, SkyError};
use std::fmt;

/// Position of a body for one request
///
/// Angles are radians, distances AU, light-time days. Equatorial values
/// refer to the equinox in `equinox`; the heliocentric ecliptic values are
/// referred to the same equinox.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PublishedPosition {
    pub target: Body,
    pub ra: f64,
    pub dec: f64,
    /// Geometric observer-to-object distance at the retarded epoch
    pub distance: f64,
    pub helio_longitude: f64,
    pub helio_latitude: f64,
    /// Distance of the object from the Sun
    pub sun_distance: f64,
    pub light_time: f64,
    /// Sun-observer-object angle
    pub elongation: f64,
    /// Sun-object-observer angle
    pub phase_angle: f64,
    pub horizontal: Option<Horizontal>,
    pub rise: Option<EventTime>,
    pub set: Option<EventTime>,
    pub transit: Option<EventTime>,
    pub transit_elevation: Option<f64>,
    /// Terrestrial Time of the request
    pub jd_tt: f64,
    /// Equinox of the output coordinates, TT Julian day
    pub equinox: f64,
}

/// Assembles a [`PublishedPosition`] stage by stage
///
/// Each stage sets its own group of fields; `build` fails while a required
/// group is still missing.
#[derive(Debug, Clone, Default)]
pub struct PublishedPositionBuilder {
    target: Body,
    equatorial: Option<(f64, f64, f64)>,
    heliocentric: Option<(f64, f64, f64)>,
    light_time: f64,
    geometry: (f64, f64),
    horizontal: Option<Horizontal>,
    rise: Option<EventTime>,
    set: Option<EventTime>,
    transit: Option<EventTime>,
    transit_elevation: Option<f64>,
    epochs: Option<(f64, f64)>,
}

impl PublishedPositionBuilder {
    pub fn new(target: Body) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn equatorial(mut self, ra: f64, dec: f64, distance: f64) -> Self {
        self.equatorial = Some((ra, dec, distance));
        self
    }

    pub fn heliocentric(mut self, longitude: f64, latitude: f64, sun_distance: f64) -> Self {
        self.heliocentric = Some((longitude, latitude, sun_distance));
        self
    }

    pub fn light_time(mut self, light_time: f64) -> Self {
        self.light_time = light_time;
        self
    }

    pub fn geometry(mut self, elongation: f64, phase_angle: f64) -> Self {
        self.geometry = (elongation, phase_angle);
        self
    }

    pub fn horizontal(mut self, horizontal: Option<Horizontal>) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn events(
        mut self,
        rise: EventTime,
        set: EventTime,
        transit: EventTime,
        transit_elevation: f64,
    ) -> Self {
        self.rise = Some(rise);
        self.set = Some(set);
        self.transit = Some(transit);
        self.transit_elevation = Some(transit_elevation);
        self
    }

    pub fn epochs(mut self, jd_tt: f64, equinox: f64) -> Self {
        self.epochs = Some((jd_tt, equinox));
        self
    }

    pub fn build(self) -> Result<PublishedPosition> {
        let missing = |what: &str| SkyError::InvalidInput(format!("published position has no {}", what));
        let (ra, dec, distance) = self.equatorial.ok_or_else(|| missing("equatorial place"))?;
        let (helio_longitude, helio_latitude, sun_distance) =
            self.heliocentric.ok_or_else(|| missing("heliocentric place"))?;
        let (jd_tt, equinox) = self.epochs.ok_or_else(|| missing("epoch"))?;
        Ok(PublishedPosition {
            target: self.target,
            ra,
            dec,
            distance,
            helio_longitude,
            helio_latitude,
            sun_distance,
            light_time: self.light_time,
            elongation: self.geometry.0,
            phase_angle: self.geometry.1,
            horizontal: self.horizontal,
            rise: self.rise,
            set: self.set,
            transit: self.transit,
            transit_elevation: self.transit_elevation,
            jd_tt,
            equinox,
        })
    }
}

impl From<PublishedPosition> for PublishedPositionBuilder {
    fn from(p: PublishedPosition) -> Self {
        Self {
            target: p.target,
            equatorial: Some((p.ra, p.dec, p.distance)),
            heliocentric: Some((p.helio_longitude, p.helio_latitude, p.sun_distance)),
            light_time: p.light_time,
            geometry: (p.elongation, p.phase_angle),
            horizontal: p.horizontal,
            rise: p.rise,
            set: p.set,
            transit: p.transit,
            transit_elevation: p.transit_elevation,
            epochs: Some((p.jd_tt, p.equinox)),
        }
    }
}

impl fmt::Display for PublishedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  RA {}  Dec {}  {:.6} AU",
            self.target,
            Sexagesimal::hours(self.ra, 2),
            Sexagesimal::degrees(self.dec, 1),
            self.distance
        )?;
        if let Some(h) = self.horizontal {
            write!(
                f,
                "  Az {:.2}°  El {:.2}°",
                h.azimuth.to_degrees(),
                h.elevation.to_degrees()
            )?;
        }
        Ok(())
    }
}
