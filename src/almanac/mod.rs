//! Rise, set and transit
//!
//! The solver starts from a reduced place, classifies the body against the
//! event altitude, then walks each instant onto the sidereal day selected
//! by the [`EventWindow`]. Because the body moves, every estimate is fed back
//! through the reduction pipeline until it changes by less than
//! [`HORIZON_TOLERANCE`]. An event still moving after
//! [`HORIZON_MAX_ITERATIONS`] passes is a `NonConvergence` error.

use crate::constants::{DAY_S, SIDEREAL_DAY, TAU};
use crate::coordinates::normalize_signed_radians;
use crate::earthlib::{refraction, ObserverLocation};
use crate::planetlib::Body;
use crate::positions::{
    EphemerisKind, EphemerisRequest, Equinox, PublishedPosition, PublishedPositionBuilder, Reducer,
};
use crate::time::TimeElement;
use crate::{Result, SkyError};
use log::{debug, trace, warn};

/// Convergence threshold of the event refinement: 0.5 s in days
pub const HORIZON_TOLERANCE: f64 = 0.5 / DAY_S;
/// Refinement passes before an event is reported as not converging
pub const HORIZON_MAX_ITERATIONS: usize = 10;

/// Standard horizontal refraction, degrees
pub const HORIZON_REFRACTION_DEG: f64 = 34.0 / 60.0;
/// Mean solar semi-diameter, degrees
pub const SOLAR_SEMIDIAMETER_DEG: f64 = 16.0 / 60.0;

/// Altitude that defines the event
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub enum HorizonEvent {
    /// Upper limb on the refracted horizon (centre for bodies other than the Sun)
    #[default]
    Horizon,
    Civil,
    Nautical,
    Astronomical,
    /// Geometric altitude of the centre, degrees
    Custom(f64),
}

impl HorizonEvent {
    /// Geometric altitude of the body's centre at the event, radians
    pub fn altitude(&self, target: Body) -> f64 {
        let degrees = match *self {
            HorizonEvent::Horizon if target == Body::Sun => {
                -(HORIZON_REFRACTION_DEG + SOLAR_SEMIDIAMETER_DEG)
            }
            HorizonEvent::Horizon => -HORIZON_REFRACTION_DEG,
            HorizonEvent::Civil => -6.0,
            HorizonEvent::Nautical => -12.0,
            HorizonEvent::Astronomical => -18.0,
            HorizonEvent::Custom(altitude) => altitude,
        };
        degrees.to_radians()
    }
}

/// Which occurrence of an event to report, relative to the request instant
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum EventWindow {
    /// First occurrence at or after the request
    Next,
    /// Last occurrence at or before the request
    Previous,
    /// Occurrence closest to the request
    #[default]
    Nearest,
    /// Rise and set around the transit nearest the request
    Current,
}

impl EventWindow {
    /// Moves `candidate` by whole sidereal days into this window around
    /// `reference`
    ///
    /// ```rust
    /// use skyreduce::almanac::EventWindow;
    /// use skyreduce::constants::SIDEREAL_DAY;
    ///
    /// let t = EventWindow::Next.fold(99.8, 100.0);
    /// assert!((t - (99.8 + SIDEREAL_DAY)).abs() < 1e-12);
    /// ```
    pub fn fold(&self, candidate: f64, reference: f64) -> f64 {
        match self {
            EventWindow::Next => candidate + ((reference - candidate) / SIDEREAL_DAY).ceil() * SIDEREAL_DAY,
            EventWindow::Previous => {
                candidate - ((candidate - reference) / SIDEREAL_DAY).ceil() * SIDEREAL_DAY
            }
            EventWindow::Nearest | EventWindow::Current => {
                candidate - ((candidate - reference) / SIDEREAL_DAY).round() * SIDEREAL_DAY
            }
        }
    }
}

/// Outcome of an event search
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EventTime {
    /// Julian day in the scale of the request
    At(f64),
    /// The body never goes below the event altitude
    Circumpolar,
    /// The body never reaches the event altitude
    AlwaysBelowHorizon,
}

impl EventTime {
    pub fn jd(&self) -> Option<f64> {
        match *self {
            EventTime::At(jd) => Some(jd),
            _ => None,
        }
    }
}

/// Cosine of the hour angle at which a body at declination `dec` crosses
/// `altitude` for an observer at `latitude` (all radians)
///
/// Values above 1 mean the altitude is never reached, below -1 that the
/// body never drops under it.
pub fn hour_angle_cosine(altitude: f64, latitude: f64, dec: f64) -> f64 {
    (altitude.sin() - latitude.sin() * dec.sin()) / (latitude.cos() * dec.cos())
}

/// Rise/set classification for a cosine from [`hour_angle_cosine`]
pub fn classify(cos_hour_angle: f64) -> Option<EventTime> {
    if cos_hour_angle > 1.0 {
        Some(EventTime::AlwaysBelowHorizon)
    } else if cos_hour_angle < -1.0 {
        Some(EventTime::Circumpolar)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    Rise,
    Transit,
    Set,
}

struct Solver<'r, 'a> {
    reducer: &'r Reducer<'a>,
    observer: &'r ObserverLocation,
    request: EphemerisRequest,
    start: TimeElement,
    altitude: f64,
}

impl Solver<'_, '_> {
    /// Hour angle of the crossing, or the classification when there is none
    fn target_hour_angle(&self, crossing: Crossing, dec: f64) -> std::result::Result<f64, EventTime> {
        if crossing == Crossing::Transit {
            return Ok(0.0);
        }
        let cos_h = hour_angle_cosine(self.altitude, self.observer.latitude(), dec);
        if let Some(outcome) = classify(cos_h) {
            return Err(outcome);
        }
        let semi_arc = cos_h.acos();
        Ok(if crossing == Crossing::Rise {
            -semi_arc
        } else {
            semi_arc
        })
    }

    /// Days from `lst` until hour angle `target`, nearest occurrence
    fn offset(target: f64, lst: f64, ra: f64) -> f64 {
        normalize_signed_radians(target - (lst - ra)) / TAU * SIDEREAL_DAY
    }

    fn solve(
        &self,
        crossing: Crossing,
        first: &PublishedPosition,
    ) -> Result<(EventTime, PublishedPosition)> {
        let t0 = self.start.jd();
        let scale = self.start.scale;
        let mut time = self.start;
        let mut place = *first;
        let mut lst = self.reducer.apparent_sidereal_time(&time, self.observer, &self.request)?;

        for iteration in 0..HORIZON_MAX_ITERATIONS {
            let hour_angle = match self.target_hour_angle(crossing, place.dec) {
                Ok(h) => h,
                Err(outcome) => return Ok((outcome, place)),
            };
            let t = time.jd();
            let next = if iteration == 0 {
                let transit = t0 + Self::offset(0.0, lst, place.ra);
                let candidate = transit + hour_angle / TAU * SIDEREAL_DAY;
                match self.request.window {
                    EventWindow::Current => candidate,
                    window => window.fold(candidate, t0),
                }
            } else {
                // Within a pass the body moves far less than half a sidereal
                // day, so the nearest occurrence stays in the pass-0 window
                t + Self::offset(hour_angle, lst, place.ra)
            };
            trace!("{:?} pass {}: JD {}", crossing, iteration, next);
            if iteration > 0 && (next - t).abs() < HORIZON_TOLERANCE {
                return Ok((EventTime::At(next), place));
            }

            time = TimeElement::from_jd(next, scale)?;
            place = self.reducer.reduce(&time, self.observer, &self.request)?;
            lst = self.reducer.apparent_sidereal_time(&time, self.observer, &self.request)?;
        }

        warn!(
            "{:?} of {} did not settle within {} passes",
            crossing,
            self.request.target,
            HORIZON_MAX_ITERATIONS
        );
        Err(SkyError::NonConvergence {
            what: format!("{:?} of {}", crossing, self.request.target),
            iterations: HORIZON_MAX_ITERATIONS,
        })
    }
}

/// Adds rise, set, transit and transit elevation to `position`
///
/// `position` must come from `reducer` for the same `time`, `observer` and
/// `request`. Event instants are Julian days in `time`'s scale.
///
/// # Errors
///
/// `NonConvergence` when an event has not settled within
/// [`HORIZON_MAX_ITERATIONS`] passes, plus any error of the reduction itself.
pub fn rise_set_transit(
    reducer: &Reducer<'_>,
    time: &TimeElement,
    observer: &ObserverLocation,
    request: &EphemerisRequest,
    position: PublishedPosition,
) -> Result<PublishedPosition> {
    let mut of_date = *request;
    of_date.equinox = Equinox::OfDate;
    of_date.events = false;

    let first = if position.equinox == position.jd_tt {
        position
    } else {
        reducer.reduce(time, observer, &of_date)?
    };

    let solver = Solver {
        reducer,
        observer,
        request: of_date,
        start: *time,
        altitude: request.horizon_event.altitude(request.target),
    };

    let (rise, _) = solver.solve(Crossing::Rise, &first)?;
    let (set, _) = solver.solve(Crossing::Set, &first)?;
    let (transit, at_transit) = solver.solve(Crossing::Transit, &first)?;

    let latitude = observer.latitude();
    let mut transit_elevation = (latitude.sin() * at_transit.dec.sin()
        + latitude.cos() * at_transit.dec.cos())
    .clamp(-1.0, 1.0)
    .asin();
    if request.kind == EphemerisKind::Apparent {
        transit_elevation += refraction(transit_elevation, observer.pressure(), observer.temperature());
    }
    debug!(
        "{}: rise {:?} set {:?} transit {:?} at {:.4}°",
        request.target,
        rise,
        set,
        transit,
        transit_elevation.to_degrees()
    );

    PublishedPositionBuilder::from(position)
        .events(rise, set, transit, transit_elevation)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_event_altitudes() {
        assert_abs_diff_eq!(
            HorizonEvent::Horizon.altitude(Body::Sun).to_degrees(),
            -50.0 / 60.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            HorizonEvent::Horizon.altitude(Body::Mars).to_degrees(),
            -34.0 / 60.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            HorizonEvent::Astronomical.altitude(Body::Sun).to_degrees(),
            -18.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            HorizonEvent::Custom(5.0).altitude(Body::Venus).to_degrees(),
            5.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_fold_windows() {
        let d = SIDEREAL_DAY;
        let reference = 1000.0;
        for candidate in [1000.3, 999.6, 1003.2, 995.1] {
            let next = EventWindow::Next.fold(candidate, reference);
            assert!(next >= reference && next - reference < d);
            let previous = EventWindow::Previous.fold(candidate, reference);
            assert!(previous <= reference && reference - previous < d);
            let nearest = EventWindow::Nearest.fold(candidate, reference);
            assert!((nearest - reference).abs() <= d / 2.0 + 1e-12);
            // Only whole sidereal days are added
            let turns = (next - candidate) / d;
            assert_abs_diff_eq!(turns, turns.round(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_classification() {
        let lat = 60f64.to_radians();
        let h0 = HorizonEvent::Horizon.altitude(Body::Mars);
        // Too far south to clear the horizon
        let south = hour_angle_cosine(h0, lat, (-40f64).to_radians());
        assert_eq!(classify(south), Some(EventTime::AlwaysBelowHorizon));
        // Close enough to the pole never to set
        let north = hour_angle_cosine(h0, lat, 50f64.to_radians());
        assert_eq!(classify(north), Some(EventTime::Circumpolar));
        // On the equator the semi-arc is a little over six hours
        let equator = hour_angle_cosine(h0, lat, 0.0);
        assert_eq!(classify(equator), None);
        assert!(equator < 0.0 && equator > -0.1);
    }

    #[test]
    fn test_event_time_jd() {
        assert_eq!(EventTime::At(2_451_545.25).jd(), Some(2_451_545.25));
        assert_eq!(EventTime::Circumpolar.jd(), None);
    }
}
