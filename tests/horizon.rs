//! Rise, set and transit through the full pipeline

use approx::assert_abs_diff_eq;
use nalgebra::Vector3;
use skyreduce::almanac::{EventTime, EventWindow, HorizonEvent, HORIZON_MAX_ITERATIONS};
use skyreduce::constants::{J2000, SIDEREAL_DAY, TAU};
use skyreduce::coordinates::{SphericalPosition, StateVector};
use skyreduce::earthlib::ObserverLocation;
use skyreduce::nutationlib::Iau2000B;
use skyreduce::planetlib::{Body, KeplerianSource, PositionSource};
use skyreduce::positions::{EphemerisKind, EphemerisRequest, Reducer};
use skyreduce::time::{AstroDate, TimeElement, TimeScale};
use skyreduce::{Result, SkyError};

/// A motionless star seen from a motionless Earth
struct FixedStar {
    direction: Vector3<f64>,
}

impl FixedStar {
    fn new(ra_deg: f64, dec_deg: f64) -> Self {
        let far = SphericalPosition::new(ra_deg.to_radians(), dec_deg.to_radians(), 1.0e5);
        Self {
            direction: far.to_rectangular(),
        }
    }
}

impl PositionSource for FixedStar {
    fn name(&self) -> &str {
        "fixed star"
    }

    fn validity(&self) -> (f64, f64) {
        (2_400_000.5, 2_500_000.5)
    }

    fn supports(&self, body: Body) -> bool {
        matches!(body, Body::Earth | Body::Catalog(_))
    }

    fn heliocentric_state(&self, body: Body, _jd_tdb: f64) -> Result<StateVector> {
        Ok(match body {
            Body::Earth => StateVector::with_velocity(Vector3::zeros(), Vector3::zeros()),
            _ => StateVector::new(self.direction),
        })
    }
}

/// A star whose right ascension runs ahead of the sky at `rate` radians/day
struct RacingStar {
    rate: f64,
}

impl PositionSource for RacingStar {
    fn name(&self) -> &str {
        "racing star"
    }

    fn validity(&self) -> (f64, f64) {
        (2_400_000.5, 2_500_000.5)
    }

    fn supports(&self, body: Body) -> bool {
        matches!(body, Body::Earth | Body::Catalog(_))
    }

    fn heliocentric_state(&self, body: Body, jd_tdb: f64) -> Result<StateVector> {
        Ok(match body {
            Body::Earth => StateVector::with_velocity(Vector3::zeros(), Vector3::zeros()),
            _ => {
                let ra = self.rate * (jd_tdb - J2000);
                let far = SphericalPosition::new(ra, 10f64.to_radians(), 1.0e5);
                StateVector::new(far.to_rectangular())
            }
        })
    }
}

fn noon_utc() -> TimeElement {
    TimeElement::new(AstroDate::new(2000, 1, 1, 12, 0, 0.0).unwrap(), TimeScale::Utc)
}

#[test]
fn test_star_that_never_rises() {
    let star = FixedStar::new(100.0, -40.0);
    let nutation = Iau2000B::new();
    let reducer = Reducer::new(&star, &nutation);
    let observer = ObserverLocation::from_degrees(10.0, 60.0, 0.0).unwrap();
    let request = EphemerisRequest::new(Body::Catalog(1))
        .with_kind(EphemerisKind::Astrometric)
        .with_events(HorizonEvent::Horizon, EventWindow::Nearest);

    let p = reducer.compute(&noon_utc(), &observer, &request).unwrap();
    assert_eq!(p.rise, Some(EventTime::AlwaysBelowHorizon));
    assert_eq!(p.set, Some(EventTime::AlwaysBelowHorizon));
    assert!(matches!(p.transit, Some(EventTime::At(_))));
    // Culminates at 90 - 60 - 40 = -10 degrees
    assert_abs_diff_eq!(p.transit_elevation.unwrap().to_degrees(), -10.0, epsilon = 0.05);
}

#[test]
fn test_circumpolar_star() {
    let star = FixedStar::new(250.0, 50.0);
    let nutation = Iau2000B::new();
    let reducer = Reducer::new(&star, &nutation);
    let observer = ObserverLocation::from_degrees(10.0, 60.0, 0.0).unwrap();
    let request = EphemerisRequest::new(Body::Catalog(2))
        .with_kind(EphemerisKind::Astrometric)
        .with_events(HorizonEvent::Horizon, EventWindow::Next);

    let p = reducer.compute(&noon_utc(), &observer, &request).unwrap();
    assert_eq!(p.rise, Some(EventTime::Circumpolar));
    assert_eq!(p.set, Some(EventTime::Circumpolar));
    assert_abs_diff_eq!(p.transit_elevation.unwrap().to_degrees(), 80.0, epsilon = 0.05);
}

#[test]
fn test_star_transits_once_per_sidereal_day() {
    let star = FixedStar::new(45.0, 10.0);
    let nutation = Iau2000B::new();
    let reducer = Reducer::new(&star, &nutation);
    let observer = ObserverLocation::from_degrees(-3.0, 40.0, 0.0).unwrap();
    let time = noon_utc();
    let t0 = time.jd();

    let at = |window| {
        let request = EphemerisRequest::new(Body::Catalog(3))
            .with_kind(EphemerisKind::Astrometric)
            .with_events(HorizonEvent::Horizon, window);
        reducer.compute(&time, &observer, &request).unwrap()
    };
    let next = at(EventWindow::Next);
    let previous = at(EventWindow::Previous);
    let current = at(EventWindow::Current);

    let (tn, tp) = (next.transit.unwrap().jd().unwrap(), previous.transit.unwrap().jd().unwrap());
    assert!(tn >= t0 - 1e-5 && tp <= t0 + 1e-5);
    assert_abs_diff_eq!(tn - tp, SIDEREAL_DAY, epsilon = 1e-4);

    // Rise precedes and set follows the transit of the same day
    let rise = current.rise.unwrap().jd().unwrap();
    let set = current.set.unwrap().jd().unwrap();
    let transit = current.transit.unwrap().jd().unwrap();
    assert!(rise < transit && transit < set);
    assert_abs_diff_eq!(transit - rise, set - transit, epsilon = 1e-4);
    // Declination +10 at latitude 40: above the horizon for about 13.2 hours
    let hours = (set - rise) * 24.0;
    assert!(hours > 13.15 && hours < 13.25, "{}", hours);
}

#[test]
fn test_sunrise_and_sunset_at_greenwich() {
    let source = KeplerianSource::new();
    let nutation = Iau2000B::new();
    let reducer = Reducer::new(&source, &nutation);
    let observer = ObserverLocation::from_degrees(0.0, 51.4769, 46.0).unwrap();
    let request = EphemerisRequest::new(Body::Sun).with_events(HorizonEvent::Horizon, EventWindow::Nearest);

    let sun = reducer.compute(&noon_utc(), &observer, &request).unwrap();
    let utc_hours = |event: Option<EventTime>| (event.unwrap().jd().unwrap() - 2_451_544.5) * 24.0;

    // 08:06, 12:03 and 16:01 UTC, to a couple of minutes
    assert_abs_diff_eq!(utc_hours(sun.rise), 8.1, epsilon = 0.04);
    assert_abs_diff_eq!(utc_hours(sun.transit), 12.058, epsilon = 0.02);
    assert_abs_diff_eq!(utc_hours(sun.set), 16.02, epsilon = 0.04);
    // Noon altitude 90 - 51.48 - 23.03, lifted slightly by refraction
    assert_abs_diff_eq!(sun.transit_elevation.unwrap().to_degrees(), 15.52, epsilon = 0.1);
}

#[test]
fn test_twilight_brackets_sunrise() {
    let source = KeplerianSource::new();
    let nutation = Iau2000B::new();
    let reducer = Reducer::new(&source, &nutation);
    let observer = ObserverLocation::from_degrees(0.0, 51.4769, 46.0).unwrap();

    let rise = |event| {
        let request = EphemerisRequest::new(Body::Sun).with_events(event, EventWindow::Nearest);
        let p = reducer.compute(&noon_utc(), &observer, &request).unwrap();
        p.rise.unwrap().jd().unwrap()
    };
    let horizon = rise(HorizonEvent::Horizon);
    let civil = rise(HorizonEvent::Civil);
    let nautical = rise(HorizonEvent::Nautical);
    let astronomical = rise(HorizonEvent::Astronomical);
    assert!(astronomical < nautical && nautical < civil && civil < horizon);
}

#[test]
fn test_event_that_never_settles() {
    // Hour angle runs backwards at half the sidereal rate, so every pass
    // overshoots the crossing by half again
    let star = RacingStar {
        rate: 1.5 * TAU / SIDEREAL_DAY,
    };
    let nutation = Iau2000B::new();
    let reducer = Reducer::new(&star, &nutation);
    let observer = ObserverLocation::from_degrees(0.0, 40.0, 0.0).unwrap();
    let request = EphemerisRequest::new(Body::Catalog(4))
        .with_kind(EphemerisKind::Geometric)
        .with_events(HorizonEvent::Horizon, EventWindow::Nearest);

    // The place itself reduces fine
    let mut plain = request;
    plain.events = false;
    assert!(reducer.compute(&noon_utc(), &observer, &plain).is_ok());

    match reducer.compute(&noon_utc(), &observer, &request) {
        Err(SkyError::NonConvergence { iterations, .. }) => {
            assert_eq!(iterations, HORIZON_MAX_ITERATIONS)
        }
        other => panic!("expected NonConvergence, got {:?}", other),
    }
}
