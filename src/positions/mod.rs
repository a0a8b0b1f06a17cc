//! The reduction pipeline: from a position source to a published place
//!
//! [`Reducer::compute`] runs the stages in a fixed order:
//!
//! 1. request epoch to TT and TDB
//! 2. light-time iteration against the position source
//! 3. heliocentric quantities at the retarded epoch
//! 4. solar deflection, then aberration (apparent places only)
//! 5. frame bias, then precession from J2000 to the epoch
//! 6. nutation (apparent places only)
//! 7. diurnal parallax and aberration, then horizontal coordinates
//!    (topocentric requests only)
//! 8. precession to the output equinox
//!
//! and finally hands the result to the horizon event solver when the request
//! asks for rise, set and transit.

pub mod published;
pub mod request;

pub use published::{PublishedPosition, PublishedPositionBuilder};
pub use request::{EphemerisKind, EphemerisRequest, Equinox};

use crate::almanac;
use crate::constants::{C_AUDAY, DAY_S, J2000};
use crate::coordinates::{SphericalPosition, StateVector};
use crate::earthlib::sidereal::local_sidereal_time;
use crate::earthlib::{
    apparent_sidereal_time, horizontal_coordinates, topocentric_correction, EopCache, EopRecord,
    ObserverLocation,
};
use crate::framelib::{apply_frame_bias, ecliptic_spherical};
use crate::nutationlib::{Nutation, NutationAngles, PoleCorrected};
use crate::planetlib::{Body, PositionSource};
use crate::precessionlib::{mean_obliquity, precess, precess_from_j2000};
use crate::relativity::{aberration, solar_deflection};
use crate::time::{TimeElement, TimeScale, Timescale};
use crate::{Result, SkyError};
use log::{debug, trace};
use nalgebra::Vector3;

/// Light-time convergence threshold: 0.001 s in days
pub const LIGHT_TIME_TOLERANCE: f64 = 0.001 / DAY_S;
/// Iteration cap of the light-time loop
pub const LIGHT_TIME_MAX_ITERATIONS: usize = 50;

/// Epochs of one request in every scale the pipeline needs
#[derive(Debug, Clone, Copy)]
pub(crate) struct Epochs {
    pub tt: f64,
    pub tdb: f64,
    pub ut1: f64,
    pub eop: EopRecord,
}

/// Drives a position source through the reduction for a request
///
/// The reducer borrows its collaborators; it holds no per-request state, so
/// one reducer can serve any number of requests.
pub struct Reducer<'a> {
    source: &'a dyn PositionSource,
    nutation: &'a dyn Nutation,
    timescale: Timescale,
    eop: Option<&'a EopCache>,
}

impl<'a> Reducer<'a> {
    pub fn new(source: &'a dyn PositionSource, nutation: &'a dyn Nutation) -> Self {
        Self {
            source,
            nutation,
            timescale: Timescale::default(),
            eop: None,
        }
    }

    /// Uses `timescale` for every epoch conversion
    pub fn with_timescale(mut self, timescale: Timescale) -> Self {
        self.timescale = timescale;
        self
    }

    /// Takes UT1-UTC and celestial pole offsets from `eop`
    pub fn with_eop(mut self, eop: &'a EopCache) -> Self {
        self.eop = Some(eop);
        self
    }

    pub fn timescale(&self) -> &Timescale {
        &self.timescale
    }

    /// Reduces `request` for `observer` at `time`
    ///
    /// Fails with `InvalidDate` outside the source's validity span,
    /// `UnsupportedTarget` for bodies the source cannot position (and for the
    /// Earth, which is the observing platform), and `NonConvergence` when the
    /// light-time or horizon iterations run out.
    pub fn compute(
        &self,
        time: &TimeElement,
        observer: &ObserverLocation,
        request: &EphemerisRequest,
    ) -> Result<PublishedPosition> {
        request.validate()?;
        let position = self.reduce(time, observer, request)?;
        if request.events {
            almanac::rise_set_transit(self, time, observer, request, position)
        } else {
            Ok(position)
        }
    }

    /// Local apparent sidereal time at `time` for `observer`, radians
    pub fn apparent_sidereal_time(
        &self,
        time: &TimeElement,
        observer: &ObserverLocation,
        request: &EphemerisRequest,
    ) -> Result<f64> {
        let epochs = self.epochs(time, observer, request)?;
        Ok(self.local_sidereal_time(&epochs, observer, request))
    }

    pub(crate) fn epochs(
        &self,
        time: &TimeElement,
        observer: &ObserverLocation,
        request: &EphemerisRequest,
    ) -> Result<Epochs> {
        let ts = &self.timescale;
        let eop = match self.eop {
            Some(cache) => {
                let jd_utc = ts.to_julian_day(time, observer, TimeScale::Utc)?;
                cache.get(jd_utc, request.precession_model)
            }
            None => EopRecord::default(),
        };
        let dut1 = self.eop.map(|_| eop.dut1);
        Ok(Epochs {
            tt: ts.to_julian_day_with(time, observer, TimeScale::TerrestrialTime, dut1)?,
            tdb: ts.to_julian_day_with(time, observer, TimeScale::BarycentricDynamicalTime, dut1)?,
            ut1: ts.to_julian_day_with(time, observer, TimeScale::Ut1, dut1)?,
            eop,
        })
    }

    fn local_sidereal_time(
        &self,
        epochs: &Epochs,
        observer: &ObserverLocation,
        request: &EphemerisRequest,
    ) -> f64 {
        let nutation = self.pole_corrected(epochs);
        let gast = apparent_sidereal_time(epochs.ut1, epochs.tt, request.precession_model, &nutation);
        local_sidereal_time(gast, observer.longitude())
    }

    fn pole_corrected(&self, epochs: &Epochs) -> PoleCorrected<'a> {
        PoleCorrected::new(
            self.nutation,
            NutationAngles {
                dpsi: epochs.eop.ddpsi,
                deps: epochs.eop.ddeps,
            },
        )
    }

    /// Iterates the light-time until it changes by less than
    /// [`LIGHT_TIME_TOLERANCE`]
    ///
    /// Returns the geocentric position of `target` at the retarded epoch and
    /// the light-time in days.
    pub fn light_time(&self, target: Body, jd_tdb: f64) -> Result<(Vector3<f64>, f64)> {
        let mut geocentric = self.source.geocentric_position(target, jd_tdb, 0.0)?;
        let mut light_time = 0.0;
        for iteration in 1..=LIGHT_TIME_MAX_ITERATIONS {
            let next = geocentric.norm() / C_AUDAY;
            geocentric = self.source.geocentric_position(target, jd_tdb, next)?;
            let change = (next - light_time).abs();
            light_time = next;
            trace!("light-time pass {}: {} d (change {} d)", iteration, light_time, change);
            if change < LIGHT_TIME_TOLERANCE {
                return Ok((geocentric, light_time));
            }
        }
        Err(SkyError::NonConvergence {
            what: format!("Light-time iteration for {}", target),
            iterations: LIGHT_TIME_MAX_ITERATIONS,
        })
    }

    /// The pipeline without the horizon event solver
    pub(crate) fn reduce(
        &self,
        time: &TimeElement,
        observer: &ObserverLocation,
        request: &EphemerisRequest,
    ) -> Result<PublishedPosition> {
        let model = request.precession_model;
        let target = request.target;
        let epochs = self.epochs(time, observer, request)?;
        let (jd_tt, jd_tdb) = (epochs.tt, epochs.tdb);
        debug!(
            "reducing {} ({:?}) at TT {} / TDB {} with {}",
            target,
            request.kind,
            jd_tt,
            jd_tdb,
            self.source.name()
        );

        self.source.check_epoch(jd_tdb)?;
        if target == Body::Earth {
            return Err(SkyError::UnsupportedTarget {
                body: target.to_string(),
                source_name: format!("{} (observing platform)", self.source.name()),
            });
        }
        self.source.check_target(target)?;

        let earth: StateVector = self.source.observer_state(jd_tdb)?;
        let (geocentric, light_time) = match request.kind {
            EphemerisKind::Geometric => (self.source.geocentric_position(target, jd_tdb, 0.0)?, 0.0),
            _ => self.light_time(target, jd_tdb)?,
        };
        debug!("light-time {} d, distance {} AU", light_time, geocentric.norm());

        // Heliocentric quantities at the retarded epoch
        let heliocentric = self.source.heliocentric_state(target, jd_tdb - light_time)?.position;
        let sun = -earth.position;
        let elongation = angle_between(&geocentric, &sun);
        let phase_angle = angle_between(&(-heliocentric), &(-geocentric));

        let mut p = geocentric;
        if request.kind == EphemerisKind::Apparent {
            if target != Body::Sun {
                p = solar_deflection(&p, &earth.position, &heliocentric);
            }
            p = aberration(&p, &earth.velocity_or_zero(), light_time);
        }

        p = apply_frame_bias(&p, self.source.frame(), request.frame);
        p = precess_from_j2000(jd_tt, &p, model);

        let nutation = self.pole_corrected(&epochs);
        if request.kind == EphemerisKind::Apparent {
            p = nutation.apply(jd_tt, &p, model);
        }

        let mut horizontal = None;
        if request.topocentric {
            let gast = apparent_sidereal_time(epochs.ut1, jd_tt, model, &nutation);
            let lst = local_sidereal_time(gast, observer.longitude());
            p = topocentric_correction(&p, observer, lst);
            let place = SphericalPosition::from_rectangular(&p);
            horizontal = Some(horizontal_coordinates(
                place.longitude,
                place.latitude,
                lst,
                observer,
                request.kind == EphemerisKind::Apparent,
            ));
            trace!("topocentric at LST {} rad: {:?}", lst, horizontal);
        }

        let equinox = request.equinox.resolve(jd_tt);
        if equinox != jd_tt {
            debug!("precessing output from TT {} to equinox {}", jd_tt, equinox);
            p = precess(jd_tt, equinox, &p, model);
        }
        let place = SphericalPosition::from_rectangular(&p);

        let helio_equatorial = precess(J2000, equinox, &heliocentric, model);
        let helio = ecliptic_spherical(&helio_equatorial, mean_obliquity(equinox, model));

        published::PublishedPositionBuilder::new(target)
            .equatorial(place.longitude, place.latitude, geocentric.norm())
            .heliocentric(helio.longitude, helio.latitude, heliocentric.norm())
            .light_time(light_time)
            .geometry(elongation, phase_angle)
            .horizontal(horizontal)
            .epochs(jd_tt, equinox)
            .build()
    }
}

impl std::fmt::Debug for Reducer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reducer")
            .field("source", &self.source.name())
            .field("eop", &self.eop)
            .finish()
    }
}

/// Angle between two vectors; zero when either is null
fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let (na, nb) = (a.norm(), b.norm());
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (na * nb)).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earthlib::{EarthOrientationSource, EopTable};
    use crate::framelib::ReferenceFrame;
    use crate::nutationlib::Iau2000B;
    use crate::planetlib::KeplerianSource;
    use crate::precessionlib::PrecessionModel;
    use crate::time::AstroDate;
    use approx::assert_abs_diff_eq;

    fn j2000_tt() -> TimeElement {
        TimeElement::from_jd(J2000, TimeScale::TerrestrialTime).unwrap()
    }

    #[test]
    fn test_light_time_reproduces_distance() {
        let source = KeplerianSource::new();
        let nutation = Iau2000B::new();
        let reducer = Reducer::new(&source, &nutation);
        for body in [Body::Sun, Body::Venus, Body::Mars, Body::Saturn] {
            let (p, lt) = reducer.light_time(body, J2000).unwrap();
            assert!((p.norm() / C_AUDAY - lt).abs() < LIGHT_TIME_TOLERANCE, "{}", body);
        }
    }

    #[test]
    fn test_geometric_has_no_light_time() {
        let source = KeplerianSource::new();
        let nutation = Iau2000B::new();
        let reducer = Reducer::new(&source, &nutation);
        let request = EphemerisRequest::new(Body::Jupiter).with_kind(EphemerisKind::Geometric);
        let p = reducer
            .compute(&j2000_tt(), &ObserverLocation::geocenter(), &request)
            .unwrap();
        assert_eq!(p.light_time, 0.0);
        assert!(p.horizontal.is_none());
    }

    #[test]
    fn test_earth_is_not_a_target() {
        let source = KeplerianSource::new();
        let nutation = Iau2000B::new();
        let reducer = Reducer::new(&source, &nutation);
        let err = reducer
            .compute(
                &j2000_tt(),
                &ObserverLocation::geocenter(),
                &EphemerisRequest::new(Body::Earth),
            )
            .unwrap_err();
        assert!(matches!(err, SkyError::UnsupportedTarget { .. }));
    }

    #[test]
    fn test_fixed_equinox_matches_manual_precession() {
        let source = KeplerianSource::new();
        let nutation = Iau2000B::new();
        let reducer = Reducer::new(&source, &nutation);
        let time = TimeElement::new(
            AstroDate::new(2024, 3, 1, 0, 0, 0.0).unwrap(),
            TimeScale::TerrestrialTime,
        );
        let observer = ObserverLocation::geocenter();
        let base = EphemerisRequest::new(Body::Mars).with_kind(EphemerisKind::Astrometric);

        let of_date = reducer.compute(&time, &observer, &base).unwrap();
        let j2000 = reducer
            .compute(&time, &observer, &base.with_equinox(Equinox::J2000))
            .unwrap();
        assert_eq!(j2000.equinox, J2000);

        let v = SphericalPosition::new(of_date.ra, of_date.dec, 1.0).to_rectangular();
        let back = SphericalPosition::from_rectangular(&precess(
            of_date.jd_tt,
            J2000,
            &v,
            PrecessionModel::Laskar1986,
        ));
        assert_abs_diff_eq!(back.longitude, j2000.ra, epsilon = 1e-9);
        assert_abs_diff_eq!(back.latitude, j2000.dec, epsilon = 1e-9);
        assert_abs_diff_eq!(of_date.distance, j2000.distance, epsilon = 1e-15);
    }

    #[test]
    fn test_sun_geometry() {
        let source = KeplerianSource::new();
        let nutation = Iau2000B::new();
        let reducer = Reducer::new(&source, &nutation);
        let sun = reducer
            .compute(&j2000_tt(), &ObserverLocation::geocenter(), &EphemerisRequest::new(Body::Sun))
            .unwrap();
        assert!(sun.elongation < 1e-6);
        assert_eq!(sun.sun_distance, 0.0);
        assert_abs_diff_eq!(sun.distance, 0.9833, epsilon = 1e-3);
    }

    /// Static Earth and target, so only the correction stages move the place
    struct Still {
        earth: StateVector,
        target: Vector3<f64>,
    }

    impl PositionSource for Still {
        fn name(&self) -> &str {
            "still"
        }

        fn validity(&self) -> (f64, f64) {
            (2_000_000.5, 3_000_000.5)
        }

        fn supports(&self, _body: Body) -> bool {
            true
        }

        fn heliocentric_state(&self, body: Body, _jd_tdb: f64) -> Result<StateVector> {
            Ok(match body {
                Body::Earth => self.earth,
                Body::Sun => StateVector::new(Vector3::zeros()),
                _ => StateVector::new(self.target),
            })
        }
    }

    struct NoNutation;

    impl Nutation for NoNutation {
        fn angles(&self, _jd_tt: f64) -> NutationAngles {
            NutationAngles::default()
        }
    }

    fn direction(p: &PublishedPosition) -> Vector3<f64> {
        SphericalPosition::new(p.ra, p.dec, 1.0).to_rectangular()
    }

    /// Small angles between directions, without the acos floor
    fn separation(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
        a.normalize().cross(&b.normalize()).norm()
    }

    #[test]
    fn test_deflection_precedes_aberration() {
        let earth = Vector3::new(1.0, 0.0, 0.0);
        let velocity = Vector3::new(0.0, 0.0172, 0.0);
        // Just behind the Sun's limb, where deflection is a couple of arcseconds
        let target = Vector3::new(-5.0, 0.02, 0.0);
        let source = Still {
            earth: StateVector::with_velocity(earth, velocity),
            target,
        };
        let nutation = NoNutation;
        let reducer = Reducer::new(&source, &nutation);
        let body = Body::Catalog(7);

        let place = reducer
            .compute(&j2000_tt(), &ObserverLocation::geocenter(), &EphemerisRequest::new(body))
            .unwrap();

        let (geocentric, lt) = reducer.light_time(body, J2000).unwrap();
        let ordered = aberration(&solar_deflection(&geocentric, &earth, &target), &velocity, lt);
        let swapped = solar_deflection(&aberration(&geocentric, &velocity, lt), &earth, &target);

        assert!(separation(&direction(&place), &ordered) < 1e-12);
        assert!(separation(&ordered, &swapped) > 1e-8);
    }

    #[test]
    fn test_frame_bias_precedes_precession() {
        let source = Still {
            earth: StateVector::with_velocity(Vector3::zeros(), Vector3::zeros()),
            target: Vector3::new(0.9, 2.4, 1.5),
        };
        let nutation = NoNutation;
        let reducer = Reducer::new(&source, &nutation);
        let body = Body::Catalog(8);
        let jd = J2000 + 36_525.0;
        let model = PrecessionModel::Laskar1986;
        let request = EphemerisRequest::new(body)
            .with_kind(EphemerisKind::Astrometric)
            .with_frame(ReferenceFrame::Icrs);

        let time = TimeElement::from_jd(jd, TimeScale::TerrestrialTime).unwrap();
        let place = reducer.compute(&time, &ObserverLocation::geocenter(), &request).unwrap();

        let (geocentric, _) = reducer.light_time(body, jd).unwrap();
        let dynamical = ReferenceFrame::DynamicalMeanEquinox;
        let ordered = precess_from_j2000(
            jd,
            &apply_frame_bias(&geocentric, dynamical, ReferenceFrame::Icrs),
            model,
        );
        let swapped = apply_frame_bias(
            &precess_from_j2000(jd, &geocentric, model),
            dynamical,
            ReferenceFrame::Icrs,
        );

        assert!(separation(&direction(&place), &ordered) < 1e-13);
        assert!(separation(&ordered, &swapped) > 1e-11);
    }

    struct Offsets;

    impl EarthOrientationSource for Offsets {
        fn lookup(&self, _jd_utc: f64, _model: PrecessionModel) -> Option<EopRecord> {
            Some(EopRecord {
                dut1: 0.3,
                ddpsi: 0.0,
                ddeps: 0.0,
            })
        }
    }

    #[test]
    fn test_eop_shifts_sidereal_time() {
        let source = KeplerianSource::new();
        let nutation = Iau2000B::new();
        let cache = EopCache::new(Offsets);
        let empty = EopCache::new(EopTable::default());
        let time = TimeElement::from_jd(2_458_000.5, TimeScale::Utc).unwrap();
        let observer = ObserverLocation::geocenter();
        let request = EphemerisRequest::default();

        let with = Reducer::new(&source, &nutation).with_eop(&cache);
        let without = Reducer::new(&source, &nutation).with_eop(&empty);
        let a = with.apparent_sidereal_time(&time, &observer, &request).unwrap();
        let b = without.apparent_sidereal_time(&time, &observer, &request).unwrap();
        // 0.3 s of UT1 is about 0.3 × 1.0027 s of sidereal time
        let seconds = (a - b) / crate::constants::TAU * DAY_S;
        assert_abs_diff_eq!(seconds, 0.3 * 1.002_737_9, epsilon = 1e-3);
    }
}
