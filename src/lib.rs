//! Skyreduce: astrometric reduction of solar system positions
//!
//! This crate turns rectangular positions produced by an orbital theory into
//! geometric, astrometric or apparent places for an observer: light-time
//! iteration, gravitational light deflection, aberration, frame bias,
//! precession, nutation, topocentric parallax and horizontal coordinates,
//! plus rise/set/transit instants derived from that pipeline.
//!
//! ```rust
//! use skyreduce::planetlib::{Body, KeplerianSource};
//! use skyreduce::positions::{EphemerisRequest, Reducer};
//! use skyreduce::time::{AstroDate, TimeElement, TimeScale};
//! use skyreduce::earthlib::ObserverLocation;
//! use skyreduce::nutationlib::Iau2000B;
//!
//! let source = KeplerianSource::new();
//! let nutation = Iau2000B::new();
//! let reducer = Reducer::new(&source, &nutation);
//!
//! let date = AstroDate::new(2000, 1, 1, 12, 0, 0.0).unwrap();
//! let time = TimeElement::new(date, TimeScale::TerrestrialTime);
//! let observer = ObserverLocation::geocenter();
//! let request = EphemerisRequest::new(Body::Mars);
//!
//! let mars = reducer.compute(&time, &observer, &request).unwrap();
//! assert!(mars.distance > 0.5 && mars.distance < 2.7);
//! ```

use thiserror::Error;

pub mod almanac;
pub mod constants;
pub mod coordinates;
pub mod earthlib;
pub mod framelib;
pub mod nutationlib;
pub mod planetlib;
pub mod positions;
pub mod precessionlib;
pub mod relativity;
pub mod time;

// Re-export commonly used types
pub use almanac::{EventTime, EventWindow, HorizonEvent};
pub use coordinates::{SphericalPosition, StateVector};
pub use earthlib::ObserverLocation;
pub use framelib::ReferenceFrame;
pub use planetlib::{Body, PositionSource};
pub use positions::{EphemerisKind, EphemerisRequest, Equinox, PublishedPosition, Reducer};
pub use precessionlib::PrecessionModel;
pub use time::{AstroDate, TimeElement, TimeScale};

/// Main error type for the reduction pipeline
///
/// Every variant is terminal for the request that raised it: no partial
/// position is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum SkyError {
    #[error("Invalid date (JD {jd}): {reason}")]
    InvalidDate { jd: f64, reason: String },

    #[error("Target {body} is not supported by position source {source_name}")]
    UnsupportedTarget { body: String, source_name: String },

    #[error("{what} did not converge after {iterations} iterations")]
    NonConvergence { what: String, iterations: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SkyError {
    pub(crate) fn invalid_date(jd: f64, reason: impl Into<String>) -> Self {
        SkyError::InvalidDate {
            jd,
            reason: reason.into(),
        }
    }
}

/// Result type for skyreduce operations
pub type Result<T> = std::result::Result<T, SkyError>;
