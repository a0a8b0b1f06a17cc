//! Earth-orientation parameters
//!
//! `EopCache` is a caller-owned memo in front of an
//! [`EarthOrientationSource`]. A lookup within half a day of the previous
//! one, for the same precession model, reuses the previous record. The memo
//! is behind a `Mutex`, so one cache can be shared between threads.

use crate::precessionlib::PrecessionModel;
use crate::time::Timescale;
use log::{trace, warn};
use std::sync::Mutex;

/// Reuse window of the memo, days
pub const EOP_REUSE_DAYS: f64 = 0.5;

/// Earth-orientation values at one epoch
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct EopRecord {
    /// UT1 - UTC, seconds
    pub dut1: f64,
    /// Celestial pole offset in longitude, radians
    pub ddpsi: f64,
    /// Celestial pole offset in obliquity, radians
    pub ddeps: f64,
}

/// Anything that can supply Earth-orientation values
pub trait EarthOrientationSource: Send + Sync {
    /// Record at a UTC Julian day, or `None` when not covered
    fn lookup(&self, jd_utc: f64, model: PrecessionModel) -> Option<EopRecord>;
}

/// Tabulated records, linearly interpolated
#[derive(Debug, Clone, Default)]
pub struct EopTable {
    epochs: Vec<f64>,
    records: Vec<EopRecord>,
}

impl EopTable {
    /// Builds a table from `(jd_utc, record)` rows; rows are sorted by epoch
    pub fn new(mut rows: Vec<(f64, EopRecord)>) -> Self {
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (epochs, records) = rows.into_iter().unzip();
        Self { epochs, records }
    }

    fn column(&self, f: impl Fn(&EopRecord) -> f64) -> Vec<f64> {
        self.records.iter().map(f).collect()
    }
}

impl EarthOrientationSource for EopTable {
    fn lookup(&self, jd_utc: f64, _model: PrecessionModel) -> Option<EopRecord> {
        let first = *self.epochs.first()?;
        let last = *self.epochs.last()?;
        if !(first..=last).contains(&jd_utc) {
            return None;
        }
        let at = |values: Vec<f64>| Timescale::interpolate(jd_utc, &self.epochs, &values, f64::NAN, f64::NAN);
        Some(EopRecord {
            dut1: at(self.column(|r| r.dut1)),
            ddpsi: at(self.column(|r| r.ddpsi)),
            ddeps: at(self.column(|r| r.ddeps)),
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Memo {
    jd: f64,
    model: PrecessionModel,
    record: EopRecord,
}

/// Memoizing front of an Earth-orientation source
pub struct EopCache {
    source: Box<dyn EarthOrientationSource>,
    memo: Mutex<Option<Memo>>,
}

impl EopCache {
    pub fn new(source: impl EarthOrientationSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            memo: Mutex::new(None),
        }
    }

    /// Record for `jd_utc`; zeros when the source has no data
    pub fn get(&self, jd_utc: f64, model: PrecessionModel) -> EopRecord {
        let mut memo = self.memo.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(m) = *memo {
            if m.model == model && (m.jd - jd_utc).abs() <= EOP_REUSE_DAYS {
                trace!("EOP memo hit at JD {} (stored {})", jd_utc, m.jd);
                return m.record;
            }
        }
        let record = match self.source.lookup(jd_utc, model) {
            Some(record) => record,
            None => {
                warn!("no Earth-orientation data for JD {}; using zeros", jd_utc);
                EopRecord::default()
            }
        };
        *memo = Some(Memo {
            jd: jd_utc,
            model,
            record,
        });
        record
    }

    /// Forgets the memoized record
    pub fn clear(&self) {
        *self.memo.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

impl std::fmt::Debug for EopCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EopCache").field("memo", &self.memo).finish()
    }
}
