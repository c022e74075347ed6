//! Clock providers
//!
//! Every timestamp in the crate comes through the `Clock` trait so tests can
//! pin or step time without touching the system clock.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use chrono::{Duration, Utc};

use crate::time::gps::GpsTimestamp;

/// Source of GPS/TAI timestamps
pub trait Clock: Send + Sync {
    /// Current instant on the TAI scale
    fn now(&self) -> GpsTimestamp;
}

/// Latest TAI instant (Unix-style nanoseconds) handed out by `SystemClock` in this process
static LAST_SYSTEM_TAI_NANOS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Wall clock converted to TAI
///
/// Readings never go backwards within a process: if the wall clock steps back,
/// the previous instant is returned until the wall clock catches up.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> GpsTimestamp {
        let reading = GpsTimestamp::from_utc(Utc::now());
        let Some(nanos) = reading.tai_unix_nanos() else {
            return reading;
        };
        let previous = LAST_SYSTEM_TAI_NANOS.fetch_max(nanos, Ordering::SeqCst);
        if previous > nanos {
            GpsTimestamp::from_tai_unix_nanos(previous).unwrap_or(reading)
        } else {
            reading
        }
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(GpsTimestamp);

impl FixedClock {
    pub fn new(at: GpsTimestamp) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> GpsTimestamp {
        self.0
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<GpsTimestamp>,
}

impl ManualClock {
    pub fn new(start: GpsTimestamp) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Jump to an arbitrary instant, including one in the past
    pub fn set(&self, at: GpsTimestamp) {
        let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
        *current = at;
    }

    /// Move forward (or backward, for a negative duration)
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
        *current = GpsTimestamp::from_tai(current.tai() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> GpsTimestamp {
        *self.current.lock().unwrap_or_else(|p| p.into_inner())
    }
}
