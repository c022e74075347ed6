//! GPS/TAI timestamps
//!
//! - `GpsTimestamp`: nanosecond instant on the TAI scale
//! - `Clock`: the single clock-provider seam (`SystemClock`, `FixedClock`, `ManualClock`)
//! - `now_gps_timestamp`: process-wide "now" as text or as a precise value

pub mod clock;
pub mod gps;
pub mod leap_seconds;

pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use gps::GpsTimestamp;

/// A timestamp in either of the two forms `now_gps_timestamp` can return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampRepr {
    /// ISO rendering, the form carried by marshalled records
    Text(String),
    /// In-process value for comparison and arithmetic
    Precise(GpsTimestamp),
}

impl TimestampRepr {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TimestampRepr::Text(text) => Some(text),
            TimestampRepr::Precise(_) => None,
        }
    }

    pub fn as_precise(&self) -> Option<&GpsTimestamp> {
        match self {
            TimestampRepr::Text(_) => None,
            TimestampRepr::Precise(ts) => Some(ts),
        }
    }
}

impl std::fmt::Display for TimestampRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampRepr::Text(text) => write!(f, "{}", text),
            TimestampRepr::Precise(ts) => write!(f, "{}", ts),
        }
    }
}

/// Current GPS/TAI instant from the system clock
pub fn now_gps() -> GpsTimestamp {
    SystemClock.now()
}

/// Current GPS/TAI instant, as ISO text when `as_text` is set
pub fn now_gps_timestamp(as_text: bool) -> TimestampRepr {
    let now = now_gps();
    if as_text {
        TimestampRepr::Text(now.to_iso_string())
    } else {
        TimestampRepr::Precise(now)
    }
}
