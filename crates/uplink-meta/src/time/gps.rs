use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::errors::{CmdMetaError, Result};
use crate::time::leap_seconds::{tai_minus_utc, tai_minus_utc_at_tai};

/// GPS epoch (1980-01-06 00:00:00 UTC) expressed on the TAI scale, as Unix-style seconds
const GPS_EPOCH_TAI_UNIX: i64 = 315_964_819;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// ISO rendering used on the wire: `YYYY-MM-DD HH:MM:SS.fffffffff`
const ISO_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";

const PARSE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Absolute instant on the TAI scale with nanosecond precision
///
/// The calendar fields hold TAI, so a timestamp taken while TAI−UTC is 37 s
/// renders 37 s ahead of the UTC wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GpsTimestamp {
    tai: NaiveDateTime,
}

impl GpsTimestamp {
    /// Convert a UTC instant to the TAI scale using the leap-second table
    pub fn from_utc(utc: DateTime<Utc>) -> Self {
        let offset = tai_minus_utc(utc.timestamp());
        Self {
            tai: utc.naive_utc() + Duration::seconds(offset),
        }
    }

    /// Wrap a calendar value that is already on the TAI scale
    pub fn from_tai(tai: NaiveDateTime) -> Self {
        Self { tai }
    }

    /// Build from nanoseconds since the Unix epoch counted on the TAI scale
    pub(crate) fn from_tai_unix_nanos(nanos: i64) -> Option<Self> {
        let secs = nanos.div_euclid(1_000_000_000);
        let subsec = nanos.rem_euclid(1_000_000_000) as u32;
        DateTime::<Utc>::from_timestamp(secs, subsec).map(|dt| Self {
            tai: dt.naive_utc(),
        })
    }

    /// Nanoseconds since the Unix epoch counted on the TAI scale
    pub(crate) fn tai_unix_nanos(&self) -> Option<i64> {
        self.tai.and_utc().timestamp_nanos_opt()
    }

    /// The TAI calendar value
    pub fn tai(&self) -> NaiveDateTime {
        self.tai
    }

    /// Convert back to UTC
    pub fn to_utc(&self) -> DateTime<Utc> {
        let offset = tai_minus_utc_at_tai(self.tai.and_utc().timestamp());
        (self.tai - Duration::seconds(offset)).and_utc()
    }

    /// Nanoseconds elapsed since the GPS epoch
    pub fn gps_nanos(&self) -> i128 {
        let t = self.tai.and_utc();
        i128::from(t.timestamp() - GPS_EPOCH_TAI_UNIX) * NANOS_PER_SECOND
            + i128::from(t.timestamp_subsec_nanos())
    }

    /// Seconds elapsed since the GPS epoch
    pub fn gps_seconds(&self) -> f64 {
        self.gps_nanos() as f64 / NANOS_PER_SECOND as f64
    }

    /// ISO text with nanosecond precision, TAI scale
    pub fn to_iso_string(&self) -> String {
        self.tai.format(ISO_FORMAT).to_string()
    }

    /// Parse the ISO text produced by `to_iso_string`
    ///
    /// Accepts a space or `T` date/time separator and an optional fraction.
    ///
    /// # Errors
    ///
    /// Returns `CmdMetaError::InvalidTimestamp` if no accepted layout matches.
    pub fn parse_iso(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        PARSE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .map(Self::from_tai)
            .ok_or_else(|| CmdMetaError::InvalidTimestamp {
                value: text.to_string(),
                reason: "expected YYYY-MM-DD HH:MM:SS[.fffffffff]".to_string(),
            })
    }
}

impl std::fmt::Display for GpsTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_iso_string())
    }
}

impl std::str::FromStr for GpsTimestamp {
    type Err = CmdMetaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_iso(s)
    }
}
