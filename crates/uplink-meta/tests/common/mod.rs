use uplink_meta::codec::WireMap;
use uplink_meta::schema::{KEY_FINISH_TIME_GPS, KEY_START_TIME_GPS, KEY_UID};
use uplink_meta::time::{FixedClock, GpsTimestamp};
use uplink_meta::CommandMetadata;

/// Parse a TAI timestamp, panicking on bad test input
#[allow(dead_code)]
pub fn tai(text: &str) -> GpsTimestamp {
    GpsTimestamp::parse_iso(text).unwrap()
}

/// Clock frozen at the given TAI text
#[allow(dead_code)]
pub fn clock_at(text: &str) -> FixedClock {
    FixedClock::new(tai(text))
}

/// The ENABLE_HEATER reference command at 0x1A2
#[allow(dead_code)]
pub fn enable_heater() -> CommandMetadata {
    CommandMetadata::new("ENABLE_HEATER", 0x1A2)
}

/// A marshalled mapping with the per-instance keys removed
///
/// Two records built from the same inputs compare equal after this.
#[allow(dead_code)]
pub fn without_instance_keys(mut map: WireMap) -> WireMap {
    for key in [KEY_UID, KEY_START_TIME_GPS, KEY_FINISH_TIME_GPS] {
        map.remove(key);
    }
    map
}
