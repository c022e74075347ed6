#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::{TimeZone, Utc};
use common::tai;
use uplink_meta::time::{now_gps, Clock, FixedClock, SystemClock};
use uplink_meta::{now_gps_timestamp, GpsTimestamp, TimestampRepr};

#[test]
fn test_text_form_parses_back() {
    let text = now_gps_timestamp(true);
    let parsed = GpsTimestamp::parse_iso(text.as_text().unwrap()).unwrap();
    assert!(parsed <= now_gps());
}

#[test]
fn test_precise_form() {
    match now_gps_timestamp(false) {
        TimestampRepr::Precise(ts) => assert!(ts.gps_seconds() > 0.0),
        TimestampRepr::Text(text) => panic!("expected a precise value, got {}", text),
    }
}

#[test]
fn test_tai_offset_tracks_leap_table() {
    let cases = [
        ((1980, 1, 6), 19),
        ((1999, 1, 1), 32),
        ((2009, 1, 1), 34),
        ((2017, 1, 1), 37),
        ((2025, 6, 1), 37),
    ];
    for ((y, m, d), offset) in cases {
        let utc = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap();
        let ts = GpsTimestamp::from_utc(utc);
        assert_eq!(
            (ts.tai() - utc.naive_utc()).num_seconds(),
            offset,
            "TAI-UTC on {}-{}-{}",
            y,
            m,
            d
        );
        assert_eq!(ts.to_utc(), utc);
    }
}

#[test]
fn test_gps_seconds_from_epoch() {
    let one_day_in = tai("1980-01-07 00:00:19");
    assert_eq!(one_day_in.gps_nanos(), 86_400 * 1_000_000_000);
    assert!((one_day_in.gps_seconds() - 86_400.0).abs() < 1e-9);
}

#[test]
fn test_system_clock_never_goes_backwards() {
    let mut last = SystemClock.now();
    for _ in 0..1_000 {
        let next = SystemClock.now();
        assert!(next >= last);
        last = next;
    }
}

#[test]
fn test_system_clock_monotonic_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let mut last = SystemClock.now();
                for _ in 0..500 {
                    let next = SystemClock.now();
                    assert!(next >= last);
                    last = next;
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_fixed_clock_through_trait_object() {
    let at = tai("2024-03-01 12:00:37.5");
    let clock: Box<dyn Clock> = Box::new(FixedClock::new(at));
    assert_eq!(clock.now(), at);
    assert_eq!(at.to_string(), "2024-03-01 12:00:37.500000000");
    assert_eq!("2024-03-01T12:00:37.5".parse::<GpsTimestamp>().unwrap(), at);
}
