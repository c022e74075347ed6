//! TAI−UTC offsets
//!
//! Each entry is the UTC instant (Unix seconds) from which the offset applies.
//! Instants before 1972 use the first entry.

pub(crate) const LEAP_SECONDS: [(i64, i64); 28] = [
    (63_072_000, 10),    // 1972-01-01
    (78_796_800, 11),    // 1972-07-01
    (94_694_400, 12),    // 1973-01-01
    (126_230_400, 13),   // 1974-01-01
    (157_766_400, 14),   // 1975-01-01
    (189_302_400, 15),   // 1976-01-01
    (220_924_800, 16),   // 1977-01-01
    (252_460_800, 17),   // 1978-01-01
    (283_996_800, 18),   // 1979-01-01
    (315_532_800, 19),   // 1980-01-01
    (362_793_600, 20),   // 1981-07-01
    (394_329_600, 21),   // 1982-07-01
    (425_865_600, 22),   // 1983-07-01
    (489_024_000, 23),   // 1985-07-01
    (567_993_600, 24),   // 1988-01-01
    (631_152_000, 25),   // 1990-01-01
    (662_688_000, 26),   // 1991-01-01
    (709_948_800, 27),   // 1992-07-01
    (741_484_800, 28),   // 1993-07-01
    (773_020_800, 29),   // 1994-07-01
    (820_454_400, 30),   // 1996-01-01
    (867_715_200, 31),   // 1997-07-01
    (915_148_800, 32),   // 1999-01-01
    (1_136_073_600, 33), // 2006-01-01
    (1_230_768_000, 34), // 2009-01-01
    (1_341_100_800, 35), // 2012-07-01
    (1_435_708_800, 36), // 2015-07-01
    (1_483_228_800, 37), // 2017-01-01
];

/// TAI−UTC in seconds at a UTC instant
pub fn tai_minus_utc(utc_unix_secs: i64) -> i64 {
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(start, _)| utc_unix_secs >= *start)
        .map_or(LEAP_SECONDS[0].1, |(_, offset)| *offset)
}

/// TAI−UTC in seconds at an instant already expressed on the TAI scale
pub fn tai_minus_utc_at_tai(tai_unix_secs: i64) -> i64 {
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(start, offset)| tai_unix_secs >= start + offset)
        .map_or(LEAP_SECONDS[0].1, |(_, offset)| *offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_increasing() {
        for pair in LEAP_SECONDS.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert_eq!(pair[0].1 + 1, pair[1].1);
        }
    }

    #[test]
    fn test_offset_boundaries() {
        assert_eq!(tai_minus_utc(1_483_228_799), 36);
        assert_eq!(tai_minus_utc(1_483_228_800), 37);
        assert_eq!(tai_minus_utc(1_800_000_000), 37);
        assert_eq!(tai_minus_utc(0), 10);
    }

    #[test]
    fn test_offset_at_tai_inverts_offset_at_utc() {
        for utc in [315_964_800_i64, 1_000_000_000, 1_483_228_800, 1_700_000_000] {
            let offset = tai_minus_utc(utc);
            assert_eq!(tai_minus_utc_at_tai(utc + offset), offset);
        }
    }
}
