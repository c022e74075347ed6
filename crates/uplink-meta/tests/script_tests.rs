#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::clock_at;
use uplink_meta::config::Defaults;
use uplink_meta::script::{expand_script_with, parse_script_text};
use uplink_meta::{expand_script, marshal, unmarshal, CmdMetaError, ScriptEntry};

const HEATER_CYCLE: &str = "\
# heater cycle
0x1A2 HEATER_ON
0x010 WAIT 5

0x1A3 HEATER_OFF
";

#[test]
fn test_parsed_script_expands_to_group() {
    let entries = parse_script_text(HEATER_CYCLE).unwrap();
    let records = expand_script(entries).unwrap();

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.uid() == records[0].uid()));
    assert!(records.iter().all(|r| r.total() == 3));
    let sequences: Vec<u32> = records.iter().map(|r| r.sequence()).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
    assert_eq!(records[0].apid(), Some(0x1A2));
    assert_eq!(records[2].payload_string(), Some("HEATER_OFF"));
}

#[test]
fn test_siblings_survive_the_wire() {
    let clock = clock_at("2024-03-01 12:00:37");
    let records = expand_script_with(
        vec![ScriptEntry::new("A", 1), ScriptEntry::new("B", 2)],
        &Defaults { vcid: 1 },
        &clock,
    )
    .unwrap();

    for record in &records {
        let back = unmarshal(&marshal(record).unwrap()).unwrap();
        assert_eq!(&back, record);
        assert_eq!(back.vcid(), 1);
    }
}

#[test]
fn test_comment_only_script_is_empty() {
    let entries = parse_script_text("# nothing to send\n\n").unwrap();
    assert!(entries.is_empty());
    assert!(matches!(
        expand_script(entries),
        Err(CmdMetaError::InvalidInput { field: "script", .. })
    ));
}

#[test]
fn test_bad_apid_names_line() {
    let err = parse_script_text("0x01 PING\nHEATER_ON\n").unwrap_err();
    assert!(err.to_string().contains("line 2"), "got {}", err);
}
