#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{clock_at, enable_heater};
use uplink_meta::errors::CmdMetaError;
use uplink_meta::logging_facility::test_capture::init_test_capture;
use uplink_meta::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use uplink_meta::{log_op_end, log_op_error, log_op_start};
use uplink_meta::{new_unique_id, CommandMetadata, CommandUid};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start = capture.find_event(op_name, EVENT_START);
    assert!(start.is_some(), "Should have captured a start event");
    assert!(start.unwrap().component.is_some());
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].duration_ms(), Some(42));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = CmdMetaError::UnexpectedField {
        field: "spacecraft_id".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_event = capture
        .find_event(op_name, EVENT_END_ERROR)
        .expect("Should have an error event");
    assert_eq!(error_event.err_code(), Some("ERR_UNEXPECTED_FIELD"));
    assert_eq!(error_event.err_kind(), Some("UnexpectedField"));
    assert_eq!(error_event.duration_ms(), Some(10));
    assert_eq!(error_event.level, tracing::Level::ERROR);
}

#[test]
fn test_log_op_error_renders_uid_and_field_context() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_context_unique_5";

    let mut record = enable_heater();
    record.finalize().unwrap();
    let err = record.finalize().unwrap_err();
    log_op_error!(op_name, err, duration_ms = 0);

    let message = capture
        .find_event(op_name, EVENT_END_ERROR)
        .and_then(|e| e.err_message().map(str::to_string))
        .expect("Should render the error");
    assert!(message.starts_with("[ERR_ALREADY_FINALIZED] in operation 'finalize'"));
    assert!(message.contains(&format!("(uid: {})", record.uid())));
}

#[test]
fn test_log_op_end_stamps_record() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_record_unique_6";

    let record = CommandMetadata::builder()
        .payload_string("SET_MODE SAFE")
        .apid(0x010)
        .sequence(2)
        .total(5)
        .build()
        .unwrap();
    log_op_end!(op_name, duration_ms = 7, record = &record);

    let end = capture
        .find_event(op_name, EVENT_END)
        .expect("Should have an end event");
    assert_eq!(end.uid(), Some(record.uid().as_str()));
    assert_eq!(end.script_position(), Some((2, 5)));
    assert_eq!(end.duration_ms(), Some(7));
    assert_eq!(end.level, tracing::Level::INFO);
}

#[test]
fn test_boundary_carries_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_boundary_fields_unique_4";
    let uid: CommandUid = new_unique_id();

    log_op_start!(op_name, uid = %uid);
    log_op_end!(op_name, duration_ms = 1, records = 3_u64);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].uid(), Some(uid.as_str()));
    assert_eq!(events[1].field("records"), Some("3"));
}

#[test]
fn test_record_lifecycle_logs_no_boundaries() {
    let capture = init_test_capture();

    let mut record = enable_heater();
    record.append_processor("dictionary").unwrap();
    record.finalize().unwrap();

    let uid = record.uid().as_str().to_string();
    let boundary_events = capture.count_events(|e| {
        e.event.is_some() && e.fields.values().any(|v| v == &uid)
    });
    assert_eq!(boundary_events, 0, "Library layers must not emit op boundaries");
}

#[test]
fn test_repeated_finalize_warns() {
    let capture = init_test_capture();

    let mut record = enable_heater();
    record.finalize().unwrap();
    let _ = record.finalize();

    let uid = record.uid().as_str().to_string();
    let warnings = capture.count_events(|e| {
        e.level == tracing::Level::WARN && e.field("uid") == Some(uid.as_str())
    });
    assert_eq!(warnings, 1);
}

#[test]
fn test_finish_before_start_warns() {
    let capture = init_test_capture();

    let mut record = CommandMetadata::builder()
        .build_with_clock(&clock_at("2024-03-01 12:00:37"))
        .unwrap();
    let _ = record.finalize_with(&clock_at("2024-03-01 12:00:00"));

    let uid = record.uid().as_str().to_string();
    let warning = capture
        .events()
        .into_iter()
        .find(|e| e.level == tracing::Level::WARN && e.field("uid") == Some(uid.as_str()))
        .expect("Should have a warning");
    assert_eq!(warning.message.as_deref(), Some("rejected finalize before start"));
}
