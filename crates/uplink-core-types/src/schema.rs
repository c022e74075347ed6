//! Canonical schema constants for the wire mapping and structured logging
//!
//! These constants keep the marshalled key names and log fields consistent
//! across every crate that reads or writes them.

// Wire schema
pub const WIRE_SCHEMA_VERSION: u32 = 1;
pub const DATA_TYPE_COMMAND_METADATA: &str = "CommandMetadata";

// Wire keys, in marshal order
pub const KEY_DATA_TYPE: &str = "data_type";
pub const KEY_PAYLOAD_STRING: &str = "payload_string";
pub const KEY_APID: &str = "apid";
pub const KEY_UID: &str = "uid";
pub const KEY_PAYLOAD_BYTES: &str = "payload_bytes";
pub const KEY_VCID: &str = "vcid";
pub const KEY_SEQUENCE: &str = "sequence";
pub const KEY_TOTAL: &str = "total";
pub const KEY_VALID: &str = "valid";
pub const KEY_PROCESSORS: &str = "processors";
pub const KEY_START_TIME_GPS: &str = "start_time_gps";
pub const KEY_FINISH_TIME_GPS: &str = "finish_time_gps";
pub const KEY_UPLINK_ID: &str = "uplink_id";

/// Every key a marshalled CommandMetadata carries
pub const COMMAND_METADATA_KEYS: [&str; 13] = [
    KEY_DATA_TYPE,
    KEY_PAYLOAD_STRING,
    KEY_APID,
    KEY_UID,
    KEY_PAYLOAD_BYTES,
    KEY_VCID,
    KEY_SEQUENCE,
    KEY_TOTAL,
    KEY_VALID,
    KEY_PROCESSORS,
    KEY_START_TIME_GPS,
    KEY_FINISH_TIME_GPS,
    KEY_UPLINK_ID,
];

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_UID: &str = "uid";
pub const FIELD_SEQUENCE: &str = "sequence";
pub const FIELD_TOTAL: &str = "total";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_MESSAGE: &str = "err_message";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_wire_keys_are_unique() {
        let keys: HashSet<&str> = COMMAND_METADATA_KEYS.iter().copied().collect();
        assert_eq!(keys.len(), COMMAND_METADATA_KEYS.len());
    }

    #[test]
    fn test_data_type_key_leads_marshal_order() {
        assert_eq!(COMMAND_METADATA_KEYS[0], KEY_DATA_TYPE);
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }
}
