//! Record ⇄ canonical mapping

use uplink_core_types::schema::{
    COMMAND_METADATA_KEYS, DATA_TYPE_COMMAND_METADATA, KEY_APID, KEY_DATA_TYPE,
    KEY_FINISH_TIME_GPS, KEY_PAYLOAD_BYTES, KEY_PAYLOAD_STRING, KEY_PROCESSORS, KEY_SEQUENCE,
    KEY_START_TIME_GPS, KEY_TOTAL, KEY_UID, KEY_UPLINK_ID, KEY_VALID, KEY_VCID,
};
use uplink_core_types::CommandUid;

use crate::codec::wire::{WireMap, WireValue};
use crate::errors::{CmdMetaError, Result};
use crate::model::{CommandMetadata, Validity};
use crate::time::GpsTimestamp;

/// Convert a record to its canonical mapping
///
/// The mapping holds exactly the thirteen keys of the CommandMetadata wire
/// schema. Absent optionals are `Nil`; timestamps are ISO text.
///
/// # Errors
///
/// Returns `CmdMetaError::Unrepresentable` if `uplink_id` does not fit a
/// signed 64-bit integer. No mapping is produced in that case.
pub fn marshal(record: &CommandMetadata) -> Result<WireMap> {
    let uplink_id = match record.uplink_id {
        Some(id) => WireValue::Int(i64::try_from(id).map_err(|_| {
            CmdMetaError::Unrepresentable {
                field: KEY_UPLINK_ID,
                reason: format!("{} exceeds the signed 64-bit range", id),
            }
        })?),
        None => WireValue::Nil,
    };

    let mut map = WireMap::new();
    map.insert(KEY_DATA_TYPE, DATA_TYPE_COMMAND_METADATA);
    map.insert(KEY_PAYLOAD_STRING, record.payload_string.clone());
    map.insert(KEY_APID, record.apid.map(i64::from));
    map.insert(KEY_UID, record.uid.as_str());
    map.insert(KEY_PAYLOAD_BYTES, record.payload_bytes.clone());
    map.insert(KEY_VCID, i64::from(record.vcid));
    map.insert(KEY_SEQUENCE, i64::from(record.sequence));
    map.insert(KEY_TOTAL, i64::from(record.total));
    map.insert(KEY_VALID, record.validity.is_valid());
    map.insert(KEY_PROCESSORS, record.processors.clone());
    map.insert(KEY_START_TIME_GPS, record.start_time_gps.to_iso_string());
    map.insert(
        KEY_FINISH_TIME_GPS,
        record.finish_time_gps.map(|t| t.to_iso_string()),
    );
    map.insert(KEY_UPLINK_ID, uplink_id);
    Ok(map)
}

/// Rebuild a record from its canonical mapping
///
/// Field-for-field inverse of [`marshal`]. Every schema key must be present
/// (optionals as `Nil`). `valid = false` comes back as
/// `Validity::Unvalidated`.
///
/// # Errors
///
/// - `MissingField` if a key is absent (`data_type` and `uid` are checked first)
/// - `UnsupportedDataType` if `data_type` names another record type
/// - `UnexpectedField` for keys outside the schema
/// - `InvalidFieldType` for wrongly shaped or out-of-range values
/// - `InvalidInput` for an empty uid, a zero `sequence`/`total` or a blank
///   processor name
/// - `InvalidTimestamp` for unparsable timestamp text
/// - `FinishBeforeStart` if `finish_time_gps` precedes `start_time_gps`
pub fn unmarshal(map: &WireMap) -> Result<CommandMetadata> {
    let data_type = required(map, KEY_DATA_TYPE, "text", WireValue::as_text)?;
    if data_type != DATA_TYPE_COMMAND_METADATA {
        return Err(CmdMetaError::UnsupportedDataType {
            data_type: data_type.to_string(),
        });
    }

    let uid = required(map, KEY_UID, "text", WireValue::as_text)?;
    if uid.is_empty() {
        return Err(CmdMetaError::InvalidInput {
            field: KEY_UID,
            reason: "uid cannot be empty".to_string(),
        });
    }

    if let Some(unknown) = map
        .keys()
        .find(|k| !COMMAND_METADATA_KEYS.contains(&k.as_str()))
    {
        return Err(CmdMetaError::UnexpectedField {
            field: unknown.clone(),
        });
    }

    let payload_string = optional(map, KEY_PAYLOAD_STRING, "text or nil", WireValue::as_text)?
        .map(str::to_string);
    let apid = optional(map, KEY_APID, "integer or nil", WireValue::as_int)?
        .map(|v| narrow::<u32>(KEY_APID, v))
        .transpose()?;
    let payload_bytes = optional(map, KEY_PAYLOAD_BYTES, "bytes or nil", WireValue::as_bytes)?
        .map(<[u8]>::to_vec);
    let vcid = narrow::<u8>(
        KEY_VCID,
        required(map, KEY_VCID, "integer", WireValue::as_int)?,
    )?;
    let sequence = positive(
        KEY_SEQUENCE,
        required(map, KEY_SEQUENCE, "integer", WireValue::as_int)?,
    )?;
    let total = positive(
        KEY_TOTAL,
        required(map, KEY_TOTAL, "integer", WireValue::as_int)?,
    )?;
    let valid = required(map, KEY_VALID, "bool", WireValue::as_bool)?;
    let processors = required(map, KEY_PROCESSORS, "text list", WireValue::as_text_list)?.to_vec();
    let start_time_gps =
        GpsTimestamp::parse_iso(required(map, KEY_START_TIME_GPS, "text", WireValue::as_text)?)?;
    let finish_time_gps = optional(map, KEY_FINISH_TIME_GPS, "text or nil", WireValue::as_text)?
        .map(GpsTimestamp::parse_iso)
        .transpose()?;
    let uplink_id = optional(map, KEY_UPLINK_ID, "integer or nil", WireValue::as_int)?
        .map(|v| narrow::<u64>(KEY_UPLINK_ID, v))
        .transpose()?;

    if processors.iter().any(|stage| stage.trim().is_empty()) {
        return Err(CmdMetaError::InvalidInput {
            field: KEY_PROCESSORS,
            reason: "stage name cannot be empty".to_string(),
        });
    }
    if let Some(finish) = finish_time_gps.filter(|finish| *finish < start_time_gps) {
        return Err(CmdMetaError::FinishBeforeStart {
            uid: CommandUid::from_string(uid.to_string()),
            start_time_gps: start_time_gps.to_iso_string(),
            finish_time_gps: finish.to_iso_string(),
        });
    }

    Ok(CommandMetadata {
        payload_string,
        payload_bytes,
        apid,
        validity: Validity::from_wire(valid),
        sequence,
        total,
        vcid,
        uid: CommandUid::from_string(uid.to_string()),
        uplink_id,
        processors,
        start_time_gps,
        finish_time_gps,
    })
}

fn field<'a>(map: &'a WireMap, key: &str) -> Result<&'a WireValue> {
    map.get(key).ok_or_else(|| CmdMetaError::MissingField {
        field: key.to_string(),
    })
}

fn required<'a, T>(
    map: &'a WireMap,
    key: &str,
    expected: &'static str,
    extract: impl Fn(&'a WireValue) -> Option<T>,
) -> Result<T> {
    let value = field(map, key)?;
    extract(value).ok_or_else(|| mismatch(key, expected, value))
}

fn optional<'a, T>(
    map: &'a WireMap,
    key: &str,
    expected: &'static str,
    extract: impl Fn(&'a WireValue) -> Option<T>,
) -> Result<Option<T>> {
    let value = field(map, key)?;
    if value.is_nil() {
        return Ok(None);
    }
    extract(value)
        .map(Some)
        .ok_or_else(|| mismatch(key, expected, value))
}

fn mismatch(key: &str, expected: &'static str, value: &WireValue) -> CmdMetaError {
    CmdMetaError::InvalidFieldType {
        field: key.to_string(),
        expected,
        found: value.type_name(),
    }
}

fn narrow<T: TryFrom<i64>>(key: &str, value: i64) -> Result<T> {
    T::try_from(value).map_err(|_| CmdMetaError::InvalidFieldType {
        field: key.to_string(),
        expected: "integer within the field's range",
        found: "out-of-range int",
    })
}

fn positive(key: &'static str, value: i64) -> Result<u32> {
    let value = narrow::<u32>(key, value)?;
    if value == 0 {
        return Err(CmdMetaError::InvalidInput {
            field: key,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marshal_has_exactly_the_schema_keys() {
        let record = CommandMetadata::new("ENABLE_HEATER", 0x1A2);
        let map = marshal(&record).unwrap();

        assert_eq!(map.len(), COMMAND_METADATA_KEYS.len());
        for key in COMMAND_METADATA_KEYS {
            assert!(map.contains_key(key), "missing {}", key);
        }
    }

    #[test]
    fn test_unset_optionals_are_nil() {
        let record = CommandMetadata::builder().build().unwrap();
        let map = marshal(&record).unwrap();

        for key in [
            KEY_PAYLOAD_STRING,
            KEY_APID,
            KEY_PAYLOAD_BYTES,
            KEY_FINISH_TIME_GPS,
            KEY_UPLINK_ID,
        ] {
            assert_eq!(map.get(key), Some(&WireValue::Nil), "{} should be nil", key);
        }
    }

    #[test]
    fn test_oversized_uplink_id_is_unrepresentable() {
        let record = CommandMetadata::builder()
            .uplink_id(u64::MAX)
            .build()
            .unwrap();
        let err = marshal(&record).unwrap_err();
        assert!(matches!(
            err,
            CmdMetaError::Unrepresentable {
                field: "uplink_id",
                ..
            }
        ));
    }

    #[test]
    fn test_narrow_rejects_out_of_range() {
        assert!(narrow::<u8>(KEY_VCID, 256).is_err());
        assert!(narrow::<u64>(KEY_UPLINK_ID, -1).is_err());
        assert_eq!(narrow::<u8>(KEY_VCID, 63).unwrap(), 63);
    }

    #[test]
    fn test_mismatch_reports_found_shape() {
        let err = mismatch(KEY_VALID, "bool", &WireValue::Int(1));
        assert_eq!(
            err,
            CmdMetaError::InvalidFieldType {
                field: "valid".to_string(),
                expected: "bool",
                found: "int",
            }
        );
    }

    #[test]
    fn test_positive_rejects_zero() {
        assert!(matches!(
            positive(KEY_TOTAL, 0),
            Err(CmdMetaError::InvalidInput { field: "total", .. })
        ));
    }
}
