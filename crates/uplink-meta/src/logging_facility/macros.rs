//! Op-boundary logging macros
//!
//! Every boundary event carries `component`, `op` and `event`; end events add
//! `duration_ms`. A finished op that produced a record can stamp the record's
//! `uid`, `sequence` and `total` with the `record = ...` form of
//! [`log_op_end!`]. Field names match the `FIELD_*` constants in
//! [`crate::schema`].

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use uplink_meta::log_op_start;
/// log_op_start!("cli_new");
/// log_op_start!("cli_new", apid = 0x1A2_u32);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(info, $op, $crate::schema::EVENT_START $(, $($field)*)?)
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use uplink_meta::{log_op_end, CommandMetadata};
/// log_op_end!("cli_script", duration_ms = 2_u64, records = 3_u64);
///
/// let record = CommandMetadata::new("ENABLE_HEATER", 0x1A2);
/// log_op_end!("cli_new", duration_ms = 1_u64, record = &record);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr, record = $record:expr) => {{
        let record: &$crate::CommandMetadata = $record;
        $crate::__log_op_event!(
            info,
            $op,
            $crate::schema::EVENT_END,
            duration_ms = $duration,
            uid = %record.uid(),
            sequence = record.sequence(),
            total = record.total(),
        )
    }};
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log a failed operation
///
/// The error is converted to [`ExError`](crate::errors::ExError); its stable
/// code, kind and rendered text (including any uid/field context) are logged.
///
/// ```
/// # use uplink_meta::{log_op_error, errors::CmdMetaError};
/// let err = CmdMetaError::MissingField { field: "uid".to_string() };
/// log_op_error!("cli_decode", err, duration_ms = 1_u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = %ex_err,
            $($($field)*)?
        )
    }};
}
