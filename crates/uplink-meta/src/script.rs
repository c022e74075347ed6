//! CL script expansion
//!
//! A CL script yields one record per sub-command. The siblings share a uid
//! and are numbered `1..=total` in script order.

use uplink_core_types::CommandUid;

use crate::config::Defaults;
use crate::errors::{CmdMetaError, Result};
use crate::model::CommandMetadata;
use crate::time::{Clock, SystemClock};

/// One parsed sub-command of a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    pub payload_string: String,
    pub apid: u32,
    pub payload_bytes: Option<Vec<u8>>,
}

impl ScriptEntry {
    pub fn new(payload_string: impl Into<String>, apid: u32) -> Self {
        Self {
            payload_string: payload_string.into(),
            apid,
            payload_bytes: None,
        }
    }
}

/// Expand script entries into sibling records stamped by the system clock
///
/// # Errors
///
/// See [`expand_script_with_clock`].
pub fn expand_script(entries: Vec<ScriptEntry>) -> Result<Vec<CommandMetadata>> {
    expand_script_with_clock(entries, &SystemClock)
}

/// Expand script entries into sibling records stamped by `clock`
///
/// # Errors
///
/// See [`expand_script_with`].
pub fn expand_script_with_clock(
    entries: Vec<ScriptEntry>,
    clock: &dyn Clock,
) -> Result<Vec<CommandMetadata>> {
    expand_script_with(entries, &Defaults::default(), clock)
}

/// Expand script entries into sibling records, applying per-process defaults
///
/// # Errors
///
/// Returns `CmdMetaError::InvalidInput` for an empty script or one with more
/// than `u32::MAX` entries.
pub fn expand_script_with(
    entries: Vec<ScriptEntry>,
    defaults: &Defaults,
    clock: &dyn Clock,
) -> Result<Vec<CommandMetadata>> {
    if entries.is_empty() {
        return Err(CmdMetaError::InvalidInput {
            field: "script",
            reason: "script has no commands".to_string(),
        });
    }
    let total = u32::try_from(entries.len()).map_err(|_| CmdMetaError::InvalidInput {
        field: "script",
        reason: format!("{} commands exceed the sequence range", entries.len()),
    })?;

    let uid = CommandUid::new();
    let mut records = Vec::with_capacity(entries.len());
    for (sequence, entry) in (1..=total).zip(entries) {
        let mut builder = CommandMetadata::builder()
            .with_defaults(defaults)
            .payload_string(entry.payload_string)
            .apid(entry.apid)
            .sequence(sequence)
            .total(total)
            .sibling_of(uid.clone());
        if let Some(bytes) = entry.payload_bytes {
            builder = builder.payload_bytes(bytes);
        }
        records.push(builder.build_with_clock(clock)?);
    }
    tracing::debug!(uid = %uid, total, "expanded script");
    Ok(records)
}

/// Parse an opcode written in decimal or `0x` hex
///
/// # Errors
///
/// Returns `CmdMetaError::InvalidInput` if the text is not a `u32`.
pub fn parse_apid(text: &str) -> Result<u32> {
    let text = text.trim();
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex_digits) => u32::from_str_radix(hex_digits, 16),
        None => text.parse::<u32>(),
    };
    parsed.map_err(|e| CmdMetaError::InvalidInput {
        field: "apid",
        reason: format!("'{}': {}", text, e),
    })
}

/// Parse CL script text: one `APID PAYLOAD` pair per line
///
/// Blank lines and lines starting with `#` are skipped. The payload is the
/// rest of the line after the APID, trimmed.
///
/// # Errors
///
/// Returns `CmdMetaError::InvalidInput` naming the first bad line.
pub fn parse_script_text(text: &str) -> Result<Vec<ScriptEntry>> {
    let mut entries = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = index + 1;
        let (apid_text, payload) = line
            .split_once(char::is_whitespace)
            .map(|(a, p)| (a, p.trim()))
            .unwrap_or((line, ""));
        if payload.is_empty() {
            return Err(CmdMetaError::InvalidInput {
                field: "script",
                reason: format!("line {}: missing command payload", line_no),
            });
        }
        let apid = parse_apid(apid_text).map_err(|e| CmdMetaError::InvalidInput {
            field: "script",
            reason: format!("line {}: {}", line_no, e),
        })?;
        entries.push(ScriptEntry::new(payload, apid));
    }
    Ok(entries)
}
