//! Uplink command metadata
//!
//! Every command sent to the spacecraft carries a `CommandMetadata` record
//! through the uplink pipeline. This crate provides:
//! - The record itself, with stage mutators and one-shot finalization
//! - A canonical mapping codec (`marshal`/`unmarshal`) plus MessagePack framing
//! - GPS timestamps in the TAI timescale and globally unique command ids
//! - CL script expansion into sibling records sharing one uid
//! - Settings loading and the structured logging facility

pub mod codec;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod script;
pub mod time;

pub use uplink_core_types::schema;

// Re-export commonly used types
pub use codec::{marshal, unmarshal, WireMap, WireValue};
pub use config::{Settings, WireFormat};
pub use errors::{CmdMetaError, ExError, ExErrorKind, Result};
pub use model::{CommandMetadata, CommandMetadataBuilder, Validity};
pub use script::{expand_script, parse_script_text, ScriptEntry};
pub use time::{now_gps_timestamp, Clock, GpsTimestamp, TimestampRepr};
pub use uplink_core_types::{new_unique_id, CommandUid};
