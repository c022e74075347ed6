//! Canonical wire representation
//!
//! - `marshal` / `unmarshal`: record ⇄ `WireMap`
//! - `to_msgpack` / `from_msgpack`: `WireMap` ⇄ msgpack bytes
//! - `WireMap::to_json`: text rendering for logs and the CLI

pub mod marshal;
pub mod msgpack;
pub mod wire;

pub use marshal::{marshal, unmarshal};
pub use msgpack::{from_msgpack, to_msgpack};
pub use wire::{WireMap, WireValue};
