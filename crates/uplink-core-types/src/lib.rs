//! Core types shared across the uplink metadata crates
//!
//! This crate provides foundational types used by the metadata record,
//! its wire codec, and the logging facility:
//!
//! - **Identity types**: CommandUid
//! - **Schema constants**: Canonical wire keys, log field keys and event names

pub mod ids;
pub mod schema;

pub use ids::{new_unique_id, CommandUid};
