//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types (validated, business-logic-ready)
//! - `wire.rs`: Raw serde structs matching the files and responses on disk or on the wire
//! - `convert.rs`: `TryFrom`/`From` conversions with validation

pub mod asset;
pub mod market;
