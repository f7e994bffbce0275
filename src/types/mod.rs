//! Shared data structures for the schematic layout pipeline
//!
//! - `record`: raw input mappings, validated construction records, ranked records
//! - `geometry`: depth intervals and per-interval resolved geometry
//! - `primitive`: drawable shapes handed to a rendering surface

mod geometry;
mod primitive;
mod record;

pub use geometry::*;
pub use primitive::*;
pub use record::*;
