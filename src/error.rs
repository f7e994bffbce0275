//! Error taxonomy for the layout engine.
//!
//! Every error is raised synchronously at the point of detection. Nothing in
//! the engine substitutes a default diameter or silently drops a record.

use thiserror::Error;

use crate::types::RecordKind;

/// Errors raised while normalizing, resolving or adapting construction records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchematicError {
    #[error("schema_type '{0}' is not recognised (supported: drilled_hole_casing)")]
    UnsupportedSchema(String),

    #[error("record {index}: unknown construction type '{kind}'")]
    UnknownRecordKind { index: usize, kind: String },

    #[error("record {index}: {kind} is missing required field '{field}'")]
    MissingRequiredField {
        index: usize,
        kind: RecordKind,
        field: &'static str,
    },

    #[error("degenerate {what}: depth span {depth_from}..{depth_to} has no positive length")]
    DegenerateRecord {
        what: String,
        depth_from: f64,
        depth_to: f64,
    },

    #[error("invalid {field} = {value}: must be a finite positive number")]
    InvalidValue { field: &'static str, value: f64 },

    #[error(
        "cement plug (drilling order {drilling_order}) in interval ({depth_from}, {depth_to}): {reason}"
    )]
    UnresolvedPlugGeometry {
        drilling_order: i64,
        depth_from: f64,
        depth_to: f64,
        reason: String,
    },

    #[error(
        "cemented annulus (inner diameter {inner_diameter}) in interval ({depth_from}, {depth_to}) has no enclosing drilled hole"
    )]
    UnresolvedAnnulusGeometry {
        inner_diameter: f64,
        depth_from: f64,
        depth_to: f64,
    },

    #[error(
        "casing with inner diameter {casing_diameter} in interval ({depth_from}, {depth_to}) does not fit inside any drilled hole (widest active hole: {widest_hole:?})"
    )]
    ContainmentViolation {
        casing_diameter: f64,
        widest_hole: Option<f64>,
        depth_from: f64,
        depth_to: f64,
    },

    #[error(
        "record {index}: drilling order {drilling_order} already used by the drilled hole at record {first_index}"
    )]
    DuplicateDrillingOrder {
        index: usize,
        first_index: usize,
        drilling_order: i64,
    },

    #[error("unknown single-diameter segment type '{0}'")]
    UnknownSegmentType(String),
}
