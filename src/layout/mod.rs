//! Layout Engine
//!
//! Converts a sparse, overlapping list of construction records into
//! non-overlapping depth intervals with per-interval radial geometry, then
//! into drawable primitives.
//!
//! ## Pipeline
//!
//! - `normalizer` - raw mappings → validated records, split by category
//! - `ranker` - per-category diameter rank
//! - `partitioner` - sorted unique boundaries → intervals
//! - `resolver` - active records and geometry per interval
//! - `adapter` - geometry → primitives
//!
//! Every call is a pure function of its inputs: no state survives between
//! renders, so wells may be rendered concurrently without coordination.

mod adapter;
mod normalizer;
mod partitioner;
mod ranker;
mod resolver;

pub use adapter::to_primitives;
pub use normalizer::{
    categorize, check_drilling_orders, normalize, to_record, CategorizedRecords,
};
pub use partitioner::partition;
pub use ranker::{compare_sort_keys, rank, rank_category, RankedRecords};
pub use resolver::{
    active_in, check_containment, next_diameter, resolve, resolve_annulus, resolve_interval,
    resolve_plug, Resolution,
};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::SchematicConfig;
use crate::error::SchematicError;
use crate::types::{
    ConstructionRecord, Interval, LayoutWarning, Primitive, RawRecord, ResolvedInterval,
};

/// Everything produced by one render call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schematic {
    pub intervals: Vec<ResolvedInterval>,
    pub primitives: Vec<Primitive>,
    pub warnings: Vec<LayoutWarning>,
}

impl Schematic {
    /// Depth range covered by the intervals, `None` when nothing was drawn.
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        let first = self.intervals.first()?;
        let last = self.intervals.last()?;
        Some((first.interval.depth_from, last.interval.depth_to))
    }
}

/// Run the full pipeline on raw input mappings.
pub fn render(
    raw: &[RawRecord],
    schema_type: &str,
    config: &SchematicConfig,
) -> Result<Schematic, SchematicError> {
    let categorized = normalize(raw, schema_type)?;
    render_categorized(categorized, config)
}

/// Run the pipeline on records that are already validated.
pub fn render_records(
    records: Vec<ConstructionRecord>,
    config: &SchematicConfig,
) -> Result<Schematic, SchematicError> {
    check_drilling_orders(&records)?;
    render_categorized(categorize(records), config)
}

/// Resolve geometry without producing primitives.
pub fn layout(
    categorized: CategorizedRecords,
    check: bool,
) -> Result<Resolution, SchematicError> {
    let ranked = rank(categorized);
    let intervals: Vec<Interval> = partition(ranked.iter().map(|r| &r.record));
    debug!(intervals = intervals.len(), "Partitioned depth range");

    let resolution = resolve(&ranked, &intervals)?;
    if check {
        for resolved in &resolution.intervals {
            check_containment(resolved)?;
        }
    }
    Ok(resolution)
}

fn render_categorized(
    categorized: CategorizedRecords,
    config: &SchematicConfig,
) -> Result<Schematic, SchematicError> {
    let record_count = categorized.len();
    let Resolution {
        intervals,
        warnings,
    } = layout(categorized, config.render.check_containment)?;
    let primitives = to_primitives(&intervals, config);

    info!(
        records = record_count,
        intervals = intervals.len(),
        primitives = primitives.len(),
        warnings = warnings.len(),
        "Rendered schematic"
    );

    Ok(Schematic {
        intervals,
        primitives,
        warnings,
    })
}
