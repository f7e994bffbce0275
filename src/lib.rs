//! well-schematics: Borehole Construction Schematics
//!
//! Layout and geometry engine for well construction diagrams: drilled holes,
//! casing, cemented annuli and cement plugs positioned by depth and diameter.
//!
//! ## Architecture
//!
//! - **Layout Engine** (`layout`): normalizer → ranker → partitioner →
//!   resolver → primitives adapter
//! - **Single-Diameter Model** (`simple_model`): casing/screen segments drawn
//!   at one pipe diameter
//! - **Surfaces** (`surface`): `DrawingSurface` trait and an SVG writer
//! - **Configuration** (`config`): TOML styling and render options
//!
//! ```ignore
//! let config = SchematicConfig::load();
//! let schematic = well_schematics::render(&records, "drilled_hole_casing", &config)?;
//! let svg = draw_all(SvgSurface::for_diameter_model(&config.svg, &schematic.primitives),
//!                    &schematic.primitives);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod simple_model;
pub mod surface;
pub mod types;

// Re-export configuration
pub use config::{ConfigError, SchematicConfig};

// Re-export the error taxonomy
pub use error::SchematicError;

// Re-export commonly used types
pub use types::{
    Category, ConstructionKind, ConstructionRecord, Interval, LayoutWarning, Primitive,
    RankedRecord, RawRecord, RecordKind, ResolvedInterval, Role, SchemaType, Style,
};

// Re-export the pipeline entry points
pub use layout::{render, render_records, Schematic};
pub use simple_model::{simple_well, single_diameter_primitives, Segment, SegmentKind};
pub use surface::{draw_all, DrawingSurface, SvgSurface};
