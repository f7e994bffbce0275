//! Schematic Configuration Module
//!
//! Render options and visual styling loaded from TOML files.
//!
//! ## Loading Order
//!
//! 1. `WELL_SCHEMATICS_CONFIG` environment variable (path to TOML file)
//! 2. `well_schematics.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The config is passed explicitly to every render call; nothing here is
//! global, so concurrent renders with different styles never interfere.
//!
//! ```ignore
//! let config = SchematicConfig::load();
//! let schematic = well_schematics::render(&records, "drilled_hole_casing", &config)?;
//! ```

mod schematic_config;
pub mod validation;

pub use schematic_config::*;
