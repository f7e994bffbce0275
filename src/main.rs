//! well-schematic - borehole construction diagrams from the command line
//!
//! # Usage
//!
//! ```bash
//! # Diameter model: records in, SVG out
//! well-schematic render --input well.json --output well.svg
//!
//! # Resolved intervals and primitives as JSON
//! well-schematic render --input well.toml --format json
//!
//! # Single-diameter model from a segment file
//! well-schematic simple --input segments.json --output simple.svg
//!
//! # Single-diameter model from the classic casing + production zone layout
//! well-schematic simple --pzone-top 27 --pzone-bottom 36 --pzone-type screen
//! ```
//!
//! # Environment Variables
//!
//! - `WELL_SCHEMATICS_CONFIG`: Path to a style/render config TOML
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use well_schematics::config::SchematicConfig;
use well_schematics::input::{SegmentDefinition, WellDefinition};
use well_schematics::simple_model::{self, Segment};
use well_schematics::surface::{draw_all, SvgSurface};
use well_schematics::types::Primitive;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "well-schematic")]
#[command(about = "Borehole construction schematics")]
#[command(version)]
struct CliArgs {
    /// Config TOML (overrides $WELL_SCHEMATICS_CONFIG and ./well_schematics.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    /// Lay out a well from drilled hole / casing / cement records
    Render {
        /// Record file (.json or .toml)
        #[arg(short, long)]
        input: PathBuf,

        /// Record schema, overriding the file and the config
        #[arg(long)]
        schema: Option<String>,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,

        /// Draw dashed depth guides with interval annotations
        #[arg(long)]
        guides: bool,
    },

    /// Draw a single-diameter well (casing over a production zone)
    Simple {
        /// Segment file (.json or .toml); otherwise built from the flags below
        #[arg(short, long, conflicts_with_all = ["pzone_top", "pzone_bottom"])]
        input: Option<PathBuf>,

        #[arg(long, requires = "pzone_bottom")]
        pzone_top: Option<f64>,

        #[arg(long, requires = "pzone_top")]
        pzone_bottom: Option<f64>,

        #[arg(long, default_value = "0")]
        casing_top: f64,

        /// screen, slotted, open hole ...
        #[arg(long, default_value = "screen")]
        pzone_type: String,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

// ============================================================================
// Commands
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<SchematicConfig> {
    match path {
        Some(p) => SchematicConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(SchematicConfig::load()),
    }
}

fn run_render(
    mut config: SchematicConfig,
    input: &Path,
    schema: Option<String>,
    output: Option<&Path>,
    format: OutputFormat,
    guides: bool,
) -> Result<()> {
    let well = WellDefinition::load(input)
        .with_context(|| format!("Failed to read well records from {}", input.display()))?;
    if guides {
        config.render.interval_guides = true;
    }

    let schema_type = schema
        .or(well.schema_type)
        .unwrap_or_else(|| config.render.schema_type.clone());

    let schematic = well_schematics::render(&well.records, &schema_type, &config)
        .with_context(|| format!("Failed to lay out {}", input.display()))?;
    for w in &schematic.warnings {
        warn!("{}", w);
    }

    let rendered = match format {
        OutputFormat::Svg => draw_all(
            SvgSurface::for_diameter_model(&config.svg, &schematic.primitives),
            &schematic.primitives,
        ),
        OutputFormat::Json => to_json(&schematic)?,
    };
    write_output(output, &rendered)
}

fn run_simple(
    config: &SchematicConfig,
    segments: &[Segment],
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let primitives = simple_model::single_diameter_primitives(segments, &config.simple)
        .context("Failed to lay out single-diameter well")?;
    let Some(depth_range) = simple_model::depth_limits(segments) else {
        bail!("No segments to draw");
    };

    let rendered = match format {
        OutputFormat::Svg => draw_all(
            SvgSurface::for_simple_model(&config.svg, depth_range),
            &primitives,
        ),
        OutputFormat::Json => to_json(&SimpleOutput {
            depth_range,
            primitives: &primitives,
        })?,
    };
    write_output(output, &rendered)
}

#[derive(Serialize)]
struct SimpleOutput<'a> {
    depth_range: (f64, f64),
    primitives: &'a [Primitive],
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, contents)
                .with_context(|| format!("Failed to write {}", p.display()))?;
            info!(path = %p.display(), bytes = contents.len(), "Schematic written");
        }
        None => print!("{contents}"),
    }
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for the rendered output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        SubCommand::Render {
            input,
            schema,
            output,
            format,
            guides,
        } => run_render(config, &input, schema, output.as_deref(), format, guides),
        SubCommand::Simple {
            input,
            pzone_top,
            pzone_bottom,
            casing_top,
            pzone_type,
            output,
            format,
        } => {
            let segments = match (input, pzone_top, pzone_bottom) {
                (Some(path), _, _) => {
                    let def = SegmentDefinition::load(&path).with_context(|| {
                        format!("Failed to read segments from {}", path.display())
                    })?;
                    def.segments
                }
                (None, Some(top), Some(bottom)) => {
                    simple_model::simple_well(top, bottom, casing_top, &pzone_type)
                }
                _ => bail!("Either --input or both --pzone-top and --pzone-bottom are required"),
            };
            run_simple(&config, &segments, output.as_deref(), format)
        }
    }
}
