//! Input documents
//!
//! Reads a record list (diameter model) or a segment list (single-diameter
//! model) from JSON or TOML. A JSON document may be a bare array or an
//! object with a `records` / `segments` key; TOML documents always use the
//! object form with `[[records]]` / `[[segments]]` tables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::simple_model::Segment;
use crate::types::RawRecord;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid JSON in {0}: {1}")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("invalid TOML in {0}: {1}")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("unsupported input format for {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}

/// A well described by construction records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Overrides `render.schema_type` from the config when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(default)]
    pub records: Vec<RawRecord>,
}

/// A single-diameter well described by stacked segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonWell {
    Bare(Vec<RawRecord>),
    Document(WellDefinition),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSegments {
    Bare(Vec<Segment>),
    Document(SegmentDefinition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, InputError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
        _ => Err(InputError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|e| InputError::Io(path.to_path_buf(), e))
}

impl WellDefinition {
    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        Ok(match serde_json::from_str::<JsonWell>(contents)? {
            JsonWell::Bare(records) => Self {
                records,
                ..Self::default()
            },
            JsonWell::Document(doc) => doc,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load from a `.json` or `.toml` file.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let format = format_of(path)?;
        let contents = read(path)?;
        let well = match format {
            Format::Json => Self::from_json_str(&contents)
                .map_err(|e| InputError::Json(path.to_path_buf(), e))?,
            Format::Toml => Self::from_toml_str(&contents)
                .map_err(|e| InputError::Toml(path.to_path_buf(), e))?,
        };
        info!(
            path = %path.display(),
            well = well.name.as_deref().unwrap_or("unnamed"),
            records = well.records.len(),
            "Loaded well definition"
        );
        Ok(well)
    }
}

impl SegmentDefinition {
    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        Ok(match serde_json::from_str::<JsonSegments>(contents)? {
            JsonSegments::Bare(segments) => Self {
                segments,
                ..Self::default()
            },
            JsonSegments::Document(doc) => doc,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load from a `.json` or `.toml` file.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let format = format_of(path)?;
        let contents = read(path)?;
        let def = match format {
            Format::Json => Self::from_json_str(&contents)
                .map_err(|e| InputError::Json(path.to_path_buf(), e))?,
            Format::Toml => Self::from_toml_str(&contents)
                .map_err(|e| InputError::Toml(path.to_path_buf(), e))?,
        };
        info!(
            path = %path.display(),
            segments = def.segments.len(),
            "Loaded segment definition"
        );
        Ok(def)
    }
}
