//! Construction record types: the raw input mapping, the validated record,
//! and the ranked record produced by the diameter ranker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Interval;
use crate::error::SchematicError;

// ============================================================================
// Schema Selector
// ============================================================================

/// Interpretation rules applied to a raw record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaType {
    /// Drilled holes and cement plugs in one category, casing and cemented
    /// annuli in the other.
    #[default]
    DrilledHoleCasing,
}

impl SchemaType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DrilledHoleCasing => "drilled_hole_casing",
        }
    }
}

impl FromStr for SchemaType {
    type Err = SchematicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drilled_hole_casing" => Ok(Self::DrilledHoleCasing),
            other => Err(SchematicError::UnsupportedSchema(other.to_string())),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Record Kinds and Categories
// ============================================================================

/// Ranking category. Records are only ever ranked against members of their
/// own category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Drilling,
    Casing,
}

/// Field-less tag for a construction record, matching the `type` strings of
/// the input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    DrilledHole,
    CementPlug,
    Casing,
    CementedAnnulus,
}

impl RecordKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DrilledHole => "drilled_hole",
            Self::CementPlug => "cement_plug",
            Self::Casing => "casing",
            Self::CementedAnnulus => "cemented_annulus",
        }
    }

    pub const fn category(self) -> Category {
        match self {
            Self::DrilledHole | Self::CementPlug => Category::Drilling,
            Self::Casing | Self::CementedAnnulus => Category::Casing,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drilled_hole" => Ok(Self::DrilledHole),
            "cement_plug" => Ok(Self::CementPlug),
            "casing" => Ok(Self::Casing),
            "cemented_annulus" => Ok(Self::CementedAnnulus),
            other => Err(other.to_string()),
        }
    }
}

/// A construction feature together with the fields its kind requires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstructionKind {
    DrilledHole { diameter: f64, drilling_order: i64 },
    CementPlug { drilling_order: i64 },
    /// `inner_diameter` is the casing bore.
    Casing { inner_diameter: f64 },
    CementedAnnulus { inner_diameter: f64 },
}

impl ConstructionKind {
    pub const fn tag(&self) -> RecordKind {
        match self {
            Self::DrilledHole { .. } => RecordKind::DrilledHole,
            Self::CementPlug { .. } => RecordKind::CementPlug,
            Self::Casing { .. } => RecordKind::Casing,
            Self::CementedAnnulus { .. } => RecordKind::CementedAnnulus,
        }
    }

    pub const fn category(&self) -> Category {
        self.tag().category()
    }

    /// Diameter used for ranking. Cement plugs have none.
    pub const fn diameter(&self) -> Option<f64> {
        match *self {
            Self::DrilledHole { diameter, .. } => Some(diameter),
            Self::Casing { inner_diameter } | Self::CementedAnnulus { inner_diameter } => {
                Some(inner_diameter)
            }
            Self::CementPlug { .. } => None,
        }
    }

    pub const fn drilling_order(&self) -> Option<i64> {
        match *self {
            Self::DrilledHole { drilling_order, .. } | Self::CementPlug { drilling_order } => {
                Some(drilling_order)
            }
            Self::Casing { .. } | Self::CementedAnnulus { .. } => None,
        }
    }
}

// ============================================================================
// Validated Record
// ============================================================================

/// One validated construction feature.
///
/// Fields are private: a `ConstructionRecord` can only be built through
/// [`ConstructionRecord::new`] or the per-kind constructors, which reject
/// non-finite depths, zero/negative spans and non-positive diameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructionRecord {
    #[serde(flatten)]
    kind: ConstructionKind,
    depth_from: f64,
    depth_to: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl ConstructionRecord {
    pub fn new(
        kind: ConstructionKind,
        depth_from: f64,
        depth_to: f64,
    ) -> Result<Self, SchematicError> {
        check_finite("from", depth_from)?;
        check_finite("to", depth_to)?;
        if depth_from >= depth_to {
            return Err(SchematicError::DegenerateRecord {
                what: kind.tag().to_string(),
                depth_from,
                depth_to,
            });
        }
        if let Some(diameter) = kind.diameter() {
            if !diameter.is_finite() || diameter <= 0.0 {
                return Err(SchematicError::InvalidValue {
                    field: "diameter",
                    value: diameter,
                });
            }
        }
        Ok(Self {
            kind,
            depth_from,
            depth_to,
            label: None,
        })
    }

    pub fn drilled_hole(
        depth_from: f64,
        depth_to: f64,
        diameter: f64,
        drilling_order: i64,
    ) -> Result<Self, SchematicError> {
        Self::new(
            ConstructionKind::DrilledHole {
                diameter,
                drilling_order,
            },
            depth_from,
            depth_to,
        )
    }

    pub fn cement_plug(
        depth_from: f64,
        depth_to: f64,
        drilling_order: i64,
    ) -> Result<Self, SchematicError> {
        Self::new(
            ConstructionKind::CementPlug { drilling_order },
            depth_from,
            depth_to,
        )
    }

    pub fn casing(
        depth_from: f64,
        depth_to: f64,
        inner_diameter: f64,
    ) -> Result<Self, SchematicError> {
        Self::new(
            ConstructionKind::Casing { inner_diameter },
            depth_from,
            depth_to,
        )
    }

    pub fn cemented_annulus(
        depth_from: f64,
        depth_to: f64,
        inner_diameter: f64,
    ) -> Result<Self, SchematicError> {
        Self::new(
            ConstructionKind::CementedAnnulus { inner_diameter },
            depth_from,
            depth_to,
        )
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = if label.is_empty() { None } else { Some(label) };
        self
    }

    pub const fn kind(&self) -> &ConstructionKind {
        &self.kind
    }

    pub const fn depth_from(&self) -> f64 {
        self.depth_from
    }

    pub const fn depth_to(&self) -> f64 {
        self.depth_to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Strict overlap: a record touching the interval only at a boundary is
    /// not active in it.
    pub fn overlaps(&self, interval: Interval) -> bool {
        self.depth_from < interval.depth_to && self.depth_to > interval.depth_from
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), SchematicError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SchematicError::InvalidValue { field, value })
    }
}

// ============================================================================
// Raw Input Mapping
// ============================================================================

/// A construction record as it appears in an input document.
///
/// ```json
/// {"type": "drilled_hole", "from": 0, "to": 12, "diam": 438, "drilling_order": 0}
/// {"type": "casing", "from": 0, "to": 12, "inner_diam": 326, "label": "conductor"}
/// {"type": "cemented_annulus", "from": 0, "to": 12, "inner_annulus_diam": 326}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diam: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_diam: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_annulus_diam: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drilling_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

// ============================================================================
// Ranked Record
// ============================================================================

/// A record annotated with its position in its category and its diameter rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    pub record: ConstructionRecord,
    /// Position within the category's input ordering.
    pub category_index: usize,
    /// 0 = smallest diameter in the category.
    pub diameter_rank: usize,
}

impl RankedRecord {
    pub const fn kind(&self) -> &ConstructionKind {
        self.record.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_type_parse() {
        assert_eq!(
            "drilled_hole_casing".parse::<SchemaType>().unwrap(),
            SchemaType::DrilledHoleCasing
        );
        let err = "single_diameter".parse::<SchemaType>().unwrap_err();
        assert_eq!(
            err,
            SchematicError::UnsupportedSchema("single_diameter".to_string())
        );
    }

    #[test]
    fn test_record_kind_categories() {
        assert_eq!(RecordKind::DrilledHole.category(), Category::Drilling);
        assert_eq!(RecordKind::CementPlug.category(), Category::Drilling);
        assert_eq!(RecordKind::Casing.category(), Category::Casing);
        assert_eq!(RecordKind::CementedAnnulus.category(), Category::Casing);
    }

    #[test]
    fn test_zero_length_span_is_degenerate() {
        let err = ConstructionRecord::casing(50.0, 50.0, 162.0).unwrap_err();
        assert!(matches!(err, SchematicError::DegenerateRecord { .. }));
    }

    #[test]
    fn test_inverted_span_is_degenerate() {
        let err = ConstructionRecord::drilled_hole(100.0, 20.0, 222.0, 0).unwrap_err();
        assert!(matches!(err, SchematicError::DegenerateRecord { .. }));
    }

    #[test]
    fn test_non_positive_diameter_rejected() {
        let err = ConstructionRecord::casing(0.0, 10.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            SchematicError::InvalidValue {
                field: "diameter",
                value: 0.0
            }
        );
        assert!(ConstructionRecord::drilled_hole(0.0, 10.0, f64::NAN, 0).is_err());
    }

    #[test]
    fn test_plug_has_no_diameter() {
        let plug = ConstructionRecord::cement_plug(867.0, 998.8, 3).unwrap();
        assert_eq!(plug.kind().diameter(), None);
        assert_eq!(plug.kind().drilling_order(), Some(3));
    }

    #[test]
    fn test_overlap_is_strict() {
        let hole = ConstructionRecord::drilled_hole(12.0, 186.0, 311.0, 1).unwrap();
        assert!(!hole.overlaps(Interval::new(0.0, 12.0)));
        assert!(hole.overlaps(Interval::new(12.0, 186.0)));
        assert!(hole.overlaps(Interval::new(100.0, 200.0)));
        assert!(!hole.overlaps(Interval::new(186.0, 998.8)));
    }

    #[test]
    fn test_empty_label_is_dropped() {
        let hole = ConstructionRecord::drilled_hole(0.0, 12.0, 438.0, 0)
            .unwrap()
            .with_label("");
        assert_eq!(hole.label(), None);
        let casing = ConstructionRecord::casing(0.0, 12.0, 326.0)
            .unwrap()
            .with_label("conductor");
        assert_eq!(casing.label(), Some("conductor"));
    }
}
