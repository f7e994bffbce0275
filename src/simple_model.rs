//! Single-diameter well model
//!
//! A well built from one pipe diameter: solid casing segments and production
//! zone segments (screen, slotted casing, open hole) stacked by depth. Each
//! segment maps directly to a left and right wall bar at fixed axes
//! positions, so no interval resolution is needed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::SimpleModelConfig;
use crate::error::SchematicError;
use crate::types::{Primitive, Role};

/// Production zone walls are drawn narrower than solid pipe.
const PRODUCTION_ZONE_WIDTH_FACTOR: f64 = 0.9;

/// What a single-diameter segment is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Casing, pipe, blank or sump
    Pipe,
    WirewoundScreen,
    SlottedCasing,
    OpenHole,
}

impl SegmentKind {
    pub const fn is_production_zone(self) -> bool {
        !matches!(self, Self::Pipe)
    }

    /// Role of the wall bars, `None` for open hole which has no walls.
    pub const fn role(self) -> Option<Role> {
        match self {
            Self::Pipe => Some(Role::Pipe),
            Self::WirewoundScreen => Some(Role::WirewoundScreen),
            Self::SlottedCasing => Some(Role::SlottedCasing),
            Self::OpenHole => None,
        }
    }
}

impl FromStr for SegmentKind {
    type Err = SchematicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "casing" | "pipe" | "blank" | "sump" => Ok(Self::Pipe),
            "S" | "screen" | "wirewound screen" => Ok(Self::WirewoundScreen),
            "SC" | "slots" | "slotted" | "slotted casing" => Ok(Self::SlottedCasing),
            "OH" | "open hole" | "open-hole" | "open" => Ok(Self::OpenHole),
            other => Err(SchematicError::UnknownSegmentType(other.to_string())),
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pipe => "pipe",
            Self::WirewoundScreen => "wirewound screen",
            Self::SlottedCasing => "slotted casing",
            Self::OpenHole => "open hole",
        })
    }
}

/// One segment as it appears in an input document:
/// `{"type": "screen", "top": 27, "bottom": 36}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: String,
    pub top: f64,
    pub bottom: f64,
}

impl Segment {
    pub fn new(kind: impl Into<String>, top: f64, bottom: f64) -> Self {
        Self {
            kind: kind.into(),
            top,
            bottom,
        }
    }
}

/// Segments for the classic simple well: solid casing from `casing_top` down
/// to the production zone, then one production zone of the same diameter.
pub fn simple_well(
    pzone_top: f64,
    pzone_bottom: f64,
    casing_top: f64,
    pzone_type: &str,
) -> Vec<Segment> {
    vec![
        Segment::new("casing", casing_top, pzone_top),
        Segment::new(pzone_type, pzone_top, pzone_bottom),
    ]
}

/// x-centres of the left and right walls. Every segment kind shares them so
/// stacked segments line up.
pub fn wall_centres(config: &SimpleModelConfig) -> (f64, f64) {
    (
        config.left_position + config.pipe_width / 2.0,
        config.right_position - config.pipe_width / 2.0,
    )
}

/// Map segments to wall bars, two per segment except open hole.
pub fn single_diameter_primitives(
    segments: &[Segment],
    config: &SimpleModelConfig,
) -> Result<Vec<Primitive>, SchematicError> {
    let (left, right) = wall_centres(config);
    let mut out = Vec::with_capacity(segments.len() * 2);

    for segment in segments {
        let kind: SegmentKind = segment.kind.parse()?;
        if !segment.top.is_finite() || !segment.bottom.is_finite() || segment.top >= segment.bottom
        {
            return Err(SchematicError::DegenerateRecord {
                what: format!("{kind} segment"),
                depth_from: segment.top,
                depth_to: segment.bottom,
            });
        }
        let Some(role) = kind.role() else {
            continue;
        };

        let width = if kind.is_production_zone() {
            config.pipe_width * PRODUCTION_ZONE_WIDTH_FACTOR
        } else {
            config.pipe_width
        };
        let style = config.style_for(role);
        for x_center in [left, right] {
            out.push(Primitive::VerticalBar {
                x_center,
                depth_from: segment.top,
                depth_to: segment.bottom,
                width,
                style: style.clone(),
            });
        }
    }
    Ok(out)
}

/// Depth limits with one unit of padding above and below, matching the
/// simple model's axis convention. `None` for an empty segment list.
pub fn depth_limits(segments: &[Segment]) -> Option<(f64, f64)> {
    let top = segments.iter().map(|s| s.top).reduce(f64::min)?;
    let bottom = segments.iter().map(|s| s.bottom).reduce(f64::max)?;
    Some((top - 1.0, bottom + 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hatch;

    #[test]
    fn test_production_zone_aliases() {
        for alias in ["OH", "open hole", "open-hole", "open"] {
            assert_eq!(alias.parse::<SegmentKind>().unwrap(), SegmentKind::OpenHole);
        }
        for alias in ["S", "screen", "wirewound screen"] {
            assert_eq!(
                alias.parse::<SegmentKind>().unwrap(),
                SegmentKind::WirewoundScreen
            );
        }
        for alias in ["SC", "slots", "slotted", "slotted casing"] {
            assert_eq!(
                alias.parse::<SegmentKind>().unwrap(),
                SegmentKind::SlottedCasing
            );
        }
        for alias in ["casing", "pipe", "blank", "sump"] {
            assert_eq!(alias.parse::<SegmentKind>().unwrap(), SegmentKind::Pipe);
        }
    }

    #[test]
    fn test_unknown_segment_type() {
        assert_eq!(
            "gravel pack".parse::<SegmentKind>().unwrap_err(),
            SchematicError::UnknownSegmentType("gravel pack".to_string())
        );
    }

    #[test]
    fn test_open_hole_has_no_walls() {
        let prims = single_diameter_primitives(
            &simple_well(27.0, 36.0, 0.0, "open hole"),
            &SimpleModelConfig::default(),
        )
        .unwrap();
        assert_eq!(prims.len(), 2);
        assert!(prims.iter().all(|p| p.role() == Role::Pipe));
    }

    #[test]
    fn test_slotted_casing_is_diagonal_hatch() {
        let prims = single_diameter_primitives(
            &[Segment::new("slots", 10.0, 20.0)],
            &SimpleModelConfig::default(),
        )
        .unwrap();
        let style = prims[0].style();
        assert_eq!(style.fill, None);
        assert_eq!(style.hatch, Some(Hatch::Diagonal { density: 3 }));
    }

    #[test]
    fn test_degenerate_segment() {
        let err = single_diameter_primitives(
            &[Segment::new("casing", 5.0, 5.0)],
            &SimpleModelConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SchematicError::DegenerateRecord { .. }));
    }

    #[test]
    fn test_depth_limits_pad_by_one() {
        let segments = simple_well(27.0, 36.0, -0.5, "screen");
        assert_eq!(depth_limits(&segments), Some((-1.5, 37.0)));
        assert_eq!(depth_limits(&[]), None);
    }
}
