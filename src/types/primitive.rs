//! Drawable primitives: the only contract between the layout engine and a
//! rendering surface.
//!
//! Coordinates are in the engine's own units: `x` is a signed diameter (or an
//! axes fraction for the single-diameter model), depth grows downwards. The
//! surface owns axis setup, decoration and export.

use serde::{Deserialize, Serialize};

/// What a primitive depicts. Surfaces may use it for grouping or legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    DrilledHole,
    Necking,
    Casing,
    CementedAnnulus,
    CementPlug,
    IntervalGuide,
    Pipe,
    WirewoundScreen,
    SlottedCasing,
}

/// Hatch fill for unfilled bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Hatch {
    /// Dense horizontal lines (wirewound screen).
    Horizontal { density: u32 },
    /// Diagonal lines (slotted casing).
    Diagonal { density: u32 },
}

impl Hatch {
    pub const fn density(&self) -> u32 {
        match *self {
            Self::Horizontal { density } | Self::Diagonal { density } => density,
        }
    }
}

/// Visual semantics attached to every primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub role: Role,
    pub stroke: String,
    /// `None` draws the outline only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hatch: Option<Hatch>,
    pub line_width: f64,
    pub opacity: f64,
}

impl Style {
    /// A plain stroked line.
    pub fn line(role: Role, stroke: impl Into<String>, line_width: f64) -> Self {
        Self {
            role,
            stroke: stroke.into(),
            fill: None,
            hatch: None,
            line_width,
            opacity: 1.0,
        }
    }

    /// A filled area with no outline.
    pub fn area(role: Role, fill: impl Into<String>, opacity: f64) -> Self {
        let fill = fill.into();
        Self {
            role,
            stroke: fill.clone(),
            fill: Some(fill),
            hatch: None,
            line_width: 0.0,
            opacity,
        }
    }
}

/// One drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "primitive", rename_all = "snake_case")]
pub enum Primitive {
    /// Vertical wall. A `width` of 0 is a stroked line at `x_center`.
    VerticalBar {
        x_center: f64,
        depth_from: f64,
        depth_to: f64,
        width: f64,
        style: Style,
    },
    /// Horizontal line at a single depth, e.g. a neck-down transition.
    HorizontalConnector {
        x_from: f64,
        x_to: f64,
        depth: f64,
        style: Style,
    },
    /// Filled rectangle, e.g. one side of a cement plug.
    FilledRegion {
        x_from: f64,
        x_to: f64,
        depth_from: f64,
        depth_to: f64,
        style: Style,
    },
    /// Free text anchored at `(x, depth)`.
    Annotation {
        x: f64,
        depth: f64,
        text: String,
        style: Style,
    },
}

impl Primitive {
    pub const fn style(&self) -> &Style {
        match self {
            Self::VerticalBar { style, .. }
            | Self::HorizontalConnector { style, .. }
            | Self::FilledRegion { style, .. }
            | Self::Annotation { style, .. } => style,
        }
    }

    pub const fn role(&self) -> Role {
        self.style().role
    }

    /// Horizontal extent `(min_x, max_x)`.
    pub fn x_extent(&self) -> (f64, f64) {
        match *self {
            Self::VerticalBar {
                x_center, width, ..
            } => (x_center - width / 2.0, x_center + width / 2.0),
            Self::HorizontalConnector { x_from, x_to, .. }
            | Self::FilledRegion { x_from, x_to, .. } => (x_from.min(x_to), x_from.max(x_to)),
            Self::Annotation { x, .. } => (x, x),
        }
    }

    /// Vertical extent `(top, bottom)`.
    pub const fn depth_extent(&self) -> (f64, f64) {
        match *self {
            Self::VerticalBar {
                depth_from,
                depth_to,
                ..
            }
            | Self::FilledRegion {
                depth_from,
                depth_to,
                ..
            } => (depth_from, depth_to),
            Self::HorizontalConnector { depth, .. } | Self::Annotation { depth, .. } => {
                (depth, depth)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hatch_density() {
        assert_eq!(Hatch::Horizontal { density: 3 }.density(), 3);
        assert_eq!(Hatch::Diagonal { density: 2 }.density(), 2);
    }

    #[test]
    fn test_connector_extent_is_ordered() {
        let p = Primitive::HorizontalConnector {
            x_from: -311.0,
            x_to: -438.0,
            depth: 12.0,
            style: Style::line(Role::Necking, "red", 0.5),
        };
        assert_eq!(p.x_extent(), (-438.0, -311.0));
        assert_eq!(p.depth_extent(), (12.0, 12.0));
        assert_eq!(p.role(), Role::Necking);
    }

    #[test]
    fn test_primitive_json_is_tagged() {
        let p = Primitive::FilledRegion {
            x_from: 149.0,
            x_to: 222.0,
            depth_from: 867.0,
            depth_to: 998.8,
            style: Style::area(Role::CementPlug, "grey", 0.25),
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["primitive"], "filled_region");
        assert_eq!(json["style"]["role"], "cement_plug");
        assert_eq!(json["style"]["fill"], "grey");
    }
}
