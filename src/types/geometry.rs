//! Depth intervals and the radial geometry resolved for each of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A depth interval `(depth_from, depth_to)` produced by the partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub depth_from: f64,
    pub depth_to: f64,
}

impl Interval {
    pub const fn new(depth_from: f64, depth_to: f64) -> Self {
        Self {
            depth_from,
            depth_to,
        }
    }

    pub fn height(&self) -> f64 {
        self.depth_to - self.depth_from
    }

    pub fn midpoint(&self) -> f64 {
        self.depth_from + self.height() / 2.0
    }

    /// True when `depth` is exactly this interval's bottom. Interval bounds
    /// are copied from record bounds, so exact comparison is intended.
    #[allow(clippy::float_cmp)]
    pub fn ends_at(&self, depth: f64) -> bool {
        self.depth_to == depth
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.depth_from, self.depth_to)
    }
}

/// Diameter reduction drawn at the bottom of a hole where drilling continued
/// with a narrower bit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Necking {
    pub depth: f64,
    pub from_diameter: f64,
    pub to_diameter: f64,
}

/// A drilled hole active within an interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleSpan {
    pub diameter: f64,
    pub drilling_order: i64,
    pub diameter_rank: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub necking: Option<Necking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A casing string active within an interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasingSpan {
    pub inner_diameter: f64,
    pub diameter_rank: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Cement plug annulus between `inner_diameter` and `outer_diameter`.
/// An `inner_diameter` of 0 is a solid plug to the well centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlugRegion {
    pub drilling_order: i64,
    pub outer_diameter: f64,
    pub inner_diameter: f64,
}

/// Cemented annulus between a casing wall and the enclosing hole wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnulusRegion {
    pub inner_diameter: f64,
    pub outer_diameter: f64,
}

/// An interval plus everything active in it, ready for the primitives adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInterval {
    pub interval: Interval,
    /// Sorted by diameter rank, smallest first.
    pub holes: Vec<HoleSpan>,
    /// Sorted by diameter rank, smallest first.
    pub casings: Vec<CasingSpan>,
    pub annuli: Vec<AnnulusRegion>,
    pub plugs: Vec<PlugRegion>,
}

/// Non-fatal layout findings returned alongside the resolved geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// More than one cement plug is active in the same interval. Each plug is
    /// drawn as its own region; nothing is merged.
    OverlappingPlugs {
        interval: Interval,
        drilling_orders: Vec<i64>,
    },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverlappingPlugs {
                interval,
                drilling_orders,
            } => write!(
                f,
                "{} cement plugs overlap in interval {interval} (drilling orders {drilling_orders:?})",
                drilling_orders.len()
            ),
        }
    }
}
