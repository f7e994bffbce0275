//! Rendering surfaces
//!
//! A surface consumes the primitive list and owns everything the layout
//! engine deliberately knows nothing about: coordinate-system setup, axis
//! orientation, decoration and export.

mod svg;

pub use svg::SvgSurface;

use crate::types::Primitive;

/// Anything that can draw layout primitives.
pub trait DrawingSurface {
    type Output;

    fn draw(&mut self, primitive: &Primitive);

    /// Consume the surface and produce its final output.
    fn finish(self) -> Self::Output;
}

/// Draw every primitive in order and finish the surface.
pub fn draw_all<S: DrawingSurface>(mut surface: S, primitives: &[Primitive]) -> S::Output {
    for primitive in primitives {
        surface.draw(primitive);
    }
    surface.finish()
}

/// Axis-aligned data bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub depth_min: f64,
    pub depth_max: f64,
}

impl Bounds {
    /// Tight bounds around `primitives`, `None` when the list is empty.
    pub fn of(primitives: &[Primitive]) -> Option<Self> {
        primitives.iter().fold(None, |acc, p| {
            let (x_lo, x_hi) = p.x_extent();
            let (d_lo, d_hi) = p.depth_extent();
            Some(match acc {
                None => Self {
                    x_min: x_lo,
                    x_max: x_hi,
                    depth_min: d_lo,
                    depth_max: d_hi,
                },
                Some(b) => Self {
                    x_min: b.x_min.min(x_lo),
                    x_max: b.x_max.max(x_hi),
                    depth_min: b.depth_min.min(d_lo),
                    depth_max: b.depth_max.max(d_hi),
                },
            })
        })
    }
}
