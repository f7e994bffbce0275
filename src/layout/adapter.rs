//! Geometry-to-Primitives Adapter
//!
//! Flattens resolved intervals into an ordered primitive list. Per interval
//! the order is: guides (optional), hole walls with their neck-downs, casing
//! walls, cemented annuli, cement plugs. Later primitives draw on top.

use crate::config::{SchematicConfig, StyleConfig};
use crate::types::{Primitive, ResolvedInterval, Role, Style};

/// Convert resolved geometry into drawable primitives.
pub fn to_primitives(resolved: &[ResolvedInterval], config: &SchematicConfig) -> Vec<Primitive> {
    let styles = Styles::new(&config.style);
    let mut out = Vec::new();
    for interval in resolved {
        if config.render.interval_guides {
            push_guides(&mut out, interval, config.svg.x_extent, &styles.guide);
        }
        push_interval(&mut out, interval, &styles);
    }
    out
}

/// Styles resolved once per call rather than once per primitive.
struct Styles {
    hole: Style,
    necking: Style,
    casing: Style,
    annulus: Style,
    plug: Style,
    guide: Style,
}

impl Styles {
    fn new(config: &StyleConfig) -> Self {
        Self {
            hole: config.style_for(Role::DrilledHole),
            necking: config.style_for(Role::Necking),
            casing: config.style_for(Role::Casing),
            annulus: config.style_for(Role::CementedAnnulus),
            plug: config.style_for(Role::CementPlug),
            guide: config.style_for(Role::IntervalGuide),
        }
    }
}

fn push_interval(out: &mut Vec<Primitive>, resolved: &ResolvedInterval, styles: &Styles) {
    let top = resolved.interval.depth_from;
    let bottom = resolved.interval.depth_to;

    for hole in &resolved.holes {
        if let Some(necking) = hole.necking {
            for side in [-1.0, 1.0] {
                out.push(Primitive::HorizontalConnector {
                    x_from: side * necking.from_diameter,
                    x_to: side * necking.to_diameter,
                    depth: necking.depth,
                    style: styles.necking.clone(),
                });
            }
        }
        push_walls(out, hole.diameter, top, bottom, &styles.hole);
    }

    for casing in &resolved.casings {
        push_walls(out, casing.inner_diameter, top, bottom, &styles.casing);
    }

    for annulus in &resolved.annuli {
        push_mirrored_region(
            out,
            annulus.inner_diameter,
            annulus.outer_diameter,
            top,
            bottom,
            &styles.annulus,
        );
    }

    for plug in &resolved.plugs {
        push_mirrored_region(
            out,
            plug.inner_diameter,
            plug.outer_diameter,
            top,
            bottom,
            &styles.plug,
        );
    }
}

/// Left and right wall lines at `±diameter`.
fn push_walls(out: &mut Vec<Primitive>, diameter: f64, top: f64, bottom: f64, style: &Style) {
    for x_center in [-diameter, diameter] {
        out.push(Primitive::VerticalBar {
            x_center,
            depth_from: top,
            depth_to: bottom,
            width: 0.0,
            style: style.clone(),
        });
    }
}

/// `[-outer, -inner]` then `[inner, outer]`.
fn push_mirrored_region(
    out: &mut Vec<Primitive>,
    inner: f64,
    outer: f64,
    top: f64,
    bottom: f64,
    style: &Style,
) {
    for (x_from, x_to) in [(-outer, -inner), (inner, outer)] {
        out.push(Primitive::FilledRegion {
            x_from,
            x_to,
            depth_from: top,
            depth_to: bottom,
            style: style.clone(),
        });
    }
}

fn push_guides(out: &mut Vec<Primitive>, resolved: &ResolvedInterval, extent: f64, style: &Style) {
    let interval = resolved.interval;
    for depth in [interval.depth_from, interval.depth_to] {
        out.push(Primitive::HorizontalConnector {
            x_from: -extent,
            x_to: extent,
            depth,
            style: style.clone(),
        });
    }
    out.push(Primitive::Annotation {
        x: extent,
        depth: interval.midpoint(),
        text: interval.to_string(),
        style: style.clone(),
    });
}
