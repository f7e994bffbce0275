//! SVG surface
//!
//! Writes primitives as plain SVG elements. Depth maps to the SVG y axis, so
//! deeper features appear lower on the page without any axis inversion.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::{Bounds, DrawingSurface};
use crate::config::SvgConfig;
use crate::types::{Hatch, Primitive, Style};

/// Side length of one hatch tile at density 1, in pixels.
const HATCH_TILE_PX: f64 = 12.0;

pub struct SvgSurface {
    config: SvgConfig,
    x_range: (f64, f64),
    depth_range: (f64, f64),
    body: String,
    /// pattern id -> (hatch, colour)
    patterns: BTreeMap<String, (Hatch, String)>,
}

impl SvgSurface {
    /// Surface with explicit data ranges.
    pub fn new(config: &SvgConfig, x_range: (f64, f64), depth_range: (f64, f64)) -> Self {
        Self {
            config: config.clone(),
            x_range,
            depth_range,
            body: String::new(),
            patterns: BTreeMap::new(),
        }
    }

    /// Symmetric diameter axis `±x_extent`, depth range taken from the
    /// primitives themselves.
    pub fn for_diameter_model(config: &SvgConfig, primitives: &[Primitive]) -> Self {
        let depth_range = Bounds::of(primitives).map_or((0.0, 1.0), |b| (b.depth_min, b.depth_max));
        Self::new(config, (-config.x_extent, config.x_extent), depth_range)
    }

    /// Axes-fraction x axis `0..1` for the single-diameter model.
    pub fn for_simple_model(config: &SvgConfig, depth_range: (f64, f64)) -> Self {
        Self::new(config, (0.0, 1.0), depth_range)
    }

    fn px_x(&self, x: f64) -> f64 {
        let (lo, hi) = self.x_range;
        let margin = f64::from(self.config.margin_px);
        let usable = f64::from(self.config.width_px) - 2.0 * margin;
        margin + (x - lo) / span(lo, hi) * usable
    }

    fn px_y(&self, depth: f64) -> f64 {
        let (lo, hi) = self.depth_range;
        let margin = f64::from(self.config.margin_px);
        let usable = f64::from(self.config.height_px) - 2.0 * margin;
        margin + (depth - lo) / span(lo, hi) * usable
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &Style) {
        let _ = writeln!(
            self.body,
            r#"  <line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-width="{}" stroke-opacity="{}"/>"#,
            escape_xml(&style.stroke),
            style.line_width,
            style.opacity,
        );
    }

    fn rect(&mut self, x_left: f64, x_right: f64, y_top: f64, y_bottom: f64, style: &Style) {
        let fill = match style.hatch {
            Some(hatch) => {
                let id = pattern_id(hatch, &style.stroke);
                self.patterns
                    .entry(id.clone())
                    .or_insert_with(|| (hatch, style.stroke.clone()));
                format!("url(#{id})")
            }
            None => style
                .fill
                .as_deref()
                .map_or_else(|| "none".to_string(), escape_xml),
        };
        let stroke = if style.line_width > 0.0 {
            format!(
                r#" stroke="{}" stroke-width="{}""#,
                escape_xml(&style.stroke),
                style.line_width
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            self.body,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{fill}" fill-opacity="{}"{stroke}/>"#,
            x_left.min(x_right),
            y_top.min(y_bottom),
            (x_right - x_left).abs(),
            (y_bottom - y_top).abs(),
            style.opacity,
        );
    }
}

impl DrawingSurface for SvgSurface {
    type Output = String;

    fn draw(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::VerticalBar {
                x_center,
                depth_from,
                depth_to,
                width,
                style,
            } => {
                let (top, bottom) = (self.px_y(*depth_from), self.px_y(*depth_to));
                if *width > 0.0 {
                    let left = self.px_x(x_center - width / 2.0);
                    let right = self.px_x(x_center + width / 2.0);
                    self.rect(left, right, top, bottom, style);
                } else {
                    let x = self.px_x(*x_center);
                    self.line(x, top, x, bottom, style);
                }
            }
            Primitive::HorizontalConnector {
                x_from,
                x_to,
                depth,
                style,
            } => {
                let y = self.px_y(*depth);
                let (x1, x2) = (self.px_x(*x_from), self.px_x(*x_to));
                self.line(x1, y, x2, y, style);
            }
            Primitive::FilledRegion {
                x_from,
                x_to,
                depth_from,
                depth_to,
                style,
            } => {
                let (left, right) = (self.px_x(*x_from), self.px_x(*x_to));
                let (top, bottom) = (self.px_y(*depth_from), self.px_y(*depth_to));
                self.rect(left, right, top, bottom, style);
            }
            Primitive::Annotation {
                x,
                depth,
                text,
                style,
            } => {
                let _ = writeln!(
                    self.body,
                    r#"  <text x="{:.2}" y="{:.2}" font-size="{}" fill="{}" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                    self.px_x(*x),
                    self.px_y(*depth),
                    self.config.font_size_px,
                    escape_xml(&style.stroke),
                    escape_xml(text),
                );
            }
        }
    }

    fn finish(self) -> String {
        let (w, h) = (self.config.width_px, self.config.height_px);
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(&self.config.background)
        );
        if !self.patterns.is_empty() {
            svg.push_str("  <defs>\n");
            for (id, (hatch, color)) in &self.patterns {
                svg.push_str(&hatch_pattern(id, *hatch, color));
            }
            svg.push_str("  </defs>\n");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

fn span(lo: f64, hi: f64) -> f64 {
    let s = hi - lo;
    if s.abs() > f64::EPSILON {
        s
    } else {
        1.0
    }
}

fn pattern_id(hatch: Hatch, color: &str) -> String {
    let kind = match hatch {
        Hatch::Horizontal { .. } => "h",
        Hatch::Diagonal { .. } => "d",
    };
    // Hex of the colour bytes: distinct colours always get distinct ids
    let color: String = color.bytes().map(|b| format!("{b:02x}")).collect();
    format!("hatch-{kind}{}-{color}", hatch.density())
}

fn hatch_pattern(id: &str, hatch: Hatch, color: &str) -> String {
    let tile = HATCH_TILE_PX / f64::from(hatch.density().max(1));
    let stroke = escape_xml(color);
    let shape = match hatch {
        Hatch::Horizontal { .. } => format!(
            r#"<line x1="0" y1="{half:.2}" x2="{tile:.2}" y2="{half:.2}" stroke="{stroke}" stroke-width="0.5"/>"#,
            half = tile / 2.0
        ),
        Hatch::Diagonal { .. } => format!(
            r#"<path d="M0,{tile:.2} L{tile:.2},0" stroke="{stroke}" stroke-width="0.5"/>"#
        ),
    };
    format!(
        "    <pattern id=\"{id}\" patternUnits=\"userSpaceOnUse\" width=\"{tile:.2}\" height=\"{tile:.2}\">{shape}</pattern>\n"
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
