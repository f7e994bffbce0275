//! Schematic Configuration - render options and visual styling as TOML values
//!
//! Each struct implements `Default` with the stock look (brown hole walls,
//! black casing, red neck-downs, translucent grey cement), so a missing config
//! file renders exactly like the built-in style.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::types::{Hatch, Role, SchemaType, Style};

/// Environment variable naming a config file to load.
pub const CONFIG_ENV_VAR: &str = "WELL_SCHEMATICS_CONFIG";

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "well_schematics.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for schematic rendering.
///
/// Load with `SchematicConfig::load()` which searches:
/// 1. `$WELL_SCHEMATICS_CONFIG` env var
/// 2. `./well_schematics.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchematicConfig {
    /// Record interpretation and layout options
    #[serde(default)]
    pub render: RenderConfig,

    /// Colours and line widths for the diameter model
    #[serde(default)]
    pub style: StyleConfig,

    /// Single-diameter model geometry
    #[serde(default)]
    pub simple: SimpleModelConfig,

    /// SVG surface canvas
    #[serde(default)]
    pub svg: SvgConfig,
}

impl SchematicConfig {
    /// Load configuration using the standard search order:
    /// 1. `$WELL_SCHEMATICS_CONFIG` environment variable
    /// 2. `./well_schematics.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded schematic config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        // 2. Check ./well_schematics.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded schematic config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No {LOCAL_CONFIG_FILE} found, using built-in style");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings with a suggested correction; they
    /// never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Schematic config saved");
        Ok(())
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - `render.schema_type` must name a supported schema
    /// - Line widths must be >= 0, opacities within 0..=1
    /// - Single-diameter bars must not overlap each other
    /// - Canvas dimensions and the diameter extent must be > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if let Err(e) = self.render.schema_type.parse::<SchemaType>() {
            errors.push(format!("render.schema_type: {e}"));
        }

        let s = &self.style;
        for (name, width) in [
            ("style.hole_line_width", s.hole_line_width),
            ("style.necking_line_width", s.necking_line_width),
            ("style.casing_line_width", s.casing_line_width),
            ("style.guide_line_width", s.guide_line_width),
        ] {
            Self::check_non_negative(width, name, &mut errors);
        }
        for (name, opacity) in [
            ("style.plug_opacity", s.plug_opacity),
            ("style.annulus_opacity", s.annulus_opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                errors.push(format!("{name} = {opacity} must be within 0..=1"));
            }
        }
        for (name, color) in [
            ("style.hole_color", &s.hole_color),
            ("style.necking_color", &s.necking_color),
            ("style.casing_color", &s.casing_color),
            ("style.plug_color", &s.plug_color),
            ("style.annulus_color", &s.annulus_color),
            ("style.guide_color", &s.guide_color),
            ("simple.pipe_color", &self.simple.pipe_color),
        ] {
            if color.trim().is_empty() {
                errors.push(format!("{name} must not be empty"));
            }
        }

        let m = &self.simple;
        if !m.pipe_width.is_finite() || m.pipe_width <= 0.0 {
            errors.push(format!("simple.pipe_width = {} must be > 0", m.pipe_width));
        }
        if m.hatch_density == 0 {
            errors.push("simple.hatch_density must be > 0".to_string());
        }
        if m.left_position + m.pipe_width > m.right_position - m.pipe_width {
            errors.push(format!(
                "simple bars overlap: left_position ({:.2}) + pipe_width must stay left of right_position ({:.2}) - pipe_width",
                m.left_position, m.right_position
            ));
        }

        let v = &self.svg;
        if v.width_px == 0 || v.height_px == 0 {
            errors.push(format!(
                "svg canvas must be non-empty, got {}x{}",
                v.width_px, v.height_px
            ));
        }
        if 2 * v.margin_px >= v.width_px.min(v.height_px) {
            errors.push(format!(
                "svg.margin_px = {} leaves no drawing area",
                v.margin_px
            ));
        }
        if !v.x_extent.is_finite() || v.x_extent <= 0.0 {
            errors.push(format!("svg.x_extent = {} must be > 0", v.x_extent));
        }

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_non_negative(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, catch them explicitly
        if !value.is_finite() {
            errors.push(format!("{name}: value must be finite (got {value})"));
            return;
        }
        if value < 0.0 {
            errors.push(format!("{name} = {value:.3} must be >= 0"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            Self::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            Self::Serialize(e) => write!(f, "Config serialization error: {e}"),
            Self::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Render
// ============================================================================

/// How records are interpreted and which checks run during layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Schema used when the input document does not name one
    #[serde(default = "default_schema_type")]
    pub schema_type: String,

    /// Draw dotted guide lines and a depth label for every interval
    #[serde(default)]
    pub interval_guides: bool,

    /// Reject casings that do not fit inside any active drilled hole
    #[serde(default = "default_true")]
    pub check_containment: bool,
}

fn default_schema_type() -> String {
    SchemaType::default().as_str().to_string()
}
const fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            schema_type: default_schema_type(),
            interval_guides: false,
            check_containment: true,
        }
    }
}

// ============================================================================
// Style
// ============================================================================

/// Stroke and fill settings for the diameter model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub hole_color: String,
    pub hole_line_width: f64,
    pub necking_color: String,
    pub necking_line_width: f64,
    pub casing_color: String,
    pub casing_line_width: f64,
    pub plug_color: String,
    pub plug_opacity: f64,
    pub annulus_color: String,
    pub annulus_opacity: f64,
    pub guide_color: String,
    pub guide_line_width: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            hole_color: "brown".to_string(),
            hole_line_width: 0.5,
            necking_color: "red".to_string(),
            necking_line_width: 0.5,
            casing_color: "black".to_string(),
            casing_line_width: 1.0,
            plug_color: "grey".to_string(),
            plug_opacity: 0.25,
            annulus_color: "silver".to_string(),
            annulus_opacity: 0.5,
            guide_color: "grey".to_string(),
            guide_line_width: 0.5,
        }
    }
}

impl StyleConfig {
    /// Build the style for a diameter-model role.
    ///
    /// Single-diameter roles (pipe, screen, slotted casing) are styled by
    /// [`SimpleModelConfig::style_for`].
    pub fn style_for(&self, role: Role) -> Style {
        match role {
            Role::DrilledHole => Style::line(role, &self.hole_color, self.hole_line_width),
            Role::Necking => Style::line(role, &self.necking_color, self.necking_line_width),
            Role::Casing => Style::line(role, &self.casing_color, self.casing_line_width),
            Role::CementPlug => Style::area(role, &self.plug_color, self.plug_opacity),
            Role::CementedAnnulus => Style::area(role, &self.annulus_color, self.annulus_opacity),
            Role::IntervalGuide => Style::line(role, &self.guide_color, self.guide_line_width),
            Role::Pipe | Role::WirewoundScreen | Role::SlottedCasing => {
                Style::line(role, &self.casing_color, self.casing_line_width)
            }
        }
    }
}

// ============================================================================
// Single-Diameter Model
// ============================================================================

/// Geometry of the single-diameter model, in axes fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleModelConfig {
    /// Width of a pipe wall
    pub pipe_width: f64,
    /// Number of hatch strokes per screen / slot pattern
    pub hatch_density: u32,
    /// Left edge of the left wall
    pub left_position: f64,
    /// Right edge of the right wall
    pub right_position: f64,
    pub pipe_color: String,
}

impl Default for SimpleModelConfig {
    fn default() -> Self {
        Self {
            pipe_width: 0.08,
            hatch_density: 3,
            left_position: 0.25,
            right_position: 0.75,
            pipe_color: "black".to_string(),
        }
    }
}

impl SimpleModelConfig {
    /// Build the style for a single-diameter role: solid pipe is filled,
    /// production zones are unfilled with a hatch.
    pub fn style_for(&self, role: Role) -> Style {
        let hatch = match role {
            Role::WirewoundScreen => Some(Hatch::Horizontal {
                density: self.hatch_density,
            }),
            Role::SlottedCasing => Some(Hatch::Diagonal {
                density: self.hatch_density,
            }),
            _ => None,
        };
        Style {
            role,
            stroke: self.pipe_color.clone(),
            fill: hatch.is_none().then(|| self.pipe_color.clone()),
            hatch,
            line_width: 1.0,
            opacity: 1.0,
        }
    }
}

// ============================================================================
// SVG Surface
// ============================================================================

/// Canvas settings for the SVG surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    pub width_px: u32,
    pub height_px: u32,
    pub margin_px: u32,
    /// Half-width of the symmetric diameter axis
    pub x_extent: f64,
    pub background: String,
    pub font_size_px: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width_px: 600,
            height_px: 900,
            margin_px: 40,
            x_extent: 500.0,
            background: "white".to_string(),
            font_size_px: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        SchematicConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SchematicConfig::from_toml_str(
            r#"
[style]
casing_color = "navy"
"#,
        )
        .unwrap();
        assert_eq!(config.style.casing_color, "navy");
        assert_eq!(config.style.hole_color, "brown");
        assert!((config.simple.pipe_width - 0.08).abs() < f64::EPSILON);
        assert!(config.render.check_containment);
    }

    #[test]
    fn test_unknown_schema_fails_validation() {
        let mut config = SchematicConfig::default();
        config.render.schema_type = "single_diameter".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("render.schema_type"));
    }

    #[test]
    fn test_opacity_out_of_range() {
        let mut config = SchematicConfig::default();
        config.style.plug_opacity = 1.5;
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("style.plug_opacity")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_overlapping_simple_bars_rejected() {
        let mut config = SchematicConfig::default();
        config.simple.pipe_width = 0.3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_style_for_plug_is_translucent_area() {
        let style = StyleConfig::default().style_for(Role::CementPlug);
        assert_eq!(style.fill.as_deref(), Some("grey"));
        assert!((style.opacity - 0.25).abs() < f64::EPSILON);
        assert!(style.line_width.abs() < f64::EPSILON);
    }

    #[test]
    fn test_simple_style_hatches() {
        let simple = SimpleModelConfig::default();
        let screen = simple.style_for(Role::WirewoundScreen);
        assert_eq!(screen.fill, None);
        assert_eq!(screen.hatch, Some(Hatch::Horizontal { density: 3 }));
        let pipe = simple.style_for(Role::Pipe);
        assert_eq!(pipe.fill.as_deref(), Some("black"));
        assert_eq!(pipe.hatch, None);
    }
}
