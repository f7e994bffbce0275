//! Config validation: unknown-key detection with Levenshtein suggestions
//! and plausible-range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `SchematicConfig`.
///
/// Maintained by hand to match the struct hierarchy in `schematic_config.rs`.
/// Any new field added there must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [render]
        "render",
        "render.schema_type",
        "render.interval_guides",
        "render.check_containment",
        // [style]
        "style",
        "style.hole_color",
        "style.hole_line_width",
        "style.necking_color",
        "style.necking_line_width",
        "style.casing_color",
        "style.casing_line_width",
        "style.plug_color",
        "style.plug_opacity",
        "style.annulus_color",
        "style.annulus_opacity",
        "style.guide_color",
        "style.guide_line_width",
        // [simple]
        "simple",
        "simple.pipe_width",
        "simple.hatch_density",
        "simple.left_position",
        "simple.right_position",
        "simple.pipe_color",
        // [svg]
        "svg",
        "svg.width_px",
        "svg.height_px",
        "svg.margin_px",
        "svg.x_extent",
        "svg.background",
        "svg.font_size_px",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so suggestions are
/// stable across runs.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            let message = format!("Unknown config key '{key}'");
            ValidationWarning {
                field: key,
                message,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate plausible ranges on a parsed `SchematicConfig`.
///
/// Returns (errors, warnings). Errors are impossible values; warnings are
/// legal but will likely produce an unreadable drawing.
pub fn validate_ranges(config: &super::SchematicConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let m = &config.simple;
    if !(0.0..=1.0).contains(&m.left_position) || !(0.0..=1.0).contains(&m.right_position) {
        errors.push(format!(
            "simple.left_position ({:.2}) and simple.right_position ({:.2}) are axes fractions and must lie within 0..=1",
            m.left_position, m.right_position
        ));
    }

    if m.hatch_density > 12 {
        warnings.push(ValidationWarning {
            field: "simple.hatch_density".to_string(),
            message: format!(
                "simple.hatch_density = {} is very dense, hatching may render as solid fill",
                m.hatch_density
            ),
            suggestion: None,
        });
    }

    let v = &config.svg;
    if v.font_size_px <= 0.0 || !v.font_size_px.is_finite() {
        errors.push(format!(
            "svg.font_size_px = {} must be > 0",
            v.font_size_px
        ));
    }

    // Diameters are usually millimetres; anything past 5 m is a unit mix-up
    if v.x_extent > 5_000.0 {
        warnings.push(ValidationWarning {
            field: "svg.x_extent".to_string(),
            message: format!(
                "svg.x_extent = {:.0} is outside typical range (up to 5000 mm)",
                v.x_extent
            ),
            suggestion: None,
        });
    }

    let s = &config.style;
    if s.casing_line_width > 10.0 || s.hole_line_width > 10.0 {
        warnings.push(ValidationWarning {
            field: "style".to_string(),
            message: "wall line widths above 10 px will hide neighbouring strings".to_string(),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("pipe_widht", "pipe_width"), 2);
        assert_eq!(levenshtein("casing_colour", "casing_color"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_flat() {
        let toml: toml::Value = r#"
            a = 1
            b = "hello"
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"a".to_string()));
        assert!(keys.contains(&"b".to_string()));
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [style]
            plug_color = "grey"
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"style".to_string()));
        assert!(keys.contains(&"style.plug_color".to_string()));
    }

    #[test]
    fn test_suggestion_for_british_spelling() {
        let known = known_config_keys();
        assert_eq!(
            suggest_correction("style.casing_colour", &known).as_deref(),
            Some("style.casing_color")
        );
    }

    #[test]
    fn test_no_suggestion_for_distant_key() {
        let known = known_config_keys();
        assert_eq!(suggest_correction("completely_unrelated", &known), None);
    }

    #[test]
    fn test_default_config_has_no_range_findings() {
        let (errors, warnings) = validate_ranges(&super::super::SchematicConfig::default());
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty());
    }
}
