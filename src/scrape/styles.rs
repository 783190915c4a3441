use crate::results::ThemeColors;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Computed styles sampled off the live page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedStyles {
    pub colors: ThemeColors,
    pub typography: Typography,
    pub spacing: Spacing,
    pub border_radius: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
    pub h1_size: Option<String>,
    pub h2_size: Option<String>,
    pub h3_size: Option<String>,
    pub body_size: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spacing {
    pub section_padding: Option<String>,
    pub container_max_width: Option<String>,
}

impl Default for ExtractedStyles {
    fn default() -> Self {
        Self {
            colors: neutral_colors(),
            typography: Typography {
                heading_font: String::new(),
                body_font: String::new(),
                h1_size: None,
                h2_size: None,
                h3_size: None,
                body_size: None,
            },
            spacing: Spacing::default(),
            border_radius: "8px".to_string(),
        }
    }
}

/// Neutral defaults used whenever a computed value is missing or unparsable
pub fn neutral_colors() -> ThemeColors {
    ThemeColors {
        primary: "#3b82f6".to_string(),
        secondary: "#64748b".to_string(),
        accent: "#8b5cf6".to_string(),
        background: "#ffffff".to_string(),
        foreground: "#0f172a".to_string(),
        muted: "#f1f5f9".to_string(),
        border: "#e2e8f0".to_string(),
    }
}

/// In-page script reading computed styles off a representative button/link
/// and the document body. Returns a flat object of raw CSS strings.
pub const STYLE_PROBE: &str = r#"
const probe = {};
const btn = document.querySelector("button, a[class*='btn'], [class*='button']");
const bodyStyle = window.getComputedStyle(document.body);
if (btn) {
    const btnStyle = window.getComputedStyle(btn);
    probe.primary = btnStyle.backgroundColor;
    probe.radius = btnStyle.borderRadius;
}
probe.background = bodyStyle.backgroundColor;
probe.foreground = bodyStyle.color;
probe.bodyFont = bodyStyle.fontFamily;
probe.bodySize = bodyStyle.fontSize;
const heading = document.querySelector('h1, h2, h3');
if (heading) { probe.headingFont = window.getComputedStyle(heading).fontFamily; }
const h1 = document.querySelector('h1');
if (h1) { probe.h1Size = window.getComputedStyle(h1).fontSize; }
const h2 = document.querySelector('h2');
if (h2) { probe.h2Size = window.getComputedStyle(h2).fontSize; }
const h3 = document.querySelector('h3');
if (h3) { probe.h3Size = window.getComputedStyle(h3).fontSize; }
const section = document.querySelector('section, main');
if (section) { probe.sectionPadding = window.getComputedStyle(section).paddingTop; }
const container = document.querySelector("[class*='container'], main");
if (container) { probe.maxWidth = window.getComputedStyle(container).maxWidth; }
return probe;
"#;

/// Converts the style probe reply into `ExtractedStyles`, falling back to
/// neutral defaults for every missing or unparsable value.
pub fn parse_style_probe(value: &Value) -> ExtractedStyles {
    let defaults = ExtractedStyles::default();
    let raw = |key: &str| value.get(key).and_then(Value::as_str).unwrap_or("");
    let sample = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty() && *v != "none")
            .map(str::to_string)
    };

    let colors = ThemeColors {
        primary: css_color_to_hex(raw("primary")).unwrap_or(defaults.colors.primary),
        secondary: defaults.colors.secondary,
        accent: defaults.colors.accent,
        background: css_color_to_hex(raw("background")).unwrap_or(defaults.colors.background),
        foreground: css_color_to_hex(raw("foreground")).unwrap_or(defaults.colors.foreground),
        muted: defaults.colors.muted,
        border: defaults.colors.border,
    };

    ExtractedStyles {
        colors,
        typography: Typography {
            heading_font: clean_font_family(raw("headingFont")).unwrap_or_default(),
            body_font: clean_font_family(raw("bodyFont")).unwrap_or_default(),
            h1_size: sample("h1Size"),
            h2_size: sample("h2Size"),
            h3_size: sample("h3Size"),
            body_size: sample("bodySize"),
        },
        spacing: Spacing {
            section_padding: sample("sectionPadding"),
            container_max_width: sample("maxWidth"),
        },
        border_radius: sample("radius").unwrap_or(defaults.border_radius),
    }
}

/// Normalizes a computed CSS color (`#hex` or `rgb()`/`rgba()`) to lowercase
/// hex. Fully transparent and unparsable values yield `None`.
pub fn css_color_to_hex(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }
    if v.starts_with('#') {
        return is_hex_color(v).then(|| v.to_lowercase());
    }

    let inner = v
        .strip_prefix("rgba(")
        .or_else(|| v.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 3 {
        return None;
    }
    let r: u8 = parts[0].parse().ok()?;
    let g: u8 = parts[1].parse().ok()?;
    let b: u8 = parts[2].parse().ok()?;
    if let Some(alpha) = parts.get(3) {
        if alpha.parse::<f32>().ok()? == 0.0 {
            return None;
        }
    }
    Some(format!("#{:02x}{:02x}{:02x}", r, g, b))
}

/// True for `#RGB` through `#RRGGBB`
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|rest| (3..=6).contains(&rest.len()) && rest.chars().all(|c| c.is_ascii_hexdigit()))
}

/// First family name from a computed `font-family` list, quotes stripped
pub fn clean_font_family(value: &str) -> Option<String> {
    let first = value.split(',').next()?.trim().trim_matches(['"', '\'']);
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_css_color_to_hex_rgb() {
        assert_eq!(css_color_to_hex("rgb(59, 130, 246)").as_deref(), Some("#3b82f6"));
        assert_eq!(css_color_to_hex("rgba(255, 255, 255, 1)").as_deref(), Some("#ffffff"));
        // Modern space-separated syntax
        assert_eq!(css_color_to_hex("rgb(15 23 42)").as_deref(), Some("#0f172a"));
    }

    #[test]
    fn test_css_color_to_hex_passthrough_and_rejects() {
        assert_eq!(css_color_to_hex("#C0FFEE").as_deref(), Some("#c0ffee"));
        assert_eq!(css_color_to_hex("#abc").as_deref(), Some("#abc"));
        assert_eq!(css_color_to_hex(""), None);
        assert_eq!(css_color_to_hex("transparent"), None);
        assert_eq!(css_color_to_hex("rgba(0, 0, 0, 0)"), None);
        assert_eq!(css_color_to_hex("#not-a-color"), None);
    }

    #[test]
    fn test_probe_falls_back_to_neutral_defaults() {
        let styles = parse_style_probe(&json!({}));
        assert_eq!(styles.colors.primary, "#3b82f6");
        assert_eq!(styles.colors.background, "#ffffff");
        assert_eq!(styles.border_radius, "8px");
        assert!(styles.typography.heading_font.is_empty());
    }

    #[test]
    fn test_probe_parses_sampled_values() {
        let styles = parse_style_probe(&json!({
            "primary": "rgb(220, 38, 38)",
            "background": "rgb(250, 250, 250)",
            "bodyFont": "\"Open Sans\", Arial, sans-serif",
            "headingFont": "Poppins, sans-serif",
            "radius": "12px",
            "h1Size": "48px",
        }));
        assert_eq!(styles.colors.primary, "#dc2626");
        assert_eq!(styles.colors.background, "#fafafa");
        assert_eq!(styles.typography.body_font, "Open Sans");
        assert_eq!(styles.typography.heading_font, "Poppins");
        assert_eq!(styles.border_radius, "12px");
        assert_eq!(styles.typography.h1_size.as_deref(), Some("48px"));
    }
}
