use crate::extract::{ExtractedAssets, ExtractedContent};
use crate::results::ThemeColors;
use crate::scrape::styles::{self, ExtractedStyles};
use crate::scrape::ScrapedWebsite;
use crate::vision::{ColorPalette, DetectedSection, StyleAnalysis, TypographyAnalysis, VisualAnalysis};

/// One consistent view over both analyses, with disagreements resolved.
///
/// Precedence: the visual analysis is authoritative for section existence,
/// order and variants, and wins on palette/typography/radius with the scraped
/// computed styles as fallback; the HTML extraction is authoritative for all
/// text content.
#[derive(Debug, Clone)]
pub struct MergedView {
    /// Visual sections, sorted by detected position
    pub sections: Vec<DetectedSection>,
    pub content: ExtractedContent,
    pub assets: ExtractedAssets,
    pub colors: ThemeColors,
    pub heading_font: String,
    pub body_font: String,
    pub border_radius: String,
    pub dark_mode: bool,
    pub page_title: Option<String>,
    pub page_description: Option<String>,
}

pub fn reconcile(visual: &VisualAnalysis, scraped: &ScrapedWebsite) -> MergedView {
    let mut sections = visual.sections.clone();
    sections.sort_by_key(|s| s.position);

    MergedView {
        sections,
        content: scraped.content.clone(),
        assets: scraped.assets.clone(),
        colors: resolve_colors(&visual.color_palette, &scraped.styles),
        heading_font: resolve_heading_font(&visual.typography, &scraped.styles),
        body_font: resolve_body_font(&visual.typography, &scraped.styles),
        border_radius: resolve_border_radius(&visual.style, &scraped.styles),
        dark_mode: visual.style.dark_mode,
        page_title: scraped.title.clone(),
        page_description: scraped.description.clone(),
    }
}

/// Palette precedence: visual value when it is a valid hex color, scraped
/// computed value otherwise. The palette carries no border role, so `border`
/// always comes from the scraped side.
pub fn resolve_colors(palette: &ColorPalette, extracted: &ExtractedStyles) -> ThemeColors {
    ThemeColors {
        primary: pick_color(&palette.primary, &extracted.colors.primary),
        secondary: pick_color(&palette.secondary, &extracted.colors.secondary),
        accent: pick_color(&palette.accent, &extracted.colors.accent),
        background: pick_color(&palette.background, &extracted.colors.background),
        foreground: pick_color(&palette.foreground, &extracted.colors.foreground),
        muted: pick_color(&palette.muted, &extracted.colors.muted),
        border: extracted.colors.border.clone(),
    }
}

fn pick_color(visual: &str, scraped: &str) -> String {
    let visual = visual.trim();
    if styles::is_hex_color(visual) {
        visual.to_lowercase()
    } else {
        scraped.to_string()
    }
}

/// Heading font: visual `fontPairing` head → scraped computed family →
/// classification-based default.
pub fn resolve_heading_font(visual: &TypographyAnalysis, extracted: &ExtractedStyles) -> String {
    if let Some(family) = pairing_part(visual.font_pairing.as_deref(), 0) {
        return family;
    }
    if !extracted.typography.heading_font.is_empty() {
        return extracted.typography.heading_font.clone();
    }
    classification_default(&visual.heading_style)
}

/// Body font: visual `fontPairing` tail → scraped computed family →
/// classification-based default.
pub fn resolve_body_font(visual: &TypographyAnalysis, extracted: &ExtractedStyles) -> String {
    if let Some(family) = pairing_part(visual.font_pairing.as_deref(), 1) {
        return family;
    }
    if !extracted.typography.body_font.is_empty() {
        return extracted.typography.body_font.clone();
    }
    classification_default(&visual.body_style)
}

/// Radius: visual styling when present, scraped computed value otherwise
pub fn resolve_border_radius(visual: &StyleAnalysis, extracted: &ExtractedStyles) -> String {
    let radius = visual.border_radius.trim();
    if radius.is_empty() {
        extracted.border_radius.clone()
    } else {
        radius.to_string()
    }
}

fn pairing_part(pairing: Option<&str>, index: usize) -> Option<String> {
    let pairing = pairing?;
    pairing
        .split('/')
        .nth(index)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

fn classification_default(style: &str) -> String {
    let lower = style.to_lowercase();
    if lower.contains("serif") && !lower.contains("sans") {
        "Georgia".to_string()
    } else {
        "Inter".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::styles::ExtractedStyles;
    use crate::vision::default_analysis;

    fn scraped_styles(primary: &str, heading_font: &str) -> ExtractedStyles {
        let mut styles = ExtractedStyles::default();
        styles.colors.primary = primary.to_string();
        styles.typography.heading_font = heading_font.to_string();
        styles
    }

    #[test]
    fn test_visual_palette_wins_over_scraped() {
        let mut analysis = default_analysis();
        analysis.color_palette.primary = "#FF0000".to_string();
        let colors = resolve_colors(&analysis.color_palette, &scraped_styles("#00ff00", ""));
        assert_eq!(colors.primary, "#ff0000");
    }

    #[test]
    fn test_invalid_visual_color_falls_back_to_scraped() {
        let mut analysis = default_analysis();
        analysis.color_palette.primary = "bright blue".to_string();
        let colors = resolve_colors(&analysis.color_palette, &scraped_styles("#00ff00", ""));
        assert_eq!(colors.primary, "#00ff00");
    }

    #[test]
    fn test_border_always_from_scraped_side() {
        let analysis = default_analysis();
        let colors = resolve_colors(&analysis.color_palette, &ExtractedStyles::default());
        assert_eq!(colors.border, "#e2e8f0");
    }

    #[test]
    fn test_heading_font_fallback_chain() {
        let mut typography = default_analysis().typography;

        // Pairing wins when present
        typography.font_pairing = Some("Playfair Display / Source Sans".to_string());
        assert_eq!(
            resolve_heading_font(&typography, &scraped_styles("#000", "Roboto")),
            "Playfair Display"
        );
        assert_eq!(
            resolve_body_font(&typography, &scraped_styles("#000", "Roboto")),
            "Source Sans"
        );

        // Scraped family next
        typography.font_pairing = None;
        assert_eq!(
            resolve_heading_font(&typography, &scraped_styles("#000", "Roboto")),
            "Roboto"
        );

        // Classification default last
        typography.heading_style = "serif".to_string();
        assert_eq!(
            resolve_heading_font(&typography, &scraped_styles("#000", "")),
            "Georgia"
        );
        typography.heading_style = "sans-serif".to_string();
        assert_eq!(
            resolve_heading_font(&typography, &scraped_styles("#000", "")),
            "Inter"
        );
    }
}
