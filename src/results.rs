use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of section types the downstream renderer understands.
///
/// Anything else the vision model invents deserializes to `Unknown` and is
/// dropped by the section mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Header,
    Hero,
    Features,
    Testimonials,
    Pricing,
    Faq,
    Cta,
    Footer,
    Gallery,
    Stats,
    About,
    Form,
    #[serde(other)]
    Unknown,
}

/// One renderable page section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: SectionKind,

    /// Position in the page; after assembly this equals the array index
    pub order: usize,

    /// Type-specific payload consumed by the renderer
    pub data: serde_json::Value,
}

/// Theme color roles; every value is a `#RRGGBB`/`#RGB` string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub foreground: String,
    pub muted: String,
    pub border: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
    pub border_radius: String,
    pub dark_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub source_url: String,
    pub cloned_at: DateTime<Utc>,
    pub original_title: String,
}

/// The pipeline's terminal artifact: a complete, schema-valid page
/// description ready for rendering. Immutable once produced; regeneration
/// means re-running the whole pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingConfig {
    pub id: String,
    pub name: String,
    pub sections: Vec<SectionConfig>,
    pub theme: Theme,
    pub metadata: Metadata,
}

/// Diagnostic counters reported on a successful clone
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneStats {
    pub sections_detected: usize,
    pub colors_extracted: usize,
    pub fonts_detected: usize,
}

/// Outcome of one clone request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneResult {
    pub success: bool,
    pub config: Option<LandingConfig>,
    pub error: Option<String>,
    pub source_url: String,
    pub stats: Option<CloneStats>,
}

impl CloneResult {
    /// Create a successful result with its diagnostics
    pub fn succeeded(config: LandingConfig, source_url: String, stats: CloneStats) -> Self {
        Self {
            success: true,
            config: Some(config),
            error: None,
            source_url,
            stats: Some(stats),
        }
    }

    /// Create a failed result carrying the error message
    pub fn failed(source_url: String, error: String) -> Self {
        Self {
            success: false,
            config: None,
            error: Some(error),
            source_url,
            stats: None,
        }
    }
}
