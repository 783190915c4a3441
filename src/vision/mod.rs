use crate::config::VisionConfig;
use crate::error::CloneError;
use crate::results::SectionKind;
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::time::{Duration, timeout};

/// Structured interpretation of a screenshot by a vision-capable model.
///
/// Advisory: authoritative for section structure and palette, never for text
/// content. Decoded strictly from the model reply; any failure substitutes
/// the default analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualAnalysis {
    pub sections: Vec<DetectedSection>,
    pub color_palette: ColorPalette,
    pub typography: TypographyAnalysis,
    #[serde(default)]
    pub layout: LayoutAnalysis,
    pub style: StyleAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedSection {
    #[serde(rename = "type")]
    pub kind: SectionKind,

    /// 0-based order on the page as observed in the screenshot
    pub position: usize,

    /// Free-text layout hint, normalized later by the section mapper
    #[serde(default)]
    pub variant: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Six-role palette read off the screenshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub foreground: String,
    pub muted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyAnalysis {
    /// Classification such as "serif" or "sans-serif"
    pub heading_style: String,
    pub body_style: String,
    /// Optional "Heading / Body" family suggestion
    #[serde(default)]
    pub font_pairing: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutAnalysis {
    pub max_width: Option<String>,
    pub section_spacing: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleAnalysis {
    #[serde(default)]
    pub gradients: bool,
    #[serde(default)]
    pub shadows: bool,
    #[serde(default)]
    pub animations: bool,
    #[serde(default = "default_border_radius")]
    pub border_radius: String,
    #[serde(default)]
    pub dark_mode: bool,
}

fn default_border_radius() -> String {
    "8px".to_string()
}

const ANALYSIS_PROMPT: &str = r##"Analyze this website screenshot and describe its structure and visual style.

Identify every distinct page section from top to bottom. Allowed section types:
header, hero, features, testimonials, pricing, faq, cta, footer, gallery, stats, about, form.

Return STRICT JSON only - no prose, no Markdown - matching exactly:
{
  "sections": [
    { "type": "hero", "position": 0, "variant": "split-left", "description": "short label" }
  ],
  "colorPalette": {
    "primary": "#RRGGBB", "secondary": "#RRGGBB", "accent": "#RRGGBB",
    "background": "#RRGGBB", "foreground": "#RRGGBB", "muted": "#RRGGBB"
  },
  "typography": { "headingStyle": "sans-serif", "bodyStyle": "sans-serif", "fontPairing": "Inter / Inter" },
  "layout": { "maxWidth": "1200px", "sectionSpacing": "80px" },
  "style": { "gradients": false, "shadows": true, "animations": false, "borderRadius": "8px", "darkMode": false }
}

Rules:
- "position" is the 0-based top-to-bottom order.
- "variant" is a short layout hint (e.g. "centered", "split-left", "grid", "cards").
- All six palette colors are hex strings.
- Booleans in "style" reflect what is visible in the screenshot."##;

/// Calls the vision endpoint and decodes its reply.
///
/// This component never fails outward: call errors, timeouts and decode
/// failures all yield the built-in default analysis. One call, no retry.
pub struct VisionAnalyzer {
    client: reqwest::Client,
    config: VisionConfig,
}

impl VisionAnalyzer {
    pub fn new(config: VisionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub async fn analyze(&self, screenshot: &[u8]) -> VisualAnalysis {
        let Some(api_key) = self.config.resolved_api_key() else {
            ::log::warn!("no vision API key configured, using default analysis");
            return default_analysis();
        };

        let call = self.request(screenshot, &api_key);
        match timeout(Duration::from_secs(self.config.timeout_secs), call).await {
            Ok(Ok(analysis)) => {
                ::log::info!("visual analysis found {} sections", analysis.sections.len());
                analysis
            }
            Ok(Err(e)) => {
                ::log::warn!("visual analysis failed, using default: {}", e);
                default_analysis()
            }
            Err(_) => {
                ::log::warn!(
                    "visual analysis timed out after {}s, using default",
                    self.config.timeout_secs
                );
                default_analysis()
            }
        }
    }

    async fn request(
        &self,
        screenshot: &[u8],
        api_key: &str,
    ) -> Result<VisualAnalysis, CloneError> {
        let encoded = general_purpose::STANDARD.encode(screenshot);
        let body = json!({
            "model": self.config.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": ANALYSIS_PROMPT },
                    {
                        "type": "image_url",
                        "image_url": { "url": format!("data:image/png;base64,{}", encoded) }
                    }
                ]
            }],
            "max_tokens": self.config.max_tokens
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| CloneError::Vision(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CloneError::Vision(format!("endpoint returned {status}: {text}")));
        }

        let reply: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CloneError::Vision(format!("unreadable reply: {e}")))?;

        let content = reply["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| CloneError::Vision("no content in reply".to_string()))?;

        decode_analysis(content)
    }
}

/// Strict structural decode of the model reply. Markdown code fences are
/// tolerated; anything that does not match the `VisualAnalysis` shape is an
/// error, which is the single trigger for the default-analysis fallback.
pub fn decode_analysis(content: &str) -> Result<VisualAnalysis, CloneError> {
    Ok(serde_json::from_str(strip_code_fences(content))?)
}

/// Drops a surrounding ``` / ```json fence if the model added one
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Canned analysis used whenever the model cannot be called or its reply
/// cannot be decoded: six canonical sections and a neutral modern palette.
pub fn default_analysis() -> VisualAnalysis {
    let kinds = [
        SectionKind::Header,
        SectionKind::Hero,
        SectionKind::Features,
        SectionKind::Testimonials,
        SectionKind::Cta,
        SectionKind::Footer,
    ];
    VisualAnalysis {
        sections: kinds
            .iter()
            .enumerate()
            .map(|(position, kind)| DetectedSection {
                kind: *kind,
                position,
                variant: None,
                description: None,
            })
            .collect(),
        color_palette: ColorPalette {
            primary: "#3b82f6".to_string(),
            secondary: "#64748b".to_string(),
            accent: "#8b5cf6".to_string(),
            background: "#ffffff".to_string(),
            foreground: "#0f172a".to_string(),
            muted: "#f1f5f9".to_string(),
        },
        typography: TypographyAnalysis {
            heading_style: "sans-serif".to_string(),
            body_style: "sans-serif".to_string(),
            font_pairing: None,
        },
        layout: LayoutAnalysis::default(),
        style: StyleAnalysis {
            gradients: false,
            shadows: true,
            animations: false,
            border_radius: "8px".to_string(),
            dark_mode: false,
        },
    }
}
