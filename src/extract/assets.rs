use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

/// Where an image reference was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Img,
    Background,
    Logo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAsset {
    pub src: String,
    pub alt: String,
    pub kind: ImageKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedAssets {
    pub images: Vec<ImageAsset>,
    pub fonts: Vec<String>,
}

/// Image references cap; bounds downstream payload size
const MAX_IMAGES: usize = 20;

/// Enumerates image references and declared web-font families. Pure function.
pub fn extract_assets(html: &str) -> ExtractedAssets {
    let doc = Html::parse_document(html);

    let logo_selector = Selector::parse(r#"header img, nav img, [class*="logo"] img"#).unwrap();
    let logo_srcs: HashSet<String> = doc
        .select(&logo_selector)
        .filter_map(|img| img.value().attr("src"))
        .map(str::to_string)
        .collect();

    let mut images: Vec<ImageAsset> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let img_selector = Selector::parse("img").unwrap();
    for img in doc.select(&img_selector) {
        let Some(src) = img
            .value()
            .attr("src")
            .or_else(|| img.value().attr("data-src"))
        else {
            continue;
        };
        // Inline data URIs are payload, not references
        if src.starts_with("data:") || !seen.insert(src.to_string()) {
            continue;
        }
        let kind = if logo_srcs.contains(src) {
            ImageKind::Logo
        } else {
            ImageKind::Img
        };
        images.push(ImageAsset {
            src: src.to_string(),
            alt: img.value().attr("alt").unwrap_or("").to_string(),
            kind,
        });
        if images.len() == MAX_IMAGES {
            break;
        }
    }

    // CSS backgrounds declared in inline style attributes
    let bg_re = Regex::new(r#"background(?:-image)?\s*:[^;]*url\(\s*['"]?([^'")]+)['"]?\s*\)"#)
        .unwrap();
    let styled_selector = Selector::parse("[style]").unwrap();
    for el in doc.select(&styled_selector) {
        if images.len() == MAX_IMAGES {
            break;
        }
        let Some(style) = el.value().attr("style") else {
            continue;
        };
        for captures in bg_re.captures_iter(style) {
            let src = captures[1].to_string();
            if src.starts_with("data:") || !seen.insert(src.clone()) {
                continue;
            }
            images.push(ImageAsset {
                src,
                alt: String::new(),
                kind: ImageKind::Background,
            });
            if images.len() == MAX_IMAGES {
                break;
            }
        }
    }

    let mut fonts: Vec<String> = Vec::new();
    let link_selector = Selector::parse(r#"link[href*="fonts.googleapis.com"]"#).unwrap();
    for link in doc.select(&link_selector) {
        if let Some(href) = link.value().attr("href") {
            for family in google_font_families(href) {
                if !fonts.contains(&family) {
                    fonts.push(family);
                }
            }
        }
    }

    ExtractedAssets { images, fonts }
}

/// Family names from a Google Fonts stylesheet URL. Handles both the css2
/// form (repeated `family=` params with `:wght@...` suffixes) and the legacy
/// pipe-separated form.
pub fn google_font_families(href: &str) -> Vec<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    let Ok(url) = Url::parse(&absolute) else {
        return Vec::new();
    };

    let mut families = Vec::new();
    for (key, value) in url.query_pairs() {
        if key != "family" {
            continue;
        }
        for part in value.split('|') {
            let name = part
                .split(':')
                .next()
                .unwrap_or("")
                .replace('+', " ")
                .trim()
                .to_string();
            if !name.is_empty() && !families.contains(&name) {
                families.push(name);
            }
        }
    }
    families
}
