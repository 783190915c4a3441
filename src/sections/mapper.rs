use crate::merge::MergedView;
use crate::results::{SectionConfig, SectionKind};
use crate::vision::DetectedSection;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

/// Hero layouts the renderer supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeroVariant {
    Centered,
    SplitLeft,
    SplitRight,
    FullBleed,
}

/// Feature-grid layouts the renderer supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeaturesVariant {
    Grid,
    Cards,
    List,
    Alternating,
}

/// Normalizes a free-text hero layout label onto the closed variant set.
/// Total over arbitrary input; unrecognized labels get the default.
pub fn map_hero_variant(label: &str) -> HeroVariant {
    match label.trim().to_lowercase().as_str() {
        "centered" | "center" | "stacked" | "minimal" | "text-only" => HeroVariant::Centered,
        "split-left" | "image-left" | "media-left" | "left" => HeroVariant::SplitLeft,
        "split-right" | "image-right" | "media-right" | "right" | "split" | "horizontal" => {
            HeroVariant::SplitRight
        }
        "full-bleed" | "fullscreen" | "full" | "cover" | "background-image" => {
            HeroVariant::FullBleed
        }
        _ => HeroVariant::Centered,
    }
}

/// Normalizes a free-text features layout label onto the closed variant set
pub fn map_features_variant(label: &str) -> FeaturesVariant {
    match label.trim().to_lowercase().as_str() {
        "grid" | "columns" | "three-column" | "four-column" | "tiles" => FeaturesVariant::Grid,
        "cards" | "card" | "boxed" | "panels" => FeaturesVariant::Cards,
        "list" | "vertical" | "stacked" | "rows" => FeaturesVariant::List,
        "alternating" | "zigzag" | "side-by-side" | "offset" => FeaturesVariant::Alternating,
        _ => FeaturesVariant::Grid,
    }
}

/// Substring keyword table for feature icons
const ICON_KEYWORDS: &[(&str, &str)] = &[
    ("speed", "zap"),
    ("fast", "zap"),
    ("performance", "zap"),
    ("secur", "shield"),
    ("safe", "shield"),
    ("privacy", "lock"),
    ("analytic", "bar-chart"),
    ("insight", "bar-chart"),
    ("report", "bar-chart"),
    ("global", "globe"),
    ("world", "globe"),
    ("support", "life-buoy"),
    ("help", "life-buoy"),
    ("integrat", "plug"),
    ("connect", "plug"),
    ("api", "plug"),
    ("price", "dollar-sign"),
    ("cost", "dollar-sign"),
    ("billing", "dollar-sign"),
    ("team", "users"),
    ("collaborat", "users"),
    ("cloud", "cloud"),
    ("scal", "trending-up"),
    ("grow", "trending-up"),
    ("design", "pen-tool"),
    ("custom", "sliders"),
    ("automat", "cpu"),
    ("time", "clock"),
    ("schedul", "clock"),
    ("mobile", "smartphone"),
    ("search", "search"),
    ("mail", "mail"),
    ("notif", "bell"),
];

const DEFAULT_ICONS: &[&str] = &["star", "zap", "shield", "heart", "target", "layers"];

/// Icon for a feature item. Deterministic: identical `(title, index)` always
/// yields the same icon; unmatched titles cycle the default list by index.
pub fn icon_for_feature(title: &str, index: usize) -> &'static str {
    let lower = title.to_lowercase();
    for (keyword, icon) in ICON_KEYWORDS {
        if lower.contains(keyword) {
            return icon;
        }
    }
    DEFAULT_ICONS[index % DEFAULT_ICONS.len()]
}

/// Converts one detected section into a renderer-facing `SectionConfig`.
/// Unknown types map to `None`; every known type resolves its content
/// through an explicit fallback chain and never produces an empty required
/// field.
pub fn map_section(section: &DetectedSection, view: &MergedView) -> Option<SectionConfig> {
    let data = match section.kind {
        SectionKind::Header => header_data(view),
        SectionKind::Hero => hero_data(view, section),
        SectionKind::Features => features_data(view, section),
        SectionKind::Testimonials => testimonials_data(view),
        SectionKind::Pricing => pricing_data(view),
        SectionKind::Faq => faq_data(view),
        SectionKind::Cta => cta_data(view, section),
        SectionKind::Footer => footer_data(view),
        SectionKind::Gallery => gallery_data(view),
        SectionKind::Stats => stats_data(section),
        SectionKind::About => about_data(view, section),
        SectionKind::Form => form_data(section),
        SectionKind::Unknown => return None,
    };
    Some(SectionConfig {
        id: Uuid::new_v4().to_string(),
        kind: section.kind,
        order: section.position,
        data,
    })
}

/// Fallback order: HTML hero title → page `<title>` → visual description →
/// "Welcome"
pub fn resolve_hero_title(view: &MergedView, section: &DetectedSection) -> String {
    if let Some(hero) = &view.content.hero {
        if !hero.title.is_empty() {
            return hero.title.clone();
        }
    }
    if let Some(title) = &view.page_title {
        if !title.is_empty() {
            return title.clone();
        }
    }
    if let Some(description) = &section.description {
        if !description.is_empty() {
            return description.clone();
        }
    }
    "Welcome".to_string()
}

/// Fallback order: HTML subtitle → meta description → visual description →
/// generic line
pub fn resolve_hero_subtitle(view: &MergedView, section: &DetectedSection) -> String {
    if let Some(subtitle) = view.content.hero.as_ref().and_then(|h| h.subtitle.as_ref()) {
        if !subtitle.is_empty() {
            return subtitle.clone();
        }
    }
    if let Some(description) = &view.page_description {
        if !description.is_empty() {
            return description.clone();
        }
    }
    if let Some(description) = &section.description {
        if !description.is_empty() {
            return description.clone();
        }
    }
    "Everything you need, in one place.".to_string()
}

pub(crate) fn header_data(view: &MergedView) -> Value {
    let header = view.content.header.as_ref();
    let brand = view
        .page_title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Brand".to_string());
    let nav_items: Vec<Value> = header
        .map(|h| {
            h.nav_items
                .iter()
                .map(|n| json!({ "label": n.label, "href": n.href }))
                .collect()
        })
        .unwrap_or_default();
    json!({
        "brand": brand,
        "logo": header.and_then(|h| h.logo.clone()),
        "navItems": nav_items,
    })
}

pub(crate) fn hero_data(view: &MergedView, section: &DetectedSection) -> Value {
    let hero = view.content.hero.as_ref();
    let primary_cta = hero
        .and_then(|h| h.ctas.first())
        .map(|c| json!({ "text": c.text, "href": c.href.clone().unwrap_or_else(|| "#".to_string()) }))
        .unwrap_or_else(|| json!({ "text": "Get Started", "href": "#" }));
    let secondary_cta = hero
        .and_then(|h| h.ctas.get(1))
        .map(|c| json!({ "text": c.text, "href": c.href.clone().unwrap_or_else(|| "#".to_string()) }));
    json!({
        "title": resolve_hero_title(view, section),
        "subtitle": resolve_hero_subtitle(view, section),
        "primaryCTA": primary_cta,
        "secondaryCTA": secondary_cta,
        "image": hero.and_then(|h| h.image.clone()),
        "variant": map_hero_variant(section.variant.as_deref().unwrap_or("")),
    })
}

pub(crate) fn features_data(view: &MergedView, section: &DetectedSection) -> Value {
    let items: Vec<Value> = if view.content.features.is_empty() {
        placeholder_features()
    } else {
        view.content
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| {
                json!({
                    "title": f.title,
                    "description": f.description,
                    "icon": icon_for_feature(&f.title, i),
                })
            })
            .collect()
    };
    let columns = items.len().clamp(1, 4);
    json!({
        "title": section
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "Features".to_string()),
        "items": items,
        "columns": columns,
        "variant": map_features_variant(section.variant.as_deref().unwrap_or("")),
    })
}

fn placeholder_features() -> Vec<Value> {
    [
        ("Fast by default", "Optimized for speed from the first load."),
        ("Secure foundation", "Your data stays protected end to end."),
        ("Built to scale", "Grows with you, from side project to production."),
    ]
    .iter()
    .enumerate()
    .map(|(i, (title, description))| {
        json!({ "title": title, "description": description, "icon": icon_for_feature(title, i) })
    })
    .collect()
}

fn testimonials_data(view: &MergedView) -> Value {
    let items: Vec<Value> = if view.content.testimonials.is_empty() {
        vec![json!({
            "quote": "This product completely changed the way our team works.",
            "author": "A happy customer",
        })]
    } else {
        view.content
            .testimonials
            .iter()
            .map(|t| json!({ "quote": t.quote, "author": t.author.clone() }))
            .collect()
    };
    json!({ "title": "What people say", "items": items })
}

fn pricing_data(view: &MergedView) -> Value {
    let plans: Vec<Value> = if view.content.pricing.is_empty() {
        vec![
            json!({ "name": "Starter", "price": "$0", "features": ["Core features", "Community support"] }),
            json!({ "name": "Pro", "price": "$29", "features": ["Everything in Starter", "Priority support"] }),
            json!({ "name": "Enterprise", "price": "Custom", "features": ["Everything in Pro", "Dedicated manager"] }),
        ]
    } else {
        view.content
            .pricing
            .iter()
            .map(|p| json!({ "name": p.name, "price": p.price.clone(), "features": p.features }))
            .collect()
    };
    json!({ "title": "Pricing", "plans": plans })
}

fn faq_data(view: &MergedView) -> Value {
    let items: Vec<Value> = if view.content.faq.is_empty() {
        vec![
            json!({ "question": "How do I get started?", "answer": "Sign up and follow the guided setup." }),
            json!({ "question": "Can I cancel anytime?", "answer": "Yes, there is no lock-in." }),
        ]
    } else {
        view.content
            .faq
            .iter()
            .map(|i| json!({ "question": i.question, "answer": i.answer }))
            .collect()
    };
    json!({ "title": "Frequently asked questions", "items": items })
}

fn cta_data(view: &MergedView, section: &DetectedSection) -> Value {
    let cta = view.content.cta.as_ref();
    let title = cta
        .map(|c| c.title.clone())
        .filter(|t| !t.is_empty())
        .or_else(|| section.description.clone().filter(|d| !d.is_empty()))
        .unwrap_or_else(|| "Ready to get started?".to_string());
    let button = cta
        .and_then(|c| c.button.as_ref())
        .map(|b| json!({ "text": b.text, "href": b.href.clone().unwrap_or_else(|| "#".to_string()) }))
        .unwrap_or_else(|| json!({ "text": "Get Started", "href": "#" }));
    json!({ "title": title, "button": button })
}

pub(crate) fn footer_data(view: &MergedView) -> Value {
    let footer = view.content.footer.as_ref();
    let columns: Vec<Value> = footer
        .map(|f| {
            f.columns
                .iter()
                .map(|c| {
                    json!({
                        "title": c.title.clone(),
                        "links": c.links.iter()
                            .map(|l| json!({ "label": l.label, "href": l.href }))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    let copyright = footer
        .map(|f| f.copyright.clone())
        .unwrap_or_else(|| format!("© {} All rights reserved.", Utc::now().year()));
    json!({ "columns": columns, "copyright": copyright })
}

fn gallery_data(view: &MergedView) -> Value {
    let images: Vec<Value> = view
        .assets
        .images
        .iter()
        .filter(|i| i.kind != crate::extract::ImageKind::Logo)
        .take(8)
        .map(|i| json!({ "src": i.src, "alt": i.alt }))
        .collect();
    json!({ "title": "Gallery", "images": images })
}

fn stats_data(section: &DetectedSection) -> Value {
    json!({
        "title": section
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "By the numbers".to_string()),
        "items": [
            { "value": "10k+", "label": "Users" },
            { "value": "99.9%", "label": "Uptime" },
            { "value": "24/7", "label": "Support" },
        ],
    })
}

fn about_data(view: &MergedView, section: &DetectedSection) -> Value {
    let body = view
        .page_description
        .clone()
        .filter(|d| !d.is_empty())
        .or_else(|| section.description.clone().filter(|d| !d.is_empty()))
        .unwrap_or_else(|| "We build tools people love to use.".to_string());
    json!({ "title": "About", "body": body })
}

fn form_data(section: &DetectedSection) -> Value {
    json!({
        "title": section
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "Contact us".to_string()),
        "fields": ["name", "email", "message"],
        "submitLabel": "Send",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::content::{CallToAction, FeatureItem, HeroContent};
    use crate::merge::reconcile;
    use crate::merge::MergedView;
    use crate::scrape::{ExtractedStyles, ScrapedWebsite};
    use crate::vision::default_analysis;

    fn empty_view() -> MergedView {
        let scraped = ScrapedWebsite {
            url: "https://example.com".to_string(),
            screenshot: Vec::new(),
            html: String::new(),
            title: None,
            description: None,
            styles: ExtractedStyles::default(),
            content: Default::default(),
            assets: Default::default(),
        };
        reconcile(&default_analysis(), &scraped)
    }

    fn detected(kind: SectionKind, variant: Option<&str>) -> DetectedSection {
        DetectedSection {
            kind,
            position: 0,
            variant: variant.map(str::to_string),
            description: None,
        }
    }

    #[test]
    fn test_hero_variant_total_over_any_input() {
        assert_eq!(map_hero_variant("image-right"), HeroVariant::SplitRight);
        assert_eq!(map_hero_variant("  Split-Left "), HeroVariant::SplitLeft);
        assert_eq!(map_hero_variant("horizontal"), HeroVariant::SplitRight);
        assert_eq!(map_hero_variant("cover"), HeroVariant::FullBleed);
        // Unrecognized labels always land on the default
        assert_eq!(map_hero_variant("banana"), HeroVariant::Centered);
        assert_eq!(map_hero_variant(""), HeroVariant::Centered);
    }

    #[test]
    fn test_features_variant_total_over_any_input() {
        assert_eq!(map_features_variant("zigzag"), FeaturesVariant::Alternating);
        assert_eq!(map_features_variant("CARDS"), FeaturesVariant::Cards);
        assert_eq!(map_features_variant("stacked"), FeaturesVariant::List);
        assert_eq!(map_features_variant("whatever"), FeaturesVariant::Grid);
        assert_eq!(map_features_variant(""), FeaturesVariant::Grid);
    }

    #[test]
    fn test_icon_lookup_is_deterministic() {
        assert_eq!(
            icon_for_feature("Blazing fast builds", 3),
            icon_for_feature("Blazing fast builds", 3)
        );
        assert_eq!(icon_for_feature("Enterprise security", 0), "shield");
        assert_eq!(icon_for_feature("Advanced analytics", 5), "bar-chart");
        // Unmatched titles cycle the default list by index
        assert_eq!(icon_for_feature("Lorem ipsum", 0), "star");
        assert_eq!(icon_for_feature("Lorem ipsum", 1), "zap");
        assert_eq!(icon_for_feature("Lorem ipsum", 7), "zap");
    }

    #[test]
    fn test_hero_title_fallback_chain() {
        let mut view = empty_view();
        let section = detected(SectionKind::Hero, None);

        assert_eq!(resolve_hero_title(&view, &section), "Welcome");

        view.page_title = Some("Acme Inc".to_string());
        assert_eq!(resolve_hero_title(&view, &section), "Acme Inc");

        view.content.hero = Some(HeroContent {
            title: "Ship faster".to_string(),
            subtitle: None,
            ctas: Vec::new(),
            image: None,
        });
        assert_eq!(resolve_hero_title(&view, &section), "Ship faster");
    }

    #[test]
    fn test_hero_section_uses_extracted_cta() {
        let mut view = empty_view();
        view.content.hero = Some(HeroContent {
            title: "Welcome to Acme".to_string(),
            subtitle: None,
            ctas: vec![CallToAction {
                text: "Sign Up".to_string(),
                href: None,
            }],
            image: None,
        });
        let config = map_section(&detected(SectionKind::Hero, None), &view).unwrap();
        assert_eq!(config.data["title"], "Welcome to Acme");
        assert_eq!(config.data["primaryCTA"]["text"], "Sign Up");
        assert!(config.data["secondaryCTA"].is_null());
    }

    #[test]
    fn test_features_section_column_count() {
        let mut view = empty_view();
        view.content.features = (1..=4)
            .map(|i| FeatureItem {
                title: format!("Feature {i}"),
                description: format!("Description {i}"),
            })
            .collect();
        let config = map_section(&detected(SectionKind::Features, None), &view).unwrap();
        assert_eq!(config.data["items"].as_array().unwrap().len(), 4);
        assert_eq!(config.data["columns"], 4);
    }

    #[test]
    fn test_known_kinds_map_with_placeholders() {
        let view = empty_view();
        for kind in [
            SectionKind::Header,
            SectionKind::Hero,
            SectionKind::Features,
            SectionKind::Testimonials,
            SectionKind::Pricing,
            SectionKind::Faq,
            SectionKind::Cta,
            SectionKind::Footer,
        ] {
            let config = map_section(&detected(kind, None), &view).unwrap();
            assert_eq!(config.kind, kind);
            assert!(config.data.is_object());
        }
    }

    #[test]
    fn test_unknown_kind_maps_to_none() {
        let view = empty_view();
        assert!(map_section(&detected(SectionKind::Unknown, None), &view).is_none());
    }
}
