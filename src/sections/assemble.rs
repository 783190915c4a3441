use super::mapper;
use crate::merge::MergedView;
use crate::results::{
    LandingConfig, Metadata, SectionConfig, SectionKind, Theme, ThemeFonts,
};
use chrono::Utc;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

/// Guarantees structural completeness of the mapped sections and assembles
/// the final `LandingConfig`.
///
/// Repairs are silent: a missing header/features/FAQ section is synthesized
/// when the HTML extraction produced content for it, and exactly one footer
/// is always present. After repair, sections are sorted by detected order
/// and renumbered so `sections[i].order == i`.
pub fn assemble(mapped: Vec<SectionConfig>, view: &MergedView, source_url: &str) -> LandingConfig {
    let mut sections = mapped;
    sections.sort_by_key(|s| s.order);

    let has = |kind: SectionKind, list: &[SectionConfig]| list.iter().any(|s| s.kind == kind);

    if !has(SectionKind::Header, &sections) && view.content.header.is_some() {
        sections.insert(0, synthetic(SectionKind::Header, mapper::header_data(view)));
    }

    if !has(SectionKind::Features, &sections) && !view.content.features.is_empty() {
        let hero_end = sections
            .iter()
            .position(|s| s.kind == SectionKind::Hero)
            .map(|i| i + 1)
            .unwrap_or_else(|| sections.len().min(1));
        let placeholder = crate::vision::DetectedSection {
            kind: SectionKind::Features,
            position: 0,
            variant: None,
            description: None,
        };
        sections.insert(
            hero_end,
            synthetic(SectionKind::Features, mapper::features_data(view, &placeholder)),
        );
    }

    if !has(SectionKind::Faq, &sections) && !view.content.faq.is_empty() {
        let before_footer = sections
            .iter()
            .position(|s| s.kind == SectionKind::Footer)
            .unwrap_or(sections.len());
        let placeholder = crate::vision::DetectedSection {
            kind: SectionKind::Faq,
            position: 0,
            variant: None,
            description: None,
        };
        let faq = mapper::map_section(&placeholder, view)
            .map(|s| s.data)
            .unwrap_or(Value::Null);
        sections.insert(before_footer, synthetic(SectionKind::Faq, faq));
    }

    if !has(SectionKind::Footer, &sections) {
        sections.push(synthetic(SectionKind::Footer, mapper::footer_data(view)));
    }

    // Exactly one footer: keep the first, drop the rest
    let mut seen_footer = false;
    sections.retain(|s| {
        if s.kind == SectionKind::Footer {
            if seen_footer {
                return false;
            }
            seen_footer = true;
        }
        true
    });

    for (index, section) in sections.iter_mut().enumerate() {
        section.order = index;
    }

    LandingConfig {
        id: Uuid::new_v4().to_string(),
        name: config_name(view, source_url),
        sections,
        theme: build_theme(view),
        metadata: Metadata {
            source_url: source_url.to_string(),
            cloned_at: Utc::now(),
            original_title: view.page_title.clone().unwrap_or_default(),
        },
    }
}

fn synthetic(kind: SectionKind, data: Value) -> SectionConfig {
    SectionConfig {
        id: Uuid::new_v4().to_string(),
        kind,
        // Renumbered below; the insertion index carries the ordering
        order: 0,
        data,
    }
}

fn build_theme(view: &MergedView) -> Theme {
    Theme {
        colors: view.colors.clone(),
        fonts: ThemeFonts {
            heading: view.heading_font.clone(),
            body: view.body_font.clone(),
        },
        border_radius: view.border_radius.clone(),
        dark_mode: view.dark_mode,
    }
}

/// Page title, else the source domain, else a generic name
fn config_name(view: &MergedView, source_url: &str) -> String {
    if let Some(title) = view.page_title.clone().filter(|t| !t.is_empty()) {
        return title;
    }
    Url::parse(source_url)
        .ok()
        .and_then(|u| u.domain().map(str::to_string))
        .unwrap_or_else(|| "Cloned site".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::content::{FaqItem, FeatureItem, HeaderContent, NavItem};
    use crate::merge::reconcile;
    use crate::merge::MergedView;
    use crate::scrape::{ExtractedStyles, ScrapedWebsite};
    use crate::sections::mapper::map_section;
    use crate::vision::default_analysis;
    use chrono::Datelike;

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

    fn map_all(view: &MergedView) -> Vec<SectionConfig> {
        view.sections
            .iter()
            .filter_map(|s| map_section(s, view))
            .collect()
    }

    #[test]
    fn test_order_is_contiguous_and_matches_index() {
        let view = empty_view();
        let config = assemble(map_all(&view), &view, "https://example.com");
        for (i, section) in config.sections.iter().enumerate() {
            assert_eq!(section.order, i);
        }
    }

    #[test]
    fn test_footer_synthesized_with_current_year() {
        let view = empty_view();
        // No mapped sections at all: the assembler must still produce a footer
        let config = assemble(Vec::new(), &view, "https://example.com");
        let footer = config
            .sections
            .iter()
            .find(|s| s.kind == SectionKind::Footer)
            .expect("footer must always be present");
        let copyright = footer.data["copyright"].as_str().unwrap();
        assert!(copyright.contains(&Utc::now().year().to_string()));
    }

    #[test]
    fn test_exactly_one_footer() {
        let view = empty_view();
        let mut mapped = map_all(&view);
        // Duplicate the footer as a hostile input
        let footer = mapped
            .iter()
            .find(|s| s.kind == SectionKind::Footer)
            .cloned()
            .unwrap();
        mapped.push(footer);
        let config = assemble(mapped, &view, "https://example.com");
        let footers = config
            .sections
            .iter()
            .filter(|s| s.kind == SectionKind::Footer)
            .count();
        assert_eq!(footers, 1);
    }

    #[test]
    fn test_header_inserted_when_nav_content_exists() {
        let mut view = empty_view();
        view.content.header = Some(HeaderContent {
            logo: None,
            nav_items: vec![NavItem {
                label: "Home".to_string(),
                href: "/".to_string(),
            }],
        });
        // Mapped list without a header section
        let mapped: Vec<SectionConfig> = map_all(&view)
            .into_iter()
            .filter(|s| s.kind != SectionKind::Header)
            .collect();
        let config = assemble(mapped, &view, "https://example.com");
        assert_eq!(config.sections[0].kind, SectionKind::Header);
    }

    #[test]
    fn test_features_and_faq_inserted_when_extracted() {
        let mut view = empty_view();
        view.content.features = vec![FeatureItem {
            title: "Fast".to_string(),
            description: "Really fast.".to_string(),
        }];
        view.content.faq = vec![FaqItem {
            question: "Why?".to_string(),
            answer: "Because.".to_string(),
        }];
        let mapped: Vec<SectionConfig> = map_all(&view)
            .into_iter()
            .filter(|s| s.kind != SectionKind::Features && s.kind != SectionKind::Faq)
            .collect();
        let config = assemble(mapped, &view, "https://example.com");
        assert!(config.sections.iter().any(|s| s.kind == SectionKind::Features));
        let faq_pos = config
            .sections
            .iter()
            .position(|s| s.kind == SectionKind::Faq)
            .unwrap();
        let footer_pos = config
            .sections
            .iter()
            .position(|s| s.kind == SectionKind::Footer)
            .unwrap();
        assert!(faq_pos < footer_pos);
    }

    #[test]
    fn test_empty_body_yields_default_structure() {
        // Scenario: nothing extractable at all; the default analysis drives
        // the section list and every section carries placeholder text.
        let view = empty_view();
        let config = assemble(map_all(&view), &view, "https://example.com");
        for kind in [
            SectionKind::Header,
            SectionKind::Hero,
            SectionKind::Features,
            SectionKind::Cta,
            SectionKind::Footer,
        ] {
            assert!(
                config.sections.iter().any(|s| s.kind == kind),
                "missing {kind:?}"
            );
        }
        let hero = config
            .sections
            .iter()
            .find(|s| s.kind == SectionKind::Hero)
            .unwrap();
        assert_eq!(hero.data["title"], "Welcome");
        assert!(!hero.data["subtitle"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_theme_colors_are_valid_hex() {
        let view = empty_view();
        let config = assemble(map_all(&view), &view, "https://example.com");
        let colors = &config.theme.colors;
        for value in [
            &colors.primary,
            &colors.secondary,
            &colors.accent,
            &colors.background,
            &colors.foreground,
            &colors.muted,
            &colors.border,
        ] {
            assert!(
                crate::scrape::styles::is_hex_color(value),
                "invalid color: {value}"
            );
        }
    }

    #[test]
    fn test_name_falls_back_to_domain() {
        let view = empty_view();
        let config = assemble(map_all(&view), &view, "https://acme.example.com/pricing");
        assert_eq!(config.name, "acme.example.com");
    }
}
