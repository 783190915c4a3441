use chrono::{Datelike, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Structured content pulled out of the rendered HTML.
///
/// Every field is optional (or an empty list): absence means the heuristic
/// found nothing, and the section mapper resolves it through its fallback
/// chains. No heuristic here ever errors out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub header: Option<HeaderContent>,
    pub hero: Option<HeroContent>,
    pub features: Vec<FeatureItem>,
    pub testimonials: Vec<Testimonial>,
    pub pricing: Vec<PricingPlan>,
    pub faq: Vec<FaqItem>,
    pub cta: Option<CtaContent>,
    pub footer: Option<FooterContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderContent {
    pub logo: Option<String>,
    pub nav_items: Vec<NavItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToAction {
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: Option<String>,
    pub ctas: Vec<CallToAction>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureItem {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingPlan {
    pub name: String,
    pub price: Option<String>,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtaContent {
    pub title: String,
    pub button: Option<CallToAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterColumn {
    pub title: Option<String>,
    pub links: Vec<NavItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FooterContent {
    pub columns: Vec<FooterColumn>,
    pub copyright: String,
}

/// Parses HTML into structured content. Pure function, no I/O.
pub fn extract_content(html: &str) -> ExtractedContent {
    let doc = Html::parse_document(html);

    ExtractedContent {
        header: extract_header(&doc),
        hero: extract_hero(&doc),
        features: extract_features(&doc),
        testimonials: extract_testimonials(&doc),
        pricing: extract_pricing(&doc),
        faq: extract_faq(&doc),
        cta: extract_cta(&doc),
        footer: extract_footer(&doc),
    }
}

/// The document `<title>`, if present and non-empty
pub fn page_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("title").unwrap();
    doc.select(&selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
}

/// The meta description, if present and non-empty
pub fn page_description(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    doc.select(&selector)
        .find_map(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Whitespace-normalized text content of an element
fn element_text(el: &ElementRef) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_header(doc: &Html) -> Option<HeaderContent> {
    let nav_selector = Selector::parse("nav a, header a").unwrap();
    let mut nav_items: Vec<NavItem> = Vec::new();
    for a in doc.select(&nav_selector) {
        let label = element_text(&a);
        // Long labels are body copy that happens to sit inside a header
        if label.is_empty() || label.len() >= 50 {
            continue;
        }
        if nav_items.iter().any(|n| n.label == label) {
            continue;
        }
        nav_items.push(NavItem {
            label,
            href: a.value().attr("href").unwrap_or("#").to_string(),
        });
        if nav_items.len() == 6 {
            break;
        }
    }

    let logo_selector = Selector::parse(r#"header img, nav img, [class*="logo"] img"#).unwrap();
    let logo = doc
        .select(&logo_selector)
        .find_map(|img| img.value().attr("src"))
        .map(str::to_string);

    if nav_items.is_empty() && logo.is_none() {
        return None;
    }
    Some(HeaderContent { logo, nav_items })
}

fn extract_hero(doc: &Html) -> Option<HeroContent> {
    let h1_selector = Selector::parse("h1").unwrap();
    let h1 = doc.select(&h1_selector).next()?;
    let title = element_text(&h1);
    if title.is_empty() {
        return None;
    }

    // The hero is whatever container holds the first h1
    let container = h1.parent().and_then(ElementRef::wrap).unwrap_or(h1);

    // Only paragraphs after the h1 qualify; an eyebrow line above it is not
    // the subtitle
    let mut past_h1 = false;
    let mut subtitle = None;
    for node in container.descendants() {
        if node.id() == h1.id() {
            past_h1 = true;
            continue;
        }
        if !past_h1 {
            continue;
        }
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if el.value().name() == "p" {
            let text = element_text(&el);
            if !text.is_empty() {
                subtitle = Some(text);
                break;
            }
        }
    }

    let cta_selector = Selector::parse("a, button").unwrap();
    let mut ctas = Vec::new();
    for el in container.select(&cta_selector) {
        let text = element_text(&el);
        if text.is_empty() {
            continue;
        }
        ctas.push(CallToAction {
            text,
            href: el.value().attr("href").map(str::to_string),
        });
        if ctas.len() == 2 {
            break;
        }
    }

    let img_selector = Selector::parse("img").unwrap();
    let image = container
        .select(&img_selector)
        .find_map(|img| img.value().attr("src"))
        .map(str::to_string);

    Some(HeroContent {
        title,
        subtitle,
        ctas,
        image,
    })
}

fn extract_features(doc: &Html) -> Vec<FeatureItem> {
    let selector =
        Selector::parse(r#"[class*="feature"], [class*="card"], [class*="benefit"]"#).unwrap();
    let heading_selector = Selector::parse("h2, h3, h4").unwrap();
    let p_selector = Selector::parse("p").unwrap();

    let mut items: Vec<FeatureItem> = Vec::new();
    for el in doc.select(&selector) {
        // A feature must carry both a heading and a paragraph
        let Some(title) = el.select(&heading_selector).next().map(|h| element_text(&h)) else {
            continue;
        };
        let Some(description) = el.select(&p_selector).next().map(|p| element_text(&p)) else {
            continue;
        };
        if title.is_empty() || description.is_empty() {
            continue;
        }
        if items.iter().any(|f| f.title == title) {
            continue;
        }
        items.push(FeatureItem { title, description });
        if items.len() == 6 {
            break;
        }
    }
    items
}

fn extract_testimonials(doc: &Html) -> Vec<Testimonial> {
    let selector = Selector::parse(
        r#"[class*="testimonial"], [class*="review"], [class*="quote"], blockquote"#,
    )
    .unwrap();
    let quote_selector = Selector::parse("p, blockquote").unwrap();
    let author_selector =
        Selector::parse(r#"cite, [class*="author"], [class*="name"]"#).unwrap();

    let mut testimonials: Vec<Testimonial> = Vec::new();
    for el in doc.select(&selector) {
        let quote = el
            .select(&quote_selector)
            .map(|q| element_text(&q))
            .find(|t| !t.is_empty())
            .unwrap_or_else(|| element_text(&el));
        // Length bounds exclude nav noise and whole-page matches
        if !(20..=500).contains(&quote.len()) {
            continue;
        }
        if testimonials.iter().any(|t| t.quote == quote) {
            continue;
        }
        let author = el
            .select(&author_selector)
            .map(|a| element_text(&a))
            .find(|t| !t.is_empty());
        testimonials.push(Testimonial { quote, author });
        if testimonials.len() == 6 {
            break;
        }
    }
    testimonials
}

fn extract_pricing(doc: &Html) -> Vec<PricingPlan> {
    let selector =
        Selector::parse(r#"[class*="pricing"] [class*="plan"], [class*="plan"], [class*="tier"]"#)
            .unwrap();
    let heading_selector = Selector::parse("h2, h3, h4").unwrap();
    let price_selector = Selector::parse(r#"[class*="price"], [class*="amount"]"#).unwrap();
    let li_selector = Selector::parse("li").unwrap();

    let mut plans: Vec<PricingPlan> = Vec::new();
    for el in doc.select(&selector) {
        let Some(name) = el
            .select(&heading_selector)
            .next()
            .map(|h| element_text(&h))
            .filter(|n| !n.is_empty())
        else {
            continue;
        };
        if plans.iter().any(|p| p.name == name) {
            continue;
        }
        let price = el
            .select(&price_selector)
            .map(|p| element_text(&p))
            .find(|t| !t.is_empty());
        let features = el
            .select(&li_selector)
            .map(|li| element_text(&li))
            .filter(|t| !t.is_empty())
            .take(8)
            .collect();
        plans.push(PricingPlan {
            name,
            price,
            features,
        });
        if plans.len() == 4 {
            break;
        }
    }
    plans
}

fn extract_faq(doc: &Html) -> Vec<FaqItem> {
    let mut items: Vec<FaqItem> = Vec::new();

    // <details>/<summary> pairs are unambiguous
    let details_selector = Selector::parse("details").unwrap();
    let summary_selector = Selector::parse("summary").unwrap();
    for details in doc.select(&details_selector) {
        let Some(question) = details
            .select(&summary_selector)
            .next()
            .map(|s| element_text(&s))
            .filter(|q| !q.is_empty())
        else {
            continue;
        };
        let full = element_text(&details);
        let answer = full
            .strip_prefix(question.as_str())
            .unwrap_or(full.as_str())
            .trim()
            .to_string();
        push_faq(&mut items, question, answer);
        if items.len() == 8 {
            return items;
        }
    }

    // Class-named question/answer containers
    let selector = Selector::parse(r#"[class*="faq"], [class*="accordion"]"#).unwrap();
    let question_selector =
        Selector::parse(r#"h2, h3, h4, [class*="question"], summary, dt"#).unwrap();
    let answer_selector = Selector::parse(r#"p, [class*="answer"], dd"#).unwrap();
    for el in doc.select(&selector) {
        let Some(question) = el
            .select(&question_selector)
            .next()
            .map(|q| element_text(&q))
            .filter(|q| !q.is_empty())
        else {
            continue;
        };
        let Some(answer) = el
            .select(&answer_selector)
            .map(|a| element_text(&a))
            .find(|a| !a.is_empty() && *a != question)
        else {
            continue;
        };
        push_faq(&mut items, question, answer);
        if items.len() == 8 {
            break;
        }
    }
    items
}

fn push_faq(items: &mut Vec<FaqItem>, question: String, answer: String) {
    if answer.is_empty() || items.iter().any(|i| i.question == question) {
        return;
    }
    items.push(FaqItem { question, answer });
}

fn extract_cta(doc: &Html) -> Option<CtaContent> {
    let selector = Selector::parse(r#"[class*="cta"], [class*="call-to-action"]"#).unwrap();
    let heading_selector = Selector::parse("h1, h2, h3").unwrap();
    let button_selector = Selector::parse("a, button").unwrap();

    for el in doc.select(&selector) {
        let Some(title) = el
            .select(&heading_selector)
            .next()
            .map(|h| element_text(&h))
            .filter(|t| !t.is_empty())
        else {
            continue;
        };
        let button = el
            .select(&button_selector)
            .map(|b| {
                (
                    element_text(&b),
                    b.value().attr("href").map(str::to_string),
                )
            })
            .find(|(text, _)| !text.is_empty())
            .map(|(text, href)| CallToAction { text, href });
        return Some(CtaContent { title, button });
    }
    None
}

fn extract_footer(doc: &Html) -> Option<FooterContent> {
    let footer_selector = Selector::parse("footer").unwrap();
    let footer = doc.select(&footer_selector).next()?;

    let group_selector =
        Selector::parse(r#"ul, nav, [class*="col"], [class*="links"]"#).unwrap();
    let a_selector = Selector::parse("a").unwrap();
    let heading_selector = Selector::parse("h3, h4, h5, strong").unwrap();

    let mut columns: Vec<FooterColumn> = Vec::new();
    for group in footer.select(&group_selector) {
        let links: Vec<NavItem> = group
            .select(&a_selector)
            .map(|a| NavItem {
                label: element_text(&a),
                href: a.value().attr("href").unwrap_or("#").to_string(),
            })
            .filter(|n| !n.label.is_empty())
            .take(8)
            .collect();
        if links.is_empty() || columns.iter().any(|c| c.links == links) {
            continue;
        }
        let title = group
            .select(&heading_selector)
            .next()
            .map(|h| element_text(&h))
            .filter(|t| !t.is_empty());
        columns.push(FooterColumn { title, links });
        if columns.len() == 4 {
            break;
        }
    }

    // Footers without column markup still get their flat link list
    if columns.is_empty() {
        let links: Vec<NavItem> = footer
            .select(&a_selector)
            .map(|a| NavItem {
                label: element_text(&a),
                href: a.value().attr("href").unwrap_or("#").to_string(),
            })
            .filter(|n| !n.label.is_empty())
            .take(8)
            .collect();
        if !links.is_empty() {
            columns.push(FooterColumn { title: None, links });
        }
    }

    Some(FooterContent {
        copyright: extract_copyright(&element_text(&footer)),
        columns,
    })
}

/// A `©…YYYY…` run from the footer text, else a synthesized current-year line
fn extract_copyright(footer_text: &str) -> String {
    let re = Regex::new(r"(?:©|\(c\)|\(C\))[^.|]*\d{4}[^.|]*").unwrap();
    re.find(footer_text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| format!("© {} All rights reserved.", Utc::now().year()))
}
