use crate::extract::content::{extract_content, page_description, page_title};
use chrono::{Datelike, Utc};

#[test]
fn test_hero_title_and_cta_from_same_container() {
    let html = r#"
        <html><body>
            <div class="hero">
                <h1>Welcome to Acme</h1>
                <p>The best widgets on the market.</p>
                <button>Sign Up</button>
            </div>
        </body></html>
    "#;
    let content = extract_content(html);
    let hero = content.hero.expect("hero should be extracted");
    assert_eq!(hero.title, "Welcome to Acme");
    assert_eq!(hero.subtitle.as_deref(), Some("The best widgets on the market."));
    assert_eq!(hero.ctas[0].text, "Sign Up");
}

#[test]
fn test_hero_subtitle_ignores_paragraph_before_heading() {
    let html = r#"
        <body>
            <div class="hero">
                <p>Announcing version 2.0</p>
                <h1>Ship faster</h1>
                <p>The actual subtitle under the heading.</p>
            </div>
        </body>
    "#;
    let content = extract_content(html);
    let hero = content.hero.unwrap();
    assert_eq!(
        hero.subtitle.as_deref(),
        Some("The actual subtitle under the heading.")
    );
}

#[test]
fn test_hero_without_following_paragraph_has_no_subtitle() {
    let html = r#"
        <body><section>
            <p>Eyebrow only</p>
            <h1>Title</h1>
        </section></body>
    "#;
    assert_eq!(extract_content(html).hero.unwrap().subtitle, None);
}

#[test]
fn test_hero_caps_ctas_at_two() {
    let html = r#"
        <body><section>
            <h1>Title</h1>
            <a href="/a">One</a><a href="/b">Two</a><a href="/c">Three</a>
        </section></body>
    "#;
    let content = extract_content(html);
    assert_eq!(content.hero.unwrap().ctas.len(), 2);
}

#[test]
fn test_features_require_heading_and_paragraph() {
    let html = r#"
        <body><div>
            <div class="feature"><h3>Speed</h3><p>Very fast.</p></div>
            <div class="feature"><h3>Only a heading</h3></div>
            <div class="feature"><p>Only a paragraph here.</p></div>
            <div class="feature"><h3>Security</h3><p>Very safe.</p></div>
        </div></body>
    "#;
    let content = extract_content(html);
    assert_eq!(content.features.len(), 2);
    assert_eq!(content.features[0].title, "Speed");
    assert_eq!(content.features[1].title, "Security");
}

#[test]
fn test_four_feature_cards_extracted() {
    let html = r#"
        <body><div>
            <div class="feature"><h3>A</h3><p>aaa</p></div>
            <div class="feature"><h3>B</h3><p>bbb</p></div>
            <div class="feature"><h3>C</h3><p>ccc</p></div>
            <div class="feature"><h3>D</h3><p>ddd</p></div>
        </div></body>
    "#;
    assert_eq!(extract_content(html).features.len(), 4);
}

#[test]
fn test_features_capped_at_six() {
    let cards: String = (0..10)
        .map(|i| format!(r#"<div class="card"><h3>Card {i}</h3><p>Text {i}</p></div>"#))
        .collect();
    let html = format!("<body><div>{cards}</div></body>");
    assert_eq!(extract_content(&html).features.len(), 6);
}

#[test]
fn test_nav_items_capped_and_long_labels_skipped() {
    let long_label = "x".repeat(60);
    let links: String = (0..10)
        .map(|i| format!(r#"<a href="/p{i}">Link {i}</a>"#))
        .collect();
    let html = format!(
        r#"<body><nav><a href="/long">{long_label}</a>{links}</nav></body>"#
    );
    let content = extract_content(&html);
    let header = content.header.unwrap();
    assert_eq!(header.nav_items.len(), 6);
    assert!(header.nav_items.iter().all(|n| n.label.len() < 50));
}

#[test]
fn test_testimonial_quote_length_bounds() {
    let html = r#"
        <body>
            <div class="testimonial"><p>Too short.</p></div>
            <div class="testimonial">
                <p>This product completely transformed how our team ships software.</p>
                <cite>Jordan, CTO</cite>
            </div>
        </body>
    "#;
    let content = extract_content(html);
    assert_eq!(content.testimonials.len(), 1);
    assert_eq!(content.testimonials[0].author.as_deref(), Some("Jordan, CTO"));
}

#[test]
fn test_faq_requires_question_and_answer() {
    let html = r#"
        <body>
            <div class="faq-item"><h3>How does it work?</h3><p>Very well indeed.</p></div>
            <div class="faq-item"><h3>Orphan question?</h3></div>
            <details><summary>Is there a trial?</summary><p>Yes, 14 days.</p></details>
        </body>
    "#;
    let content = extract_content(html);
    assert_eq!(content.faq.len(), 2);
    assert!(content.faq.iter().any(|i| i.question == "How does it work?"));
    assert!(content.faq.iter().any(|i| i.question == "Is there a trial?"));
}

#[test]
fn test_footer_copyright_extracted() {
    let html = r#"
        <body><footer>
            <ul><li><a href="/about">About</a></li><li><a href="/jobs">Jobs</a></li></ul>
            <p>© 2019 Acme Corp. All rights reserved.</p>
        </footer></body>
    "#;
    let content = extract_content(html);
    let footer = content.footer.unwrap();
    assert!(footer.copyright.contains("2019"));
    assert!(footer.copyright.contains("Acme"));
    assert_eq!(footer.columns.len(), 1);
}

#[test]
fn test_footer_copyright_synthesized_with_current_year() {
    let html = r#"<body><footer><a href="/contact">Contact</a></footer></body>"#;
    let content = extract_content(html);
    let footer = content.footer.unwrap();
    assert!(footer.copyright.contains(&Utc::now().year().to_string()));
}

#[test]
fn test_empty_body_extracts_nothing() {
    let content = extract_content("<html><body></body></html>");
    assert!(content.header.is_none());
    assert!(content.hero.is_none());
    assert!(content.features.is_empty());
    assert!(content.testimonials.is_empty());
    assert!(content.faq.is_empty());
    assert!(content.footer.is_none());
}

#[test]
fn test_page_title_and_description() {
    let html = r#"
        <html><head>
            <title>Acme - Better Widgets</title>
            <meta name="description" content="Widgets for the modern web.">
        </head><body></body></html>
    "#;
    assert_eq!(page_title(html).as_deref(), Some("Acme - Better Widgets"));
    assert_eq!(
        page_description(html).as_deref(),
        Some("Widgets for the modern web.")
    );
    assert_eq!(page_title("<body></body>"), None);
}
