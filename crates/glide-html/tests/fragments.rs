//! Fragment insertion tests: the content-region swap primitive.

use glide_dom::serialize;
use glide_html::{parse, parse_fragment_into};

#[test]
fn test_fragment_replaces_region_children() {
    let mut doc = parse(
        r#"<html><head><title>Home</title></head>
           <body><div id="main-content"><p>Home</p></div></body></html>"#,
    );
    let region = doc.element_by_id("main-content").unwrap();

    parse_fragment_into(&mut doc, region, "<h1>About</h1><p>Who we are</p>");

    assert_eq!(
        serialize::inner_html(&doc, region),
        "<h1>About</h1><p>Who we are</p>"
    );
    // The region element itself survives the swap.
    assert_eq!(doc.element_by_id("main-content"), Some(region));
}

#[test]
fn test_fragment_keeps_attributes_and_nesting() {
    let mut doc = parse(r#"<body><div id="main-content"></div></body>"#);
    let region = doc.element_by_id("main-content").unwrap();

    parse_fragment_into(
        &mut doc,
        region,
        r#"<section class="hero"><a href="/about.html">About</a></section>"#,
    );

    let anchors = doc.elements_by_tag(region, "a");
    assert_eq!(anchors.len(), 1);
    assert_eq!(
        doc.element(anchors[0]).unwrap().attr("href"),
        Some("/about.html")
    );
    let sections = doc.elements_by_tag(region, "section");
    assert!(doc.element(sections[0]).unwrap().has_class("hero"));
}

#[test]
fn test_empty_fragment_clears_region() {
    let mut doc = parse(r#"<body><div id="main-content"><p>Old</p></div></body>"#);
    let region = doc.element_by_id("main-content").unwrap();

    parse_fragment_into(&mut doc, region, "");

    assert!(doc.children(region).is_empty());
    assert_eq!(serialize::inner_html(&doc, region), "");
}

#[test]
fn test_fragment_with_inline_script_is_inserted_inert() {
    let mut doc = parse(r#"<body><div id="main-content"></div></body>"#);
    let region = doc.element_by_id("main-content").unwrap();

    parse_fragment_into(
        &mut doc,
        region,
        r#"<p>Gallery</p><script>initGallery();</script>"#,
    );

    let scripts = doc.elements_by_tag(region, "script");
    assert_eq!(scripts.len(), 1);
    assert_eq!(doc.text_content(scripts[0]), "initGallery();");
}
