//! Edge case tests for annotatedocs-html
//!
//! Malformed markup, odd attribute values and escaping corners.

use annotatedocs_html::{HtmlParser, get_outer_html, parse, serialize};

// ============================================================================
// MALFORMED INPUT
// ============================================================================

#[test]
fn test_parse_only_whitespace() {
    let doc = HtmlParser::new().parse("   \t\n\r\n   ");
    assert!(doc.document_element().is_valid());
    assert!(doc.body().is_valid());
}

#[test]
fn test_parse_only_doctype() {
    let doc = parse("<!DOCTYPE html>");
    assert!(serialize(&doc).starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_unclosed_tags_are_closed() {
    let doc = parse("<div id=\"a\"><span>open");
    let div = doc.get_element_by_id("a").unwrap();
    assert_eq!(get_outer_html(doc.tree(), div), "<div id=\"a\"><span>open</span></div>");
}

#[test]
fn test_payload_with_unbalanced_json_is_kept_verbatim() {
    let doc = parse(r#"<p id="p" data-annotations='[{"level":'>t</p>"#);
    let p = doc.get_element_by_id("p").unwrap();
    assert_eq!(doc.tree().get_attribute(p, "data-annotations"), Some(r#"[{"level":"#));
}

// ============================================================================
// ESCAPING
// ============================================================================

#[test]
fn test_text_escaping() {
    let doc = parse("<p id=\"p\">a &lt; b &amp;&amp; c &gt; d&nbsp;e</p>");
    let p = doc.get_element_by_id("p").unwrap();
    assert_eq!(doc.tree().text_content(p), "a < b && c > d\u{a0}e");
    assert_eq!(
        get_outer_html(doc.tree(), p),
        "<p id=\"p\">a &lt; b &amp;&amp; c &gt; d&nbsp;e</p>"
    );
}

#[test]
fn test_empty_attribute_written_bare() {
    let doc = parse("<input id=\"i\" disabled>");
    let input = doc.get_element_by_id("i").unwrap();
    assert_eq!(get_outer_html(doc.tree(), input), "<input id=\"i\" disabled>");
}

#[test]
fn test_uppercase_tags_normalized() {
    let doc = parse("<DIV ID=\"x\" CLASS=\"Note\">t</DIV>");
    let div = doc.get_element_by_id("x").unwrap();
    assert_eq!(doc.tree().tag_name(div), Some("div"));
    assert!(doc.tree().has_class(div, "Note"));
}

// ============================================================================
// CONTENT THE PASS MUST NOT TOUCH
// ============================================================================

#[test]
fn test_noscript_roundtrip() {
    let html = "<!DOCTYPE html><html><head><noscript><style>p{}</style></noscript></head><body><noscript><p>Enable JS</p></noscript></body></html>";
    let once = serialize(&parse(html));
    assert_eq!(once, html);
    assert_eq!(serialize(&parse(&once)), once);
}

#[test]
fn test_template_roundtrip() {
    let html = r#"<!DOCTYPE html><html><head></head><body><template id="t"><span>row</span><!-- slot --></template></body></html>"#;
    let doc = parse(html);
    let template = doc.get_element_by_id("t").unwrap();

    assert_eq!(
        get_outer_html(doc.tree(), template),
        r#"<template id="t"><span>row</span><!-- slot --></template>"#
    );
    assert_eq!(serialize(&doc), html);
}

#[test]
fn test_prefixed_attributes_roundtrip() {
    let html = r##"<svg><use xlink:href="#icon" href="#plain"></use></svg>"##;
    let doc = parse(html);
    let svg = doc.query_selector("svg").unwrap();
    assert_eq!(get_outer_html(doc.tree(), svg), html);
}

// ============================================================================
// STRESS
// ============================================================================

#[test]
fn test_deep_nesting() {
    let depth = 200;
    let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let doc = parse(&html);
    let output = serialize(&doc);
    assert_eq!(output.matches("<div>").count(), depth);
    assert!(output.contains("deep"));
}

#[test]
fn test_many_payload_elements() {
    let html: String = (0..500)
        .map(|i| format!(r#"<p data-annotations='[{{"level":"hint","message":"m{i}"}}]'>{i}</p>"#))
        .collect();
    let doc = parse(&html);
    let found = doc
        .tree()
        .descendants(doc.tree().root())
        .filter(|&id| doc.tree().has_attribute(id, "data-annotations"))
        .count();
    assert_eq!(found, 500);
}
