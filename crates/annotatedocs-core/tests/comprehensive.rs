//! Comprehensive tests for annotatedocs-core
//!
//! End-to-end annotation passes over parsed HTML pages.

use annotatedocs_core::{AnnotateConfig, AnnotateError, Document, Level, Target, annotate_page};
use annotatedocs_dom::{DomTree, ElementQuery, NodeId};
use annotatedocs_html::{parse, serialize};

fn wrap(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Guide</title></head><body><div role=\"main\">{}</div></body></html>",
        body
    )
}

fn annotation_nodes(tree: &DomTree, container: NodeId) -> Vec<(String, String)> {
    tree.children(container)
        .map(|(id, _)| {
            (
                tree.get_attribute(id, "class").unwrap_or_default().to_string(),
                tree.text_content(id),
            )
        })
        .collect()
}

#[test]
fn test_single_hint_scenario() {
    let mut page = parse(&wrap(
        r#"<p id="e" data-annotations='[{"level":"hint","message":"Missing verb"}]'>Text</p>"#,
    ));
    let element = page.get_element_by_id("e").unwrap();
    let html = page.document_element();

    let mut document = Document::for_page(&mut page, AnnotateConfig::default()).unwrap();
    document.init().unwrap();

    let container = document.container_of(element).unwrap();
    let tree = document.page().tree();
    assert_eq!(
        annotation_nodes(tree, container),
        vec![("annotation annotation-hint".to_string(), "Missing verb".to_string())]
    );
    assert!(document.has_hints());
    assert!(!document.has_warnings());
    assert!(tree.has_class(element, "has-hints"));
    assert!(!tree.has_class(element, "has-warnings"));
    assert!(tree.has_class(html, "page-has-hints"));
    assert!(!tree.has_class(html, "page-has-warnings"));
    assert_eq!(document.annotations().len(), 1);
    assert_eq!(document.annotations()[0].attached_to(), Some(Target::Element(element)));
}

#[test]
fn test_records_rendered_in_payload_order() {
    let mut page = parse(&wrap(
        r#"<p id="e" data-annotations='[
            {"level":"warning","message":"one"},
            {"level":"hint","message":"two","title":"Style"},
            {"level":"warning","message":"three"}
        ]'>Text</p>"#,
    ));
    let element = page.get_element_by_id("e").unwrap();

    let mut document = Document::for_page(&mut page, AnnotateConfig::default()).unwrap();
    document.init().unwrap();

    let container = document.container_of(element).unwrap();
    let tree = document.page().tree();
    let texts: Vec<_> = annotation_nodes(tree, container).into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);

    let titled = tree.children(container).nth(1).map(|(id, _)| id).unwrap();
    assert_eq!(tree.get_attribute(titled, "title"), Some("Style"));

    let levels: Vec<_> = document.annotations().iter().map(|a| a.level()).collect();
    assert_eq!(levels, vec![Level::Warning, Level::Hint, Level::Warning]);
}

#[test]
fn test_document_level_scenario() {
    let mut page = parse(&wrap(
        r#"<p data-document-annotations='[{"level":"warning","message":"A"}]'>x</p>
           <p data-document-annotations='[{"level":"hint","message":"B"}]'>y</p>"#,
    ));
    let html = page.document_element();

    let mut document = Document::for_page(&mut page, AnnotateConfig::default()).unwrap();
    document.init().unwrap();

    let root = document.root();
    let container = document.document_container().unwrap();
    let tree = document.page().tree();

    assert_eq!(tree.get_elements_by_class_name(tree.root(), "document-annotations"), vec![container]);
    assert_eq!(tree.get(root).unwrap().first_child, container);
    let texts: Vec<_> = annotation_nodes(tree, container).into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["A", "B"]);
    assert_eq!(document.document_annotations().len(), 2);
    assert!(document.annotations().is_empty());
    assert!(tree.has_class(html, "page-has-global-annotations"));
    assert!(document.flags().has_document_annotations());
}

#[test]
fn test_global_before_document_annotations_on_same_element() {
    let mut page = parse(&wrap(
        r#"<p data-document-annotations='[{"level":"hint","message":"page"}]'
              data-global-annotations='[{"level":"warning","message":"project"}]'>x</p>"#,
    ));

    let mut document = Document::for_page(&mut page, AnnotateConfig::default()).unwrap();
    document.init().unwrap();

    let messages: Vec<_> = document
        .document_annotations()
        .iter()
        .map(|a| a.message().to_string())
        .collect();
    assert_eq!(messages, vec!["project", "page"]);
}

#[test]
fn test_missing_payload_is_noop() {
    let mut page = parse(&wrap(r#"<p id="plain">Nothing to see</p><p id="blank" data-annotations="">x</p>"#));
    let plain = page.get_element_by_id("plain").unwrap();
    let blank = page.get_element_by_id("blank").unwrap();

    let flags = annotate_page(&mut page, &AnnotateConfig::default()).unwrap();

    assert!(!flags.has_hints());
    assert!(!flags.has_warnings());
    assert_eq!(page.tree().children(plain).count(), 1);
    assert_eq!(page.tree().children(blank).count(), 1);
    assert!(page.tree().get_elements_by_class_name(page.tree().root(), "annotations").is_empty());
}

#[test]
fn test_malformed_payload_aborts_scan() {
    let mut page = parse(&wrap(
        r#"<p id="a" data-annotations='[{"level":"hint","message":"kept"}]'>a</p>
           <p id="b" data-annotations='[{"level":"hint",'>b</p>
           <p id="c" data-annotations='[{"level":"warning","message":"never"}]'>c</p>"#,
    ));
    let a = page.get_element_by_id("a").unwrap();
    let b = page.get_element_by_id("b").unwrap();
    let c = page.get_element_by_id("c").unwrap();

    let mut document = Document::for_page(&mut page, AnnotateConfig::default()).unwrap();
    let err = document.init().unwrap_err();

    match err {
        AnnotateError::MalformedPayload { attribute, element, .. } => {
            assert_eq!(attribute, "data-annotations");
            assert_eq!(element, b);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(document.annotations().len(), 1);
    assert!(document.container_of(a).is_some());
    assert!(document.container_of(c).is_none());
    assert!(!document.has_warnings());
}

#[test]
fn test_unknown_level_is_fatal() {
    let mut page = parse(&wrap(r#"<p data-annotations='[{"level":"error","message":"x"}]'>a</p>"#));

    let err = annotate_page(&mut page, &AnnotateConfig::default()).unwrap_err();
    assert!(matches!(err, AnnotateError::MalformedPayload { .. }));
}

#[test]
fn test_empty_message_is_fatal() {
    let mut page = parse(&wrap(r#"<p data-annotations='[{"level":"hint","message":""}]'>a</p>"#));

    let err = annotate_page(&mut page, &AnnotateConfig::default()).unwrap_err();
    assert!(matches!(err, AnnotateError::InvalidRecord { .. }));
}

#[test]
fn test_payloads_outside_root_ignored() {
    let html = r#"<html><body>
        <nav data-annotations='[{"level":"warning","message":"sidebar"}]'>nav</nav>
        <div role="main"><p data-annotations='[{"level":"hint","message":"body"}]'>p</p></div>
    </body></html>"#;
    let mut page = parse(html);

    let mut document = Document::for_page(&mut page, AnnotateConfig::default()).unwrap();
    document.init().unwrap();

    assert_eq!(document.annotations().len(), 1);
    assert_eq!(document.annotations()[0].message(), "body");
    assert!(!document.has_warnings());
}

#[test]
fn test_init_twice_does_not_duplicate() {
    let mut page = parse(&wrap(
        r#"<p id="e" data-annotations='[{"level":"hint","message":"once"}]'
              data-document-annotations='[{"level":"warning","message":"doc"}]'>x</p>"#,
    ));
    let element = page.get_element_by_id("e").unwrap();

    let mut document = Document::for_page(&mut page, AnnotateConfig::default()).unwrap();
    document.init().unwrap();
    document.init().unwrap();

    let container = document.container_of(element).unwrap();
    let doc_container = document.document_container().unwrap();
    let tree = document.page().tree();
    assert_eq!(tree.children(container).count(), 1);
    assert_eq!(tree.children(doc_container).count(), 1);
    assert_eq!(document.annotations().len(), 1);
    assert_eq!(document.document_annotations().len(), 1);
}

#[test]
fn test_reannotating_output_is_stable() {
    let input = wrap(
        r#"<section data-annotations='[{"level":"hint","message":"Missing verb"},{"level":"warning","message":"Dead link"}]'>x</section><section data-document-annotations='[{"level":"warning","message":"Too nested"}]'>y</section>"#,
    );
    let config = AnnotateConfig::default();

    let mut first = parse(&input);
    annotate_page(&mut first, &config).unwrap();
    let once = serialize(&first);

    let mut second = parse(&once);
    annotate_page(&mut second, &config).unwrap();
    let twice = serialize(&second);

    assert_eq!(once, twice);
    assert_eq!(once.matches("class=\"annotations\"").count(), 1);
    assert_eq!(once.matches("class=\"document-annotations\"").count(), 1);
}

#[test]
fn test_reannotating_paragraph_target_is_stable() {
    let input = wrap(r#"<p data-annotations='[{"level":"hint","message":"Missing verb"}]'>t</p>"#);
    let config = AnnotateConfig::default();

    let mut first = parse(&input);
    annotate_page(&mut first, &config).unwrap();
    let once = serialize(&first);

    assert!(once.contains(
        r#"t<span class="annotations"><span class="annotation annotation-hint">Missing verb</span></span></p>"#
    ));

    let mut second = parse(&once);
    annotate_page(&mut second, &config).unwrap();
    let twice = serialize(&second);

    assert_eq!(once, twice);
    assert_eq!(twice.matches("class=\"annotations\"").count(), 1);
    assert!(!twice.contains("<p></p>"));
}

#[test]
fn test_message_is_escaped_in_output() {
    let mut page = parse(&wrap(
        r#"<p data-annotations='[{"level":"warning","message":"<script>alert(1)</script>"}]'>x</p>"#,
    ));
    annotate_page(&mut page, &AnnotateConfig::default()).unwrap();
    let output = serialize(&page);

    assert!(!output.contains("<script>"));
    assert!(output.contains(
        "<span class=\"annotation annotation-warning\">&lt;script&gt;alert(1)&lt;/script&gt;</span>"
    ));
}

#[test]
fn test_custom_root_selector() {
    let html = r#"<html><body>
        <div id="content"><p data-annotations='[{"level":"hint","message":"in"}]'>p</p></div>
    </body></html>"#;
    let mut page = parse(html);
    let content = page.get_element_by_id("content").unwrap();

    let config = AnnotateConfig::default().with_root_selector("#content");
    let document = Document::for_page(&mut page, config).unwrap();
    assert_eq!(document.root(), content);
}
