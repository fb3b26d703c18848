//! Document - discovers payloads in a page and attaches their annotations
//!
//! The annotated page is borrowed, not owned: the caller keeps the parsed
//! HTML document and serializes it once the Document is dropped.

use std::collections::HashMap;

use annotatedocs_dom::{Document as HtmlDocument, DomResult, DomTree, ElementQuery, NodeId, Selector};

use crate::record::{self, AnnotationRecord};
use crate::{
    AnnotateConfig, AnnotateError, AnnotateResult, Annotation, AnnotationHost, Level, PageFlags,
    Target,
};

/// Elements whose content model is phrasing only. Decoration inside them
/// is built from `span`s so it stays inside when the page is re-parsed.
const PHRASING_HOSTS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "dt", "pre", "span", "a", "em", "strong",
    "small", "code", "b", "i", "u", "s", "q", "cite", "abbr", "sub", "sup", "mark", "label",
    "button", "legend", "summary",
];

/// Elements in `root`'s subtree (root included) carrying `attribute`, in
/// document order. Inert `<template>` content is skipped.
pub fn find_annotatable_elements(tree: &DomTree, root: NodeId, attribute: &str) -> Vec<NodeId> {
    tree.get_elements_with_attribute(root, attribute)
        .into_iter()
        .filter(|&id| !in_template(tree, root, id))
        .collect()
}

/// Whether a `<template>` sits between `root` and `id`
fn in_template(tree: &DomTree, root: NodeId, id: NodeId) -> bool {
    let mut current = tree.get(id).map_or(NodeId::NONE, |n| n.parent);
    while current.is_valid() && current != root {
        if tree.tag_name(current) == Some("template") {
            return true;
        }
        current = tree.get(current).map_or(NodeId::NONE, |n| n.parent);
    }
    false
}

/// Tag for decoration placed inside `host`
fn decoration_tag(tree: &DomTree, host: NodeId) -> &'static str {
    match tree.tag_name(host) {
        Some(tag) if PHRASING_HOSTS.contains(&tag) => "span",
        _ => "div",
    }
}

/// Page-side state shared by every attach: containers and flags
struct Page<'a> {
    html: &'a mut HtmlDocument,
    root: NodeId,
    config: AnnotateConfig,
    flags: PageFlags,
    /// Element -> its decoration container
    containers: HashMap<NodeId, NodeId>,
    document_container: Option<NodeId>,
}

impl Page<'_> {
    fn tree(&self) -> &DomTree {
        self.html.tree()
    }

    /// Decoded payload of `attribute` on `element`; `None` when absent or blank
    fn payload(&self, element: NodeId, attribute: &str) -> AnnotateResult<Option<Vec<AnnotationRecord>>> {
        let Some(raw) = self.tree().get_attribute(element, attribute) else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        record::parse_payload(raw)
            .map(Some)
            .map_err(|source| AnnotateError::MalformedPayload {
                attribute: attribute.to_string(),
                element,
                source,
            })
    }

    /// Find a container of `class` directly under `parent`. A container
    /// already present in the input holds decoration from an earlier pass,
    /// which is cleared before reuse.
    fn existing_container(&mut self, parent: NodeId, class: &str) -> DomResult<Option<NodeId>> {
        let tree = self.html.tree();
        let found = tree
            .children(parent)
            .map(|(id, _)| id)
            .find(|&id| tree.has_class(id, class));

        if let Some(container) = found {
            let removed = self.html.tree_mut().clear_children(container)?;
            if removed > 0 {
                tracing::debug!("Cleared {} stale nodes from container {}", removed, container);
            }
        }
        Ok(found)
    }

    fn create_container(&mut self, class: &str, host: NodeId) -> DomResult<NodeId> {
        let tag = decoration_tag(self.tree(), host);
        let tree = self.html.tree_mut();
        let container = tree.create_element(tag);
        tree.set_attribute(container, "class", class)?;
        Ok(container)
    }
}

impl AnnotationHost for Page<'_> {
    fn tree_mut(&mut self) -> &mut DomTree {
        self.html.tree_mut()
    }

    fn container(&mut self, target: Target) -> DomResult<NodeId> {
        match target {
            Target::Element(element) => {
                if let Some(&container) = self.containers.get(&element) {
                    return Ok(container);
                }
                self.tree().element(element)?;

                let class = self.config.container_class.clone();
                let container = match self.existing_container(element, &class)? {
                    Some(container) => container,
                    None => {
                        let container = self.create_container(&class, element)?;
                        self.html.tree_mut().append_child(element, container)?;
                        container
                    }
                };
                self.containers.insert(element, container);
                Ok(container)
            }
            Target::Document => {
                if let Some(container) = self.document_container {
                    return Ok(container);
                }

                let class = self.config.document_container_class.clone();
                let root = self.root;
                let container = match self.existing_container(root, &class)? {
                    Some(container) => container,
                    None => {
                        let container = self.create_container(&class, root)?;
                        self.html.tree_mut().prepend_child(root, container)?;
                        tracing::debug!("Created document-level container under {}", root);
                        container
                    }
                };
                self.document_container = Some(container);
                Ok(container)
            }
        }
    }

    fn mark(&mut self, target: Target, level: Level) -> DomResult<()> {
        match target {
            Target::Element(element) => {
                self.html.tree_mut().add_class(element, level.element_flag_class())?;
            }
            Target::Document => {
                self.flags.mark_document_annotations();
            }
        }
        if self.flags.mark(level) {
            tracing::debug!("Page now has {} annotations", level);
        }

        let html = self.html.document_element();
        if html.is_valid() {
            for class in self.flags.classes() {
                self.html.tree_mut().add_class(html, class)?;
            }
        }
        Ok(())
    }

    fn node_tag(&self, target: Target) -> &'static str {
        let host = match target {
            Target::Element(element) => element,
            Target::Document => self.root,
        };
        decoration_tag(self.tree(), host)
    }
}

/// All annotations of one page and the decoration they produced
pub struct Document<'a> {
    page: Page<'a>,
    annotations: Vec<Annotation>,
    document_annotations: Vec<Annotation>,
    initialized: bool,
}

impl<'a> Document<'a> {
    /// Annotate the region under `root`, which must be an element
    pub fn new(html: &'a mut HtmlDocument, root: NodeId, config: AnnotateConfig) -> AnnotateResult<Self> {
        html.tree().element(root)?;
        Ok(Self {
            page: Page {
                html,
                root,
                config,
                flags: PageFlags::default(),
                containers: HashMap::new(),
                document_container: None,
            },
            annotations: Vec::new(),
            document_annotations: Vec::new(),
            initialized: false,
        })
    }

    /// Annotate the region matched by `config.root_selector`, falling back
    /// to `<body>` when the selector matches nothing
    pub fn for_page(html: &'a mut HtmlDocument, config: AnnotateConfig) -> AnnotateResult<Self> {
        if Selector::parse(&config.root_selector).is_none() {
            return Err(AnnotateError::InvalidSelector {
                selector: config.root_selector.clone(),
            });
        }
        let root = match html.query_selector(&config.root_selector) {
            Some(root) => root,
            None => {
                tracing::debug!("Root selector {:?} matched nothing, using <body>", config.root_selector);
                html.body().to_option().ok_or_else(|| AnnotateError::RootNotFound {
                    selector: config.root_selector.clone(),
                })?
            }
        };
        Self::new(html, root, config)
    }

    /// Discover every payload under the root and attach its annotations.
    ///
    /// A malformed payload aborts the scan; annotations attached before it
    /// stay in place. Calling this again is a no-op.
    pub fn init(&mut self) -> AnnotateResult<()> {
        if self.initialized {
            tracing::warn!("Annotations for {} already initialized, skipping", self.page.html.url());
            return Ok(());
        }
        self.initialized = true;

        let attribute = self.page.config.annotations_attribute.clone();
        for element in find_annotatable_elements(self.page.tree(), self.page.root, &attribute) {
            let Some(records) = self.page.payload(element, &attribute)? else {
                continue;
            };
            let batch = records
                .into_iter()
                .map(Annotation::new)
                .collect::<AnnotateResult<Vec<_>>>()?;

            tracing::debug!("Element {} carries {} annotations", element, batch.len());
            for mut annotation in batch {
                annotation.attach(&mut self.page, Target::Element(element))?;
                self.annotations.push(annotation);
            }
        }

        let sources = self.page.config.document_annotation_attributes.clone();
        for element in self.document_payload_elements(&sources) {
            for attribute in &sources {
                let Some(records) = self.page.payload(element, attribute)? else {
                    continue;
                };
                let batch = records
                    .into_iter()
                    .map(Annotation::new)
                    .collect::<AnnotateResult<Vec<_>>>()?;
                for annotation in batch {
                    self.add_document_annotation(annotation)?;
                }
            }
        }

        tracing::info!(
            "Annotated {}: {} element annotations, {} document annotations",
            self.page.html.url(),
            self.annotations.len(),
            self.document_annotations.len()
        );
        Ok(())
    }

    /// Elements under the root carrying any document-level payload
    fn document_payload_elements(&self, sources: &[String]) -> Vec<NodeId> {
        let tree = self.page.tree();
        let root = self.page.root;
        tree.descendants(root)
            .filter(|&id| sources.iter().any(|attr| tree.has_attribute(id, attr)))
            .filter(|&id| !in_template(tree, root, id))
            .collect()
    }

    /// Attach an annotation to the shared document-level container, which
    /// is created at the front of the root on first use
    pub fn add_document_annotation(&mut self, mut annotation: Annotation) -> AnnotateResult<()> {
        annotation.attach(&mut self.page, Target::Document)?;
        self.document_annotations.push(annotation);
        Ok(())
    }

    /// Append a record to `element`'s payload attribute. After `init()` the
    /// annotation is attached right away; before, `init()` picks it up.
    pub fn add_annotation(&mut self, element: NodeId, record: AnnotationRecord) -> AnnotateResult<()> {
        let attribute = self.page.config.annotations_attribute.clone();
        let mut annotation = Annotation::new(record.clone())?;

        let mut records = self.page.payload(element, &attribute)?.unwrap_or_default();
        records.push(record);
        let payload = record::serialize_payload(&records).map_err(AnnotateError::Serialize)?;
        self.page.tree_mut().set_attribute(element, &attribute, payload)?;

        if self.initialized {
            annotation.attach(&mut self.page, Target::Element(element))?;
            self.annotations.push(annotation);
        }
        Ok(())
    }

    /// Per-element annotations in discovery order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Document-level annotations in discovery order
    pub fn document_annotations(&self) -> &[Annotation] {
        &self.document_annotations
    }

    pub fn flags(&self) -> &PageFlags {
        &self.page.flags
    }

    pub fn has_hints(&self) -> bool {
        self.page.flags.has_hints()
    }

    pub fn has_warnings(&self) -> bool {
        self.page.flags.has_warnings()
    }

    pub fn root(&self) -> NodeId {
        self.page.root
    }

    /// The document-level container, once something was attached to it
    pub fn document_container(&self) -> Option<NodeId> {
        self.page.document_container
    }

    /// Decoration container of `element`, once something was attached to it
    pub fn container_of(&self, element: NodeId) -> Option<NodeId> {
        self.page.containers.get(&element).copied()
    }

    /// The page being annotated
    pub fn page(&self) -> &HtmlDocument {
        &*self.page.html
    }

    pub fn config(&self) -> &AnnotateConfig {
        &self.page.config
    }
}
