//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the arena DOM.

use std::io::Read;

use annotatedocs_dom::{Document, DomTree, InternedString, NodeId, QualName};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Clone, Copy)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        self.build(&dom, url)
    }

    /// Parse UTF-8 (lossy) HTML from a reader
    pub fn parse_reader<R: Read>(&self, reader: &mut R, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML stream: {}", url);
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(reader)
            .map_err(|source| ParseError::Io {
                url: url.to_string(),
                source,
            })?;
        Ok(self.build(&dom, url))
    }

    fn build(&self, dom: &RcDom, url: &str) -> Document {
        let mut document = Document::empty(url);
        let root = document.tree().root();
        self.convert_node(&dom.document, document.tree_mut(), root);
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Convert an RcDom node to the arena DOM
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        let mut template_contents = None;
        let id = match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
                return;
            }
            RcNodeData::Doctype {
                name,
                public_id,
                system_id,
            } => tree.create_doctype(&name.to_string(), &public_id.to_string(), &system_id.to_string()),
            RcNodeData::Text { contents } => tree.create_text(&contents.borrow().to_string()),
            RcNodeData::Comment { contents } => tree.create_comment(&contents.to_string()),
            RcNodeData::Element {
                name,
                attrs,
                template_contents: contents,
                ..
            } => {
                let ns = tree.intern(&name.ns);
                let local = tree.intern(&name.local);
                let id = tree.create_element_ns(QualName::new(ns, local));

                for attr in attrs.borrow().iter() {
                    let attr_prefix = match &attr.name.prefix {
                        Some(prefix) => tree.intern(prefix),
                        None => InternedString::EMPTY,
                    };
                    let attr_ns = tree.intern(&attr.name.ns);
                    let attr_local = tree.intern(&attr.name.local);
                    if let Some(elem) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                        elem.set_attr(
                            QualName::prefixed(attr_prefix, attr_ns, attr_local),
                            attr.value.to_string(),
                        );
                    }
                }
                template_contents = contents.borrow().clone();
                id
            }
            RcNodeData::ProcessingInstruction { .. } => return,
        };

        if let Err(e) = tree.append_child(parent, id) {
            tracing::warn!("Dropping node that cannot be linked: {}", e);
            return;
        }

        // <template> content lives in a separate fragment; keep it as
        // ordinary children so it is written back out
        if let Some(contents) = &template_contents {
            for child in contents.children.borrow().iter() {
                self.convert_node(child, tree, id);
            }
        }
        for child in handle.children.borrow().iter() {
            self.convert_node(child, tree, id);
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
