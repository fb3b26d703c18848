//! annotatedocs DOM - Document Object Model
//!
//! Arena-allocated DOM tree that the annotation pass decorates in place.

mod classlist;
mod document;
mod error;
mod interner;
mod node;
mod query;
mod tree;

pub use classlist::TokenList;
pub use document::Document;
pub use error::{DomError, DomResult};
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use query::{ElementQuery, Selector};
pub use tree::{Children, Descendants, DomTree};

/// XHTML namespace, used for every element the renderer creates
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this id points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert a sentinel-encoded link to an `Option`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#none")
        }
    }
}

/// Qualified name, all parts interned. `prefix` is `EMPTY` when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualName {
    pub prefix: InternedString,
    pub ns: InternedString,
    pub local: InternedString,
}

impl QualName {
    pub fn new(ns: InternedString, local: InternedString) -> Self {
        Self::prefixed(InternedString::EMPTY, ns, local)
    }

    /// Name written as `prefix:local`, e.g. `xlink:href`
    pub fn prefixed(prefix: InternedString, ns: InternedString, local: InternedString) -> Self {
        Self { prefix, ns, local }
    }

    /// Same expanded name (namespace and local name); the prefix is only
    /// presentation
    pub fn same_name(&self, other: &QualName) -> bool {
        self.ns == other.ns && self.local == other.local
    }
}
