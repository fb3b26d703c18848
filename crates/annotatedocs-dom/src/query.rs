//! Element Query
//!
//! querySelector-style lookups over the arena. Only simple selectors are
//! supported: `tag`, `.class`, `#id`, `[attr]`, `[attr=value]` and `*`.

use crate::{DomTree, NodeId};

/// Element query trait
pub trait ElementQuery {
    /// First element in `root`'s subtree matching the selector
    fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId>;

    /// All elements in `root`'s subtree matching the selector, document order
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// Elements carrying a given class
    fn get_elements_by_class_name(&self, root: NodeId, class: &str) -> Vec<NodeId>;

    /// Elements carrying a given attribute, whatever its value
    fn get_elements_with_attribute(&self, root: NodeId, name: &str) -> Vec<NodeId>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> bool;
}

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Class(String),
    Id(String),
    Attribute { name: String, value: Option<String> },
    Universal,
}

impl Selector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            (!id.is_empty()).then(|| Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            (!class.is_empty()).then(|| Self::Class(class.to_string()))
        } else if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            Self::parse_attribute(inner)
        } else if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            Some(Self::Tag(s.to_ascii_lowercase()))
        } else {
            None
        }
    }

    fn parse_attribute(inner: &str) -> Option<Self> {
        match inner.split_once('=') {
            Some((name, value)) => {
                let name = name.trim();
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                    .unwrap_or(value);
                (!name.is_empty()).then(|| Self::Attribute {
                    name: name.to_string(),
                    value: Some(value.to_string()),
                })
            }
            None => {
                let name = inner.trim();
                (!name.is_empty()).then(|| Self::Attribute {
                    name: name.to_string(),
                    value: None,
                })
            }
        }
    }

    /// Check an element against this selector
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        let Some(tag) = tree.tag_name(element) else {
            return false;
        };
        match self {
            Self::Universal => true,
            Self::Tag(name) => tag.eq_ignore_ascii_case(name),
            Self::Id(id) => tree.get_attribute(element, "id") == Some(id.as_str()),
            Self::Class(class) => tree.has_class(element, class),
            Self::Attribute { name, value: None } => tree.has_attribute(element, name),
            Self::Attribute {
                name,
                value: Some(value),
            } => tree.get_attribute(element, name) == Some(value.as_str()),
        }
    }
}

impl DomTree {
    fn select<'a>(&'a self, root: NodeId, selector: &'a Selector) -> impl Iterator<Item = NodeId> + 'a {
        self.descendants(root)
            .filter(move |&id| selector.matches(self, id))
    }
}

impl ElementQuery for DomTree {
    fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        self.select(root, &selector).next()
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Some(selector) => self.select(root, &selector).collect(),
            None => {
                tracing::debug!("Unsupported selector: {:?}", selector);
                Vec::new()
            }
        }
    }

    fn get_elements_by_class_name(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let selector = Selector::Class(class.to_string());
        self.select(root, &selector).collect()
    }

    fn get_elements_with_attribute(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        let selector = Selector::Attribute {
            name: name.to_string(),
            value: None,
        };
        self.select(root, &selector).collect()
    }

    fn matches(&self, element: NodeId, selector: &str) -> bool {
        Selector::parse(selector).is_some_and(|s| s.matches(self, element))
    }
}
