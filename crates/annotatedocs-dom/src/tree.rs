//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: detaching only unlinks a node, so a `NodeId`
//! stays valid for the lifetime of the tree.

use crate::{
    DomError, DomResult, ElementData, InternedString, Node, NodeId, QualName,
    StringInterner, TokenList, HTML_NAMESPACE,
};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the document node exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Intern a string in this tree's interner
    pub fn intern(&mut self, s: &str) -> InternedString {
        self.interner.intern(s)
    }

    /// Resolve an interned string
    #[inline]
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached HTML element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let ns = self.interner.intern(HTML_NAMESPACE);
        let local = self.interner.intern(tag);
        self.create_element_ns(QualName::new(ns, local))
    }

    /// Create a detached element with an already-interned name
    pub fn create_element_ns(&mut self, name: QualName) -> NodeId {
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.push(Node::doctype(name, public_id.to_string(), system_id.to_string()))
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    /// Element data of `id`, or an error if it is not an element
    pub fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.node(id)?.as_element().ok_or(DomError::NotAnElement(id))
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` as the first child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let first = self.node(parent)?.first_child.to_option();
        self.insert_before(parent, child, first)
    }

    /// Insert `child` under `parent` before `reference` (append when `None`).
    /// An attached `child` is moved.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        if !self.node(parent)?.is_container() {
            return Err(DomError::InvalidParent(parent));
        }
        self.node(child)?;
        if child == NodeId::ROOT || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if let Some(reference) = reference {
            if self.node(reference)?.parent != parent {
                return Err(DomError::NotAChild {
                    parent,
                    child: reference,
                });
            }
            if reference == child {
                return Ok(());
            }
        }

        self.unlink(child);

        let (prev, next) = match reference {
            Some(reference) => (self.nodes[reference.index()].prev_sibling, reference),
            None => (self.nodes[parent.index()].last_child, NodeId::NONE),
        };

        let node = &mut self.nodes[child.index()];
        node.parent = parent;
        node.prev_sibling = prev;
        node.next_sibling = next;

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }

        Ok(())
    }

    /// Detach every child of `parent`. Returns how many were removed.
    pub fn clear_children(&mut self, parent: NodeId) -> DomResult<usize> {
        let mut removed = 0;
        loop {
            let Some(child) = self.node(parent)?.first_child.to_option() else {
                return Ok(removed);
            };
            self.unlink(child);
            removed += 1;
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Unlink a node from its parent and siblings
    fn unlink(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Pre-order (document order) traversal of `root`'s subtree, root first
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root,
            next: self.get(root).map(|_| root),
        }
    }

    /// Lowercase local tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name.local))
    }

    /// Attribute value by local name
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let key = self.interner.lookup(name)?;
        self.get(id)?.as_element()?.get_attr(key)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    /// Set an attribute (no namespace)
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> DomResult<()> {
        let local = self.interner.intern(name);
        let elem = self.element_mut(id)?;
        elem.set_attr(QualName::new(InternedString::EMPTY, local), value.into());
        Ok(())
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        let Some(key) = self.interner.lookup(name) else {
            self.element(id)?;
            return Ok(None);
        };
        Ok(self.element_mut(id)?.remove_attr(key))
    }

    /// Parsed `class` attribute (empty for non-elements)
    pub fn class_list(&self, id: NodeId) -> TokenList {
        self.get_attribute(id, "class")
            .map(TokenList::parse)
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).contains(class)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        self.element(id)?;
        let mut list = self.class_list(id);
        if !list.add(class) {
            return Ok(false);
        }
        self.set_attribute(id, "class", list.value())?;
        Ok(true)
    }

    /// Remove a class. Returns false if it was absent.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        self.element(id)?;
        let mut list = self.class_list(id);
        if !list.remove(class) {
            return Ok(false);
        }
        if list.is_empty() {
            self.remove_attribute(id, "class")?;
        } else {
            self.set_attribute(id, "class", list.value())?;
        }
        Ok(true)
    }

    /// Force a class on or off, or flip it when `force` is `None`.
    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: Option<bool>) -> DomResult<bool> {
        let on = force.unwrap_or(!self.has_class(id, class));
        if on {
            self.add_class(id, class)?;
        } else {
            self.remove_class(id, class)?;
        }
        Ok(on)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| self.get(n)?.as_text())
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.to_option()?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order subtree iterator
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(current)
    }
}

impl Descendants<'_> {
    fn successor(&self, current: NodeId) -> Option<NodeId> {
        let node = self.tree.get(current)?;
        if let Some(child) = node.first_child.to_option() {
            return Some(child);
        }
        let mut id = current;
        loop {
            if id == self.root {
                return None;
            }
            let node = self.tree.get(id)?;
            if let Some(sibling) = node.next_sibling.to_option() {
                return Some(sibling);
            }
            id = node.parent.to_option()?;
        }
    }
}
