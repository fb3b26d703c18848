//! Annotation - one reviewer finding
//!
//! An annotation is immutable after construction apart from its one-way
//! `Constructed -> Attached` transition.

use annotatedocs_dom::{DomResult, DomTree, NodeId};

use crate::{AlreadyAttachedError, AnnotateError, AnnotateResult, AnnotationRecord, Level};

/// Base class of every rendered annotation node
pub const ANNOTATION_CLASS: &str = "annotation";

/// Where an annotation is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Inside a specific element's decoration container
    Element(NodeId),
    /// Inside the shared document-level container
    Document,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Element(id) => write!(f, "element {}", id),
            Target::Document => f.write_str("the document"),
        }
    }
}

/// The page side of an attach: container lookup and flag bookkeeping
pub trait AnnotationHost {
    /// Tree the rendered nodes are allocated in
    fn tree_mut(&mut self) -> &mut DomTree;

    /// Get-or-create the decoration container for `target`
    fn container(&mut self, target: Target) -> DomResult<NodeId>;

    /// Record that an annotation of `level` was attached to `target`
    fn mark(&mut self, target: Target, level: Level) -> DomResult<()>;

    /// Tag of the nodes rendered into `target`'s container
    fn node_tag(&self, _target: Target) -> &'static str {
        "div"
    }
}

/// One finding: severity, message and optional tooltip title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    level: Level,
    message: String,
    title: Option<String>,
    attached_to: Option<Target>,
}

impl Annotation {
    /// Build an annotation from a decoded record. A blank message is
    /// rejected so nothing renders as an empty box.
    pub fn new(record: AnnotationRecord) -> AnnotateResult<Self> {
        if record.message.trim().is_empty() {
            return Err(AnnotateError::InvalidRecord {
                reason: format!("{} annotation has an empty message", record.level),
            });
        }
        Ok(Self {
            level: record.level,
            message: record.message,
            title: record.title.filter(|t| !t.trim().is_empty()),
            attached_to: None,
        })
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn attached_to(&self) -> Option<Target> {
        self.attached_to
    }

    pub fn is_attached(&self) -> bool {
        self.attached_to.is_some()
    }

    /// Build a detached decoration node for this annotation.
    ///
    /// The message becomes a text node, never markup.
    pub fn render(&self, tree: &mut DomTree) -> DomResult<NodeId> {
        self.render_as(tree, "div")
    }

    /// Same as [`render`](Self::render) with a caller-chosen tag, for
    /// containers that only accept phrasing content
    pub fn render_as(&self, tree: &mut DomTree, tag: &str) -> DomResult<NodeId> {
        let node = tree.create_element(tag);
        tree.set_attribute(
            node,
            "class",
            format!("{} {}", ANNOTATION_CLASS, self.level.css_class()),
        )?;
        if let Some(title) = &self.title {
            tree.set_attribute(node, "title", title.as_str())?;
        }
        let text = tree.create_text(&self.message);
        tree.append_child(node, text)?;
        Ok(node)
    }

    /// Render into `target`'s container and update the flags.
    ///
    /// Fails without touching the tree if this annotation is already
    /// attached. Returns the rendered node.
    pub fn attach<H: AnnotationHost + ?Sized>(&mut self, host: &mut H, target: Target) -> AnnotateResult<NodeId> {
        if let Some(previous) = self.attached_to {
            return Err(AlreadyAttachedError { previous }.into());
        }

        let container = host.container(target)?;
        let tag = host.node_tag(target);
        let node = self.render_as(host.tree_mut(), tag)?;
        host.tree_mut().append_child(container, node)?;
        host.mark(target, self.level)?;
        self.attached_to = Some(target);

        tracing::debug!("Attached {} annotation to {}: {:?}", self.level, target, self.message);
        Ok(node)
    }
}
