//! Toolbox - page-wide visibility switches
//!
//! Mirrors the two "show hints" / "show warnings" checkboxes and the
//! collapsible panel of the annotation toolbox. Applying it only toggles
//! presentation classes; annotation state is never touched.

use annotatedocs_dom::{Document as HtmlDocument, DomResult, ElementQuery};

use crate::{AnnotateConfig, Level};

/// Class on the toolbox panel while it is expanded
pub const TOOLBOX_EXPANDED_CLASS: &str = "shift-up";

/// Toolbox state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbox {
    show_hints: bool,
    show_warnings: bool,
    expanded: bool,
}

impl Default for Toolbox {
    fn default() -> Self {
        Self {
            show_hints: true,
            show_warnings: true,
            expanded: false,
        }
    }
}

impl Toolbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shows(&self, level: Level) -> bool {
        match level {
            Level::Hint => self.show_hints,
            Level::Warning => self.show_warnings,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// "show hints" checkbox changed
    pub fn set_show_hints(&mut self, show: bool) -> bool {
        self.show_hints = show;
        show
    }

    /// "show warnings" checkbox changed
    pub fn set_show_warnings(&mut self, show: bool) -> bool {
        self.show_warnings = show;
        show
    }

    /// Toolbox header clicked. Returns the new expanded state.
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Write the presentation classes into the page
    pub fn apply(&self, page: &mut HtmlDocument, config: &AnnotateConfig) -> DomResult<()> {
        let html = page.document_element();
        if html.is_valid() {
            for level in [Level::Hint, Level::Warning] {
                page.tree_mut()
                    .toggle_class(html, level.page_hide_class(), Some(!self.shows(level)))?;
            }
        }

        let tree = page.tree_mut();
        let panels = tree.query_selector_all(tree.root(), &config.toolbox_selector);
        for &panel in &panels {
            tree.toggle_class(panel, TOOLBOX_EXPANDED_CLASS, Some(self.expanded))?;
        }

        tracing::debug!(
            "Toolbox applied: hints {}, warnings {}, {} panel(s) {}",
            if self.show_hints { "shown" } else { "hidden" },
            if self.show_warnings { "shown" } else { "hidden" },
            panels.len(),
            if self.expanded { "expanded" } else { "collapsed" },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_show_everything() {
        let toolbox = Toolbox::new();
        assert!(toolbox.shows(Level::Hint));
        assert!(toolbox.shows(Level::Warning));
        assert!(!toolbox.is_expanded());
    }

    #[test]
    fn test_apply_hide_classes() {
        let mut page = HtmlDocument::new("test.html");
        let html = page.document_element();
        let config = AnnotateConfig::default();
        let mut toolbox = Toolbox::new();

        toolbox.set_show_hints(false);
        toolbox.apply(&mut page, &config).unwrap();
        assert!(page.tree().has_class(html, "page-hide-hints"));
        assert!(!page.tree().has_class(html, "page-hide-warnings"));

        toolbox.set_show_hints(true);
        toolbox.set_show_warnings(false);
        toolbox.apply(&mut page, &config).unwrap();
        assert!(!page.tree().has_class(html, "page-hide-hints"));
        assert!(page.tree().has_class(html, "page-hide-warnings"));
    }

    #[test]
    fn test_apply_expands_panel() {
        let mut page = HtmlDocument::new("test.html");
        let body = page.body();
        let tree = page.tree_mut();
        let panel = tree.create_element("div");
        tree.set_attribute(panel, "data-toggle", "annotations-toolbox").unwrap();
        tree.append_child(body, panel).unwrap();
        let config = AnnotateConfig::default();

        let mut toolbox = Toolbox::new();
        assert!(toolbox.toggle_expanded());
        toolbox.apply(&mut page, &config).unwrap();
        assert!(page.tree().has_class(panel, "shift-up"));

        assert!(!toolbox.toggle_expanded());
        toolbox.apply(&mut page, &config).unwrap();
        assert!(!page.tree().has_class(panel, "shift-up"));
    }
}
