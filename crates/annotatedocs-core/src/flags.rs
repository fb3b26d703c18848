//! Page-level flags
//!
//! Set-once-true state derived from attached annotations. Nothing in this
//! crate ever clears a flag.

use crate::Level;

/// Class on `<html>` once a document-level annotation is shown
pub const PAGE_HAS_DOCUMENT_ANNOTATIONS: &str = "page-has-global-annotations";

/// Page-wide annotation state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageFlags {
    has_hints: bool,
    has_warnings: bool,
    has_document_annotations: bool,
}

impl PageFlags {
    pub fn has_hints(&self) -> bool {
        self.has_hints
    }

    pub fn has_warnings(&self) -> bool {
        self.has_warnings
    }

    pub fn has_document_annotations(&self) -> bool {
        self.has_document_annotations
    }

    /// Whether any annotation of `level` was attached
    pub fn has(&self, level: Level) -> bool {
        match level {
            Level::Hint => self.has_hints,
            Level::Warning => self.has_warnings,
        }
    }

    /// Record an attached annotation of `level`. Returns true the first time.
    pub(crate) fn mark(&mut self, level: Level) -> bool {
        let flag = match level {
            Level::Hint => &mut self.has_hints,
            Level::Warning => &mut self.has_warnings,
        };
        !std::mem::replace(flag, true)
    }

    /// Record an attached document-level annotation. Returns true the first time.
    pub(crate) fn mark_document_annotations(&mut self) -> bool {
        !std::mem::replace(&mut self.has_document_annotations, true)
    }

    /// CSS classes `<html>` should carry for the current state
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::with_capacity(3);
        if self.has_hints {
            classes.push(Level::Hint.page_flag_class());
        }
        if self.has_warnings {
            classes.push(Level::Warning.page_flag_class());
        }
        if self.has_document_annotations {
            classes.push(PAGE_HAS_DOCUMENT_ANNOTATIONS);
        }
        classes
    }
}
