//! annotatedocs core
//!
//! Turns the annotation payloads a documentation generator embeds in
//! element attributes into visible decoration:
//!
//! - [`record`] decodes payload JSON into typed records
//! - [`Annotation`] renders one finding and attaches it exactly once
//! - [`Document`] scans a page, attaches everything and owns the page flags
//! - [`Toolbox`] flips the page-wide visibility classes

mod annotation;
mod config;
mod document;
mod error;
mod flags;
pub mod record;
mod toolbox;

pub use annotation::{Annotation, AnnotationHost, Target};
pub use config::AnnotateConfig;
pub use document::{Document, find_annotatable_elements};
pub use error::{AlreadyAttachedError, AnnotateError, AnnotateResult};
pub use flags::PageFlags;
pub use record::{AnnotationRecord, Level};
pub use toolbox::Toolbox;

use annotatedocs_dom::Document as HtmlDocument;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the full annotation pass over a parsed page and return the
/// resulting page flags
pub fn annotate_page(page: &mut HtmlDocument, config: &AnnotateConfig) -> AnnotateResult<PageFlags> {
    let mut document = Document::for_page(page, config.clone())?;
    document.init()?;
    Ok(*document.flags())
}
