//! annotatedocs HTML
//!
//! HTML5 parsing built on html5ever, plus the serializer that writes the
//! decorated tree back out.

mod parser;
mod serializer;

pub use annotatedocs_dom::Document;
pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, get_inner_html, get_outer_html};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Serialize a whole document back to HTML
pub fn serialize(document: &Document) -> String {
    HtmlSerializer::new().serialize_document(document)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read HTML input for {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
