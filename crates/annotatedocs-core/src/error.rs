//! Annotation errors

use annotatedocs_dom::{DomError, NodeId};

use crate::Target;

/// Result type for annotation operations
pub type AnnotateResult<T> = Result<T, AnnotateError>;

/// Returned when an annotation that already has a target is attached again.
///
/// This signals a programming error in the caller, not bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Annotation is already attached to {previous}")]
pub struct AlreadyAttachedError {
    /// Where the annotation was attached first
    pub previous: Target,
}

/// Annotation errors
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    /// Payload attribute is not a valid JSON array of records
    #[error("Malformed annotation payload in {attribute} on element {element}: {source}")]
    MalformedPayload {
        attribute: String,
        element: NodeId,
        #[source]
        source: serde_json::Error,
    },

    /// Record decoded but cannot be rendered
    #[error("Invalid annotation record: {reason}")]
    InvalidRecord { reason: String },

    #[error(transparent)]
    AlreadyAttached(#[from] AlreadyAttachedError),

    /// Root selector is not one of the supported simple selectors
    #[error("Unsupported root selector {selector:?}")]
    InvalidSelector { selector: String },

    /// Neither the configured root nor a <body> exists
    #[error("No element matches root selector {selector:?} and the page has no <body>")]
    RootNotFound { selector: String },

    #[error("Failed to serialize annotation payload: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Dom(#[from] DomError),
}
