//! Annotation Configuration

/// Names of the attributes, classes and selectors the annotation pass
/// reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateConfig {
    /// Attribute holding an element's own annotations
    pub annotations_attribute: String,

    /// Attributes holding document-level annotations, read in this order
    /// on every element that carries them
    pub document_annotation_attributes: Vec<String>,

    /// Class of the per-element decoration container
    pub container_class: String,

    /// Class of the shared document-level container
    pub document_container_class: String,

    /// Selector of the annotated region; `<body>` when nothing matches
    pub root_selector: String,

    /// Selector of the toolbox panel(s) that expand and collapse
    pub toolbox_selector: String,
}

impl AnnotateConfig {
    pub fn with_root_selector(mut self, selector: impl Into<String>) -> Self {
        self.root_selector = selector.into();
        self
    }
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            annotations_attribute: "data-annotations".to_string(),
            document_annotation_attributes: vec![
                "data-global-annotations".to_string(),
                "data-document-annotations".to_string(),
            ],
            container_class: "annotations".to_string(),
            document_container_class: "document-annotations".to_string(),
            root_selector: "[role=main]".to_string(),
            toolbox_selector: "[data-toggle=annotations-toolbox]".to_string(),
        }
    }
}
