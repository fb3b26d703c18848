//! Annotation records - the payload wire format
//!
//! A payload is a JSON array of `{level, message, title?}` objects stored in
//! an element attribute. Unknown severities are rejected at decode time.

use serde::{Deserialize, Serialize};

/// Severity of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Level {
    /// Informational
    Hint,
    /// Actionable concern
    Warning,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Hint => "hint",
            Level::Warning => "warning",
        }
    }

    /// Class on the rendered annotation node
    pub fn css_class(self) -> &'static str {
        match self {
            Level::Hint => "annotation-hint",
            Level::Warning => "annotation-warning",
        }
    }

    /// Class on an element carrying at least one annotation of this level
    pub fn element_flag_class(self) -> &'static str {
        match self {
            Level::Hint => "has-hints",
            Level::Warning => "has-warnings",
        }
    }

    /// Class on `<html>` once the page carries this level anywhere
    pub fn page_flag_class(self) -> &'static str {
        match self {
            Level::Hint => "page-has-hints",
            Level::Warning => "page-has-warnings",
        }
    }

    /// Class on `<html>` that hides this level
    pub fn page_hide_class(self) -> &'static str {
        match self {
            Level::Hint => "page-hide-hints",
            Level::Warning => "page-hide-warnings",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One serialized annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub level: Level,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl AnnotationRecord {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Decode a payload attribute value
pub fn parse_payload(raw: &str) -> Result<Vec<AnnotationRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Encode records into a payload attribute value
pub fn serialize_payload(records: &[AnnotationRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload_keeps_order() {
        let raw = r#"[
            {"level": "warning", "message": "Dead link"},
            {"level": "hint", "message": "Missing verb", "title": "Grammar"}
        ]"#;
        let records = parse_payload(raw).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], AnnotationRecord::new(Level::Warning, "Dead link"));
        assert_eq!(
            records[1],
            AnnotationRecord::new(Level::Hint, "Missing verb").with_title("Grammar")
        );
    }

    #[test]
    fn test_unknown_level_rejected() {
        let err = parse_payload(r#"[{"level": "error", "message": "x"}]"#).unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn test_missing_message_rejected() {
        assert!(parse_payload(r#"[{"level": "hint"}]"#).is_err());
    }

    #[test]
    fn test_not_an_array_rejected() {
        assert!(parse_payload(r#"{"level": "hint", "message": "x"}"#).is_err());
        assert!(parse_payload("[{").is_err());
    }

    #[test]
    fn test_extra_fields_ignored() {
        let records = parse_payload(r#"[{"level": "hint", "message": "x", "source": "pep8"}]"#).unwrap();
        assert_eq!(records[0].message, "x");
    }

    #[test]
    fn test_serialize_omits_missing_title() {
        let json = serialize_payload(&[AnnotationRecord::new(Level::Hint, "Missing verb")]).unwrap();
        assert_eq!(json, r#"[{"level":"hint","message":"Missing verb"}]"#);
    }

    #[test]
    fn test_level_classes() {
        assert_eq!(Level::Hint.css_class(), "annotation-hint");
        assert_eq!(Level::Warning.element_flag_class(), "has-warnings");
        assert_eq!(Level::Warning.page_flag_class(), "page-has-warnings");
        assert_eq!(Level::Hint.page_hide_class(), "page-hide-hints");
        assert_eq!(Level::Warning.to_string(), "warning");
    }
}
