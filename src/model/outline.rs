//! Outline value types.

use serde::{Deserialize, Serialize};

/// Heading depth. The hierarchy is capped at three levels; anything deeper
/// in a source document is folded into H3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Level for a 1-based depth, capped at H3. Bookmark nesting and
    /// numbered-prefix depth both map through this.
    pub fn from_depth(depth: u8) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// The serialized form ("H1", "H2", "H3").
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected heading: level, trimmed text, and the 1-based page it
/// appears on. Immutable once produced by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCandidate {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

impl HeadingCandidate {
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The extraction result for one document: a title (never empty) and the
/// normalized heading sequence. This is the only externally visible
/// artifact of an extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub outline: Vec<HeadingCandidate>,
}

impl DocumentOutline {
    /// Title used when no title can be found in the document.
    pub const UNTITLED: &'static str = "Untitled Document";

    /// Title used when the document could not be processed at all.
    pub const ERROR_TITLE: &'static str = "Error Processing Document";

    /// The sentinel returned for unprocessable documents.
    pub fn error_sentinel() -> Self {
        Self {
            title: Self::ERROR_TITLE.to_string(),
            outline: Vec::new(),
        }
    }

    /// Whether this outline is the error sentinel.
    pub fn is_degraded(&self) -> bool {
        self.title == Self::ERROR_TITLE && self.outline.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_depth_caps_at_h3() {
        assert_eq!(HeadingLevel::from_depth(1), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_depth(2), HeadingLevel::H2);
        assert_eq!(HeadingLevel::from_depth(3), HeadingLevel::H3);
        assert_eq!(HeadingLevel::from_depth(7), HeadingLevel::H3);
    }

    #[test]
    fn test_level_serializes_as_bare_string() {
        let json = serde_json::to_string(&HeadingLevel::H2).unwrap();
        assert_eq!(json, "\"H2\"");
        let back: HeadingLevel = serde_json::from_str("\"H3\"").unwrap();
        assert_eq!(back, HeadingLevel::H3);
    }

    #[test]
    fn test_candidate_serialized_shape() {
        let candidate = HeadingCandidate::new(HeadingLevel::H1, "1. Introduction", 1);
        let json = serde_json::to_string(&candidate).unwrap();
        assert_eq!(
            json,
            r#"{"level":"H1","text":"1. Introduction","page":1}"#
        );
    }

    #[test]
    fn test_error_sentinel() {
        let sentinel = DocumentOutline::error_sentinel();
        assert_eq!(sentinel.title, "Error Processing Document");
        assert!(sentinel.outline.is_empty());
        assert!(sentinel.is_degraded());
    }
}
