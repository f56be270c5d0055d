//! JSON rendering for extracted outlines.

use crate::error::{Error, Result};
use crate::model::DocumentOutline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize an outline to JSON.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(outline),
        JsonFormat::Compact => serde_json::to_string(outline),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingCandidate, HeadingLevel};

    fn sample() -> DocumentOutline {
        DocumentOutline {
            title: "A Study".to_string(),
            outline: vec![HeadingCandidate::new(HeadingLevel::H1, "1. Intro", 1)],
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"title\": \"A Study\""));
        assert!(json.contains("\"level\": \"H1\""));
    }

    #[test]
    fn test_to_json_compact_shape() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"A Study","outline":[{"level":"H1","text":"1. Intro","page":1}]}"#
        );
    }

    #[test]
    fn test_empty_outline_serializes_as_empty_array() {
        let outline = DocumentOutline::error_sentinel();
        let json = to_json(&outline, JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Error Processing Document","outline":[]}"#
        );
    }
}
