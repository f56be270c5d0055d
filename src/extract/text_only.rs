//! Text-layout fallback backend.
//!
//! Works from plain extracted text with no formatting metadata: every line
//! of every page goes through the text-only classifier. The text extractor
//! carries no bookmark tree, so candidates come from line shape alone.

use std::path::Path;

use crate::classify;
use crate::error::Result;
use crate::model::HeadingCandidate;

use super::{select_title, Extraction};

/// Form feed the text extractor emits between pages.
const PAGE_SEPARATOR: char = '\x0C';

/// Run the text-only backend over a file.
pub fn extract(path: &Path) -> Result<Extraction> {
    let text = pdf_extract::extract_text(path)?;
    Ok(outline_from_text(&text))
}

/// Run the text-only backend over an in-memory document.
pub fn extract_bytes(data: &[u8]) -> Result<Extraction> {
    let text = pdf_extract::extract_text_from_mem(data)?;
    Ok(outline_from_text(&text))
}

/// Classify every line of every page. Pages are the form-feed-separated
/// chunks of the extracted text; a document without separators is a single
/// page.
fn outline_from_text(text: &str) -> Extraction {
    let mut extraction = Extraction::default();

    for (index, page_text) in text.split(PAGE_SEPARATOR).enumerate() {
        let page = index as u32 + 1;

        if page == 1 {
            extraction.title = select_title(page_text.lines());
        }

        for line in page_text.lines() {
            let line = line.trim();
            if classify::is_heading_text_only(line) {
                extraction.candidates.push(HeadingCandidate::new(
                    classify::heading_level(line, None),
                    line,
                    page,
                ));
            }
        }
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    #[test]
    fn test_classifies_lines_per_page() {
        let text = "A Study of Outline Heuristics\n1. Introduction\nplain body text\n\x0C2. Evaluation\nmore body text here";
        let extraction = outline_from_text(text);

        assert_eq!(
            extraction.title,
            Some("A Study of Outline Heuristics".to_string())
        );
        assert_eq!(
            extraction.candidates,
            vec![
                HeadingCandidate::new(HeadingLevel::H1, "1. Introduction", 1),
                HeadingCandidate::new(HeadingLevel::H1, "2. Evaluation", 2),
            ]
        );
    }

    #[test]
    fn test_short_caps_line_is_accepted() {
        let extraction = outline_from_text("SECTION 12 - OVERVIEW\nregular body copy here");
        assert_eq!(
            extraction.candidates,
            vec![HeadingCandidate::new(
                HeadingLevel::H2,
                "SECTION 12 - OVERVIEW",
                1
            )]
        );
    }

    #[test]
    fn test_no_separator_means_single_page() {
        let extraction = outline_from_text("1. Alpha\n1.1 Beta");
        assert!(extraction.candidates.iter().all(|c| c.page == 1));
    }

    #[test]
    fn test_empty_text_yields_empty_extraction() {
        let extraction = outline_from_text("");
        assert!(extraction.title.is_none());
        assert!(extraction.candidates.is_empty());
    }
}
