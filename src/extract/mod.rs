//! Extraction backends and the orchestration between them.
//!
//! Two self-contained backends produce raw heading candidates: a
//! formatting-aware pass over styled spans and native bookmarks
//! ([`rich`]), and a text-layout fallback with weaker signals
//! ([`text_only`]). The orchestrator runs the rich pass first and invokes
//! the fallback only when the rich pass nets zero candidates after
//! normalization. Failures never escape the document boundary.

mod normalize;
pub mod rich;
pub mod text_only;

pub use normalize::normalize;

use std::path::Path;

use crate::catalog;
use crate::error::Result;
use crate::model::{DocumentOutline, HeadingCandidate};

/// Raw output of one backend run: an optional title and an unordered,
/// possibly duplicated candidate list. Deduplication and ordering happen
/// in [`normalize`].
#[derive(Debug, Default)]
pub struct Extraction {
    pub title: Option<String>,
    pub candidates: Vec<HeadingCandidate>,
}

impl Extraction {
    /// Finalize into the externally visible outline.
    pub fn into_outline(self) -> DocumentOutline {
        DocumentOutline {
            title: self
                .title
                .unwrap_or_else(|| DocumentOutline::UNTITLED.to_string()),
            outline: normalize(self.candidates),
        }
    }
}

/// Extract the outline of one document.
///
/// Never fails and never panics: a document that cannot be opened or
/// parsed yields the error sentinel (logged with the offending path), and
/// a document with no detectable headings yields an empty outline.
pub fn extract_outline<P: AsRef<Path>>(path: P) -> DocumentOutline {
    let path = path.as_ref();
    match try_extract(path) {
        Ok(outline) => outline,
        Err(e) => {
            log::error!("error processing {}: {}", path.display(), e);
            DocumentOutline::error_sentinel()
        }
    }
}

/// In-memory variant of [`extract_outline`].
pub fn extract_outline_from_bytes(data: &[u8]) -> DocumentOutline {
    match try_extract_bytes(data) {
        Ok(outline) => outline,
        Err(e) => {
            log::error!("error processing in-memory document: {}", e);
            DocumentOutline::error_sentinel()
        }
    }
}

fn try_extract(path: &Path) -> Result<DocumentOutline> {
    let outline = rich::extract(path)?.into_outline();
    if !outline.outline.is_empty() {
        return Ok(outline);
    }
    // The rich pass came up empty; the weaker text-layout signals get a
    // turn and their result stands even if it is also empty.
    Ok(text_only::extract(path)?.into_outline())
}

fn try_extract_bytes(data: &[u8]) -> Result<DocumentOutline> {
    let outline = rich::extract_bytes(data)?.into_outline();
    if !outline.outline.is_empty() {
        return Ok(outline);
    }
    Ok(text_only::extract_bytes(data)?.into_outline())
}

/// Pick a document title from the first lines of page-1 text: the first
/// line between 5 and 100 characters (exclusive) whose prefix is not on
/// the title stop list. Only the first ten lines are considered.
pub(crate) fn select_title<'a, I>(lines: I) -> Option<String>
where
    I: Iterator<Item = &'a str>,
{
    for line in lines.take(10) {
        let line = line.trim();
        let len = line.chars().count();
        if len > 5 && len < 100 && !catalog::has_title_stop_prefix(line) {
            return Some(line.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_title_picks_first_qualifying_line() {
        let text = "Abstract\n\nA Survey of Example Systems\nAuthors et al.";
        assert_eq!(
            select_title(text.lines()),
            Some("A Survey of Example Systems".to_string())
        );
    }

    #[test]
    fn test_select_title_respects_bounds() {
        // Too short, then too long, then acceptable.
        let long = "x".repeat(100);
        let text = format!("Title\n{}\nHeuristic Outline Extraction", long);
        assert_eq!(
            select_title(text.lines()),
            Some("Heuristic Outline Extraction".to_string())
        );
    }

    #[test]
    fn test_select_title_gives_up_after_ten_lines() {
        let mut lines = vec!["a"; 10];
        lines.push("The Actual Document Title");
        let text = lines.join("\n");
        assert_eq!(select_title(text.lines()), None);
    }

    #[test]
    fn test_empty_extraction_finalizes_with_sentinel_title() {
        let outline = Extraction::default().into_outline();
        assert_eq!(outline.title, DocumentOutline::UNTITLED);
        assert!(outline.outline.is_empty());
        assert!(!outline.is_degraded());
    }
}
