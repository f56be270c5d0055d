//! Span classification.
//!
//! Two operation modes share the signature catalog: the rich test that can
//! consult font size and weight, and a text-only variant for layouts with
//! no formatting metadata. Level assignment trusts numeric and keyword cues
//! over font metrics; size thresholds vary too much between documents to be
//! consulted first.

use crate::catalog;
use crate::model::HeadingLevel;

/// Rejection rules shared by both modes, applied to trimmed text.
fn rejected(text: &str) -> bool {
    let len = text.chars().count();
    if len < catalog::MIN_HEADING_CHARS || len > catalog::MAX_HEADING_CHARS {
        return true;
    }
    if catalog::has_heading_stop_prefix(text)
        || text.chars().all(|c| c.is_ascii_digit())
        || text.chars().all(char::is_whitespace)
    {
        return true;
    }
    len < 5
}

/// Heading test for one styled span (rich mode).
///
/// Signature matches win outright; otherwise bold weight at a readable size
/// or a notably large size on a short line qualifies.
pub fn is_heading(text: &str, font_size: f32, bold: bool) -> bool {
    let text = text.trim();
    if rejected(text) {
        return false;
    }

    if catalog::matches_signature(text) {
        return true;
    }

    if bold && font_size >= catalog::MIN_BOLD_HEADING_SIZE {
        return true;
    }

    font_size >= catalog::H2_MIN_SIZE && text.chars().count() < 80
}

/// Heading test for one plain line (text-only mode).
///
/// Same rejection rules; without font signals the only extra acceptance
/// path is a short all-uppercase line.
pub fn is_heading_text_only(text: &str) -> bool {
    let text = text.trim();
    if rejected(text) {
        return false;
    }

    catalog::matches_signature(text) || (is_all_uppercase(text) && text.chars().count() < 80)
}

/// Assign a level to an accepted heading.
///
/// Evaluated in priority order: numbered prefix depth, section-name
/// vocabulary, chapter/section keywords, then font size when available,
/// else text shape.
pub fn heading_level(text: &str, font_size: Option<f32>) -> HeadingLevel {
    let text = text.trim();

    if let Some(depth) = catalog::numbered_depth(text) {
        return HeadingLevel::from_depth(depth);
    }

    if catalog::is_section_name(text) {
        return HeadingLevel::H1;
    }

    if text.starts_with("Chapter") || text.starts_with("CHAPTER") {
        return HeadingLevel::H1;
    }
    if text.starts_with("Section") || text.starts_with("SECTION") {
        return HeadingLevel::H2;
    }

    match font_size {
        Some(size) if size >= catalog::H1_MIN_SIZE => HeadingLevel::H1,
        Some(size) if size >= catalog::H2_MIN_SIZE => HeadingLevel::H2,
        Some(_) => HeadingLevel::H3,
        None => {
            let len = text.chars().count();
            if is_all_uppercase(text) && len < 50 {
                HeadingLevel::H1
            } else if len < 80 {
                HeadingLevel::H2
            } else {
                HeadingLevel::H3
            }
        }
    }
}

/// True when the text contains at least one alphabetic character and every
/// alphabetic character is uppercase.
pub fn is_all_uppercase(text: &str) -> bool {
    let mut has_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if !c.is_uppercase() {
                return false;
            }
            has_alpha = true;
        }
    }
    has_alpha
}
