//! The heading signature catalog.
//!
//! A fixed, ordered list of textual heading signatures plus the size and
//! style thresholds the classifier consults. Pure data: the signatures are
//! evaluated top to bottom and the first match wins. Numbered patterns come
//! before the vocabulary, which comes before the looser case-based shapes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Inclusive lower bound on heading text length, in characters.
pub const MIN_HEADING_CHARS: usize = 3;

/// Inclusive upper bound on heading text length, in characters.
pub const MAX_HEADING_CHARS: usize = 100;

/// Font size at or above which a heading is assigned H1.
pub const H1_MIN_SIZE: f32 = 20.0;

/// Font size at or above which a heading is assigned H2.
pub const H2_MIN_SIZE: f32 = 16.0;

/// Font size at or above which a heading is assigned H3.
pub const H3_MIN_SIZE: f32 = 12.0;

/// Minimum size at which a bold span qualifies as a heading.
pub const MIN_BOLD_HEADING_SIZE: f32 = 10.0;

/// Line prefixes (compared lowercased) that disqualify a span from being a
/// heading regardless of its styling.
pub const HEADING_STOP_PREFIXES: [&str; 4] =
    ["abstract", "keywords", "the eurocall review", "page"];

/// Line prefixes (compared lowercased) that disqualify a first-page line
/// from being picked as the document title.
pub const TITLE_STOP_PREFIXES: [&str; 3] = ["abstract", "keywords", "the eurocall review"];

/// Common section names, recognized as whole lines.
pub const SECTION_NAMES: [&str; 13] = [
    "Abstract",
    "Introduction",
    "Literature Review",
    "Method",
    "Methods",
    "Results",
    "Findings",
    "Discussion",
    "Conclusion",
    "Conclusions",
    "References",
    "Bibliography",
    "Acknowledgements",
];

/// The ordered signature list for the boolean "is this a heading" test.
static HEADING_SIGNATURES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // 1.1.1 Sub-subsection
        Regex::new(r"^\d+\.\d+\.\d+\s+.*$").unwrap(),
        // 1.1 Subsection
        Regex::new(r"^\d+\.\d+\s+.*$").unwrap(),
        // 1. Introduction
        Regex::new(r"^\d+\.\s+.*$").unwrap(),
        // Common section titles, case-sensitive whole line
        Regex::new(
            r"^(Abstract|Introduction|Literature Review|Method|Methods|Results|Findings|Discussion|Conclusion|Conclusions|References|Bibliography|Acknowledgements)$",
        )
        .unwrap(),
        // ALL CAPS HEADINGS (letters and spaces only)
        Regex::new(r"^[A-Z][A-Z\s]+$").unwrap(),
        // Title Case Headings
        Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*$").unwrap(),
        // Chapter 3: ...
        Regex::new(r"^Chapter\s+\d+[:\s]*.*$").unwrap(),
        // Section 2: ...
        Regex::new(r"^Section\s+\d+[:\s]*.*$").unwrap(),
    ]
});

/// Numbered prefixes used for level assignment. Unlike the signatures above
/// these only anchor the prefix; the trailing whitespace is required.
static NUMBERED_H3_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+\s").unwrap());
static NUMBERED_H2_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\s").unwrap());
static NUMBERED_H1_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s").unwrap());

/// Section-name vocabulary as a case-insensitive whole-line match.
static SECTION_NAME_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(Abstract|Introduction|Literature Review|Method|Methods|Results|Findings|Discussion|Conclusion|Conclusions|References|Bibliography|Acknowledgements)$",
    )
    .unwrap()
});

/// Evaluate the ordered signature list; first match wins.
pub fn matches_signature(text: &str) -> bool {
    HEADING_SIGNATURES.iter().any(|sig| sig.is_match(text))
}

/// Depth of a numbered section prefix: `1.` → 1, `1.1` → 2, `1.1.1` → 3.
pub fn numbered_depth(text: &str) -> Option<u8> {
    if NUMBERED_H3_PREFIX.is_match(text) {
        Some(3)
    } else if NUMBERED_H2_PREFIX.is_match(text) {
        Some(2)
    } else if NUMBERED_H1_PREFIX.is_match(text) {
        Some(1)
    } else {
        None
    }
}

/// Case-insensitive whole-line match against the section-name vocabulary.
pub fn is_section_name(text: &str) -> bool {
    SECTION_NAME_LINE.is_match(text)
}

/// Check a line against the heading stop list.
pub fn has_heading_stop_prefix(text: &str) -> bool {
    let lower = text.to_lowercase();
    HEADING_STOP_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Check a line against the title stop list.
pub fn has_title_stop_prefix(text: &str) -> bool {
    let lower = text.to_lowercase();
    TITLE_STOP_PREFIXES.iter().any(|p| lower.starts_with(p))
}
