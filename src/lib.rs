//! # pdftoc
//!
//! Heuristic PDF outline extraction for Rust.
//!
//! `pdftoc` infers a document's structure (a title plus H1/H2/H3 headings
//! anchored to 1-based page numbers) from low-level layout signals:
//! styled text spans, font sizes, bold weights, and any native bookmark
//! tree embedded by the producer. No ground-truth markup is required.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdftoc::{extract_outline, render, JsonFormat};
//!
//! let outline = extract_outline("paper.pdf");
//! println!("{} ({} headings)", outline.title, outline.outline.len());
//!
//! let json = render::to_json(&outline, JsonFormat::Pretty).unwrap();
//! std::fs::write("paper.json", json).unwrap();
//! ```
//!
//! ## How extraction works
//!
//! - A formatting-aware backend walks page content streams, classifying
//!   each styled span against a fixed catalog of heading signatures and
//!   font thresholds, and harvests the native bookmark tree as ground
//!   truth.
//! - When that pass finds nothing, a text-only backend reclassifies the
//!   plain text layout with weaker signals.
//! - Candidates are deduplicated per (text, page) and ordered by page.
//! - A document that cannot be opened yields a sentinel result instead of
//!   an error, so a batch never aborts because of one bad file.

pub mod batch;
pub mod catalog;
pub mod classify;
pub mod detect;
pub mod error;
pub mod extract;
pub mod fulltext;
pub mod model;
pub mod render;

// Re-export commonly used types and entry points
pub use batch::{discover_pdfs, process_directory, BatchReport};
pub use detect::{is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use extract::{extract_outline, extract_outline_from_bytes, normalize, Extraction};
pub use fulltext::extract_text;
pub use model::{DocumentOutline, FormattedSpan, HeadingCandidate, HeadingLevel};
pub use render::{to_json, JsonFormat};
