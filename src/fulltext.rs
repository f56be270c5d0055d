//! Whole-document plain text extraction.
//!
//! Feeds the downstream analysis layer, which consumes raw document text
//! rather than the structured outline. Page text is pulled through the PDF
//! object layer first; when that yields nothing, the text-layout extractor
//! gets a turn.

use std::path::Path;

use lopdf::Document;

use crate::error::{Error, Result};

/// Extract the full text of a document.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    match object_layer_text(path) {
        Ok(text) if !text.trim().is_empty() => return Ok(text),
        Ok(_) => {}
        Err(e) => {
            log::debug!(
                "object-layer text extraction failed for {}: {}",
                path.display(),
                e
            );
        }
    }

    pdf_extract::extract_text(path).map_err(Error::from)
}

fn object_layer_text(path: &Path) -> Result<String> {
    let doc = Document::load(path).map_err(|e| match e {
        lopdf::Error::Decryption(_) => Error::Encrypted,
        _ => Error::from(e),
    })?;

    let mut pages = Vec::new();
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) => pages.push(text),
            Err(e) => log::warn!("failed to extract text from page {}: {}", page_num, e),
        }
    }

    Ok(pages.join("\n"))
}
