//! Formatting-aware extraction backend.
//!
//! Walks each page's decoded content stream for styled text spans, feeds
//! them to the rich classifier, and harvests the native bookmark tree,
//! which bypasses the classifier entirely. The document title comes from
//! the Info dictionary when present, else from a scan of the first page.
//!
//! Only a failure to open or parse the document as a whole propagates; a
//! page whose content stream cannot be fetched or decoded is skipped with
//! a warning, and spans that fail to decode are dropped silently.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::classify;
use crate::detect;
use crate::error::{Error, Result};
use crate::model::{FormattedSpan, HeadingCandidate, HeadingLevel};

use super::{select_title, Extraction};

/// Kerning adjustment (in 1/1000 text-space units) beyond which a TJ gap
/// is treated as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Run the rich backend over a file.
pub fn extract(path: &Path) -> Result<Extraction> {
    detect::sniff_file(path)?;
    let doc = load(|| Document::load(path))?;
    Ok(extract_from_doc(&doc))
}

/// Run the rich backend over an in-memory document.
pub fn extract_bytes(data: &[u8]) -> Result<Extraction> {
    detect::sniff_bytes(data)?;
    let doc = load(|| Document::load_mem(data))?;
    Ok(extract_from_doc(&doc))
}

fn load(
    open: impl FnOnce() -> std::result::Result<Document, lopdf::Error>,
) -> Result<Document> {
    open().map_err(|e| match e {
        lopdf::Error::Decryption(_) => Error::Encrypted,
        _ => Error::from(e),
    })
}

fn extract_from_doc(doc: &Document) -> Extraction {
    let pages = doc.get_pages();

    let title = metadata_title(doc).or_else(|| first_page_title(doc, &pages));

    let mut candidates = Vec::new();
    for (&page_num, &page_id) in &pages {
        let spans = match page_spans(doc, page_id) {
            Ok(spans) => spans,
            Err(e) => {
                log::warn!("skipping page {}: {}", page_num, e);
                continue;
            }
        };
        for span in spans {
            let text = span.text.trim();
            if classify::is_heading(text, span.font_size, span.bold) {
                candidates.push(HeadingCandidate::new(
                    classify::heading_level(text, Some(span.font_size)),
                    text,
                    page_num,
                ));
            }
        }
    }

    candidates.extend(bookmark_candidates(doc, &pages));

    Extraction { title, candidates }
}

/// Title from the document Info dictionary, if present and non-empty.
fn metadata_title(doc: &Document) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok()?;
    let info_dict = doc.get_dictionary(info.as_reference().ok()?).ok()?;
    let title = string_value(info_dict, b"Title")?;
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Title fallback: scan the first lines of page-1 text.
fn first_page_title(doc: &Document, pages: &BTreeMap<u32, ObjectId>) -> Option<String> {
    let first = *pages.keys().next()?;
    let text = doc.extract_text(&[first]).ok()?;
    select_title(text.lines())
}

// ---------------------------------------------------------------------------
// Content-stream span extraction
// ---------------------------------------------------------------------------

/// Extract styled spans from one page's content stream.
fn page_spans(doc: &Document, page_id: ObjectId) -> Result<Vec<FormattedSpan>> {
    let fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    // Resource name -> base font name, for weight detection.
    let mut base_names: HashMap<Vec<u8>, String> = HashMap::new();
    for (name, font) in &fonts {
        let base = font
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        base_names.insert(name.clone(), base);
    }

    let content = page_content(doc, page_id)?;
    let content = Content::decode(&content).map_err(|e| Error::PdfParse(e.to_string()))?;

    let mut spans = Vec::new();
    let mut current_font: Vec<u8> = Vec::new();
    let mut current_size: f32 = 12.0;
    let mut scale: f32 = 1.0;
    let mut in_text_block = false;

    for op in content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                scale = 1.0;
            }
            "ET" => {
                in_text_block = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(name) = &op.operands[0] {
                        current_font = name.clone();
                    }
                    current_size = number(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "Tm" => {
                // Only the vertical scale matters here; the effective size
                // of a span is the nominal Tf size times this factor.
                if op.operands.len() >= 6 {
                    let a = number(&op.operands[0]).unwrap_or(1.0);
                    let c = number(&op.operands[2]).unwrap_or(0.0);
                    scale = (a * a + c * c).sqrt();
                }
            }
            "Tj" | "TJ" | "'" | "\"" => {
                if !in_text_block {
                    continue;
                }
                let text_operand = if op.operator == "\"" {
                    op.operands.get(2)
                } else {
                    op.operands.first()
                };
                let Some(operand) = text_operand else { continue };

                let encoding = fonts
                    .get(&current_font)
                    .and_then(|font| font.get_font_encoding(doc).ok());
                let decode = |bytes: &[u8]| match &encoding {
                    Some(enc) => Document::decode_text(enc, bytes).unwrap_or_default(),
                    None => decode_text_simple(bytes),
                };

                let text = match operand {
                    Object::Array(items) => decode_tj_array(items, decode),
                    Object::String(bytes, _) => decode(bytes),
                    _ => String::new(),
                };

                if !text.trim().is_empty() {
                    let base = base_names
                        .get(&current_font)
                        .map(String::as_str)
                        .unwrap_or("Unknown");
                    spans.push(FormattedSpan::new(text, current_size * scale, base));
                }
            }
            _ => {}
        }
    }

    Ok(spans)
}

/// Fetch and concatenate a page's (decompressed) content streams.
fn page_content(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    let contents = page_dict
        .get(b"Contents")
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    match contents {
        Object::Reference(r) => {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                return s
                    .decompressed_content()
                    .map_err(|e| Error::PdfParse(e.to_string()));
            }
            Err(Error::PdfParse("Invalid content stream".to_string()))
        }
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Reference(r) = obj {
                    if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                        if let Ok(data) = s.decompressed_content() {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
            }
            Ok(content)
        }
        _ => Err(Error::PdfParse("Invalid content stream".to_string())),
    }
}

/// Decode a TJ operand array: strings are shown text through the given
/// decoder, numbers are kerning adjustments. A large negative adjustment
/// reads as a word space.
fn decode_tj_array(items: &[Object], decode: impl Fn(&[u8]) -> String) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => {
                combined.push_str(&decode(bytes));
            }
            Object::Integer(n) => {
                push_space_for_adjustment(&mut combined, -(*n as f32));
            }
            Object::Real(n) => {
                push_space_for_adjustment(&mut combined, -n);
            }
            _ => {}
        }
    }
    combined
}

fn push_space_for_adjustment(combined: &mut String, adjustment: f32) {
    if adjustment > TJ_SPACE_THRESHOLD && !combined.is_empty() && !combined.ends_with(' ') {
        combined.push(' ');
    }
}

/// Text decoding fallback when no font encoding is available: UTF-16BE
/// with BOM, then UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    bytes.iter().map(|&b| b as char).collect()
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Native bookmark tree
// ---------------------------------------------------------------------------

/// Collect candidates from the document's bookmark tree. Bookmarks are
/// producer-embedded ground truth: no classification, level comes from
/// nesting depth capped at H3. Nodes without a resolvable destination page
/// are dropped.
fn bookmark_candidates(doc: &Document, pages: &BTreeMap<u32, ObjectId>) -> Vec<HeadingCandidate> {
    let mut out = Vec::new();

    // Page object id -> page number, for destination resolution.
    let page_numbers: HashMap<ObjectId, u32> = pages.iter().map(|(n, id)| (*id, *n)).collect();

    let first_item = doc
        .catalog()
        .ok()
        .and_then(|catalog| catalog.get(b"Outlines").ok())
        .and_then(|outlines| outlines.as_reference().ok())
        .and_then(|r| doc.get_dictionary(r).ok())
        .and_then(|outlines| outlines.get(b"First").ok())
        .and_then(|first| first.as_reference().ok());

    if let Some(item_ref) = first_item {
        let mut visited = HashSet::new();
        collect_bookmarks(doc, item_ref, 1, &page_numbers, &mut visited, &mut out);
    }

    out
}

fn collect_bookmarks(
    doc: &Document,
    item_ref: ObjectId,
    depth: u8,
    page_numbers: &HashMap<ObjectId, u32>,
    visited: &mut HashSet<ObjectId>,
    out: &mut Vec<HeadingCandidate>,
) {
    // Malformed trees can loop through Next chains.
    if !visited.insert(item_ref) {
        return;
    }

    let Ok(dict) = doc.get_dictionary(item_ref) else {
        return;
    };

    if let Some(title) = string_value(dict, b"Title") {
        let title = title.trim();
        if !title.is_empty() {
            if let Some(page) = destination_page(doc, dict, page_numbers) {
                out.push(HeadingCandidate::new(
                    HeadingLevel::from_depth(depth),
                    title,
                    page,
                ));
            }
        }
    }

    if let Ok(first) = dict.get(b"First") {
        if let Ok(child) = first.as_reference() {
            collect_bookmarks(doc, child, depth.saturating_add(1), page_numbers, visited, out);
        }
    }

    if let Ok(next) = dict.get(b"Next") {
        if let Ok(sibling) = next.as_reference() {
            collect_bookmarks(doc, sibling, depth, page_numbers, visited, out);
        }
    }
}

/// Resolve a bookmark's target page from its `Dest` entry or its `A`
/// (action) dictionary's `D` entry.
fn destination_page(
    doc: &Document,
    item: &Dictionary,
    page_numbers: &HashMap<ObjectId, u32>,
) -> Option<u32> {
    if let Ok(dest) = item.get(b"Dest") {
        return resolve_destination(dest, page_numbers);
    }

    if let Ok(action) = item.get(b"A") {
        let action_dict = match action {
            Object::Reference(r) => doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }?;
        if let Ok(dest) = action_dict.get(b"D") {
            return resolve_destination(dest, page_numbers);
        }
    }

    None
}

/// A destination array's first element references the target page.
fn resolve_destination(dest: &Object, page_numbers: &HashMap<ObjectId, u32>) -> Option<u32> {
    let array = dest.as_array().ok()?;
    let page_ref = array.first()?.as_reference().ok()?;
    page_numbers.get(&page_ref).copied()
}

/// Decode a text string value from a PDF dictionary (UTF-16BE with BOM or
/// byte string).
fn string_value(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => {
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks(2)
                    .filter_map(|c| {
                        if c.len() == 2 {
                            Some(u16::from_be_bytes([c[0], c[1]]))
                        } else {
                            None
                        }
                    })
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                String::from_utf8(bytes.clone())
                    .ok()
                    .or_else(|| Some(bytes.iter().map(|&b| b as char).collect()))
            }
        }
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Operation;
    use lopdf::{dictionary, Stream};

    /// Build an in-memory document: one page of (font resource, size, text)
    /// lines, the given font resources, optional Info title, optional flat
    /// bookmark list of (depth, title).
    fn build_doc(
        fonts: &[(&str, &str)],
        lines: &[(&str, f32, &str)],
        info_title: Option<&str>,
        bookmarks: &[(u8, &str)],
    ) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for (res, base) in fonts {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => *base,
            });
            font_dict.set(res.as_bytes().to_vec(), font_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

        let mut operations = vec![Operation::new("BT", vec![])];
        let mut y = 760;
        for (res, size, text) in lines {
            operations.push(Operation::new("Tf", vec![(*res).into(), (*size).into()]));
            operations.push(Operation::new("Td", vec![72.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            y -= 40;
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };

        if !bookmarks.is_empty() {
            let outlines_id = doc.new_object_id();
            let mut item_ids = Vec::new();
            for _ in bookmarks {
                item_ids.push(doc.new_object_id());
            }
            // Chain: depth 1 items are siblings under the root; a deeper
            // entry becomes the first child of the previous item.
            for (i, ((depth, title), item_id)) in bookmarks.iter().zip(&item_ids).enumerate() {
                let mut item = dictionary! {
                    "Title" => Object::string_literal(*title),
                    "Dest" => vec![page_id.into()],
                };
                if let Some(((next_depth, _), next_id)) = bookmarks.get(i + 1).zip(item_ids.get(i + 1)) {
                    if *next_depth > *depth {
                        item.set("First", *next_id);
                    } else {
                        item.set("Next", *next_id);
                    }
                }
                doc.objects.insert(*item_id, Object::Dictionary(item));
            }
            doc.objects.insert(
                outlines_id,
                Object::Dictionary(dictionary! {
                    "Type" => "Outlines",
                    "First" => item_ids[0],
                }),
            );
            catalog.set("Outlines", outlines_id);
        }

        let catalog_id = doc.add_object(Object::Dictionary(catalog));
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = info_title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(title),
            });
            doc.trailer.set("Info", info_id);
        }

        doc
    }

    #[test]
    fn test_spans_classified_against_catalog() {
        let doc = build_doc(
            &[("F1", "Courier")],
            &[
                ("F1", 10.0, "1. Introduction"),
                ("F1", 10.0, "This is body text."),
                ("F1", 10.0, "1.1 Background"),
            ],
            None,
            &[],
        );
        let extraction = extract_from_doc(&doc);

        assert_eq!(
            extraction.candidates,
            vec![
                HeadingCandidate::new(HeadingLevel::H1, "1. Introduction", 1),
                HeadingCandidate::new(HeadingLevel::H2, "1.1 Background", 1),
            ]
        );
    }

    #[test]
    fn test_bold_font_accepted_without_signature() {
        let doc = build_doc(
            &[("F1", "Helvetica-Bold"), ("F2", "Courier")],
            &[
                ("F1", 12.0, "Overview of internal components"),
                ("F2", 10.0, "plain body copy in a regular face"),
            ],
            None,
            &[],
        );
        let extraction = extract_from_doc(&doc);

        assert_eq!(
            extraction.candidates,
            vec![HeadingCandidate::new(
                HeadingLevel::H3,
                "Overview of internal components",
                1
            )]
        );
    }

    #[test]
    fn test_metadata_title_preferred() {
        let doc = build_doc(
            &[("F1", "Courier")],
            &[("F1", 10.0, "1. Overview")],
            Some("Neural Document Analysis"),
            &[],
        );
        let extraction = extract_from_doc(&doc);
        assert_eq!(
            extraction.title,
            Some("Neural Document Analysis".to_string())
        );
    }

    #[test]
    fn test_bookmarks_bypass_classifier() {
        let doc = build_doc(
            &[("F1", "Courier")],
            &[("F1", 10.0, "plain body copy only")],
            None,
            &[(1, "Data Processing Pipeline"), (2, "Stage Internals")],
        );
        let extraction = extract_from_doc(&doc);

        assert_eq!(
            extraction.candidates,
            vec![
                HeadingCandidate::new(HeadingLevel::H1, "Data Processing Pipeline", 1),
                HeadingCandidate::new(HeadingLevel::H2, "Stage Internals", 1),
            ]
        );
    }

    #[test]
    fn test_utf16_string_value_decoding() {
        let mut dict = Dictionary::new();
        // UTF-16BE BOM + "Hi"
        dict.set(
            "Title",
            Object::String(
                vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69],
                lopdf::StringFormat::Literal,
            ),
        );
        assert_eq!(string_value(&dict, b"Title"), Some("Hi".to_string()));
    }

    #[test]
    fn test_decode_text_simple_fallbacks() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        // 0xE9 = 'e' acute in Latin-1
        assert_eq!(decode_text_simple(&[0x48, 0xE9]), "H\u{e9}");
    }

    #[test]
    fn test_tj_array_space_insertion() {
        let items = vec![
            Object::string_literal("Related"),
            Object::Integer(-250),
            Object::string_literal("Work"),
        ];
        assert_eq!(decode_tj_array(&items, decode_text_simple), "Related Work");

        let tight = vec![
            Object::string_literal("Rel"),
            Object::Integer(-20),
            Object::string_literal("ated"),
        ];
        assert_eq!(decode_tj_array(&tight, decode_text_simple), "Related");
    }
}
