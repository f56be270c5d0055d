//! PDF format detection.
//!
//! Cheap header sniffing applied before a document is handed to the object
//! layer, so obviously non-PDF inputs fail fast with a format error.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Length of the version token after the magic, e.g. "1.7".
const VERSION_LEN: usize = 3;

/// Header information sniffed from the first bytes of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// Version from the header comment (e.g. "1.7", "2.0").
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Sniff the PDF header in a byte buffer.
///
/// Needs at least the first 8 bytes of the file. Returns
/// [`Error::UnknownFormat`] when the magic is absent and
/// [`Error::UnsupportedVersion`] when the version token is malformed.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC.len() + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let token = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    let version = String::from_utf8_lossy(token).to_string();

    let bytes = version.as_bytes();
    let well_formed = bytes.len() == VERSION_LEN
        && bytes[0].is_ascii_digit()
        && bytes[1] == b'.'
        && bytes[2].is_ascii_digit();
    if !well_formed {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version })
}

/// Sniff the PDF header of a file on disk.
pub fn sniff_file<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 16];
    reader.read_exact(&mut header)?;
    sniff_bytes(&header)
}

/// Check whether a file looks like a PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    sniff_file(path).is_ok()
}
