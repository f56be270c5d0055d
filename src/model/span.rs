//! Styled text runs produced by the formatting-aware backend.

/// A contiguous run of text sharing one font and size on a page. Ephemeral:
/// spans exist only while a page is being classified.
#[derive(Debug, Clone)]
pub struct FormattedSpan {
    /// The decoded text content.
    pub text: String,
    /// Effective font size in points (nominal size times text-matrix scale).
    pub font_size: f32,
    /// Whether the font appears to be bold.
    pub bold: bool,
}

impl FormattedSpan {
    /// Build a span, deriving the bold flag from the base font name. The
    /// PDF object layer exposes no per-span style bits, so weight is
    /// decoded from the name ("Helvetica-Bold", "Arial Black", ...).
    pub fn new(text: String, font_size: f32, font_name: &str) -> Self {
        let name = font_name.to_lowercase();
        let bold = name.contains("bold") || name.contains("black") || name.contains("heavy");
        Self {
            text,
            font_size,
            bold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_detection_from_font_name() {
        assert!(FormattedSpan::new("x".into(), 12.0, "Helvetica-Bold").bold);
        assert!(FormattedSpan::new("x".into(), 12.0, "Arial Black").bold);
        assert!(FormattedSpan::new("x".into(), 12.0, "HeavyGrotesk").bold);
        assert!(!FormattedSpan::new("x".into(), 12.0, "Helvetica-Oblique").bold);
        assert!(!FormattedSpan::new("x".into(), 12.0, "Courier").bold);
    }
}
