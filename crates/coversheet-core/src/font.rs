//! Font family resolution
//!
//! The user picks one logical family; every renderer needs a different
//! concrete name for it. Resolution is total: anything unrecognised resolves
//! as [`FontFamily::Times`] in every target.

use serde::{Deserialize, Serialize};

/// Logical font family chosen on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FontFamily {
    #[default]
    Times,
    Helvetica,
    Courier,
    Georgia,
    Verdana,
    Sinhala,
}

/// Base fonts available to the PDF engine without embedding anything extra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfBaseFont {
    Times,
    Helvetica,
    Courier,
}

impl PdfBaseFont {
    /// Engine name of the base font
    pub fn name(&self) -> &'static str {
        match self {
            Self::Times => "times",
            Self::Helvetica => "helvetica",
            Self::Courier => "courier",
        }
    }
}

/// Concrete font names for every render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontDescriptor {
    /// The logical family this descriptor was resolved from
    pub family: FontFamily,
    /// CSS `font-family` stack for the live preview
    pub preview: &'static str,
    /// PDF engine base font
    pub pdf: PdfBaseFont,
    /// Font name written into DOCX run properties
    pub docx: &'static str,
}

impl FontFamily {
    pub const ALL: [FontFamily; 6] = [
        Self::Times,
        Self::Helvetica,
        Self::Courier,
        Self::Georgia,
        Self::Verdana,
        Self::Sinhala,
    ];

    /// Resolve a form token; unknown or empty tokens fall back to Times
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "helvetica" => Self::Helvetica,
            "courier" => Self::Courier,
            "georgia" => Self::Georgia,
            "verdana" => Self::Verdana,
            "sinhala" => Self::Sinhala,
            _ => Self::Times,
        }
    }

    /// The form token for this family
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Times => "times",
            Self::Helvetica => "helvetica",
            Self::Courier => "courier",
            Self::Georgia => "georgia",
            Self::Verdana => "verdana",
            Self::Sinhala => "sinhala",
        }
    }

    /// Concrete names for preview, PDF and DOCX
    pub fn resolve(self) -> FontDescriptor {
        let (preview, pdf, docx) = match self {
            Self::Times => ("\"Times New Roman\", serif", PdfBaseFont::Times, "Times New Roman"),
            Self::Helvetica => ("Arial, sans-serif", PdfBaseFont::Helvetica, "Arial"),
            Self::Courier => ("\"Courier New\", monospace", PdfBaseFont::Courier, "Courier New"),
            // no native PDF match for the next three
            Self::Georgia => ("Georgia, serif", PdfBaseFont::Times, "Georgia"),
            Self::Verdana => ("Verdana, sans-serif", PdfBaseFont::Helvetica, "Verdana"),
            Self::Sinhala => (
                "\"Iskoola Pota\", \"Nirmala UI\", sans-serif",
                PdfBaseFont::Times,
                "Iskoola Pota",
            ),
        };

        FontDescriptor {
            family: self,
            preview,
            pdf,
            docx,
        }
    }

    /// Whether the PDF base fonts lack the glyphs this family needs
    pub fn pdf_glyphs_unsupported(&self) -> bool {
        matches!(self, Self::Sinhala)
    }
}

impl From<String> for FontFamily {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_table() {
        let d = FontFamily::Helvetica.resolve();
        assert_eq!(d.preview, "Arial, sans-serif");
        assert_eq!(d.pdf, PdfBaseFont::Helvetica);
        assert_eq!(d.docx, "Arial");

        let d = FontFamily::Georgia.resolve();
        assert_eq!(d.pdf.name(), "times");
        assert_eq!(d.docx, "Georgia");

        let d = FontFamily::Verdana.resolve();
        assert_eq!(d.pdf.name(), "helvetica");

        let d = FontFamily::Sinhala.resolve();
        assert!(d.preview.contains("Iskoola Pota"));
        assert!(d.preview.contains("Nirmala UI"));
        assert_eq!(d.docx, "Iskoola Pota");
    }

    #[test]
    fn test_resolution_is_total() {
        let tokens = [
            "times", "helvetica", "courier", "georgia", "verdana", "sinhala", "", "comic-sans",
        ];
        for token in tokens {
            let d = FontFamily::from_token(token).resolve();
            assert!(!d.preview.is_empty(), "preview empty for {:?}", token);
            assert!(!d.pdf.name().is_empty(), "pdf empty for {:?}", token);
            assert!(!d.docx.is_empty(), "docx empty for {:?}", token);
        }
    }

    #[test]
    fn test_unknown_falls_back_to_times_everywhere() {
        let unknown = FontFamily::from_token("wingdings").resolve();
        let times = FontFamily::Times.resolve();
        assert_eq!(unknown, times);
        assert_eq!(FontFamily::from_token(""), FontFamily::Times);
    }

    #[test]
    fn test_token_roundtrip() {
        for family in FontFamily::ALL {
            assert_eq!(FontFamily::from_token(family.as_str()), family);
        }
    }

    #[test]
    fn test_deserialize_unknown_token() {
        let family: FontFamily = serde_json::from_str("\"papyrus\"").unwrap();
        assert_eq!(family, FontFamily::Times);
        let family: FontFamily = serde_json::from_str("\"Verdana\"").unwrap();
        assert_eq!(family, FontFamily::Verdana);
    }

    #[test]
    fn test_only_sinhala_lacks_pdf_glyphs() {
        for family in FontFamily::ALL {
            assert_eq!(
                family.pdf_glyphs_unsupported(),
                family == FontFamily::Sinhala
            );
        }
    }
}
