//! Typst to PDF compiler
//!
//! Compiles cover sheet markup to PDF bytes using typst-as-lib. System
//! fonts and the fonts embedded in typst-kit are always available; user
//! font files are added on top of them.

use std::path::Path;

use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_as_lib::TypstEngine;

use crate::error::{PdfError, Result};

/// Compiler for converting Typst markup to PDF
pub struct Compiler;

impl Compiler {
    /// Compile Typst markup to PDF bytes
    pub fn compile(markup: &str) -> Result<Vec<u8>> {
        Self::compile_with_font_data(markup, Vec::new())
    }

    /// Compile with font files read from disk
    pub fn compile_with_fonts<P: AsRef<Path>>(markup: &str, font_paths: &[P]) -> Result<Vec<u8>> {
        let fonts = font_paths
            .iter()
            .map(read_font)
            .collect::<Result<Vec<_>>>()?;
        Self::compile_with_font_data(markup, fonts)
    }

    /// Compile with fonts already in memory
    pub fn compile_with_font_data(markup: &str, fonts: Vec<Vec<u8>>) -> Result<Vec<u8>> {
        let font_count = fonts.len();
        let mut builder = TypstEngine::builder()
            .main_file(markup.to_string())
            .search_fonts_with(TypstKitFontOptions::default());
        for font in fonts {
            builder = builder.fonts([font]);
        }
        let engine = builder.build();

        // compiled.output is the Result, compiled.warnings holds the rest
        let compiled = engine.compile();
        for warning in compiled.warnings.iter() {
            tracing::debug!(warning = ?warning.message, "typst warning");
        }
        let document = compiled
            .output
            .map_err(|e| PdfError::Compilation(format!("{:?}", e)))?;

        let options = typst_pdf::PdfOptions::default();
        let pdf_bytes = typst_pdf::pdf(&document, &options)
            .map_err(|e| PdfError::Compilation(format!("PDF generation failed: {:?}", e)))?;

        tracing::debug!(fonts = font_count, bytes = pdf_bytes.len(), "compiled PDF");
        Ok(pdf_bytes.into())
    }
}

/// Read a font file, reporting the path on failure
pub(crate) fn read_font<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path)
        .map_err(|e| PdfError::Font(format!("Failed to read font {}: {}", path.display(), e)))
}
