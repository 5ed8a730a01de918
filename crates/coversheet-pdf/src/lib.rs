//! coversheet-pdf - PDF export via Typst
//!
//! This crate renders a cover sheet [`RenderingPlan`] to a single A4 page
//! using Typst as the typesetting backend.
//!
//! # Architecture
//!
//! The pipeline has two stages:
//!
//! 1. **Transpiler** - Converts the plan's page layout to Typst markup
//! 2. **Compiler** - Compiles Typst markup to PDF bytes
//!
//! # Example
//!
//! ```ignore
//! use coversheet_core::{CoverRenderer, FormState};
//! use coversheet_pdf::PdfExporter;
//!
//! let plan = FormState::new().plan();
//! let pdf_bytes = PdfExporter::new().render(&plan)?;
//! ```

mod compiler;
mod error;
mod transpiler;

use std::path::Path;

use coversheet_core::{CoverRenderer, ExportTarget, RenderingPlan};

pub use compiler::Compiler;
pub use error::{PdfError, Result};
pub use transpiler::{font_families, Transpiler};

/// PDF renderer with optional extra fonts
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    fonts: Vec<Vec<u8>>,
}

impl PdfExporter {
    /// An exporter relying on fonts Typst already knows
    pub fn new() -> Self {
        Self::default()
    }

    /// Add font files, read immediately
    pub fn with_font_files<P: AsRef<Path>>(mut self, paths: &[P]) -> Result<Self> {
        for path in paths {
            self.fonts.push(compiler::read_font(path)?);
        }
        Ok(self)
    }

    /// Add a font already in memory
    pub fn with_font_data(mut self, data: Vec<u8>) -> Self {
        self.fonts.push(data);
        self
    }

    /// Number of extra fonts registered
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }
}

impl CoverRenderer for PdfExporter {
    type Error = PdfError;

    fn target(&self) -> ExportTarget {
        ExportTarget::Pdf
    }

    fn render(&self, plan: &RenderingPlan) -> Result<Vec<u8>> {
        for advisory in plan.pdf_advisories() {
            tracing::warn!(font = plan.font.family.as_str(), "{}", advisory.message());
        }
        let markup = Transpiler::transpile(plan);
        tracing::debug!(chars = markup.len(), "transpiled cover sheet");
        Compiler::compile_with_font_data(&markup, self.fonts.clone())
    }
}

/// Convenience function to render a plan to PDF with default fonts
pub fn render_pdf(plan: &RenderingPlan) -> Result<Vec<u8>> {
    PdfExporter::new().render(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        let _ = Transpiler::transpile;
        let _ = Compiler::compile;
        let _ = render_pdf;
    }

    #[test]
    fn test_exporter_target_and_fonts() {
        let exporter = PdfExporter::new().with_font_data(vec![0, 1, 0, 0]);
        assert_eq!(exporter.target(), ExportTarget::Pdf);
        assert_eq!(exporter.font_count(), 1);
    }

    #[test]
    fn test_missing_font_file_is_font_error() {
        let err = PdfExporter::new()
            .with_font_files(&["/nonexistent/cover.ttf"])
            .unwrap_err();
        assert!(matches!(err, PdfError::Font(_)));
    }
}
