//! coversheet-core - Academic cover sheets, one source of truth
//!
//! Shared field transformer behind every cover-sheet renderer. A
//! [`FormState`] snapshot is turned into a [`RenderingPlan`], which the live
//! preview, the PDF exporter and the DOCX writer all read from.
//!
//! # Example
//!
//! ```
//! use coversheet_core::{CaseMode, ExportTarget, FormEvent, FormField, FormState, PreviewRenderer};
//!
//! let form = FormState::new().apply_all([
//!     FormEvent::SetField(FormField::University, "Test University".into()),
//!     FormEvent::SetField(FormField::AssignmentTitle, "final report".into()),
//!     FormEvent::SetField(FormField::StudentId, "S123".into()),
//!     FormEvent::SetTitleCase(CaseMode::Uppercase),
//! ]);
//!
//! let plan = form.plan();
//! assert_eq!(plan.institution, "TEST UNIVERSITY");
//! assert_eq!(plan.title, "FINAL REPORT");
//! assert_eq!(plan.file_name(ExportTarget::Pdf), "CoverSheet_S123.pdf");
//!
//! let html = PreviewRenderer::new().render(&plan).to_html();
//! assert!(html.contains("FINAL REPORT"));
//! ```

pub mod case;
pub mod color;
pub mod error;
pub mod font;
pub mod form;
pub mod layout;
pub mod logo;
pub mod naming;
pub mod plan;
pub mod preview;
pub mod settings;

// Re-export main types
pub use case::CaseMode;
pub use color::Color;
pub use error::{CoreError, Result};
pub use font::{FontDescriptor, FontFamily, PdfBaseFont};
pub use form::{FormEvent, FormField, FormState};
pub use layout::{BlockRole, CoverLayout};
pub use logo::{ImageFormat, Logo};
pub use naming::{export_file_name, ExportTarget};
pub use plan::{Advisory, CoverRenderer, DetailLine, RenderingPlan};
pub use preview::{PreviewDocument, PreviewRenderer};
pub use settings::FormSettings;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_same_title_in_every_view() {
        for mode in [
            CaseMode::Uppercase,
            CaseMode::Lowercase,
            CaseMode::Capitalize,
            CaseMode::None,
        ] {
            let plan = FormState::new()
                .apply(FormEvent::SetField(
                    FormField::AssignmentTitle,
                    "the rust book, 2nd ed".into(),
                ))
                .apply(FormEvent::SetTitleCase(mode))
                .plan();

            let preview = PreviewRenderer::new().render(&plan);
            let layout = CoverLayout::plan(&plan);

            assert_eq!(
                preview.element(preview::PreviewSlot::Assignment).unwrap().text,
                plan.title
            );
            assert_eq!(layout.block(BlockRole::Title).unwrap().text, plan.title);
        }
    }
}
