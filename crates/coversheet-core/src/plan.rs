//! Rendering plan shared by preview, PDF and DOCX
//!
//! The plan is recomputed from a [`FormState`] whenever a renderer needs it.
//! Every renderer reads the same transformed strings and colours from here,
//! so none of them applies its own case or font logic.

use serde::Serialize;

use crate::case::CaseMode;
use crate::color::Color;
use crate::font::FontDescriptor;
use crate::form::{clamp_title_size, FormState};
use crate::logo::Logo;
use crate::naming::{export_file_name, ExportTarget};

/// Label of the student name line
pub const NAME_LABEL: &str = "Name:";
/// Label of the student index line
pub const INDEX_LABEL: &str = "Index No:";
/// Label of the submission date line
pub const DATE_LABEL: &str = "Date:";

/// One labelled line of the student detail block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

/// Notice shown to the user before an export starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advisory {
    /// The chosen family needs glyphs the PDF base fonts do not have
    PdfGlyphsUnsupported,
}

impl Advisory {
    /// Text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::PdfGlyphsUnsupported => {
                "PDF generation for Sinhala characters may not render correctly because the \
                 PDF base fonts lack those glyphs. For best results with Sinhala text, use the \
                 Word (DOCX) export instead."
            }
        }
    }
}

/// Format-independent description of the cover sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderingPlan {
    /// Concrete font names per target
    pub font: FontDescriptor,
    /// Institution name, always upper-cased
    pub institution: String,
    pub faculty: String,
    pub module: String,
    /// Assignment title after the case transform
    pub title: String,
    pub title_case: CaseMode,
    /// Title size in points
    pub title_size: u32,
    pub theme_color: Color,
    pub page_color: Color,
    pub faculty_color: Color,
    pub body_color: Color,
    /// Name, index and (when present) date
    pub details: Vec<DetailLine>,
    pub student_name: String,
    pub student_id: String,
    pub logo: Option<Logo>,
}

impl RenderingPlan {
    /// Derive the plan for a form snapshot
    pub fn from_form(form: &FormState) -> Self {
        let mut details = vec![
            DetailLine {
                label: NAME_LABEL,
                value: form.student_name.clone(),
            },
            DetailLine {
                label: INDEX_LABEL,
                value: form.student_id.clone(),
            },
        ];
        if !form.submission_date.trim().is_empty() {
            details.push(DetailLine {
                label: DATE_LABEL,
                value: form.submission_date.clone(),
            });
        }

        let plan = Self {
            font: form.font_family.resolve(),
            institution: form.university.to_uppercase(),
            faculty: form.faculty.clone(),
            module: form.module.clone(),
            title: form.title_case.apply(&form.assignment_title),
            title_case: form.title_case,
            title_size: clamp_title_size(form.title_size),
            theme_color: form.theme_color,
            page_color: form.page_color,
            faculty_color: Color::FACULTY_GREY,
            body_color: Color::BLACK,
            details,
            student_name: form.student_name.clone(),
            student_id: form.student_id.clone(),
            logo: form.logo.clone(),
        };

        tracing::debug!(
            font = plan.font.family.as_str(),
            case = plan.title_case.as_str(),
            has_logo = plan.logo.is_some(),
            "derived rendering plan"
        );
        plan
    }

    /// Notices to show before a PDF export
    pub fn pdf_advisories(&self) -> Vec<Advisory> {
        let mut advisories = Vec::new();
        if self.font.family.pdf_glyphs_unsupported() {
            advisories.push(Advisory::PdfGlyphsUnsupported);
        }
        advisories
    }

    /// Notices to show before exporting to `target`
    pub fn advisories(&self, target: ExportTarget) -> Vec<Advisory> {
        match target {
            ExportTarget::Pdf => self.pdf_advisories(),
            ExportTarget::Docx => Vec::new(),
        }
    }

    /// Download file name for `target`
    pub fn file_name(&self, target: ExportTarget) -> String {
        export_file_name(&self.student_id, target)
    }

    /// Whether the date line is part of the detail block
    pub fn has_date(&self) -> bool {
        self.details.iter().any(|d| d.label == DATE_LABEL)
    }
}

/// A document library behind the narrow "plan in, bytes out" seam
pub trait CoverRenderer {
    /// Error reported by the underlying library
    type Error: std::error::Error + Send + Sync + 'static;

    /// Which export this renderer produces
    fn target(&self) -> ExportTarget;

    /// Produce the complete document for `plan`
    fn render(&self, plan: &RenderingPlan) -> std::result::Result<Vec<u8>, Self::Error>;
}
