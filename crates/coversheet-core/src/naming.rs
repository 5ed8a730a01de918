//! Export targets and download file names

use serde::{Deserialize, Serialize};

/// Fallback used when no student id was entered
pub const DEFAULT_FILE_STEM: &str = "Assignment";

/// Document formats the cover sheet can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTarget {
    Pdf,
    Docx,
}

impl ExportTarget {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// Resolve an extension or format name
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// `CoverSheet_<studentId>.<ext>`, or `CoverSheet_Assignment.<ext>` without an id
///
/// Path separators in the id are replaced so the file always lands in the
/// chosen output directory.
pub fn export_file_name(student_id: &str, target: ExportTarget) -> String {
    let stem = if student_id.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        student_id.replace(['/', '\\'], "_")
    };
    format!("CoverSheet_{}.{}", stem, target.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_student_id() {
        assert_eq!(export_file_name("S123", ExportTarget::Pdf), "CoverSheet_S123.pdf");
        assert_eq!(
            export_file_name("S123", ExportTarget::Docx),
            "CoverSheet_S123.docx"
        );
    }

    #[test]
    fn test_without_student_id() {
        assert_eq!(
            export_file_name("", ExportTarget::Pdf),
            "CoverSheet_Assignment.pdf"
        );
    }

    #[test]
    fn test_separators_replaced() {
        assert_eq!(
            export_file_name("2024/CS\\01", ExportTarget::Docx),
            "CoverSheet_2024_CS_01.docx"
        );
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ExportTarget::from_extension(".PDF"), Some(ExportTarget::Pdf));
        assert_eq!(ExportTarget::from_extension("docx"), Some(ExportTarget::Docx));
        assert_eq!(ExportTarget::from_extension("odt"), None);
    }
}
