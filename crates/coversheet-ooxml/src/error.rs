//! Error types for DOCX generation

use thiserror::Error;

/// Errors that can occur while building a DOCX package
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content of a template part
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Required part not found in a template
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// The template is not a WordprocessingML package
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
