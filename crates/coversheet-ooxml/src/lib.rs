//! # coversheet-ooxml
//!
//! WordprocessingML (DOCX) export for cover sheets.
//!
//! This crate provides functionality to:
//! - Generate a complete DOCX package from a rendering plan
//! - Build on top of a user `.dotx`/`.docx` template
//! - Embed the institution logo as an inline picture
//!
//! ## Example
//!
//! ```no_run
//! use coversheet_core::FormState;
//! use coversheet_ooxml::{DocxWriter, Template};
//!
//! let plan = FormState::new().plan();
//! let writer = DocxWriter::with_template(Template::load("corporate.dotx")?);
//! std::fs::write("CoverSheet_Assignment.docx", writer.generate(&plan)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod content_types;
pub mod document;
pub mod error;
pub mod image;
pub mod parts;
pub mod relationships;
pub mod template;
pub mod writer;
pub mod xml;

#[cfg(test)]
pub(crate) mod test_utils;

pub use archive::OoxmlArchive;
pub use content_types::ContentTypes;
pub use document::{DocumentBuilder, ReferenceKind, SectionReference};
pub use error::{OoxmlError, Result};
pub use relationships::Relationships;
pub use template::Template;
pub use writer::DocxWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
