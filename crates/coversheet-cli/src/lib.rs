//! coversheet CLI - Command-line interface library
//!
//! This library provides the CLI functionality for coversheet:
//! - Pdf: Export the cover sheet as PDF
//! - Docx: Export the cover sheet as DOCX
//! - Preview: Render the live preview as HTML or JSON
//! - Init: Write a starter form file
//!
//! # Binary Usage
//!
//! ```bash
//! # Start from a form file
//! coversheet init
//!
//! # Export, overriding single fields
//! coversheet pdf --form coversheet.toml --title "final report" --case uppercase
//! coversheet docx --form coversheet.toml --template corporate.dotx --out-dir dist/
//!
//! # Inspect the preview
//! coversheet preview --form coversheet.toml --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{docx_command, init_command, pdf_command, preview_command, preview_output};
pub use app::{log_filter, run_cli, FieldArgs, LoadedForm, PreviewFormat};
