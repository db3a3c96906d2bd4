//! File text-extraction port
//!
//! Turns an uploaded file (plain text, markdown, or PDF) into text for
//! inclusion in a user submission. Extraction failures are descriptive
//! errors; callers must never merge an error message into the prompt as
//! if it were real content.

use std::path::Path;
use thiserror::Error;

/// Errors from file text extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction unavailable: {0}")]
    PdfUnavailable(String),

    #[error("File error: {0}")]
    Io(String),
}

/// Extracts plain text from an attached file.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}
