//! File text extraction for debate attachments.
//!
//! Plain text and markdown are read as-is. PDF extraction is compiled
//! in behind the `pdf` feature; without it, attaching a PDF reports a
//! descriptive error instead of silently degrading.

use arena_application::{ExtractError, TextExtractor};
use std::path::Path;
#[cfg(feature = "pdf")]
use tracing::debug;

pub struct FileTextExtractor;

impl FileTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn read_plain(path: &Path) -> Result<String, ExtractError> {
        std::fs::read_to_string(path).map_err(|e| ExtractError::Io(e.to_string()))
    }

    #[cfg(feature = "pdf")]
    fn read_pdf(path: &Path) -> Result<String, ExtractError> {
        let document =
            lopdf::Document::load(path).map_err(|e| ExtractError::Io(e.to_string()))?;

        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        let text = document
            .extract_text(&pages)
            .map_err(|e| ExtractError::PdfUnavailable(e.to_string()))?;

        debug!(pages = pages.len(), "Extracted PDF text");
        Ok(text)
    }

    #[cfg(not(feature = "pdf"))]
    fn read_pdf(_path: &Path) -> Result<String, ExtractError> {
        Err(ExtractError::PdfUnavailable(
            "built without the 'pdf' feature".to_string(),
        ))
    }
}

impl Default for FileTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for FileTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" | "md" => Self::read_plain(path),
            "pdf" => Self::read_pdf(path),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_txt_and_md_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["notes.txt", "notes.md"] {
            let path = dir.path().join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "quarterly numbers").unwrap();

            let text = FileTextExtractor::new().extract(&path).unwrap();
            assert!(text.contains("quarterly numbers"));
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("NOTES.TXT");
        std::fs::write(&path, "content").unwrap();

        assert!(FileTextExtractor::new().extract(&path).is_ok());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = FileTextExtractor::new()
            .extract(Path::new("slides.pptx"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(e) if e == "pptx"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FileTextExtractor::new()
            .extract(Path::new("/nonexistent/notes.txt"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn pdf_without_feature_reports_unavailable() {
        let err = FileTextExtractor::new()
            .extract(Path::new("report.pdf"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::PdfUnavailable(_)));
    }
}
