//! Plain-text transcript export to a timestamped file.

use arena_application::{ExportWriteError, TranscriptWriter};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes transcript exports under a configured directory.
///
/// Files are named `debate_YYYYMMDD_HHMMSS.txt`; the directory is
/// created on first write.
pub struct FileTranscriptWriter {
    dir: PathBuf,
}

impl FileTranscriptWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn next_path(&self) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        self.dir.join(format!("debate_{}.txt", stamp))
    }
}

impl TranscriptWriter for FileTranscriptWriter {
    fn write(&self, rendered: &str) -> Result<PathBuf, ExportWriteError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| ExportWriteError::Io(e.to_string()))?;

        let path = self.next_path();
        std::fs::write(&path, rendered).map_err(|e| ExportWriteError::Io(e.to_string()))?;

        info!("Transcript exported to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_transcript_under_the_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileTranscriptWriter::new(dir.path().join("exports"));

        let path = writer.write("[User]\nquestion\n").unwrap();
        assert!(path.starts_with(dir.path().join("exports")));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("debate_"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[User]"));
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the export dir should be
        let blocker = dir.path().join("exports");
        std::fs::write(&blocker, "not a directory").unwrap();

        let writer = FileTranscriptWriter::new(&blocker);
        assert!(matches!(
            writer.write("content"),
            Err(ExportWriteError::Io(_))
        ));
    }
}
