//! Transcript export port
//!
//! Persists the plain-text rendering of a transcript as a downloadable
//! artifact. The rendering itself is domain logic
//! ([`render_transcript`](arena_domain::render_transcript)); this port
//! only covers where the bytes go.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from writing a transcript export
#[derive(Error, Debug)]
pub enum ExportWriteError {
    #[error("Could not write transcript: {0}")]
    Io(String),
}

/// Writes a rendered transcript somewhere durable.
pub trait TranscriptWriter: Send + Sync {
    /// Write `rendered` and return the path of the artifact.
    fn write(&self, rendered: &str) -> Result<PathBuf, ExportWriteError>;
}
