//! Transcript persistence.

pub mod export_writer;

pub use export_writer::FileTranscriptWriter;
