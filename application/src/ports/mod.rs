//! Ports (interfaces) for external collaborators

pub mod persona_client;
pub mod presenter;
pub mod search_provider;
pub mod text_extractor;
pub mod transcript_writer;
