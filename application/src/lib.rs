//! Application layer for debate-arena
//!
//! This crate contains use cases and port definitions. It depends only
//! on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    persona_client::{ClientError, PersonaClient, StreamHandle},
    presenter::{DebatePresenter, NoPresenter},
    search_provider::{SearchError, SearchProvider},
    text_extractor::{ExtractError, TextExtractor},
    transcript_writer::{ExportWriteError, TranscriptWriter},
};
pub use use_cases::run_debate::{
    DebateOrchestrator, PersonaClients, RunDebateError, SearchSettings,
};
pub use use_cases::search_decision::{SearchDecision, SearchDecisionAgent};
pub use use_cases::summarize::{SummarizeError, SummarizeUseCase};
