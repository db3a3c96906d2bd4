//! Summary report use case
//!
//! A separate, on-demand single-shot judge invocation over the full
//! transcript, truncated to a bounded character budget, producing a
//! structured report (original question, three contested issues,
//! turning point, one practical takeaway).

use crate::ports::persona_client::{ClientError, PersonaClient};
use arena_domain::{head_chars, render_transcript, PersonaPrompt, Turn};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Character budget for the transcript excerpt sent to the analyst.
pub const SUMMARY_LOG_CHARS: usize = 20_000;

/// Errors from summary generation
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Nothing to summarize: the transcript is empty")]
    EmptyTranscript,

    #[error("Summary generation failed: {0}")]
    Generation(#[from] ClientError),
}

/// Use case for generating the post-debate summary report
pub struct SummarizeUseCase {
    analyst: Arc<dyn PersonaClient>,
}

impl SummarizeUseCase {
    pub fn new(analyst: Arc<dyn PersonaClient>) -> Self {
        Self { analyst }
    }

    pub async fn execute(&self, transcript: &[Turn]) -> Result<String, SummarizeError> {
        if transcript.is_empty() {
            return Err(SummarizeError::EmptyTranscript);
        }

        let log = render_transcript(transcript);
        let excerpt = head_chars(&log, SUMMARY_LOG_CHARS);
        let prompt = PersonaPrompt::summary(excerpt);

        info!("Generating summary report ({} chars of log)", excerpt.len());
        let report = self.analyst.generate(&prompt, &[]).await?;
        Ok(report)
    }
}
