//! Web search port
//!
//! Best-effort evidence gathering for a single turn. Zero results map
//! to `Ok(None)` ("no evidence, proceed without"); transport failures
//! map to an error that the orchestrator logs and likewise treats as
//! absence of evidence. A search never aborts a turn.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the search backend
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Search response malformed: {0}")]
    InvalidResponse(String),

    #[error("Search timed out")]
    Timeout,
}

/// A web text-search service.
///
/// Implementations format results as a numbered list of
/// `title: snippet (Source: url)` lines, in provider-returned order.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Option<String>, SearchError>;
}
