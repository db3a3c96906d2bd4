//! Persona client port
//!
//! Defines the interface for communicating with the LLM backends behind
//! the three personas. The orchestrator never branches on a concrete
//! backend; implementations (adapters) live in the infrastructure layer
//! and differ only in wire-level request shape and streaming mechanics.

use arena_domain::{Message, StreamEvent};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during a persona backend call
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Handle for receiving streaming events from a persona generation.
///
/// Wraps an `mpsc::Receiver<StreamEvent>` and provides convenience
/// methods for consuming the stream.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Consume the stream and collect all text into a single string.
    ///
    /// The concatenation of `Delta` chunks in arrival order equals the
    /// final text; a bare `Completed` (no preceding deltas) carries the
    /// full text itself.
    pub async fn collect_text(mut self) -> Result<String, ClientError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(ClientError::RequestFailed(e));
                }
            }
        }
        // Channel closed without Completed; return what we have
        Ok(full_text)
    }
}

/// A text-generation backend behind one of the three personas.
///
/// Implementations must accept an empty `history` by treating the
/// system prompt as the sole content of the request (the judge is
/// invoked single-shot this way). Calls are never retried here; a
/// failure surfaces as a single error to the orchestrator.
#[async_trait]
pub trait PersonaClient: Send + Sync {
    /// Model identifier, for display and logging.
    fn model(&self) -> &str;

    /// Generate a reply given system instructions and message history.
    async fn generate(&self, system_prompt: &str, history: &[Message]) -> Result<String, ClientError>;

    /// Generate a reply as a stream of incremental chunks.
    ///
    /// Default implementation calls `generate()` and wraps the result
    /// in a single `Completed` event, so batch-only implementations
    /// work without changes.
    async fn generate_streaming(
        &self,
        system_prompt: &str,
        history: &[Message],
    ) -> Result<StreamHandle, ClientError> {
        let result = self.generate(system_prompt, history).await?;
        let (tx, rx) = mpsc::channel(1);
        // If the receiver is dropped, that's fine
        let _ = tx.send(StreamEvent::Completed(result)).await;
        Ok(StreamHandle::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoClient;

    #[async_trait]
    impl PersonaClient for EchoClient {
        fn model(&self) -> &str {
            "echo"
        }

        async fn generate(
            &self,
            system_prompt: &str,
            _history: &[Message],
        ) -> Result<String, ClientError> {
            Ok(system_prompt.to_string())
        }
    }

    #[tokio::test]
    async fn default_streaming_wraps_batch_result() {
        let client = EchoClient;
        let handle = client.generate_streaming("hello", &[]).await.unwrap();
        assert_eq!(handle.collect_text().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn collect_text_concatenates_deltas_in_order() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(StreamEvent::Delta("a".into())).await.unwrap();
        tx.send(StreamEvent::Delta("b".into())).await.unwrap();
        tx.send(StreamEvent::Completed("ab".into())).await.unwrap();
        drop(tx);

        let text = StreamHandle::new(rx).collect_text().await.unwrap();
        assert_eq!(text, "ab");
    }

    #[tokio::test]
    async fn collect_text_surfaces_stream_error() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(StreamEvent::Delta("partial".into())).await.unwrap();
        tx.send(StreamEvent::Error("boom".into())).await.unwrap();
        drop(tx);

        let err = StreamHandle::new(rx).collect_text().await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed(_)));
    }
}
