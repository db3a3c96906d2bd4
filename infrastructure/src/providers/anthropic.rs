//! Anthropic Messages API adapter.
//!
//! The system prompt rides in the top-level `system` field rather than
//! the message list. Streaming deltas arrive as `content_block_delta`
//! events with `delta.text`; `message_stop` ends the stream.

use super::sse::SseBuffer;
use super::{http_client, map_transport_error, DEFAULT_GENERATION_TIMEOUT};
use std::time::Duration;
use arena_application::{ClientError, PersonaClient, StreamHandle};
use arena_domain::{ChatRole, Message, StreamEvent};
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

pub struct AnthropicClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: http_client(DEFAULT_GENERATION_TIMEOUT),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    fn request_body(&self, system_prompt: &str, history: &[Message], stream: bool) -> Value {
        // The message list must be non-empty and start with a user turn;
        // an empty history collapses to a single-shot user message.
        if history.is_empty() {
            return json!({
                "model": self.model,
                "max_tokens": MAX_TOKENS,
                "messages": [{"role": "user", "content": system_prompt}],
                "stream": stream,
            });
        }

        let messages: Vec<Value> = history
            .iter()
            .map(|m| {
                let role = match m.role {
                    ChatRole::Assistant => "assistant",
                    _ => "user",
                };
                json!({"role": role, "content": m.content})
            })
            .collect();

        json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "system": system_prompt,
            "messages": messages,
            "stream": stream,
        })
    }

    async fn send(
        &self,
        system_prompt: &str,
        history: &[Message],
        stream: bool,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.request_body(system_prompt, history, stream))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::RequestFailed(format!("{}: {}", status, body)));
        }
        Ok(response)
    }
}

#[async_trait]
impl PersonaClient for AnthropicClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        system_prompt: &str,
        history: &[Message],
    ) -> Result<String, ClientError> {
        let response = self.send(system_prompt, history, false).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        // Concatenate all text blocks; tool-use blocks never appear here
        let blocks = body["content"]
            .as_array()
            .ok_or_else(|| ClientError::InvalidResponse("No content blocks".to_string()))?;

        let text: String = blocks
            .iter()
            .filter_map(|b| b["text"].as_str())
            .collect();

        if text.is_empty() {
            return Err(ClientError::InvalidResponse("Empty completion".to_string()));
        }
        Ok(text)
    }

    async fn generate_streaming(
        &self,
        system_prompt: &str,
        history: &[Message],
    ) -> Result<StreamHandle, ClientError> {
        let response = self.send(system_prompt, history, true).await?;
        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let mut body_stream = response.bytes_stream();
            let mut sse = SseBuffer::new();
            let mut full_text = String::new();

            while let Some(chunk) = body_stream.next().await {
                let chunk = match chunk {
                    Ok(c) => c,
                    Err(e) => {
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                };

                for payload in sse.push(&chunk) {
                    if !forward_event(&payload, &mut full_text, &tx).await {
                        return;
                    }
                }
            }

            // A trailing payload may lack the final newline
            if let Some(payload) = sse.finish()
                && !forward_event(&payload, &mut full_text, &tx).await
            {
                return;
            }

            let _ = tx.send(StreamEvent::Completed(full_text)).await;
        });

        Ok(StreamHandle::new(rx))
    }
}

/// Forward one stream event. Returns false once the stream is over,
/// whether by `message_stop`, an error event, or a gone receiver.
async fn forward_event(
    payload: &str,
    full_text: &mut String,
    tx: &mpsc::Sender<StreamEvent>,
) -> bool {
    let Ok(event) = serde_json::from_str::<Value>(payload) else {
        debug!("Skipping unparseable stream event");
        return true;
    };
    match event["type"].as_str() {
        Some("content_block_delta") => {
            if let Some(delta) = event["delta"]["text"].as_str()
                && !delta.is_empty()
            {
                full_text.push_str(delta);
                if tx.send(StreamEvent::Delta(delta.to_string())).await.is_err() {
                    return false;
                }
            }
            true
        }
        Some("message_stop") => {
            let _ = tx
                .send(StreamEvent::Completed(std::mem::take(full_text)))
                .await;
            false
        }
        Some("error") => {
            let message = event["error"]["message"]
                .as_str()
                .unwrap_or("stream error")
                .to_string();
            let _ = tx.send(StreamEvent::Error(message)).await;
            false
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_rides_in_its_own_field() {
        let client = AnthropicClient::new("key", "claude-sonnet-4-5");
        let history = vec![Message::user("hi")];
        let body = client.request_body("be brief", &history, false);

        assert_eq!(body["system"], "be brief");
        assert_eq!(body["max_tokens"], MAX_TOKENS);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
    }

    #[test]
    fn empty_history_becomes_single_user_message() {
        let client = AnthropicClient::new("key", "claude-sonnet-4-5");
        let body = client.request_body("the whole prompt", &[], false);

        assert!(body.get("system").is_none());
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["content"], "the whole prompt");
    }

    #[test]
    fn system_role_in_history_maps_to_user() {
        let client = AnthropicClient::new("key", "claude-sonnet-4-5");
        let history = vec![Message::system("note"), Message::assistant("ok")];
        let body = client.request_body("sys", &history, false);

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
    }
}
