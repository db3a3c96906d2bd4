//! Google Gemini generateContent adapter.
//!
//! The API key travels as a query parameter; roles are `user`/`model`
//! and the system prompt goes into `system_instruction`. Streaming uses
//! `streamGenerateContent?alt=sse`, which emits the same response shape
//! as the batch endpoint in incremental `data:` events.

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

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
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

    fn request_body(&self, system_prompt: &str, history: &[Message]) -> Value {
        if history.is_empty() {
            return json!({
                "contents": [{"role": "user", "parts": [{"text": system_prompt}]}],
            });
        }

        let contents: Vec<Value> = history
            .iter()
            .map(|m| {
                let role = match m.role {
                    ChatRole::Assistant => "model",
                    _ => "user",
                };
                json!({"role": role, "parts": [{"text": m.content}]})
            })
            .collect();

        json!({
            "system_instruction": {"parts": [{"text": system_prompt}]},
            "contents": contents,
        })
    }

    async fn send(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        system_prompt: &str,
        history: &[Message],
    ) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}/models/{}:{}", self.base_url, self.model, endpoint);
        let response = self
            .client
            .post(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(system_prompt, history))
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

/// Pull the concatenated candidate text out of a response payload.
fn extract_text(body: &Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.is_empty() { None } else { Some(text) }
}

#[async_trait]
impl PersonaClient for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        system_prompt: &str,
        history: &[Message],
    ) -> Result<String, ClientError> {
        let response = self
            .send("generateContent", &[], system_prompt, history)
            .await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        extract_text(&body)
            .ok_or_else(|| ClientError::InvalidResponse("No candidate content".to_string()))
    }

    async fn generate_streaming(
        &self,
        system_prompt: &str,
        history: &[Message],
    ) -> Result<StreamHandle, ClientError> {
        let response = self
            .send(
                "streamGenerateContent",
                &[("alt", "sse")],
                system_prompt,
                history,
            )
            .await?;
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
                    if !forward_delta(&payload, &mut full_text, &tx).await {
                        return;
                    }
                }
            }

            // A trailing payload may lack the final newline
            if let Some(payload) = sse.finish()
                && !forward_delta(&payload, &mut full_text, &tx).await
            {
                return;
            }

            let _ = tx.send(StreamEvent::Completed(full_text)).await;
        });

        Ok(StreamHandle::new(rx))
    }
}

/// Forward one incremental candidate. Returns false when the receiver
/// is gone.
async fn forward_delta(
    payload: &str,
    full_text: &mut String,
    tx: &mpsc::Sender<StreamEvent>,
) -> bool {
    let Ok(event) = serde_json::from_str::<Value>(payload) else {
        debug!("Skipping unparseable stream event");
        return true;
    };
    if let Some(delta) = extract_text(&event) {
        full_text.push_str(&delta);
        if tx.send(StreamEvent::Delta(delta)).await.is_err() {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_to_user_and_model() {
        let client = GeminiClient::new("key", "gemini-2.0-flash");
        let history = vec![Message::user("hi"), Message::assistant("hello")];
        let body = client.request_body("sys", &history);

        assert_eq!(body["system_instruction"]["parts"][0]["text"], "sys");
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
    }

    #[test]
    fn empty_history_becomes_single_user_content() {
        let client = GeminiClient::new("key", "gemini-2.0-flash");
        let body = client.request_body("the whole prompt", &[]);

        assert!(body.get("system_instruction").is_none());
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["parts"][0]["text"], "the whole prompt");
    }

    #[test]
    fn extract_text_joins_parts() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Hello "}, {"text": "world"}]}
            }]
        });
        assert_eq!(extract_text(&body), Some("Hello world".to_string()));

        let empty = serde_json::json!({"candidates": []});
        assert_eq!(extract_text(&empty), None);
    }
}
