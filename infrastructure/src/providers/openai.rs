//! OpenAI Chat Completions adapter.

use super::sse::SseBuffer;
use super::{http_client, map_transport_error, DEFAULT_GENERATION_TIMEOUT};
use std::time::Duration;
use arena_application::{ClientError, PersonaClient, StreamHandle};
use arena_domain::{Message, StreamEvent};
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiClient {
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
        // An empty history means single-shot: the prompt is the content.
        let messages: Vec<Value> = if history.is_empty() {
            vec![json!({"role": "user", "content": system_prompt})]
        } else {
            std::iter::once(json!({"role": "system", "content": system_prompt}))
                .chain(history.iter().map(|m| json!({"role": m.role, "content": m.content})))
                .collect()
        };

        json!({
            "model": self.model,
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
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
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
impl PersonaClient for OpenAiClient {
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

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ClientError::InvalidResponse("No completion content".to_string()))
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
                    if !forward_payload(&payload, &mut full_text, &tx).await {
                        return;
                    }
                }
            }

            // A trailing payload may lack the final newline
            if let Some(payload) = sse.finish()
                && !forward_payload(&payload, &mut full_text, &tx).await
            {
                return;
            }

            // Stream ended without a [DONE] marker
            let _ = tx.send(StreamEvent::Completed(full_text)).await;
        });

        Ok(StreamHandle::new(rx))
    }
}

/// Forward one SSE payload. Returns false once the stream is over,
/// either because `[DONE]` arrived or the receiver is gone.
async fn forward_payload(
    payload: &str,
    full_text: &mut String,
    tx: &mpsc::Sender<StreamEvent>,
) -> bool {
    if payload == "[DONE]" {
        let _ = tx
            .send(StreamEvent::Completed(std::mem::take(full_text)))
            .await;
        return false;
    }
    let Ok(event) = serde_json::from_str::<Value>(payload) else {
        debug!("Skipping unparseable stream event");
        return true;
    };
    if let Some(delta) = event["choices"][0]["delta"]["content"].as_str()
        && !delta.is_empty()
    {
        full_text.push_str(delta);
        if tx.send(StreamEvent::Delta(delta.to_string())).await.is_err() {
            return false;
        }
    }
    true
}
