//! Web search via the DuckDuckGo Instant Answer API.
//!
//! Requires no API key. The API returns abstracts, instant answers,
//! definitions, and related topics rather than full result listings;
//! whatever it yields is flattened into numbered evidence lines of the
//! form `{n}. {title}: {snippet} (Source: {url})`.

use arena_application::{SearchError, SearchProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const DDG_API_URL: &str = "https://api.duckduckgo.com/";
const USER_AGENT: &str = "DebateArena/0.3 (Evidence Search)";

/// Search timeout used when no override is configured.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

pub struct DuckDuckGoSearch {
    client: reqwest::Client,
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_SEARCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Option<String>, SearchError> {
        let response = self
            .client
            .get(DDG_API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    SearchError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(SearchError::RequestFailed(format!(
                "Search API returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        let lines = extract_result_lines(&body, max_results);
        if lines.is_empty() {
            debug!(query, "No instant answer available");
            return Ok(None);
        }

        let evidence = lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{}. {}", i + 1, line))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Some(evidence))
    }
}

/// Flatten the instant answer payload into `title: snippet (Source: url)`
/// lines, most authoritative sections first.
fn extract_result_lines(data: &Value, max_results: usize) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(abstract_text) = data["AbstractText"].as_str()
        && !abstract_text.is_empty()
    {
        let source = data["AbstractSource"].as_str().unwrap_or("Unknown");
        let url = data["AbstractURL"].as_str().unwrap_or("");
        lines.push(format!("{}: {} (Source: {})", source, abstract_text, url));
    }

    if let Some(answer) = data["Answer"].as_str()
        && !answer.is_empty()
    {
        lines.push(format!("Instant Answer: {} (Source: DuckDuckGo)", answer));
    }

    if let Some(definition) = data["Definition"].as_str()
        && !definition.is_empty()
    {
        let source = data["DefinitionSource"].as_str().unwrap_or("Unknown");
        lines.push(format!("Definition: {} (Source: {})", definition, source));
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        for topic in topics {
            if lines.len() >= max_results {
                break;
            }
            if let Some(text) = topic["Text"].as_str()
                && !text.is_empty()
            {
                let url = topic["FirstURL"].as_str().unwrap_or("");
                lines.push(format!("Related: {} (Source: {})", text, url));
            }
        }
    }

    lines.truncate(max_results);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abstract_becomes_first_line() {
        let data = serde_json::json!({
            "AbstractText": "Rust is a systems programming language.",
            "AbstractSource": "Wikipedia",
            "AbstractURL": "https://en.wikipedia.org/wiki/Rust",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": [],
        });

        let lines = extract_result_lines(&data, 3);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Wikipedia: Rust is a systems"));
        assert!(lines[0].contains("(Source: https://en.wikipedia.org/wiki/Rust)"));
    }

    #[test]
    fn empty_payload_yields_no_lines() {
        let data = serde_json::json!({
            "AbstractText": "",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": [],
        });
        assert!(extract_result_lines(&data, 3).is_empty());
    }

    #[test]
    fn related_topics_fill_up_to_the_cap() {
        let data = serde_json::json!({
            "AbstractText": "",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": [
                {"Text": "Topic one", "FirstURL": "https://example.com/1"},
                {"Text": "Topic two", "FirstURL": "https://example.com/2"},
                {"Text": "Topic three", "FirstURL": "https://example.com/3"},
            ],
        });

        let lines = extract_result_lines(&data, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Topic one"));
        assert!(lines[1].contains("Topic two"));
    }

    #[test]
    fn nested_topic_groups_without_text_are_skipped() {
        let data = serde_json::json!({
            "AbstractText": "",
            "Answer": "",
            "Definition": "",
            "RelatedTopics": [
                {"Name": "Category", "Topics": []},
                {"Text": "Actual topic", "FirstURL": "https://example.com"},
            ],
        });

        let lines = extract_result_lines(&data, 5);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Actual topic"));
    }
}
