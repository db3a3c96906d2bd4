//! Plain-text transcript export.
//!
//! One block per turn: `[RoleLabel]`, the content, then a dashed
//! separator line, in transcript order. The block format is also
//! parseable so exports can be verified (and re-read) mechanically.

use crate::debate::turn::Turn;

const SEPARATOR_LEN: usize = 50;

/// Render the transcript as a downloadable plain-text log.
pub fn render_transcript(transcript: &[Turn]) -> String {
    let separator = "-".repeat(SEPARATOR_LEN);
    let mut log = String::new();
    for turn in transcript {
        log.push_str(&format!(
            "\n[{}]\n{}\n{}\n",
            turn.speaker.label(),
            turn.content,
            separator
        ));
    }
    log
}

/// A parsed export block: role label and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBlock {
    pub label: String,
    pub content: String,
}

/// Parse an exported log back into its blocks.
///
/// Inverse of [`render_transcript`] for well-formed input: the returned
/// block count and order match the original transcript.
pub fn parse_transcript(log: &str) -> Vec<ExportBlock> {
    let separator = "-".repeat(SEPARATOR_LEN);
    let mut blocks = Vec::new();

    for chunk in log.split(&separator) {
        let chunk = chunk.trim_matches('\n');
        if chunk.is_empty() {
            continue;
        }
        let Some(rest) = chunk.strip_prefix('[') else {
            continue;
        };
        let Some(close) = rest.find(']') else {
            continue;
        };
        let label = rest[..close].to_string();
        let content = rest[close + 1..].trim_start_matches('\n').to_string();
        blocks.push(ExportBlock { label, content });
    }

    blocks
}
