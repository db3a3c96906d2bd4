//! Minimal server-sent-events framing shared by the provider adapters.
//!
//! All three providers stream as `data: {json}` lines. Events are
//! separated by blank lines; chunk boundaries from the transport do not
//! align with event boundaries, so a line buffer is required.

/// Incremental SSE line buffer.
///
/// Feed raw transport chunks with [`push`](SseBuffer::push); it yields
/// the `data:` payloads of every complete line seen so far. Buffering
/// happens on raw bytes and decoding on whole lines only, so a
/// multibyte character split across transport chunks stays intact.
#[derive(Default)]
pub(crate) struct SseBuffer {
    buffer: Vec<u8>,
}

impl SseBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a transport chunk and drain complete `data:` payloads.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);

            if let Some(payload) = Self::data_payload(line.trim_end_matches(['\n', '\r'])) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Flush a trailing payload that arrived without a final newline.
    pub(crate) fn finish(self) -> Option<String> {
        let tail = String::from_utf8_lossy(&self.buffer);
        Self::data_payload(tail.trim_end())
    }

    fn data_payload(line: &str) -> Option<String> {
        let rest = line.strip_prefix("data:")?;
        let rest = rest.trim();
        if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        }
    }
}
