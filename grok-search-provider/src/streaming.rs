//! Response body reassembly for the Chat Completions API.
//!
//! A streamed response is a sequence of SSE lines:
//! ```text
//! data: {"id":"...","choices":[{"delta":{"content":"Hel"}}]}
//!
//! data: {"id":"...","choices":[{"delta":{"content":"lo"}}]}
//!
//! data: [DONE]
//! ```
//!
//! A non-streamed response is one JSON document, possibly pretty-printed over
//! several lines:
//! ```text
//! {"choices":[{"message":{"role":"assistant","content":"Hello"}}]}
//! ```
//!
//! [`Reassembler`] accepts either. Every non-empty line is kept; `data:` lines
//! contribute their delta content as they arrive. If no delta content was seen
//! by the end of the body, the kept lines are joined and parsed once as a
//! whole completion. Malformed lines are dropped, never reported as errors.
//!
//! Reference: <https://docs.x.ai/docs/guides/streaming-response>

use std::time::Duration;

use futures::{Stream, StreamExt};
use grok_search_types::ProviderError;

/// SSE field prefix for event data.
const DATA_PREFIX: &str = "data:";

/// Terminal sentinel sent as the last event of a stream.
const DONE_SENTINEL: &str = "[DONE]";

/// Where the final text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    /// Concatenated `delta.content` fragments from `data:` events.
    Streamed,
    /// `message.content` of a non-streamed completion body.
    Completion,
    /// The body was well-formed but carried no content (or there was no body).
    Empty,
    /// Nothing in the body could be parsed.
    Unparseable,
}

/// The outcome of reassembling one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassembled {
    /// The model's text. Empty is a valid result.
    pub text: String,
    /// How `text` was obtained.
    pub origin: ContentOrigin,
    /// Number of `data:` events that parsed as JSON (the sentinel excluded).
    pub events_parsed: usize,
    /// Number of `data:` events that were dropped as malformed.
    pub events_dropped: usize,
}

/// Incrementally rebuilds the model's text from response body lines.
#[derive(Debug, Default)]
pub struct Reassembler {
    /// Delta content accumulated so far. Only ever appended to.
    content: String,
    /// Every non-empty trimmed line, for the non-streamed fallback.
    raw_lines: Vec<String>,
    events_parsed: usize,
    events_dropped: usize,
}

impl Reassembler {
    /// Create an empty reassembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line of the response body.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.raw_lines.push(line.to_string());

        let Some(data) = line.strip_prefix(DATA_PREFIX) else {
            return;
        };
        let data = data.strip_prefix(' ').unwrap_or(data);
        if data == DONE_SENTINEL {
            return;
        }

        match serde_json::from_str::<serde_json::Value>(data) {
            Ok(event) if event.is_object() => {
                self.events_parsed += 1;
                if let Some(fragment) = delta_content(&event) {
                    self.content.push_str(fragment);
                }
            }
            _ => self.events_dropped += 1,
        }
    }

    /// Number of non-empty lines seen so far.
    pub fn line_count(&self) -> usize {
        self.raw_lines.len()
    }

    /// Finish the body and produce the final text.
    ///
    /// Falls back to parsing the joined lines as a single completion only when
    /// no delta content was accumulated.
    pub fn finish(self) -> Reassembled {
        let Self {
            content,
            raw_lines,
            events_parsed,
            events_dropped,
        } = self;

        let (text, origin) = if !content.is_empty() {
            (content, ContentOrigin::Streamed)
        } else if raw_lines.is_empty() {
            (content, ContentOrigin::Empty)
        } else {
            match completion_content(&raw_lines.concat()) {
                Some(text) => (text, ContentOrigin::Completion),
                None if events_parsed > 0 => (content, ContentOrigin::Empty),
                None => (content, ContentOrigin::Unparseable),
            }
        };

        Reassembled {
            text,
            origin,
            events_parsed,
            events_dropped,
        }
    }
}

/// Extract `choices[0].delta.content` from a stream event.
fn delta_content(event: &serde_json::Value) -> Option<&str> {
    event
        .get("choices")?
        .as_array()?
        .first()?
        .get("delta")?
        .get("content")?
        .as_str()
}

/// Parse a whole body as a non-streamed completion and extract
/// `choices[0].message.content`.
///
/// Returns `None` if the body is not a JSON object. An object without
/// choices, or whose first choice has no string content, yields `Some("")`.
fn completion_content(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    if !json.is_object() {
        return None;
    }
    let content = json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .unwrap_or_default();
    Some(content.to_string())
}

/// Split a raw byte stream into lines.
///
/// Partial lines are carried across chunks as bytes, so a multi-byte UTF-8
/// sequence split between two chunks decodes correctly. Each complete line is
/// decoded lossily. A trailing line without a newline is emitted when the body
/// ends. Waiting longer than `idle` for the next chunk yields
/// [`ProviderError::Timeout`]; a read error is converted by `map_err`, so the
/// transport can report its own read timeouts as [`ProviderError::Timeout`].
/// The stream ends after the first error.
pub(crate) fn body_lines<E, F>(
    byte_stream: impl Stream<Item = Result<bytes::Bytes, E>> + Send + 'static,
    idle: Duration,
    map_err: F,
) -> impl Stream<Item = Result<String, ProviderError>> + Send + 'static
where
    E: Send + 'static,
    F: Fn(E) -> ProviderError + Send + 'static,
{
    async_stream::stream! {
        let mut bytes_stream = std::pin::pin!(byte_stream);
        let mut line_buf: Vec<u8> = Vec::new();

        loop {
            let chunk = match tokio::time::timeout(idle, bytes_stream.next()).await {
                Ok(Some(Ok(chunk))) => chunk,
                Ok(Some(Err(e))) => {
                    yield Err(map_err(e));
                    return;
                }
                Ok(None) => break,
                Err(_) => {
                    yield Err(ProviderError::Timeout(idle));
                    return;
                }
            };

            line_buf.extend_from_slice(&chunk);

            // Split by newlines, keeping any incomplete line for the next chunk
            while let Some(newline_pos) = line_buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = line_buf.drain(..=newline_pos).collect();
                yield Ok(String::from_utf8_lossy(&line[..newline_pos]).into_owned());
            }
        }

        if !line_buf.is_empty() {
            yield Ok(String::from_utf8_lossy(&line_buf).into_owned());
        }
    }
}

/// Drive a line stream to completion through a [`Reassembler`].
///
/// The first transport error aborts the whole body; no partial text is
/// returned in that case.
pub(crate) async fn reassemble<S>(lines: S) -> Result<Reassembled, ProviderError>
where
    S: Stream<Item = Result<String, ProviderError>>,
{
    let mut lines = std::pin::pin!(lines);
    let mut reassembler = Reassembler::new();
    while let Some(line) = lines.next().await {
        reassembler.push_line(&line?);
    }
    Ok(reassembler.finish())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
