//! Server-Sent Events (SSE) parser for OpenAI-compatible streaming responses.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;

/// One `data:` event of a streaming chat completion.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    message: String,
}

/// What a single SSE line contributes to the reply.
#[derive(Debug, PartialEq, Eq)]
enum SseEvent {
    Content(String),
    Error(String),
    Done,
    Skip,
}

/// Converts a raw SSE byte stream into a stream of text chunks.
///
/// Lines are buffered across chunk boundaries. An `error` object sent
/// mid-stream ends the stream with an error.
pub fn sse_to_text_stream(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<String>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        // Raw bytes: a chunk may end inside a multi-byte character.
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {e}"));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line_bytes: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = String::from_utf8_lossy(&line_bytes);

                match parse_sse_line(line.trim()) {
                    SseEvent::Content(content) => yield Ok(content),
                    SseEvent::Error(message) => {
                        yield Err(anyhow::anyhow!("API returned an error: {message}"));
                        return;
                    }
                    SseEvent::Done => return,
                    SseEvent::Skip => {}
                }
            }
        }

        // Servers may omit the trailing newline on the last event.
        if let SseEvent::Content(content) = parse_sse_line(String::from_utf8_lossy(&buffer).trim()) {
            yield Ok(content);
        }
    }
}

/// Parses a single trimmed SSE line (e.g. `data: {"choices":[...]}`).
///
/// Comments, empty content and unparseable payloads are skipped.
fn parse_sse_line(line: &str) -> SseEvent {
    let Some(json_str) = line.strip_prefix("data:").map(str::trim_start) else {
        return SseEvent::Skip;
    };

    if json_str == "[DONE]" {
        return SseEvent::Done;
    }

    let Ok(response) = serde_json::from_str::<StreamResponse>(json_str) else {
        return SseEvent::Skip;
    };

    if let Some(error) = response.error {
        return SseEvent::Error(error.message);
    }

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.content)
        .collect();

    if content.is_empty() {
        SseEvent::Skip
    } else {
        SseEvent::Content(content)
    }
}
