//! Reply Delivery Strategies
//!
//! One submission operation, two ways of consuming the response body:
//! incrementally as decoded text chunks, or as a single JSON document.

use std::str::FromStr;

use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::backend::{AskResponse, BodyStream};
use crate::decoder::Utf8StreamDecoder;
use crate::error::{ClientError, Result};

/// How the assistant reply reaches the transcript
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Placeholder bubble, updated as each chunk arrives
    #[default]
    Streaming,
    /// One bubble appended after the full `{"response": ...}` body is parsed
    #[serde(alias = "json")]
    WholePayload,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Streaming => "streaming",
            DeliveryMode::WholePayload => "json",
        }
    }
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "streaming" | "stream" => Ok(DeliveryMode::Streaming),
            "json" | "whole_payload" | "whole-payload" => Ok(DeliveryMode::WholePayload),
            other => Err(ClientError::Config(format!("unknown delivery mode '{other}'"))),
        }
    }
}

/// Consume a streamed body, calling `on_text` with the accumulated text after
/// every chunk that decoded to at least one character.
///
/// `accumulated` keeps whatever arrived even when the stream fails midway.
pub async fn consume_stream<F>(
    mut body: BodyStream,
    accumulated: &mut String,
    mut on_text: F,
) -> Result<()>
where
    F: FnMut(&str),
{
    let mut decoder = Utf8StreamDecoder::new();

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        let text = decoder.decode(&chunk);
        tracing::trace!(bytes = chunk.len(), chars = text.chars().count(), "reply chunk");
        if !text.is_empty() {
            accumulated.push_str(&text);
            on_text(accumulated.as_str());
        }
    }

    let tail = decoder.finish();
    if !tail.is_empty() {
        accumulated.push_str(&tail);
        on_text(accumulated.as_str());
    }

    Ok(())
}

/// Buffer the whole body and parse it as `{"response": string}`
pub async fn consume_json(mut body: BodyStream) -> Result<String> {
    let mut buf = Vec::new();
    while let Some(chunk) = body.next().await {
        buf.extend_from_slice(&chunk?);
    }

    let parsed: AskResponse = serde_json::from_slice(&buf)?;
    Ok(parsed.response)
}
