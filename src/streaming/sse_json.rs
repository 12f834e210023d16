//! SSE JSON streaming helpers
//!
//! For upstreams that emit one JSON object per SSE `data:` payload.

use eventsource_stream::Eventsource;
use futures::Stream;
use futures_util::StreamExt;
use std::fmt::Display;
use std::pin::Pin;

use crate::error::StudioError;

pub type JsonSseStream = Pin<Box<dyn Stream<Item = Result<serde_json::Value, StudioError>> + Send>>;

/// Convert a byte stream into a JSON stream by parsing SSE `data:` payloads.
///
/// - Ignores empty payloads and the `[DONE]` marker.
/// - Parses JSON strictly; the first unparsable payload ends the stream with an error.
pub fn stream_sse_json_values<S, B, E>(byte_stream: S, label: impl Into<String>) -> JsonSseStream
where
    S: Stream<Item = Result<B, E>> + Send + Unpin + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let label = label.into();

    let out = async_stream::stream! {
        let mut sse_stream = byte_stream.eventsource();

        while let Some(item) = sse_stream.next().await {
            let event = match item {
                Ok(ev) => ev,
                Err(e) => {
                    yield Err(StudioError::StreamError(format!("SSE stream error ({label}): {e}")));
                    return;
                }
            };

            tracing::trace!(target: "genstudio::http", provider = %label, event_name = %event.event, "sse event");

            let data = event.data.trim();
            if data.is_empty() || data == "[DONE]" {
                continue;
            }

            let payload: serde_json::Value = match serde_json::from_str(data) {
                Ok(v) => v,
                Err(e) => {
                    yield Err(StudioError::upstream(
                        label.clone(),
                        None,
                        format!("Failed to parse SSE JSON: {e}"),
                    ));
                    return;
                }
            };

            yield Ok(payload);
        }
    };

    Box::pin(out)
}
