//! Gemini streaming chat over `streamGenerateContent?alt=sse`.

use futures_util::StreamExt;

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::{API_KEY_HEADER, model_url};
use crate::defaults;
use crate::error::StudioError;
use crate::http::{self, HttpRequestContext};
use crate::providers::{ChatProvider, ProviderContext};
use crate::streaming::{TextStream, stream_sse_json_values};
use crate::types::{ChatMessage, ProviderId};

pub struct GeminiChat {
    ctx: ProviderContext,
}

impl GeminiChat {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

impl ChatProvider for GeminiChat {
    fn id(&self) -> ProviderId {
        ProviderId::GeminiChat
    }

    fn stream(&self, history: Vec<ChatMessage>) -> TextStream {
        let ctx = self.ctx.clone();
        let provider = self.id();

        let s = async_stream::try_stream! {
            let url = format!(
                "{}?alt=sse",
                model_url(&ctx.endpoints().google, defaults::models::GEMINI_FLASH, "streamGenerateContent")
            );
            let req = HttpRequestContext::new(provider, &url).streaming();
            let body = GenerateContentRequest::from_history(&history);

            let mut builder = ctx
                .http()
                .post(&url)
                .header(API_KEY_HEADER, ctx.api_key())
                .header(reqwest::header::ACCEPT, "text/event-stream")
                .json(&body);
            if ctx.config().http.stream_disable_compression {
                builder = builder.header(reqwest::header::ACCEPT_ENCODING, "identity");
            }

            let response = http::send(&req, builder).await?;
            let mut events = stream_sse_json_values(response.bytes_stream(), provider.as_str());

            while let Some(event) = events.next().await {
                let chunk: GenerateContentResponse = serde_json::from_value(event?)
                    .map_err(|e| StudioError::upstream(provider.as_str(), None, format!("malformed chunk: {e}")))?;
                let text = chunk.text();
                if !text.is_empty() {
                    yield text;
                }
            }
            tracing::debug!(target: "genstudio::chat", %provider, request_id = %req.request_id, "stream finished");
        };
        Box::pin(s)
    }
}
