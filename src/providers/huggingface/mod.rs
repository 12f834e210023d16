//! Hugging Face Inference API strategies
//!
//! All three authenticate with a bearer token against
//! `{base}/models/{model}`.

pub mod chat;
pub mod image;
pub mod video;

pub use chat::HuggingFaceChat;
pub use image::HuggingFaceImage;
pub use video::HuggingFaceVideo;

use serde::Deserialize;

use crate::defaults;
use crate::error::{StudioError, classify_http_error};
use crate::http::{self, HttpRequestContext};
use crate::providers::ProviderContext;
use crate::retry::AttemptError;
use crate::types::ProviderId;

pub(crate) fn model_url(base: &str, model: &str) -> String {
    format!("{}/models/{model}", base.trim_end_matches('/'))
}

/// Body of a 503 returned while a model is being loaded.
#[derive(Debug, Default, Deserialize)]
struct LoadingBody {
    estimated_time: Option<f64>,
}

/// Classify a failed response: 503 means the model is still loading.
pub(crate) async fn attempt_error(provider: ProviderId, response: reqwest::Response) -> AttemptError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let error = classify_http_error(provider.as_str(), status.as_u16(), &text);
    if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
        let estimated_secs = serde_json::from_str::<LoadingBody>(&text)
            .ok()
            .and_then(|b| b.estimated_time);
        AttemptError::Loading {
            estimated_secs,
            error,
        }
    } else {
        tracing::warn!(target: "genstudio::http", %provider, status = status.as_u16(), err = %error, "upstream error");
        AttemptError::Fatal(error)
    }
}

/// Authenticated read of the chat model's status; shared by every
/// Hugging Face provider since the token is account-wide.
pub(crate) async fn probe(ctx: &ProviderContext, provider: ProviderId) -> Result<(), StudioError> {
    let url = model_url(&ctx.endpoints().huggingface, defaults::models::LLAMA_3_INSTRUCT);
    let req = HttpRequestContext::new(provider, &url);
    let builder = ctx
        .http()
        .get(&url)
        .header(reqwest::header::AUTHORIZATION, ctx.bearer())
        .timeout(ctx.config().validation_timeout);
    http::send(&req, builder).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_body_reads_estimate() {
        let body: LoadingBody = serde_json::from_str(
            r#"{"error":"Model is currently loading","estimated_time":12.5}"#,
        )
        .unwrap();
        assert_eq!(body.estimated_time, Some(12.5));
        let body: LoadingBody = serde_json::from_str(r#"{"error":"loading"}"#).unwrap();
        assert_eq!(body.estimated_time, None);
    }
}
