//! Veo video generation
//!
//! `models/{model}:predictLongRunning` returns a long-running operation that
//! is polled via `GET /{name}` until `done`. The finished operation carries a
//! download URI which is fetched with the same key.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{API_KEY_HEADER, model_url};
use crate::defaults;
use crate::error::StudioError;
use crate::http::{self, HttpRequestContext};
use crate::progress::ProgressSink;
use crate::providers::{KeyProbe, ProviderContext, VideoProvider};
use crate::retry::{PollSettings, poll_until};
use crate::types::{ProviderId, VideoRequest};
use crate::utils::{to_binary, to_data_url};

/// Error object of a failed long-running operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperationError {
    pub code: Option<i32>,
    pub message: Option<String>,
}

/// Upstream long-running job handle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub response: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<OperationError>,
}

impl Operation {
    /// Download URI of the first generated video, if the response has one.
    pub fn video_uri(&self) -> Option<&str> {
        let response = self.response.as_ref()?;
        [
            "/generateVideoResponse/generatedSamples/0/video/uri",
            "/generateVideoResponse/generatedSamples/0/videoUri",
            "/generatedVideos/0/video/uri",
        ]
        .iter()
        .find_map(|path| response.pointer(path).and_then(|v| v.as_str()))
        .filter(|uri| !uri.is_empty())
    }

    fn into_result(self) -> Result<Self, StudioError> {
        match &self.error {
            Some(err) => Err(StudioError::upstream(
                ProviderId::GeminiVeo.as_str(),
                None,
                err.message
                    .clone()
                    .unwrap_or_else(|| "Video generation failed".to_string()),
            )),
            None => Ok(self),
        }
    }
}

#[derive(Debug, Serialize)]
struct VeoRequest<'a> {
    instances: [VeoInstance<'a>; 1],
    parameters: VeoParameters,
}

#[derive(Debug, Serialize)]
struct VeoInstance<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<VeoImage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VeoImage {
    image_bytes: String,
    mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VeoParameters {
    sample_count: u32,
}

/// Seed image for image-to-video: the data URL payload is already base64.
fn seed_image(data_url: &str) -> Result<VeoImage, StudioError> {
    // Validates the header and payload before sending it upstream.
    let binary = to_binary(data_url)?;
    let image_bytes = data_url
        .split_once(',')
        .map(|(_, payload)| payload.trim().to_string())
        .unwrap_or_default();
    Ok(VeoImage {
        image_bytes,
        mime_type: binary.mime_type,
    })
}

fn operation_url(base: &str, name: &str) -> String {
    let name = name.trim().trim_start_matches('/');
    if name.starts_with("http://") || name.starts_with("https://") {
        return name.to_string();
    }
    format!("{}/{name}", base.trim_end_matches('/'))
}

pub struct GeminiVeo {
    ctx: ProviderContext,
}

impl GeminiVeo {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    async fn submit(&self, request: &VideoRequest) -> Result<Operation, StudioError> {
        let url = model_url(
            &self.ctx.endpoints().google,
            defaults::models::VEO,
            "predictLongRunning",
        );
        let body = VeoRequest {
            instances: [VeoInstance {
                prompt: &request.prompt,
                image: request.image().map(seed_image).transpose()?,
            }],
            parameters: VeoParameters { sample_count: 1 },
        };
        let req = HttpRequestContext::new(self.id(), &url);
        let builder = self
            .ctx
            .http()
            .post(&url)
            .header(API_KEY_HEADER, self.ctx.api_key())
            .json(&body);
        let response = http::send(&req, builder).await?;
        let operation: Operation = http::read_json(self.id(), response).await?;
        tracing::info!(target: "genstudio::video", provider = %self.id(), operation = %operation.name, "operation submitted");
        operation.into_result()
    }

    async fn refresh(&self, name: String) -> Result<Operation, StudioError> {
        let url = operation_url(&self.ctx.endpoints().google, &name);
        let req = HttpRequestContext::new(self.id(), &url);
        let builder = self
            .ctx
            .http()
            .get(&url)
            .header(API_KEY_HEADER, self.ctx.api_key());
        let response = http::send(&req, builder).await?;
        let operation: Operation = http::read_json(self.id(), response).await?;
        operation.into_result()
    }

    async fn download(&self, uri: &str) -> Result<String, StudioError> {
        let req = HttpRequestContext::new(self.id(), uri);
        let builder = self
            .ctx
            .http()
            .get(uri)
            .query(&[("key", self.ctx.api_key())]);
        let response = http::send(&req, builder).await?;
        let media = http::read_media(self.id(), response, "video/mp4").await?;
        Ok(to_data_url(&media.mime_type, &media.bytes))
    }
}

#[async_trait]
impl VideoProvider for GeminiVeo {
    fn id(&self) -> ProviderId {
        ProviderId::GeminiVeo
    }

    async fn generate(
        &self,
        request: &VideoRequest,
        progress: &dyn ProgressSink,
    ) -> Result<String, StudioError> {
        progress.report("Sending request to VEO...");
        let operation = self.submit(request).await?;
        progress.report("Video processing started. This can take several minutes...");

        let operation = poll_until(
            self.id(),
            PollSettings::from(&self.ctx.config().video),
            operation,
            |op| op.done,
            |op: &Operation| self.refresh(op.name.clone()),
            |_| progress.report("Checking video status..."),
        )
        .await?;

        progress.report("Video ready! Downloading...");
        let uri = operation.video_uri().ok_or_else(|| {
            StudioError::MissingOutput(
                "Video generation failed to return a download link.".to_string(),
            )
        })?;
        self.download(uri).await
    }
}

#[async_trait]
impl KeyProbe for GeminiVeo {
    async fn probe(&self) -> Result<(), StudioError> {
        let url = format!("{}/models", self.ctx.endpoints().google.trim_end_matches('/'));
        let req = HttpRequestContext::new(self.id(), &url);
        let builder = self
            .ctx
            .http()
            .get(&url)
            .header(API_KEY_HEADER, self.ctx.api_key())
            .timeout(self.ctx.config().validation_timeout);
        http::send(&req, builder).await.map(|_| ())
    }
}
