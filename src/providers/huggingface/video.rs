//! Stable Video Diffusion: image-to-video only
//!
//! The input image is uploaded as the raw request body. A cold model answers
//! 503 with an estimated load time; those responses are retried under the
//! configured `ColdStartPolicy`.

use async_trait::async_trait;

use super::{attempt_error, model_url};
use crate::defaults;
use crate::error::StudioError;
use crate::http::{self, HttpRequestContext};
use crate::progress::ProgressSink;
use crate::providers::{KeyProbe, ProviderContext, VideoProvider};
use crate::retry::{AttemptError, retry_cold_start};
use crate::types::{ProviderId, VideoRequest};
use crate::utils::data_url::Binary;
use crate::utils::{to_binary, to_data_url};

pub struct HuggingFaceVideo {
    ctx: ProviderContext,
}

impl HuggingFaceVideo {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    async fn attempt(&self, image: &Binary) -> Result<String, AttemptError> {
        let url = model_url(
            &self.ctx.endpoints().huggingface,
            defaults::models::STABLE_VIDEO_DIFFUSION,
        );
        let req = HttpRequestContext::new(self.id(), &url);
        let builder = self
            .ctx
            .http()
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.ctx.bearer())
            .header(reqwest::header::CONTENT_TYPE, image.mime_type.as_str())
            .body(image.bytes.clone());
        let response = http::send_raw(&req, builder).await?;
        if !response.status().is_success() {
            return Err(attempt_error(self.id(), response).await);
        }
        let media = http::read_media(self.id(), response, "video/mp4").await?;
        Ok(to_data_url(&media.mime_type, &media.bytes))
    }
}

#[async_trait]
impl VideoProvider for HuggingFaceVideo {
    fn id(&self) -> ProviderId {
        ProviderId::HuggingFaceVideo
    }

    fn validate_inputs(&self, request: &VideoRequest) -> Result<(), StudioError> {
        request.validate()?;
        if request.image().is_none() {
            return Err(StudioError::MissingInput(
                "An input image is required for Hugging Face SVD.".to_string(),
            ));
        }
        Ok(())
    }

    async fn generate(
        &self,
        request: &VideoRequest,
        progress: &dyn ProgressSink,
    ) -> Result<String, StudioError> {
        let data_url = request.image().ok_or_else(|| {
            StudioError::MissingInput("An input image is required for Hugging Face SVD.".to_string())
        })?;
        progress.report("Uploading image...");
        let image = to_binary(data_url)?;

        let video = retry_cold_start(
            self.id(),
            &self.ctx.config().cold_start,
            || self.attempt(&image),
            |wait| {
                progress.report(&format!(
                    "Model is loading... retrying in {}s.",
                    wait.as_secs_f64().round() as u64
                ))
            },
        )
        .await?;

        progress.report("Processing video...");
        Ok(video)
    }
}

#[async_trait]
impl KeyProbe for HuggingFaceVideo {
    async fn probe(&self) -> Result<(), StudioError> {
        super::probe(&self.ctx, self.id()).await
    }
}
