//! Stable Diffusion 3 via the Inference API. One image per request, binary
//! response body.

use async_trait::async_trait;
use serde::Serialize;

use super::model_url;
use crate::defaults;
use crate::error::StudioError;
use crate::http::{self, HttpRequestContext};
use crate::providers::{ImageProvider, KeyProbe, ProviderContext, fan_out};
use crate::types::{AspectRatio, ImageRequest, ProviderId};
use crate::utils::to_data_url;

#[derive(Debug, Serialize)]
struct TextToImageBody<'a> {
    inputs: &'a str,
    parameters: TextToImageParameters<'a>,
}

#[derive(Debug, Serialize)]
struct TextToImageParameters<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
    width: u32,
    height: u32,
}

/// SD3 output sizes, roughly one megapixel.
pub(crate) const fn sd3_dimensions(aspect_ratio: AspectRatio) -> (u32, u32) {
    match aspect_ratio {
        AspectRatio::Square => (1024, 1024),
        AspectRatio::Landscape => (1344, 768),
        AspectRatio::Portrait => (768, 1344),
        AspectRatio::Standard => (1152, 896),
        AspectRatio::StandardPortrait => (896, 1152),
    }
}

pub struct HuggingFaceImage {
    ctx: ProviderContext,
}

impl HuggingFaceImage {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    async fn generate_one(&self, index: u32, body: &TextToImageBody<'_>) -> Result<String, StudioError> {
        let url = model_url(&self.ctx.endpoints().huggingface, defaults::models::STABLE_DIFFUSION);
        let req = HttpRequestContext::new(self.id(), &url);
        tracing::debug!(target: "genstudio::image", provider = %self.id(), index, request_id = %req.request_id, "dispatching image request");
        let builder = self
            .ctx
            .http()
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.ctx.bearer())
            .header(reqwest::header::ACCEPT, "image/*")
            .json(body);
        let response = http::send(&req, builder).await?;
        let media = http::read_media(self.id(), response, "image/jpeg").await?;
        Ok(to_data_url(&media.mime_type, &media.bytes))
    }
}

#[async_trait]
impl ImageProvider for HuggingFaceImage {
    fn id(&self) -> ProviderId {
        ProviderId::HuggingFaceImage
    }

    async fn generate(&self, request: &ImageRequest) -> Result<Vec<String>, StudioError> {
        let (width, height) = sd3_dimensions(request.aspect_ratio);
        let body = TextToImageBody {
            inputs: &request.prompt,
            parameters: TextToImageParameters {
                negative_prompt: Some(request.negative_prompt.trim()).filter(|n| !n.is_empty()),
                width,
                height,
            },
        };
        fan_out(request.count, |i| self.generate_one(i, &body)).await
    }
}

#[async_trait]
impl KeyProbe for HuggingFaceImage {
    async fn probe(&self) -> Result<(), StudioError> {
        super::probe(&self.ctx, self.id()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_ratio_has_dimensions_matching_its_orientation() {
        for ratio in AspectRatio::ALL {
            let (w, h) = sd3_dimensions(ratio);
            match ratio {
                AspectRatio::Square => assert_eq!(w, h),
                AspectRatio::Landscape | AspectRatio::Standard => assert!(w > h),
                AspectRatio::Portrait | AspectRatio::StandardPortrait => assert!(h > w),
            }
        }
    }
}
