//! DALL·E 3 image generation
//!
//! DALL·E 3 only produces one image per request, so `count` images means
//! `count` concurrent requests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::StudioError;
use crate::http::{self, HttpRequestContext};
use crate::providers::{ImageProvider, KeyProbe, ProviderContext, fan_out};
use crate::types::{AspectRatio, ImageRequest, ProviderId};
use crate::utils::data_url_from_base64;

#[derive(Debug, Clone, Serialize)]
struct ImageGenerationBody {
    model: &'static str,
    prompt: String,
    n: u32,
    size: &'static str,
    response_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: Option<String>,
}

/// Closest supported size; ratios DALL·E 3 cannot do are square.
pub(crate) const fn dalle_size(aspect_ratio: AspectRatio) -> &'static str {
    match aspect_ratio {
        AspectRatio::Landscape => "1792x1024",
        AspectRatio::Portrait => "1024x1792",
        AspectRatio::Square | AspectRatio::Standard | AspectRatio::StandardPortrait => "1024x1024",
    }
}

fn compose_prompt(request: &ImageRequest) -> String {
    let negative = request.negative_prompt.trim();
    if negative.is_empty() {
        request.prompt.clone()
    } else {
        format!("{}. Avoid: {negative}", request.prompt)
    }
}

pub struct OpenAiImages {
    ctx: ProviderContext,
}

impl OpenAiImages {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    async fn generate_one(&self, index: u32, body: &ImageGenerationBody) -> Result<String, StudioError> {
        let url = format!("{}/images/generations", self.ctx.endpoints().openai);
        let req = HttpRequestContext::new(self.id(), &url);
        tracing::debug!(target: "genstudio::image", provider = %self.id(), index, request_id = %req.request_id, "dispatching image request");
        let builder = self
            .ctx
            .http()
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.ctx.bearer())
            .json(body);
        let response = http::send(&req, builder).await?;
        let parsed: ImageGenerationResponse = http::read_json(self.id(), response).await?;
        parsed
            .data
            .into_iter()
            .find_map(|d| d.b64_json)
            .map(|b64| data_url_from_base64("image/png", &b64))
            .ok_or_else(|| StudioError::MissingOutput("OpenAI returned no image data.".to_string()))
    }
}

#[async_trait]
impl ImageProvider for OpenAiImages {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    async fn generate(&self, request: &ImageRequest) -> Result<Vec<String>, StudioError> {
        let body = ImageGenerationBody {
            model: defaults::models::DALL_E,
            prompt: compose_prompt(request),
            n: 1,
            size: dalle_size(request.aspect_ratio),
            response_format: "b64_json",
        };
        fan_out(request.count, |i| self.generate_one(i, &body)).await
    }
}

#[async_trait]
impl KeyProbe for OpenAiImages {
    async fn probe(&self) -> Result<(), StudioError> {
        let url = format!("{}/models", self.ctx.endpoints().openai);
        let req = HttpRequestContext::new(self.id(), &url);
        let builder = self
            .ctx
            .http()
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.ctx.bearer())
            .timeout(self.ctx.config().validation_timeout);
        http::send(&req, builder).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_ratios_fall_back_to_square() {
        assert_eq!(dalle_size(AspectRatio::Landscape), "1792x1024");
        assert_eq!(dalle_size(AspectRatio::Portrait), "1024x1792");
        assert_eq!(dalle_size(AspectRatio::Standard), "1024x1024");
        assert_eq!(dalle_size(AspectRatio::StandardPortrait), "1024x1024");
    }

    #[test]
    fn negative_prompt_is_appended_when_present() {
        let req = ImageRequest::new("a fox").with_negative_prompt("blur");
        assert_eq!(compose_prompt(&req), "a fox. Avoid: blur");
        let req = ImageRequest::new("a fox").with_negative_prompt("  ");
        assert_eq!(compose_prompt(&req), "a fox");
    }
}
