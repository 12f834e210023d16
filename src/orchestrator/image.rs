//! Image orchestrator.

use tracing::Instrument;

use super::{Runtime, request_id};
use crate::error::StudioError;
use crate::providers::gemini::GeminiImagen;
use crate::providers::huggingface::HuggingFaceImage;
use crate::providers::openai::OpenAiImages;
use crate::providers::{ImageProvider, ProviderContext};
use crate::types::{Credential, ImageRequest, Modality, ProviderId};

/// Strategy for an image provider id.
pub fn strategy(
    provider: ProviderId,
    ctx: ProviderContext,
) -> Result<Box<dyn ImageProvider>, StudioError> {
    match provider {
        ProviderId::Gemini => Ok(Box::new(GeminiImagen::new(ctx))),
        ProviderId::OpenAi => Ok(Box::new(OpenAiImages::new(ctx))),
        ProviderId::HuggingFaceImage => Ok(Box::new(HuggingFaceImage::new(ctx))),
        other => Err(StudioError::UnsupportedProvider {
            provider: other.as_str().to_string(),
            modality: Modality::Image,
        }),
    }
}

/// Generate `request.count` images as data URLs.
pub async fn generate(
    runtime: &Runtime,
    provider: ProviderId,
    credential: &Credential,
    request: &ImageRequest,
) -> Result<Vec<String>, StudioError> {
    let provider = provider.expect_modality(Modality::Image)?;
    let span = tracing::info_span!(
        "generate_images",
        %provider,
        request_id = %request_id(),
        count = request.count,
        aspect_ratio = %request.aspect_ratio,
    );

    async move {
        let ctx = runtime.context(provider, credential)?;
        let strategy = strategy(provider, ctx)?;
        strategy.validate_inputs(request)?;

        match strategy.generate(request).await {
            Ok(images) => {
                tracing::info!(target: "genstudio::image", returned = images.len(), "images generated");
                Ok(images)
            }
            Err(err) => {
                tracing::warn!(target: "genstudio::image", %err, "image generation failed");
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}
