//! Video orchestrator.

use tracing::Instrument;

use super::{Runtime, request_id};
use crate::error::StudioError;
use crate::progress::{Progress, ProgressSink};
use crate::providers::demo::DemoVideo;
use crate::providers::gemini::GeminiVeo;
use crate::providers::huggingface::HuggingFaceVideo;
use crate::providers::{ProviderContext, VideoProvider};
use crate::types::{Credential, Modality, ProviderId, VideoRequest};

/// Strategy for a video provider id.
pub fn strategy(
    provider: ProviderId,
    ctx: ProviderContext,
) -> Result<Box<dyn VideoProvider>, StudioError> {
    match provider {
        ProviderId::DemoVideo => Ok(Box::new(DemoVideo::new(ctx))),
        ProviderId::GeminiVeo => Ok(Box::new(GeminiVeo::new(ctx))),
        ProviderId::HuggingFaceVideo => Ok(Box::new(HuggingFaceVideo::new(ctx))),
        other => Err(StudioError::UnsupportedProvider {
            provider: other.as_str().to_string(),
            modality: Modality::Video,
        }),
    }
}

/// Generate one video, reporting progress to `sink` along the way.
///
/// Progress is a side channel: a sink that stops listening never changes
/// the outcome.
pub async fn generate(
    runtime: &Runtime,
    provider: ProviderId,
    credential: &Credential,
    request: &VideoRequest,
    sink: &dyn ProgressSink,
) -> Result<String, StudioError> {
    let provider = provider.expect_modality(Modality::Video)?;
    let span = tracing::info_span!(
        "generate_video",
        %provider,
        request_id = %request_id(),
        mode = ?request.mode,
    );

    async move {
        let ctx = runtime.context(provider, credential)?;
        let strategy = strategy(provider, ctx)?;
        strategy.validate_inputs(request)?;

        let progress = Progress::new(sink);
        match strategy.generate(request, &progress).await {
            Ok(url) => {
                tracing::info!(target: "genstudio::video", "video ready");
                Ok(url)
            }
            Err(err) => {
                tracing::warn!(target: "genstudio::video", %err, "video generation failed");
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}
