//! `Studio`: the public entry point
//!
//! Owns the shared HTTP client and configuration and exposes one method per
//! orchestration call. Cheap to clone and safe to share across tasks; calls
//! share no mutable state.

use tracing::Instrument;

use crate::config::StudioConfig;
use crate::error::StudioError;
use crate::orchestrator::{self, Runtime};
use crate::progress::ProgressSink;
use crate::providers::gemini::PromptAssistant;
use crate::registry::{self, ProviderInfo};
use crate::streaming::{ChatStreamHandle, TextStream};
use crate::types::{
    ChatMessage, Credential, EnhanceLevel, ImageConcept, ImageRequest, Modality, ProviderId,
    VideoRequest,
};
use crate::utils::cancel::make_cancellable_stream;

#[derive(Clone, Debug)]
pub struct Studio {
    runtime: Runtime,
}

static_assertions::assert_impl_all!(Studio: Send, Sync, Clone);

impl Studio {
    /// Build the shared HTTP client from `config`.
    pub fn new(config: StudioConfig) -> Result<Self, StudioError> {
        Ok(Self {
            runtime: Runtime::new(config)?,
        })
    }

    pub fn config(&self) -> &StudioConfig {
        self.runtime.config()
    }

    pub fn providers_for(&self, modality: Modality) -> &'static [ProviderInfo] {
        registry::providers_for(modality)
    }

    /// Check a credential with a cheap authenticated read. Never errors.
    pub async fn validate_api_key(&self, provider: ProviderId, credential: &Credential) -> bool {
        orchestrator::validator::validate(&self.runtime, provider, credential).await
    }

    /// Generate `request.count` images as data URLs, in dispatch order.
    pub async fn generate_images(
        &self,
        provider: ProviderId,
        credential: &Credential,
        request: &ImageRequest,
    ) -> Result<Vec<String>, StudioError> {
        orchestrator::image::generate(&self.runtime, provider, credential, request).await
    }

    /// Generate one more image for the same request.
    pub async fn regenerate_image(
        &self,
        provider: ProviderId,
        credential: &Credential,
        request: &ImageRequest,
    ) -> Result<String, StudioError> {
        let images = self
            .generate_images(provider, credential, &request.single())
            .await?;
        images
            .into_iter()
            .next()
            .ok_or_else(|| StudioError::MissingOutput("No image was returned.".to_string()))
    }

    /// Generate a video; progress messages go to `progress`.
    pub async fn generate_video(
        &self,
        provider: ProviderId,
        credential: &Credential,
        request: &VideoRequest,
        progress: &dyn ProgressSink,
    ) -> Result<String, StudioError> {
        orchestrator::video::generate(&self.runtime, provider, credential, request, progress)
            .await
    }

    /// Lazy stream of reply fragments for `history`.
    pub fn stream_chat_response(
        &self,
        provider: ProviderId,
        credential: &Credential,
        history: Vec<ChatMessage>,
    ) -> Result<TextStream, StudioError> {
        orchestrator::chat::stream(&self.runtime, provider, credential, history)
    }

    /// Like `stream_chat_response`, plus a handle to cancel the stream from
    /// another task.
    pub fn stream_chat_response_with_cancel(
        &self,
        provider: ProviderId,
        credential: &Credential,
        history: Vec<ChatMessage>,
    ) -> Result<ChatStreamHandle, StudioError> {
        let stream = self.stream_chat_response(provider, credential, history)?;
        Ok(make_cancellable_stream(stream))
    }

    fn prompt_assistant(&self, credential: &Credential) -> Result<PromptAssistant, StudioError> {
        let ctx = self.runtime.context(ProviderId::GeminiChat, credential)?;
        Ok(PromptAssistant::new(ctx))
    }

    /// Rewrite an image prompt.
    pub async fn enhance_prompt(
        &self,
        credential: &Credential,
        prompt: &str,
        level: EnhanceLevel,
    ) -> Result<String, StudioError> {
        let assistant = self.prompt_assistant(credential)?;
        assistant
            .enhance(prompt, level)
            .instrument(tracing::info_span!("enhance_prompt", ?level))
            .await
    }

    /// A random creative image prompt.
    pub async fn surprise_prompt(&self, credential: &Credential) -> Result<String, StudioError> {
        let assistant = self.prompt_assistant(credential)?;
        assistant
            .surprise()
            .instrument(tracing::info_span!("surprise_prompt"))
            .await
    }

    /// Cover-art concepts for a song title.
    pub async fn image_concepts(
        &self,
        credential: &Credential,
        song_title: &str,
    ) -> Result<Vec<ImageConcept>, StudioError> {
        let assistant = self.prompt_assistant(credential)?;
        assistant
            .concepts(song_title)
            .instrument(tracing::info_span!("image_concepts"))
            .await
    }
}
