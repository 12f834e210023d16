//! Chat orchestrator.

use super::{Runtime, request_id};
use crate::error::StudioError;
use crate::providers::gemini::GeminiChat;
use crate::providers::huggingface::HuggingFaceChat;
use crate::providers::replicate::ReplicateChat;
use crate::providers::{ChatProvider, ProviderContext};
use crate::streaming::TextStream;
use crate::types::{ChatMessage, Credential, Modality, ProviderId};

/// Strategy for a chat provider id.
pub fn strategy(
    provider: ProviderId,
    ctx: ProviderContext,
) -> Result<Box<dyn ChatProvider>, StudioError> {
    match provider {
        ProviderId::GeminiChat => Ok(Box::new(GeminiChat::new(ctx))),
        ProviderId::ReplicateChat => Ok(Box::new(ReplicateChat::new(ctx))),
        ProviderId::HuggingFaceChat => Ok(Box::new(HuggingFaceChat::new(ctx))),
        other => Err(StudioError::UnsupportedProvider {
            provider: other.as_str().to_string(),
            modality: Modality::Chat,
        }),
    }
}

/// Open a lazy reply stream for `history`.
///
/// Preconditions are checked here and fail immediately; the upstream call is
/// only issued once the stream is polled. Dropping the stream closes the
/// upstream connection.
pub fn stream(
    runtime: &Runtime,
    provider: ProviderId,
    credential: &Credential,
    history: Vec<ChatMessage>,
) -> Result<TextStream, StudioError> {
    let provider = provider.expect_modality(Modality::Chat)?;
    let ctx = runtime.context(provider, credential)?;
    if history.is_empty() {
        return Err(StudioError::MissingInput(
            "Please enter a message.".to_string(),
        ));
    }
    tracing::debug!(target: "genstudio::chat", %provider, request_id = %request_id(), turns = history.len(), "opening chat stream");
    Ok(strategy(provider, ctx)?.stream(history))
}
