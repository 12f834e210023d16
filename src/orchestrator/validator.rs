//! Key validation
//!
//! A credential is checked with one cheap authenticated read against the
//! provider. Validation is advisory: every failure maps to `false`.

use tracing::Instrument;

use super::{Runtime, request_id};
use crate::providers::KeyProbe;
use crate::providers::gemini::GeminiVeo;
use crate::providers::huggingface::{HuggingFaceChat, HuggingFaceImage, HuggingFaceVideo};
use crate::providers::openai::OpenAiImages;
use crate::providers::replicate::ReplicateChat;
use crate::types::{Credential, ProviderId};

/// `true` iff the provider accepted the credential.
///
/// Empty credentials and free providers return `false` without any network
/// traffic.
pub async fn validate(runtime: &Runtime, provider: ProviderId, credential: &Credential) -> bool {
    if credential.is_empty() || !provider.requires_credential() {
        return false;
    }

    let ctx = runtime.unchecked_context(credential.clone());
    let probe: Box<dyn KeyProbe> = match provider {
        ProviderId::OpenAi => Box::new(OpenAiImages::new(ctx)),
        ProviderId::HuggingFaceImage => Box::new(HuggingFaceImage::new(ctx)),
        ProviderId::HuggingFaceVideo => Box::new(HuggingFaceVideo::new(ctx)),
        ProviderId::HuggingFaceChat => Box::new(HuggingFaceChat::new(ctx)),
        ProviderId::GeminiVeo => Box::new(GeminiVeo::new(ctx)),
        ProviderId::ReplicateChat => Box::new(ReplicateChat::new(ctx)),
        ProviderId::Gemini | ProviderId::GeminiChat | ProviderId::DemoVideo => return false,
    };

    let span = tracing::info_span!("validate_api_key", %provider, request_id = %request_id());
    async move {
        match probe.probe().await {
            Ok(()) => {
                tracing::debug!(target: "genstudio::validator", "credential accepted");
                true
            }
            Err(err) => {
                tracing::debug!(target: "genstudio::validator", %err, "credential rejected");
                false
            }
        }
    }
    .instrument(span)
    .await
}
