//! Error types for genstudio.

use thiserror::Error;

use crate::types::{Modality, ProviderId};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StudioError>;

/// Every failure an orchestration call can surface.
///
/// Each variant renders a human-readable message suitable for showing to the
/// end user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StudioError {
    /// The provider needs a credential and none was supplied.
    #[error("An API key is required for {provider}.")]
    MissingCredential { provider: ProviderId },

    /// The prompt or input image required by the selected mode is absent.
    #[error("{0}")]
    MissingInput(String),

    /// Non-2xx status or a body the orchestrator could not make sense of.
    #[error("{provider} error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    UpstreamError {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    /// A job completed but carried no extractable result reference.
    #[error("{0}")]
    MissingOutput(String),

    /// The cold-start retry loop used up its attempt budget.
    #[error("{provider} model failed to load after {attempts} attempts.")]
    RetryExhausted { provider: ProviderId, attempts: u32 },

    /// Transcoder input lacks a `mime;base64,` header.
    #[error("Malformed data URL: {0}")]
    MalformedDataUrl(String),

    /// Transport failure before any response status was received.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request failed structural validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown provider id, or a provider used outside its modality.
    #[error("Provider '{provider}' does not support {modality} generation.")]
    UnsupportedProvider { provider: String, modality: Modality },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The poll guard gave up on a long-running job.
    #[error("Timed out: {0}")]
    TimeoutError(String),

    #[error("Stream error: {0}")]
    StreamError(String),
}

impl StudioError {
    /// Build an upstream error for `provider`.
    pub fn upstream(
        provider: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::UpstreamError {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn missing_credential(provider: ProviderId) -> Self {
        Self::MissingCredential { provider }
    }

    pub const fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }

    /// HTTP status carried by an upstream failure, if any.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::UpstreamError { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_includes_status_when_known() {
        let err = StudioError::upstream("openai", Some(401), "Incorrect API key provided");
        assert_eq!(
            err.to_string(),
            "openai error (401): Incorrect API key provided"
        );
        assert_eq!(err.status_code(), Some(401));

        let err = StudioError::upstream("gemini", None, "missing field `name`");
        assert_eq!(err.to_string(), "gemini error: missing field `name`");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn missing_credential_names_the_provider() {
        let err = StudioError::missing_credential(ProviderId::HuggingFaceVideo);
        assert!(err.is_missing_credential());
        assert_eq!(
            err.to_string(),
            "An API key is required for huggingface_video."
        );
    }

    #[test]
    fn unsupported_provider_names_the_modality() {
        let err = StudioError::UnsupportedProvider {
            provider: "openai".to_string(),
            modality: Modality::Video,
        };
        assert_eq!(
            err.to_string(),
            "Provider 'openai' does not support video generation."
        );
    }
}
