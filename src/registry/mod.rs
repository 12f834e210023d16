//! Provider registry
//!
//! Static catalog of providers per modality and which of them need a
//! user-supplied credential. Pure lookups, no state.

mod session;

pub use session::{ProviderConfig, ProviderSession};

use serde::Serialize;

use crate::error::StudioError;
use crate::types::{Modality, ProviderId};

/// Catalog entry shown when choosing a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub id: ProviderId,
    pub name: &'static str,
    pub description: &'static str,
}

const IMAGE_PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        id: ProviderId::Gemini,
        name: "Google Gemini (Imagen 3)",
        description: "Default provider, no API key needed for basic use.",
    },
    ProviderInfo {
        id: ProviderId::OpenAi,
        name: "OpenAI (DALL·E 3)",
        description: "High-quality image generation. Requires an OpenAI API key.",
    },
    ProviderInfo {
        id: ProviderId::HuggingFaceImage,
        name: "Hugging Face (SD3 Medium)",
        description: "Community-hosted open-source models. Requires a Hugging Face API key.",
    },
];

const VIDEO_PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        id: ProviderId::DemoVideo,
        name: "Demo Mode (Free Test)",
        description: "A stock video is returned for UI testing.",
    },
    ProviderInfo {
        id: ProviderId::GeminiVeo,
        name: "Google Gemini (VEO)",
        description: "State-of-the-art video generation. Requires a Google API key.",
    },
    ProviderInfo {
        id: ProviderId::HuggingFaceVideo,
        name: "Hugging Face (SVD)",
        description: "Image-to-Video only. Requires a Hugging Face API key.",
    },
];

const CHAT_PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        id: ProviderId::GeminiChat,
        name: "Google Gemini",
        description: "Free to use for general conversation.",
    },
    ProviderInfo {
        id: ProviderId::ReplicateChat,
        name: "Replicate (Community LLM)",
        description: "Less-filtered, open-source models. Requires a Replicate API key.",
    },
    ProviderInfo {
        id: ProviderId::HuggingFaceChat,
        name: "Hugging Face (Llama 3)",
        description: "Community-hosted open-source models. Requires a Hugging Face API key.",
    },
];

/// Providers of `modality`, default first.
pub fn providers_for(modality: Modality) -> &'static [ProviderInfo] {
    match modality {
        Modality::Image => IMAGE_PROVIDERS,
        Modality::Video => VIDEO_PROVIDERS,
        Modality::Chat => CHAT_PROVIDERS,
    }
}

pub fn requires_credential(provider: ProviderId) -> bool {
    provider.requires_credential()
}

/// The free default of each modality.
pub fn default_provider(modality: Modality) -> ProviderId {
    match modality {
        Modality::Image => ProviderId::Gemini,
        Modality::Video => ProviderId::DemoVideo,
        Modality::Chat => ProviderId::GeminiChat,
    }
}

/// Catalog entry for `provider`.
pub fn info(provider: ProviderId) -> &'static ProviderInfo {
    let entries = providers_for(provider.modality());
    entries
        .iter()
        .find(|p| p.id == provider)
        .unwrap_or(&entries[0])
}

/// Parse a string id and check it belongs to `modality`.
pub fn lookup(id: &str, modality: Modality) -> Result<ProviderId, StudioError> {
    let provider: ProviderId = id.parse().map_err(|_| StudioError::UnsupportedProvider {
        provider: id.to_string(),
        modality,
    })?;
    provider.expect_modality(modality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_provider_is_listed_under_its_modality() {
        for id in ProviderId::ALL {
            assert!(providers_for(id.modality()).iter().any(|p| p.id == id));
            assert_eq!(info(id).id, id);
        }
    }

    #[test]
    fn default_is_first_and_free() {
        for modality in Modality::ALL {
            let default = default_provider(modality);
            assert_eq!(providers_for(modality)[0].id, default);
            assert!(!requires_credential(default));
        }
        assert!(!requires_credential(ProviderId::DemoVideo));
        assert!(requires_credential(ProviderId::GeminiVeo));
    }

    #[test]
    fn free_set_is_exactly_defaults() {
        let free: Vec<_> = ProviderId::ALL
            .into_iter()
            .filter(|p| !requires_credential(*p))
            .collect();
        assert_eq!(
            free,
            vec![ProviderId::Gemini, ProviderId::DemoVideo, ProviderId::GeminiChat]
        );
    }

    #[test]
    fn lookup_checks_modality() {
        assert_eq!(lookup("openai", Modality::Image).unwrap(), ProviderId::OpenAi);
        assert!(matches!(
            lookup("openai", Modality::Chat),
            Err(StudioError::UnsupportedProvider { .. })
        ));
        assert!(matches!(
            lookup("midjourney", Modality::Image),
            Err(StudioError::UnsupportedProvider { .. })
        ));
    }
}
