use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StudioError;

/// One of the three generation domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Image,
    Video,
    Chat,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Image, Modality::Video, Modality::Chat];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one upstream backend.
///
/// The set is closed and every id belongs to exactly one modality, so a
/// `ProviderId` can never migrate between image, video and chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "huggingface_image")]
    HuggingFaceImage,
    #[serde(rename = "demo_video")]
    DemoVideo,
    #[serde(rename = "gemini_veo")]
    GeminiVeo,
    #[serde(rename = "huggingface_video")]
    HuggingFaceVideo,
    #[serde(rename = "gemini_chat")]
    GeminiChat,
    #[serde(rename = "replicate_chat")]
    ReplicateChat,
    #[serde(rename = "huggingface_chat")]
    HuggingFaceChat,
}

impl ProviderId {
    pub const ALL: [ProviderId; 9] = [
        ProviderId::Gemini,
        ProviderId::OpenAi,
        ProviderId::HuggingFaceImage,
        ProviderId::DemoVideo,
        ProviderId::GeminiVeo,
        ProviderId::HuggingFaceVideo,
        ProviderId::GeminiChat,
        ProviderId::ReplicateChat,
        ProviderId::HuggingFaceChat,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::HuggingFaceImage => "huggingface_image",
            Self::DemoVideo => "demo_video",
            Self::GeminiVeo => "gemini_veo",
            Self::HuggingFaceVideo => "huggingface_video",
            Self::GeminiChat => "gemini_chat",
            Self::ReplicateChat => "replicate_chat",
            Self::HuggingFaceChat => "huggingface_chat",
        }
    }

    pub const fn modality(&self) -> Modality {
        match self {
            Self::Gemini | Self::OpenAi | Self::HuggingFaceImage => Modality::Image,
            Self::DemoVideo | Self::GeminiVeo | Self::HuggingFaceVideo => Modality::Video,
            Self::GeminiChat | Self::ReplicateChat | Self::HuggingFaceChat => Modality::Chat,
        }
    }

    /// Free providers: the default of each modality plus the demo video stub.
    pub const fn requires_credential(&self) -> bool {
        !matches!(self, Self::Gemini | Self::GeminiChat | Self::DemoVideo)
    }

    /// Ensure this id belongs to `modality`.
    pub fn expect_modality(self, modality: Modality) -> Result<Self, StudioError> {
        if self.modality() == modality {
            Ok(self)
        } else {
            Err(StudioError::UnsupportedProvider {
                provider: self.as_str().to_string(),
                modality,
            })
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| StudioError::InvalidInput(format!("Unknown provider id: {s}")))
    }
}

/// Validation state of a credential while a provider is being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    #[default]
    Unverified,
    Verifying,
    Valid,
    Invalid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_strings() {
        for id in ProviderId::ALL {
            assert_eq!(id.as_str().parse::<ProviderId>().unwrap(), id);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
        assert!("midjourney".parse::<ProviderId>().is_err());
    }

    #[test]
    fn each_modality_has_three_providers() {
        for modality in Modality::ALL {
            let count = ProviderId::ALL
                .iter()
                .filter(|id| id.modality() == modality)
                .count();
            assert_eq!(count, 3, "{modality}");
        }
    }

    #[test]
    fn expect_modality_rejects_cross_modality_use() {
        assert!(ProviderId::OpenAi.expect_modality(Modality::Image).is_ok());
        let err = ProviderId::OpenAi
            .expect_modality(Modality::Chat)
            .unwrap_err();
        assert!(matches!(err, StudioError::UnsupportedProvider { .. }));
    }

    #[test]
    fn free_providers_are_fixed() {
        let free: Vec<_> = ProviderId::ALL
            .into_iter()
            .filter(|id| !id.requires_credential())
            .collect();
        assert_eq!(
            free,
            vec![
                ProviderId::Gemini,
                ProviderId::DemoVideo,
                ProviderId::GeminiChat
            ]
        );
    }
}
