//! Google Generative Language API strategies
//!
//! Imagen for images, Veo for video, Gemini for chat and the prompt assistant.
//! Every request authenticates with the `x-goog-api-key` header.

pub mod chat;
pub mod imagen;
pub mod text;
pub mod types;
pub mod veo;

pub use chat::GeminiChat;
pub use imagen::GeminiImagen;
pub use text::PromptAssistant;
pub use veo::{GeminiVeo, Operation};

pub(crate) const API_KEY_HEADER: &str = "x-goog-api-key";

/// `{base}/models/{model}:{action}`
pub(crate) fn model_url(base: &str, model: &str, action: &str) -> String {
    format!("{}/models/{model}:{action}", base.trim_end_matches('/'))
}
