//! Core value types: provider identity, credentials and per-modality requests.

mod chat;
mod credential;
mod http;
mod image;
mod prompt;
mod provider;
mod video;

pub use chat::{ChatMessage, ChatRole};
pub(crate) use chat::flatten_history;
pub use credential::Credential;
pub use http::HttpConfig;
pub use image::{AspectRatio, ImageRequest};
pub use prompt::{EnhanceLevel, ImageConcept};
pub use provider::{KeyStatus, Modality, ProviderId};
pub use video::{VideoMode, VideoRequest};
