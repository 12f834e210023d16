//! genstudio
//!
//! Provider orchestration for generative media. One uniform async contract
//! for image, video and chat generation across Gemini, OpenAI, Hugging Face
//! and Replicate, covering synchronous, long-running (polled) and streaming
//! upstream styles.
//!
//! ```rust,no_run
//! use genstudio::prelude::*;
//!
//! # async fn example() -> Result<(), StudioError> {
//! let studio = Studio::new(StudioConfig::from_env())?;
//! let key = Credential::new("sk-...");
//!
//! if studio.validate_api_key(ProviderId::OpenAi, &key).await {
//!     let request = ImageRequest::new("a lighthouse at dusk").with_count(3);
//!     let images = studio.generate_images(ProviderId::OpenAi, &key, &request).await?;
//!     assert_eq!(images.len(), 3);
//! }
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod defaults;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod progress;
pub mod providers;
pub mod registry;
pub mod retry;
pub mod streaming;
pub mod studio;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use error::{Result, StudioError};
pub use studio::Studio;

/// Commonly used items.
pub mod prelude {
    pub use crate::config::{
        ColdStartPolicy, Endpoints, StudioConfig, StudioConfigBuilder, VideoSettings,
    };
    pub use crate::error::{Result, StudioError};
    pub use crate::progress::{ProgressSink, SilentProgress};
    pub use crate::registry::{ProviderConfig, ProviderInfo, ProviderSession};
    pub use crate::streaming::{ChatStreamHandle, ChatTranscript, TextStream, collect_transcript};
    pub use crate::studio::Studio;
    pub use crate::types::{
        AspectRatio, ChatMessage, ChatRole, Credential, EnhanceLevel, HttpConfig, ImageConcept,
        ImageRequest, KeyStatus, Modality, ProviderId, VideoMode, VideoRequest,
    };
}
