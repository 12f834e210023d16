//! Provider strategies
//!
//! One strategy struct per `ProviderId`, grouped by upstream vendor. Each
//! implements the capability trait of its modality; providers that accept a
//! user credential also implement `KeyProbe`.

pub mod demo;
pub mod gemini;
pub mod huggingface;
pub mod openai;
pub mod replicate;

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::config::{Endpoints, StudioConfig};
use crate::error::StudioError;
use crate::progress::ProgressSink;
use crate::streaming::TextStream;
use crate::types::{ChatMessage, Credential, ImageRequest, ProviderId, VideoRequest};

/// Everything a strategy needs for one call.
#[derive(Clone, Debug)]
pub struct ProviderContext {
    http: reqwest::Client,
    config: Arc<StudioConfig>,
    credential: Credential,
}

impl ProviderContext {
    pub fn new(http: reqwest::Client, config: Arc<StudioConfig>, credential: Credential) -> Self {
        Self {
            http,
            config,
            credential,
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.config.endpoints
    }

    pub(crate) fn api_key(&self) -> &str {
        self.credential.expose()
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key())
    }
}

/// Synchronous image generation.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn validate_inputs(&self, request: &ImageRequest) -> Result<(), StudioError> {
        request.check()
    }

    /// Returns one data URL per produced image, in dispatch order.
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<String>, StudioError>;
}

/// Video generation with progress reporting.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn validate_inputs(&self, request: &VideoRequest) -> Result<(), StudioError> {
        request.validate()
    }

    /// Returns one playable media URL.
    async fn generate(
        &self,
        request: &VideoRequest,
        progress: &dyn ProgressSink,
    ) -> Result<String, StudioError>;
}

/// Chat replies as a lazy sequence of text fragments.
pub trait ChatProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// No network traffic happens until the stream is first polled.
    fn stream(&self, history: Vec<ChatMessage>) -> TextStream;
}

/// Lightweight authenticated read used to check a credential.
#[async_trait]
pub trait KeyProbe: Send + Sync {
    async fn probe(&self) -> Result<(), StudioError>;
}

/// Issue `count` independent calls concurrently and join them.
///
/// Results follow dispatch order, not completion order. The first failure
/// fails the whole batch.
pub(crate) async fn fan_out<F, Fut, T>(count: u32, call: F) -> Result<Vec<T>, StudioError>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<T, StudioError>>,
{
    futures::future::try_join_all((0..count).map(call)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn fan_out_keeps_dispatch_order() {
        // Call 0 finishes last, call 2 first.
        let out = fan_out(3, |i| async move {
            tokio::time::sleep(Duration::from_millis(u64::from(30 - i * 10))).await;
            Ok::<_, StudioError>(i)
        })
        .await
        .unwrap();
        assert_eq!(out, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn fan_out_fails_on_any_error() {
        let err = fan_out(3, |i| async move {
            if i == 1 {
                Err(StudioError::upstream("openai", Some(429), "rate limited"))
            } else {
                Ok(i)
            }
        })
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), Some(429));
    }
}
