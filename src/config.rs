//! Studio configuration.
//!
//! Aggregates the HTTP client settings, upstream base URLs, video timing and
//! the process-wide Google key used by the free Gemini providers.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::defaults;
use crate::types::HttpConfig;

pub use crate::retry::ColdStartPolicy;

/// Upstream base URLs. Overridable so tests can point at a mock server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub google: String,
    pub openai: String,
    pub huggingface: String,
    pub replicate: String,
}

impl Endpoints {
    /// Route every provider to the same base URL.
    pub fn all(base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        Self {
            google: base.clone(),
            openai: base.clone(),
            huggingface: base.clone(),
            replicate: base,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            google: defaults::endpoints::GOOGLE.to_string(),
            openai: defaults::endpoints::OPENAI.to_string(),
            huggingface: defaults::endpoints::HUGGINGFACE.to_string(),
            replicate: defaults::endpoints::REPLICATE.to_string(),
        }
    }
}

/// Timing for the video orchestrator and other long-running polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSettings {
    /// Sleep between status polls of a long-running job.
    pub poll_interval: Duration,
    /// Give up after this many polls. `None` polls until the job finishes.
    pub max_poll_attempts: Option<u32>,
    /// Simulated latency of the demo stub.
    pub demo_delay: Duration,
    pub demo_video_url: String,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            poll_interval: defaults::video::POLL_INTERVAL,
            max_poll_attempts: Some(defaults::video::MAX_POLL_ATTEMPTS),
            demo_delay: defaults::video::DEMO_DELAY,
            demo_video_url: defaults::video::DEMO_VIDEO_URL.to_string(),
        }
    }
}

/// Complete configuration for a `Studio`.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub http: HttpConfig,
    pub endpoints: Endpoints,
    pub video: VideoSettings,
    pub cold_start: ColdStartPolicy,
    /// Process-wide key backing the free Gemini providers.
    pub google_api_key: Option<SecretString>,
    /// Timeout applied to key validation probes.
    pub validation_timeout: Duration,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            endpoints: Endpoints::default(),
            video: VideoSettings::default(),
            cold_start: ColdStartPolicy::default(),
            google_api_key: None,
            validation_timeout: defaults::http::VALIDATION_TIMEOUT,
        }
    }
}

impl StudioConfig {
    pub fn builder() -> StudioConfigBuilder {
        StudioConfigBuilder::default()
    }

    /// Load from environment variables, falling back to defaults.
    ///
    /// - `GENSTUDIO_GOOGLE_API_KEY`, then `GEMINI_API_KEY`, then `API_KEY`
    /// - `GENSTUDIO_POLL_INTERVAL_SECS`
    /// - `GENSTUDIO_MAX_POLL_ATTEMPTS` (`0` disables the guard)
    /// - `GENSTUDIO_HTTP_TIMEOUT_SECS`
    /// - `GENSTUDIO_STREAM_COMPRESSION` (`true`/`false`)
    pub fn from_env() -> Self {
        let mut builder = Self::builder();

        if let Some(key) = ["GENSTUDIO_GOOGLE_API_KEY", "GEMINI_API_KEY", "API_KEY"]
            .iter()
            .find_map(|name| env_non_empty(name))
        {
            builder = builder.google_api_key(key);
        }
        if let Some(secs) = env_parse::<u64>("GENSTUDIO_POLL_INTERVAL_SECS") {
            builder = builder.poll_interval(Duration::from_secs(secs));
        }
        if let Some(max) = env_parse::<u32>("GENSTUDIO_MAX_POLL_ATTEMPTS") {
            builder = builder.max_poll_attempts((max > 0).then_some(max));
        }
        let mut http = HttpConfig::default();
        if let Some(secs) = env_parse::<u64>("GENSTUDIO_HTTP_TIMEOUT_SECS") {
            http = http.with_timeout(Some(Duration::from_secs(secs)));
        }
        if let Some(enabled) = env_parse::<bool>("GENSTUDIO_STREAM_COMPRESSION") {
            http = http.with_stream_compression(enabled);
        }
        builder = builder.http(http);

        builder.build()
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env_non_empty(name)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(target: "genstudio::config", var = name, value = %raw, "ignoring unparsable environment variable");
            None
        }
    }
}

/// Builder for `StudioConfig`
#[derive(Debug, Clone, Default)]
pub struct StudioConfigBuilder {
    config: StudioConfig,
}

impl StudioConfigBuilder {
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.config.http = http;
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// Point every provider at one base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.endpoints = Endpoints::all(base_url);
        self
    }

    pub fn video(mut self, video: VideoSettings) -> Self {
        self.config.video = video;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.video.poll_interval = interval;
        self
    }

    pub fn max_poll_attempts(mut self, max: Option<u32>) -> Self {
        self.config.video.max_poll_attempts = max;
        self
    }

    pub fn demo_delay(mut self, delay: Duration) -> Self {
        self.config.video.demo_delay = delay;
        self
    }

    pub fn cold_start(mut self, policy: ColdStartPolicy) -> Self {
        self.config.cold_start = policy;
        self
    }

    pub fn google_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.google_api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn validation_timeout(mut self, timeout: Duration) -> Self {
        self.config.validation_timeout = timeout;
        self
    }

    pub fn build(self) -> StudioConfig {
        self.config
    }
}
