//! Settings for the single `reqwest::Client` shared by every provider strategy.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::defaults;
use crate::error::StudioError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout. Video downloads can be large, so keep it generous.
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    /// Extra headers sent on every upstream request.
    pub headers: Vec<(String, String)>,
    pub proxy: Option<String>,
    pub user_agent: String,
    /// Send `Accept-Encoding: identity` on streaming chat requests so
    /// intermediaries do not buffer SSE frames.
    pub stream_disable_compression: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(defaults::http::REQUEST_TIMEOUT),
            connect_timeout: Some(defaults::http::CONNECT_TIMEOUT),
            headers: Vec::new(),
            proxy: None,
            user_agent: defaults::http::USER_AGENT.to_string(),
            stream_disable_compression: true,
        }
    }
}

impl HttpConfig {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_stream_compression(mut self, enabled: bool) -> Self {
        self.stream_disable_compression = !enabled;
        self
    }

    /// Build the shared client. Bad proxy URLs or header names surface as
    /// `ConfigurationError` here rather than on the first request.
    pub fn build_client(&self) -> Result<reqwest::Client, StudioError> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(proxy) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| config_error(format!("invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.header_map()?);
        }

        builder
            .build()
            .map_err(|e| config_error(format!("failed to build HTTP client: {e}")))
    }

    fn header_map(&self) -> Result<HeaderMap, StudioError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| config_error(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| config_error(format!("invalid value for header '{name}': {e}")))?;
            map.insert(header, value);
        }
        Ok(map)
    }
}

fn config_error(message: String) -> StudioError {
    StudioError::ConfigurationError(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_a_client() {
        let cfg = HttpConfig::default().with_header("x-trace", "1");
        assert_eq!(cfg.connect_timeout, Some(defaults::http::CONNECT_TIMEOUT));
        assert!(cfg.user_agent.starts_with("genstudio/"));
        assert!(cfg.stream_disable_compression);
        assert!(cfg.build_client().is_ok());
    }

    #[test]
    fn invalid_header_name_is_a_configuration_error() {
        let err = HttpConfig::default()
            .with_header("bad header", "v")
            .build_client()
            .unwrap_err();
        assert!(matches!(err, StudioError::ConfigurationError(_)));
    }

    #[test]
    fn invalid_proxy_is_a_configuration_error() {
        let err = HttpConfig::default()
            .with_proxy("not a url")
            .build_client()
            .unwrap_err();
        assert!(matches!(err, StudioError::ConfigurationError(_)));
    }
}
