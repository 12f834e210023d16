//! HTTP execution helpers
//!
//! Thin layer over `reqwest` shared by every provider strategy: request
//! logging, status classification, and body decoding.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::{StudioError, classify_http_error};
use crate::types::ProviderId;
use crate::utils::data_url::Binary;
use crate::utils::mime::resolve_media_mime;

/// Context describing one outbound request, used for logging.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    pub request_id: String,
    pub provider: ProviderId,
    pub url: String,
    pub stream: bool,
}

impl HttpRequestContext {
    pub fn new(provider: ProviderId, url: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            provider,
            url: url.into(),
            stream: false,
        }
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}

/// Send a request and turn any non-2xx status into an upstream error.
pub async fn send(ctx: &HttpRequestContext, builder: RequestBuilder) -> Result<Response, StudioError> {
    tracing::debug!(target: "genstudio::http", request_id = %ctx.request_id, provider = %ctx.provider, url = %ctx.url, stream = ctx.stream, "sending request");

    let response = builder.send().await.map_err(|e| {
        let error = StudioError::from(e);
        tracing::warn!(target: "genstudio::http", request_id = %ctx.request_id, provider = %ctx.provider, err = %error, "request failed");
        error
    })?;

    tracing::debug!(target: "genstudio::http", request_id = %ctx.request_id, provider = %ctx.provider, status = response.status().as_u16(), "response received");
    ensure_success(ctx.provider, response).await
}

/// Send without classifying the status; callers that treat some non-2xx
/// statuses as retryable inspect the response themselves.
pub async fn send_raw(ctx: &HttpRequestContext, builder: RequestBuilder) -> Result<Response, StudioError> {
    tracing::debug!(target: "genstudio::http", request_id = %ctx.request_id, provider = %ctx.provider, url = %ctx.url, "sending request");
    let response = builder.send().await?;
    tracing::debug!(target: "genstudio::http", request_id = %ctx.request_id, provider = %ctx.provider, status = response.status().as_u16(), "response received");
    Ok(response)
}

pub async fn ensure_success(provider: ProviderId, response: Response) -> Result<Response, StudioError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let error = classify_http_error(provider.as_str(), status.as_u16(), &text);
    tracing::warn!(target: "genstudio::http", %provider, status = status.as_u16(), err = %error, "upstream error");
    Err(error)
}

/// Decode a JSON body, labelling parse failures with the provider.
pub async fn read_json<T: DeserializeOwned>(provider: ProviderId, response: Response) -> Result<T, StudioError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        StudioError::upstream(provider.as_str(), None, format!("malformed response: {e}"))
    })
}

/// Read a binary media body and resolve its MIME type.
pub async fn read_media(provider: ProviderId, response: Response, fallback_mime: &str) -> Result<Binary, StudioError> {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(StudioError::MissingOutput(format!(
            "{provider} returned an empty media body."
        )));
    }
    Ok(Binary {
        mime_type: resolve_media_mime(content_type.as_deref(), &bytes, fallback_mime),
        bytes: bytes.to_vec(),
    })
}
