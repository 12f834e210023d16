//! Imagen: one `predict` call returns every requested image.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{API_KEY_HEADER, model_url};
use crate::defaults;
use crate::error::StudioError;
use crate::http::{self, HttpRequestContext};
use crate::providers::{ImageProvider, ProviderContext};
use crate::types::{ImageRequest, ProviderId};
use crate::utils::data_url_from_base64;

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: [Instance<'a>; 1],
    parameters: Parameters<'a>,
}

#[derive(Debug, Serialize)]
struct Instance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters<'a> {
    sample_count: u32,
    aspect_ratio: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

/// Turn predictions into data URLs. Anything short of `count` images is an
/// error; the prompt was most likely filtered for some samples.
fn collect_images(response: PredictResponse, count: u32) -> Result<Vec<String>, StudioError> {
    let mut images: Vec<String> = response
        .predictions
        .into_iter()
        .filter_map(|p| {
            let bytes = p.bytes_base64_encoded?;
            let mime = p.mime_type.unwrap_or_else(|| "image/png".to_string());
            Some(data_url_from_base64(&mime, &bytes))
        })
        .collect();

    if images.is_empty() {
        return Err(StudioError::MissingOutput(
            "Imagen returned no images. The prompt may have been filtered.".to_string(),
        ));
    }
    if images.len() < count as usize {
        tracing::warn!(target: "genstudio::image", provider = %ProviderId::Gemini, requested = count, returned = images.len(), "fewer images than requested");
        return Err(StudioError::MissingOutput(format!(
            "Imagen returned {} of {count} images. The prompt may have been filtered.",
            images.len()
        )));
    }
    images.truncate(count as usize);
    Ok(images)
}

pub struct GeminiImagen {
    ctx: ProviderContext,
}

impl GeminiImagen {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ImageProvider for GeminiImagen {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn generate(&self, request: &ImageRequest) -> Result<Vec<String>, StudioError> {
        let url = model_url(&self.ctx.endpoints().google, defaults::models::IMAGEN, "predict");
        let body = PredictRequest {
            instances: [Instance {
                prompt: &request.prompt,
            }],
            parameters: Parameters {
                sample_count: request.count,
                aspect_ratio: request.aspect_ratio.as_str(),
                negative_prompt: Some(request.negative_prompt.trim()).filter(|n| !n.is_empty()),
            },
        };

        let req = HttpRequestContext::new(self.id(), &url);
        let builder = self
            .ctx
            .http()
            .post(&url)
            .header(API_KEY_HEADER, self.ctx.api_key())
            .json(&body);
        let response = http::send(&req, builder).await?;
        let parsed: PredictResponse = http::read_json(self.id(), response).await?;

        collect_images(parsed, request.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(value: serde_json::Value) -> PredictResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn full_batch_becomes_data_urls() {
        let images = collect_images(
            response(serde_json::json!({
                "predictions": [
                    { "bytesBase64Encoded": "AAAA", "mimeType": "image/jpeg" },
                    { "bytesBase64Encoded": "BBBB" }
                ]
            })),
            2,
        )
        .unwrap();
        assert_eq!(
            images,
            vec!["data:image/jpeg;base64,AAAA", "data:image/png;base64,BBBB"]
        );
    }

    #[test]
    fn short_batch_is_missing_output() {
        let err = collect_images(
            response(serde_json::json!({
                "predictions": [{ "bytesBase64Encoded": "AAAA" }, { "raiFilteredReason": "x" }]
            })),
            2,
        )
        .unwrap_err();
        assert!(matches!(err, StudioError::MissingOutput(_)));
        assert!(err.to_string().contains("1 of 2"));
    }

    #[test]
    fn empty_batch_is_missing_output() {
        let err = collect_images(response(serde_json::json!({})), 1).unwrap_err();
        assert!(matches!(err, StudioError::MissingOutput(_)));
    }
}
