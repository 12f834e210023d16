//! Llama 2 chat on Replicate's predictions API
//!
//! The prediction is created with `Prefer: wait` so short replies come back
//! in the same response. A prediction still running on return is polled via
//! `urls.get` with the same loop and guard as video jobs. The reply is
//! yielded as one fragment.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::StudioError;
use crate::http::{self, HttpRequestContext};
use crate::providers::{ChatProvider, KeyProbe, ProviderContext};
use crate::retry::{PollSettings, poll_until};
use crate::streaming::TextStream;
use crate::types::{ChatMessage, ProviderId, flatten_history};

const PROVIDER: ProviderId = ProviderId::ReplicateChat;

#[derive(Debug, Serialize)]
struct PredictionBody {
    input: PredictionInput,
}

#[derive(Debug, Serialize)]
struct PredictionInput {
    prompt: String,
    max_new_tokens: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictionUrls {
    #[serde(default)]
    pub get: Option<String>,
}

/// A Replicate prediction as returned by create and get.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub output: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub urls: PredictionUrls,
}

impl Prediction {
    pub fn is_terminal(&self) -> bool {
        matches!(self.status.as_str(), "succeeded" | "failed" | "canceled")
    }

    /// Output as text; language models stream tokens into a list.
    pub fn output_text(&self) -> Option<String> {
        match self.output.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<String>(),
            ),
            _ => None,
        }
    }

    fn into_reply(self) -> Result<String, StudioError> {
        match self.status.as_str() {
            "succeeded" => self.output_text().ok_or_else(|| {
                StudioError::MissingOutput(format!("{PROVIDER} prediction finished without output."))
            }),
            status => {
                let message = match &self.error {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => format!("prediction {status}"),
                };
                Err(StudioError::upstream(PROVIDER.as_str(), None, message))
            }
        }
    }
}

pub struct ReplicateChat {
    ctx: ProviderContext,
}

impl ReplicateChat {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

async fn fetch(ctx: &ProviderContext, url: String) -> Result<Prediction, StudioError> {
    let req = HttpRequestContext::new(PROVIDER, &url);
    let builder = ctx
        .http()
        .get(&url)
        .header(reqwest::header::AUTHORIZATION, ctx.bearer());
    let response = http::send(&req, builder).await?;
    http::read_json(PROVIDER, response).await
}

async fn complete(ctx: ProviderContext, history: Vec<ChatMessage>) -> Result<String, StudioError> {
    let url = format!(
        "{}/models/{}/predictions",
        ctx.endpoints().replicate,
        defaults::models::REPLICATE_LLAMA
    );
    let body = PredictionBody {
        input: PredictionInput {
            prompt: flatten_history(&history),
            max_new_tokens: defaults::chat::MAX_NEW_TOKENS,
        },
    };
    let req = HttpRequestContext::new(PROVIDER, &url);
    let builder = ctx
        .http()
        .post(&url)
        .header(reqwest::header::AUTHORIZATION, ctx.bearer())
        .header("Prefer", "wait")
        .json(&body);
    let response = http::send(&req, builder).await?;
    let prediction: Prediction = http::read_json(PROVIDER, response).await?;
    tracing::debug!(target: "genstudio::chat", provider = %PROVIDER, prediction = %prediction.id, status = %prediction.status, "prediction created");

    let prediction = if prediction.is_terminal() {
        prediction
    } else {
        let get_url = prediction.urls.get.clone().ok_or_else(|| {
            StudioError::upstream(
                PROVIDER.as_str(),
                None,
                "prediction is still running but has no status URL",
            )
        })?;
        poll_until(
            PROVIDER,
            PollSettings::from(&ctx.config().video),
            prediction,
            Prediction::is_terminal,
            |_| fetch(&ctx, get_url.clone()),
            |_| {},
        )
        .await?
    };

    prediction.into_reply()
}

impl ChatProvider for ReplicateChat {
    fn id(&self) -> ProviderId {
        PROVIDER
    }

    fn stream(&self, history: Vec<ChatMessage>) -> TextStream {
        let ctx = self.ctx.clone();
        let s = async_stream::try_stream! {
            let reply = complete(ctx, history).await?;
            yield reply;
        };
        Box::pin(s)
    }
}

#[async_trait::async_trait]
impl KeyProbe for ReplicateChat {
    async fn probe(&self) -> Result<(), StudioError> {
        let url = format!("{}/account", self.ctx.endpoints().replicate);
        let req = HttpRequestContext::new(PROVIDER, &url);
        let builder = self
            .ctx
            .http()
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.ctx.bearer())
            .timeout(self.ctx.config().validation_timeout);
        http::send(&req, builder).await.map(|_| ())
    }
}
