//! Llama 3 text generation. Not a streaming endpoint: the history is
//! flattened into one prompt and the reply arrives as a single fragment.

use serde::{Deserialize, Serialize};

use super::model_url;
use crate::defaults;
use crate::error::StudioError;
use crate::http::{self, HttpRequestContext};
use crate::providers::{ChatProvider, KeyProbe, ProviderContext};
use crate::streaming::TextStream;
use crate::types::{ChatMessage, ProviderId, flatten_history};

#[derive(Debug, Serialize)]
struct TextGenerationBody {
    inputs: String,
    parameters: TextGenerationParameters,
}

#[derive(Debug, Serialize)]
struct TextGenerationParameters {
    return_full_text: bool,
    max_new_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    #[serde(default)]
    generated_text: Option<String>,
}

pub struct HuggingFaceChat {
    ctx: ProviderContext,
}

impl HuggingFaceChat {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

async fn complete(ctx: ProviderContext, history: Vec<ChatMessage>) -> Result<String, StudioError> {
    let provider = ProviderId::HuggingFaceChat;
    let url = model_url(&ctx.endpoints().huggingface, defaults::models::LLAMA_3_INSTRUCT);
    let body = TextGenerationBody {
        inputs: flatten_history(&history),
        parameters: TextGenerationParameters {
            return_full_text: false,
            max_new_tokens: defaults::chat::MAX_NEW_TOKENS,
        },
    };
    let req = HttpRequestContext::new(provider, &url);
    let builder = ctx
        .http()
        .post(&url)
        .header(reqwest::header::AUTHORIZATION, ctx.bearer())
        .json(&body);
    let response = http::send(&req, builder).await?;
    let outputs: Vec<GeneratedText> = http::read_json(provider, response).await?;
    outputs
        .into_iter()
        .next()
        .and_then(|o| o.generated_text)
        .ok_or_else(|| StudioError::MissingOutput(format!("{provider} returned no generated text.")))
}

impl ChatProvider for HuggingFaceChat {
    fn id(&self) -> ProviderId {
        ProviderId::HuggingFaceChat
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
impl KeyProbe for HuggingFaceChat {
    async fn probe(&self) -> Result<(), StudioError> {
        super::probe(&self.ctx, self.id()).await
    }
}
