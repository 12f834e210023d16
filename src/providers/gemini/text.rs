//! Prompt assistant backed by Gemini `generateContent`.

use serde::Deserialize;

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::{API_KEY_HEADER, model_url};
use crate::defaults;
use crate::error::StudioError;
use crate::http::{self, HttpRequestContext};
use crate::providers::ProviderContext;
use crate::types::{EnhanceLevel, ImageConcept, ProviderId};

const SURPRISE_PROMPT: &str = "Generate a single, random, highly creative and visually descriptive prompt for an AI image generator. Be imaginative and specific. Examples: \"a giant bioluminescent jellyfish floating over a misty forest at twilight, volumetric lighting, cinematic\", \"a cozy bookstore cafe on a rainy day in a cyberpunk city, neon signs reflecting on wet streets, detailed\", \"a majestic clockwork dragon soaring through a sky of swirling galaxies, intricate gears and filigree, epic\".";

#[derive(Debug, Default, Deserialize)]
struct ConceptList {
    #[serde(default)]
    concepts: Vec<ImageConcept>,
}

fn concepts_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "concepts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "prompt": { "type": "STRING" }
                    }
                }
            }
        }
    })
}

/// Text helpers around image prompts.
pub struct PromptAssistant {
    ctx: ProviderContext,
}

impl PromptAssistant {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    async fn generate_text(&self, body: &GenerateContentRequest) -> Result<String, StudioError> {
        let provider = ProviderId::GeminiChat;
        let url = model_url(
            &self.ctx.endpoints().google,
            defaults::models::GEMINI_FLASH,
            "generateContent",
        );
        let req = HttpRequestContext::new(provider, &url);
        let builder = self
            .ctx
            .http()
            .post(&url)
            .header(API_KEY_HEADER, self.ctx.api_key())
            .json(body);
        let response = http::send(&req, builder).await?;
        let parsed: GenerateContentResponse = http::read_json(provider, response).await?;
        Ok(parsed.text())
    }

    /// Rewrite `prompt` with the level's instruction.
    pub async fn enhance(&self, prompt: &str, level: EnhanceLevel) -> Result<String, StudioError> {
        if prompt.trim().is_empty() {
            return Err(StudioError::MissingInput(
                "Please enter a prompt to enhance.".to_string(),
            ));
        }
        let body = GenerateContentRequest::prompt(format!("{} \"{prompt}\"", level.instruction()));
        self.generate_text(&body).await
    }

    /// A random creative prompt, with double quotes stripped.
    pub async fn surprise(&self) -> Result<String, StudioError> {
        let text = self
            .generate_text(&GenerateContentRequest::prompt(SURPRISE_PROMPT))
            .await?;
        Ok(text.replace('"', ""))
    }

    /// Three cover-art concepts for a song title.
    pub async fn concepts(&self, song_title: &str) -> Result<Vec<ImageConcept>, StudioError> {
        let body = GenerateContentRequest::prompt(format!(
            "For the song title \"{song_title}\", generate 3 distinct cover art concepts. Each needs a name and a detailed, artistic prompt for an AI image generator."
        ))
        .with_json_schema(concepts_schema());
        let text = self.generate_text(&body).await?;
        let list: ConceptList = serde_json::from_str(text.trim()).map_err(|e| {
            StudioError::upstream(
                ProviderId::GeminiChat.as_str(),
                None,
                format!("concepts were not valid JSON: {e}"),
            )
        })?;
        Ok(list.concepts)
    }
}
