use serde::{Deserialize, Serialize};

/// How aggressively the prompt assistant rewrites a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnhanceLevel {
    #[default]
    Subtle,
    Artistic,
    Extreme,
}

impl EnhanceLevel {
    pub(crate) const fn instruction(&self) -> &'static str {
        match self {
            Self::Subtle => "Slightly enhance this prompt with more detail: ",
            Self::Artistic => {
                "Rewrite this prompt to be much more artistic, vivid, and descriptive: "
            }
            Self::Extreme => {
                "Completely reimagine this concept into an extreme, vivid, and highly detailed artistic masterpiece prompt for an AI image generator: "
            }
        }
    }
}

/// A named cover-art idea with a ready-to-use image prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConcept {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prompt: String,
}
