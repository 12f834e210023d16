use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::defaults;
use crate::error::StudioError;

/// Requested output aspect ratio.
///
/// Providers map this to their nearest supported output dimensions; a ratio
/// a provider cannot express falls back to its square size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:4")]
    StandardPortrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Standard,
        AspectRatio::StandardPortrait,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Standard => "4:3",
            Self::StandardPortrait => "3:4",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| StudioError::InvalidInput(format!("Unsupported aspect ratio: {s}")))
    }
}

/// Image generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ImageRequest {
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: String,
    /// Number of images to return.
    #[validate(range(min = 1, message = "count must be at least 1"))]
    pub count: u32,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = negative_prompt.into();
        self
    }

    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub const fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Same request narrowed to a single output, for regenerating one slot.
    pub fn single(&self) -> Self {
        Self {
            count: 1,
            ..self.clone()
        }
    }

    /// Check structural invariants and presence of the prompt.
    pub fn check(&self) -> Result<(), StudioError> {
        if self.prompt.trim().is_empty() {
            return Err(StudioError::MissingInput(
                "Please enter a prompt.".to_string(),
            ));
        }
        self.validate()?;
        Ok(())
    }
}

impl Default for ImageRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            negative_prompt: defaults::image::NEGATIVE_PROMPT.to_string(),
            count: defaults::image::COUNT,
            aspect_ratio: AspectRatio::Square,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_invalid() {
        let err = ImageRequest::new("a fox").with_count(0).check().unwrap_err();
        assert!(matches!(err, StudioError::InvalidInput(_)), "{err:?}");
    }

    #[test]
    fn blank_prompt_is_missing_input() {
        let err = ImageRequest::new("  ").check().unwrap_err();
        assert!(matches!(err, StudioError::MissingInput(_)));
    }

    #[test]
    fn defaults_match_the_generator_form() {
        let req = ImageRequest::new("a fox");
        assert_eq!(req.count, 2);
        assert_eq!(req.aspect_ratio, AspectRatio::Square);
        assert!(req.negative_prompt.contains("bad anatomy"));
        assert_eq!(req.single().count, 1);
    }

    #[test]
    fn aspect_ratio_parses_wire_form() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Landscape);
        assert!("21:9".parse::<AspectRatio>().is_err());
        assert_eq!(
            serde_json::to_string(&AspectRatio::StandardPortrait).unwrap(),
            "\"3:4\""
        );
    }
}
