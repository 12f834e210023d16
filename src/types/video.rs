use serde::{Deserialize, Serialize};

use crate::error::StudioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoMode {
    #[default]
    TextToVideo,
    ImageToVideo,
}

/// Video generation request.
///
/// `input_image` is a base64 data URL.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoRequest {
    pub mode: VideoMode,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub input_image: Option<String>,
}

impl VideoRequest {
    pub fn text_to_video(prompt: impl Into<String>) -> Self {
        Self {
            mode: VideoMode::TextToVideo,
            prompt: prompt.into(),
            input_image: None,
        }
    }

    pub fn image_to_video(input_image: impl Into<String>) -> Self {
        Self {
            mode: VideoMode::ImageToVideo,
            prompt: String::new(),
            input_image: Some(input_image.into()),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_input_image(mut self, input_image: impl Into<String>) -> Self {
        self.input_image = Some(input_image.into());
        self
    }

    /// Input image, treating an empty string as absent.
    pub fn image(&self) -> Option<&str> {
        self.input_image.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Text-to-video needs a prompt; image-to-video needs an image.
    pub fn validate(&self) -> Result<(), StudioError> {
        match self.mode {
            VideoMode::TextToVideo if self.prompt.trim().is_empty() => Err(
                StudioError::MissingInput("Please enter a prompt for this mode.".to_string()),
            ),
            VideoMode::ImageToVideo if self.image().is_none() => Err(StudioError::MissingInput(
                "Please upload an image for this mode.".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_invariants() {
        assert!(VideoRequest::text_to_video("waves").validate().is_ok());
        assert!(matches!(
            VideoRequest::text_to_video("").validate(),
            Err(StudioError::MissingInput(_))
        ));
        assert!(
            VideoRequest::image_to_video("data:image/png;base64,AAAA")
                .validate()
                .is_ok()
        );
        assert!(matches!(
            VideoRequest::image_to_video("").validate(),
            Err(StudioError::MissingInput(_))
        ));
    }

    #[test]
    fn mode_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&VideoMode::ImageToVideo).unwrap(),
            "\"image-to-video\""
        );
    }
}
