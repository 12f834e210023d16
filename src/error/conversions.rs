//! Type Conversions for StudioError
//!
//! From implementations for the error types of the HTTP, JSON and validation
//! crates.

use super::types::StudioError;

impl From<reqwest::Error> for StudioError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::TimeoutError(err.to_string());
        }
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        Self::UpstreamError {
            provider: "upstream".to_string(),
            status: None,
            message: format!("malformed response: {err}"),
        }
    }
}

impl From<validator::ValidationErrors> for StudioError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: StudioError = json_err.into();
        match err {
            StudioError::UpstreamError {
                status, message, ..
            } => {
                assert_eq!(status, None);
                assert!(message.starts_with("malformed response"));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }
}
