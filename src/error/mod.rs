//! Error Handling Module
//!
//! A single error enum shared by every orchestrator, plus conversions from the
//! HTTP/JSON/validation crates and the upstream error-envelope classifier.
//!
//! # Example
//!
//! ```rust,ignore
//! use genstudio::error::StudioError;
//! use genstudio::types::ProviderId;
//!
//! let error = StudioError::MissingCredential { provider: ProviderId::OpenAi };
//! assert!(error.is_missing_credential());
//! assert_eq!(error.to_string(), "An API key is required for openai.");
//! ```

mod classify;
mod conversions;
pub mod types;

pub use classify::classify_http_error;
pub use types::*;
