//! Orchestrators
//!
//! One entry point per modality. Each resolves the credential, picks the
//! strategy for the `ProviderId`, and runs it inside a span carrying the
//! provider and a fresh request id.

pub mod chat;
pub mod image;
pub mod validator;
pub mod video;

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::config::StudioConfig;
use crate::error::StudioError;
use crate::providers::ProviderContext;
use crate::types::{Credential, ProviderId};

/// Shared HTTP client plus configuration; cheap to clone.
#[derive(Clone, Debug)]
pub struct Runtime {
    http: reqwest::Client,
    config: Arc<StudioConfig>,
}

impl Runtime {
    pub fn new(config: StudioConfig) -> Result<Self, StudioError> {
        let http = config.http.build_client()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Resolve the credential and build the strategy context.
    ///
    /// Fails with `MissingCredential` before any network traffic.
    pub fn context(
        &self,
        provider: ProviderId,
        credential: &Credential,
    ) -> Result<ProviderContext, StudioError> {
        let credential = resolve_credential(provider, credential, &self.config)?;
        Ok(self.unchecked_context(credential))
    }

    pub(crate) fn unchecked_context(&self, credential: Credential) -> ProviderContext {
        ProviderContext::new(self.http.clone(), self.config.clone(), credential)
    }
}

/// Pick the credential a call will use.
///
/// Paid providers need the caller's. The free Gemini providers use the
/// caller's when given, else the configured Google key. The demo stub needs
/// nothing.
pub fn resolve_credential(
    provider: ProviderId,
    credential: &Credential,
    config: &StudioConfig,
) -> Result<Credential, StudioError> {
    match provider {
        ProviderId::DemoVideo => Ok(Credential::empty()),
        ProviderId::Gemini | ProviderId::GeminiChat => {
            if !credential.is_empty() {
                return Ok(credential.clone());
            }
            config
                .google_api_key
                .as_ref()
                .map(|key| Credential::new(key.expose_secret()))
                .filter(|c| !c.is_empty())
                .ok_or(StudioError::MissingCredential { provider })
        }
        _ if credential.is_empty() => Err(StudioError::MissingCredential { provider }),
        _ => Ok(credential.clone()),
    }
}

fn request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
