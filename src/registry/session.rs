//! Provider configuration workflow
//!
//! Tracks the modality, provider and credential being configured along with
//! the key's validation state. Changing modality, provider or key invalidates
//! any earlier verification.

use super::default_provider;
use crate::studio::Studio;
use crate::types::{Credential, KeyStatus, Modality, ProviderId};

/// A saved provider choice.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: ProviderId,
    pub credential: Credential,
}

#[derive(Debug, Clone)]
pub struct ProviderSession {
    modality: Modality,
    provider: ProviderId,
    credential: Credential,
    status: KeyStatus,
}

impl ProviderSession {
    /// Start on the free default of `modality`.
    pub fn new(modality: Modality) -> Self {
        Self {
            modality,
            provider: default_provider(modality),
            credential: Credential::empty(),
            status: KeyStatus::Unverified,
        }
    }

    pub const fn modality(&self) -> Modality {
        self.modality
    }

    pub const fn provider(&self) -> ProviderId {
        self.provider
    }

    pub const fn status(&self) -> KeyStatus {
        self.status
    }

    pub const fn requires_credential(&self) -> bool {
        self.provider.requires_credential()
    }

    /// Switch modality: back to its default provider with no key.
    pub fn select_modality(&mut self, modality: Modality) {
        self.modality = modality;
        self.provider = default_provider(modality);
        self.credential = Credential::empty();
        self.status = KeyStatus::Unverified;
    }

    /// Pick a provider of the current modality.
    ///
    /// A provider that needs no key is saved right away and its config
    /// returned; otherwise the key still has to be supplied and saved.
    pub fn select_provider(
        &mut self,
        provider: ProviderId,
    ) -> Result<Option<ProviderConfig>, crate::StudioError> {
        self.provider = provider.expect_modality(self.modality)?;
        self.status = KeyStatus::Unverified;
        Ok((!self.requires_credential()).then(|| self.config()))
    }

    pub fn set_credential(&mut self, credential: impl Into<Credential>) {
        self.credential = credential.into();
        self.status = KeyStatus::Unverified;
    }

    /// Validate the key if the provider needs one, then return the config.
    ///
    /// Returns `None` when the key was rejected.
    pub async fn save(&mut self, studio: &Studio) -> Option<ProviderConfig> {
        if self.requires_credential() {
            self.status = KeyStatus::Verifying;
            let valid = studio
                .validate_api_key(self.provider, &self.credential)
                .await;
            self.status = if valid {
                KeyStatus::Valid
            } else {
                KeyStatus::Invalid
            };
            if !valid {
                return None;
            }
        }
        Some(self.config())
    }

    fn config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider,
            credential: self.credential.clone(),
        }
    }
}
