use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Caller-owned API key for one request.
///
/// Wraps a `SecretString` so the value never shows up in `Debug` output or
/// logs. An empty credential is valid only for providers that do not require one.
#[derive(Clone, Default)]
pub struct Credential(Option<SecretString>);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            Self(None)
        } else {
            Self(Some(SecretString::from(trimmed.to_string())))
        }
    }

    pub const fn empty() -> Self {
        Self(None)
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Raw key for building request headers.
    pub(crate) fn expose(&self) -> &str {
        self.0.as_ref().map(|s| s.expose_secret()).unwrap_or("")
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<SecretString> for Credential {
    fn from(value: SecretString) -> Self {
        Self::new(value.expose_secret())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential([REDACTED])")
        }
    }
}
