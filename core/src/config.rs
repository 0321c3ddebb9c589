//! Process-wide client configuration.
//!
//! The API key is loaded once at startup and handed to `CertificateClient::new`;
//! nothing in this crate reads it from a global.

use crate::error::ConfigError;

/// Environment variable read by `ClientConfig::from_env`.
pub const API_KEY_ENV: &str = "CERT_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        // Visible ASCII only, so the key always fits in a header value.
        if !api_key.bytes().all(|b| (0x20..0x7f).contains(&b)) {
            return Err(ConfigError::InvalidApiKey);
        }
        Ok(Self { api_key })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| ConfigError::MissingEnv(API_KEY_ENV))?;
        Self::new(api_key)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
