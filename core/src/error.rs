//! Error types for the certificate API client.
//!
//! # Design
//! A reachable backend that answers with a non-2xx status lands in
//! `Request` with the raw status code and body text. A request that never
//! completed (DNS, refused connection, timeout) lands in `Transport` with the
//! underlying error as its source. JSON failures on either side of the
//! exchange get their own variants.

/// Errors returned by `CertificateClient` parse methods and `CertificateApi`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a status outside 200–299.
    #[error("Error: {status} - {body}")]
    Request { status: u16, body: String },

    /// The request never produced a response.
    #[error("requesting {url}: {source}")]
    Transport {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A 2xx response body could not be parsed as JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The HTTP status carried by a `Request` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading `ClientConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("API key must not be empty")]
    EmptyApiKey,

    #[error("API key is not a valid header value")]
    InvalidApiKey,
}
