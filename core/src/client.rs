//! Stateless HTTP request builder and response parser for the certificate backend.
//!
//! # Design
//! `CertificateClient` holds only the configured API key. The base URL is
//! supplied on every call and used verbatim, so callers control its exact
//! form. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CertificateRequest, CertificateResult, ValidationResult};

pub const VALIDATE_PATH: &str = "/valide";
pub const GENERATE_PATH: &str = "/erstelle";
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Characters left as-is by a URI component encoder; everything else is `%XX`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Synchronous, stateless client for the certificate backend.
#[derive(Debug, Clone)]
pub struct CertificateClient {
    api_key: String,
}

impl CertificateClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            api_key: config.api_key().to_string(),
        }
    }

    /// GET `{base_url}/valide?code=…` with `code` percent-encoded.
    pub fn build_validate_code(&self, base_url: &str, code: &str) -> HttpRequest {
        let code = utf8_percent_encode(code, QUERY_COMPONENT);
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{base_url}{VALIDATE_PATH}?code={code}"),
            headers: self.headers(),
            body: None,
        }
    }

    pub fn build_generate_certificate(
        &self,
        base_url: &str,
        input: &CertificateRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{base_url}{GENERATE_PATH}"),
            headers: self.headers(),
            body: Some(body),
        })
    }

    pub fn parse_validate_code(&self, response: HttpResponse) -> Result<ValidationResult, ApiError> {
        parse_json(response)
    }

    pub fn parse_generate_certificate(&self, response: HttpResponse) -> Result<CertificateResult, ApiError> {
        parse_json(response)
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (API_KEY_HEADER.to_string(), self.api_key.clone()),
        ]
    }
}

/// Any 2xx is success; everything else becomes `ApiError::Request` with the raw body.
fn parse_json(response: HttpResponse) -> Result<serde_json::Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Request {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
