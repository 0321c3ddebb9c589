//! Async facade that runs build, transport and parse for each operation.

use tracing::error;

use crate::client::CertificateClient;
use crate::error::ApiError;
use crate::http::HttpTransport;
use crate::transport::ReqwestTransport;
use crate::types::{CertificateRequest, CertificateResult, ValidationResult};

/// Certificate backend client bound to a transport.
///
/// Holds no per-call state: concurrent calls on clones or on a shared
/// reference are independent. Failures are logged once at `error` level and
/// returned unchanged; nothing is retried.
#[derive(Debug, Clone)]
pub struct CertificateApi<T = ReqwestTransport> {
    client: CertificateClient,
    transport: T,
}

impl CertificateApi<ReqwestTransport> {
    /// Client over a default `reqwest::Client`.
    pub fn with_reqwest(client: CertificateClient) -> Self {
        Self::new(client, ReqwestTransport::new())
    }
}

impl<T: HttpTransport + Send + Sync> CertificateApi<T> {
    pub fn new(client: CertificateClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// Ask the backend whether `code` is valid and unused.
    pub async fn validate_certificate_code(
        &self,
        base_url: &str,
        code: &str,
    ) -> Result<ValidationResult, ApiError> {
        let result = async {
            let request = self.client.build_validate_code(base_url, code);
            let response = self.transport.execute(request).await?;
            self.client.parse_validate_code(response)
        }
        .await;

        result.inspect_err(|e| error!(error = %e, "error validating certificate"))
    }

    /// Submit holder data so the backend issues a certificate for its code.
    pub async fn generate_certificate(
        &self,
        base_url: &str,
        input: &CertificateRequest,
    ) -> Result<CertificateResult, ApiError> {
        let result = async {
            let request = self.client.build_generate_certificate(base_url, input)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_generate_certificate(response)
        }
        .await;

        result.inspect_err(|e| error!(error = %e, "error generating certificate"))
    }
}
