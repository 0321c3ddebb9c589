//! In-process transport double.

use std::sync::Mutex;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport};

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync;

/// Mock `HttpTransport` that answers from a closure and records every
/// request it is handed.
///
/// ```rust
/// use std::sync::Arc;
///
/// use cert_client::test_utils::TransportMock;
/// use cert_client::{CertificateApi, CertificateClient, ClientConfig};
///
/// let mock = Arc::new(TransportMock::responding(200, r#"{"valid":true}"#));
/// let client = CertificateClient::new(ClientConfig::new("key").unwrap());
/// let api = CertificateApi::new(client, Arc::clone(&mock));
///
/// let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
/// let result = rt.block_on(api.validate_certificate_code("http://backend", "ABC123")).unwrap();
/// assert_eq!(result["valid"], true);
/// assert_eq!(mock.requests()[0].header("X-API-KEY"), Some("key"));
/// ```
pub struct TransportMock {
    responder: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl TransportMock {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with the same status and body.
    pub fn responding(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| {
            Ok(HttpResponse {
                status,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: body.clone(),
            })
        })
    }

    /// Fail every request as if the backend were unreachable.
    pub fn unreachable() -> Self {
        Self::new(|req| {
            Err(ApiError::Transport {
                url: req.url.clone(),
                source: "connection refused".into(),
            })
        })
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl HttpTransport for TransportMock {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = (self.responder)(&request);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);
        result
    }
}
