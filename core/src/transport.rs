//! `HttpTransport` over reqwest.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Default transport. No timeout is configured here; bring a customised
/// `reqwest::Client` through `From` when one is needed.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client, // cheaply cloneable, pooled connections live inside
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<reqwest::Client> for ReqwestTransport {
    fn from(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut rb = self.client.request(method, request.url.as_str());
        for (key, value) in &request.headers {
            rb = rb.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            rb = rb.body(body);
        }

        debug!("cert_client: requesting {} {}", request.method.as_str(), request.url);

        let response = rb.send().await.map_err(|e| ApiError::Transport {
            url: request.url.clone(),
            source: Box::new(e),
        })?;

        let status = response.status().as_u16();
        debug!("cert_client: response from {}: {status}", request.url);

        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = match response.text().await {
            Ok(body) => body,
            // The status already came back, so a non-2xx still reports as a request error.
            Err(e) if !(200..300).contains(&status) => {
                debug!("cert_client: body from {} unreadable: {e}", request.url);
                String::new()
            }
            Err(e) => {
                return Err(ApiError::Transport {
                    url: request.url.clone(),
                    source: Box::new(e),
                })
            }
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
