//! API client for the certificate-issuance backend.
//!
//! # Overview
//! Two operations: validate a certificate code (`GET /valide`) and submit
//! holder data to generate a certificate (`POST /erstelle`). Every request
//! carries `Content-Type: application/json` and the configured `X-API-KEY`.
//!
//! # Design
//! - `CertificateClient` is stateless apart from the API key; the base URL is
//!   passed on every call.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `CertificateApi` joins the two around an `HttpTransport`, logging
//!   failures through `tracing` before returning them.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod test_utils;
pub mod transport;
pub mod types;

pub use api::CertificateApi;
pub use client::CertificateClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use transport::ReqwestTransport;
pub use types::{CertificateRequest, CertificateResult, ValidationResult};
