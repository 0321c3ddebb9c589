//! Payloads exchanged with the certificate backend.
//!
//! # Design
//! Responses are backend-defined, so both results are plain `serde_json::Value`
//! records passed through untouched. The request is typed only so callers get
//! field names checked at compile time; no validation happens here.

use serde::{Deserialize, Serialize};

/// Holder data submitted to `/erstelle`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CertificateRequest {
    pub name: String,
    pub email: String,
    pub code: String,
}

/// Parsed body of a successful `/valide` call.
pub type ValidationResult = serde_json::Value;

/// Parsed body of a successful `/erstelle` call.
pub type CertificateResult = serde_json::Value;
