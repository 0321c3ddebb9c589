use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

pub const API_KEY_HEADER: &str = "x-api-key";
const INVALID_CODE: &str = "Invalid or used code";
const INVALID_KEY: &str = "Invalid or missing API key";

/// One issued certificate code and, once generated, its holder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub email: String,
    pub tags: String,
    pub generated: bool,
}

#[derive(Deserialize)]
pub struct ValidateParams {
    #[serde(default)]
    pub code: String,
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub code: String,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IssuedCertificate {
    pub message: String,
    pub code: String,
    pub png_url: String,
    pub pdf_url: String,
}

/// Shared in-memory backend state. Cloning shares the same store.
#[derive(Clone)]
pub struct Backend {
    inner: Arc<Inner>,
}

struct Inner {
    api_keys: HashSet<String>,
    public_url: String,
    codes: RwLock<HashMap<String, CodeEntry>>,
}

impl Backend {
    /// `public_url` prefixes the certificate file names handed back by `/erstelle`.
    pub fn new<K, S>(api_keys: K, public_url: impl Into<String>) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Arc::new(Inner {
                api_keys: api_keys.into_iter().map(Into::into).collect(),
                public_url: public_url.into(),
                codes: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub async fn insert_code(&self, code: &str, kind: &str, tags: &str) {
        let entry = CodeEntry {
            code: code.to_string(),
            kind: kind.to_string(),
            name: String::new(),
            email: String::new(),
            tags: tags.to_string(),
            generated: false,
        };
        self.inner.codes.write().await.insert(entry.code.clone(), entry);
    }

    /// Mint `count` fresh unused codes of the given type.
    pub async fn issue_codes(&self, count: usize, kind: &str, tags: &str) -> Vec<String> {
        let mut issued = Vec::with_capacity(count);
        for _ in 0..count {
            let code = Uuid::new_v4().simple().to_string().to_uppercase();
            self.insert_code(&code, kind, tags).await;
            issued.push(code);
        }
        issued
    }

    pub async fn entry(&self, code: &str) -> Option<CodeEntry> {
        self.inner.codes.read().await.get(code).cloned()
    }

    fn accepts_key(&self, key: &str) -> bool {
        self.inner.api_keys.contains(key)
    }
}

pub fn app(backend: Backend) -> Router {
    Router::new()
        .route("/valide", get(validate_code))
        .route("/erstelle", post(generate_certificate))
        .route_layer(middleware::from_fn_with_state(backend.clone(), require_api_key))
        .with_state(backend)
}

pub async fn run(listener: TcpListener, backend: Backend) -> Result<(), std::io::Error> {
    axum::serve(listener, app(backend)).await
}

async fn require_api_key(State(backend): State<Backend>, request: Request, next: Next) -> Response {
    let key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if key.is_empty() || !backend.accepts_key(key) {
        warn!("rejected request to {}: {INVALID_KEY}", request.uri().path());
        return (StatusCode::FORBIDDEN, INVALID_KEY).into_response();
    }
    next.run(request).await
}

async fn validate_code(
    State(backend): State<Backend>,
    Query(params): Query<ValidateParams>,
) -> Result<Json<CodeEntry>, (StatusCode, &'static str)> {
    let codes = backend.inner.codes.read().await;
    match codes.get(&params.code) {
        Some(entry) if !entry.generated => Ok(Json(entry.clone())),
        _ => Err((StatusCode::NOT_FOUND, INVALID_CODE)),
    }
}

async fn generate_certificate(
    State(backend): State<Backend>,
    Json(input): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<IssuedCertificate>), (StatusCode, &'static str)> {
    let mut codes = backend.inner.codes.write().await;
    let entry = match codes.get_mut(&input.code) {
        Some(entry) if !entry.generated => entry,
        _ => return Err((StatusCode::NOT_FOUND, INVALID_CODE)),
    };
    entry.name = input.name;
    entry.email = input.email;
    entry.generated = true;
    info!("generated certificate for code {}", entry.code);

    let public_url = &backend.inner.public_url;
    Ok((
        StatusCode::CREATED,
        Json(IssuedCertificate {
            message: "success".to_string(),
            code: entry.code.clone(),
            png_url: format!("{public_url}{}.png", entry.code),
            pdf_url: format!("{public_url}{}.pdf", entry.code),
        }),
    ))
}
