use axum::http::{self, Request, StatusCode};
use cert_mock_server::{app, Backend, CodeEntry, IssuedCertificate};
use http_body_util::BodyExt;
use tower::ServiceExt;

const KEY: &str = "test-key";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn backend_with(code: &str) -> Backend {
    let backend = Backend::new([KEY], "https://certs.example/img/");
    backend.insert_code(code, "standard", "event").await;
    backend
}

fn validate_request(code_query: &str, key: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().uri(format!("/valide?code={code_query}"));
    if let Some(key) = key {
        builder = builder.header("X-API-KEY", key);
    }
    builder.body(String::new()).unwrap()
}

fn generate_request(body: &str, key: Option<&str>) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/erstelle")
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(key) = key {
        builder = builder.header("X-API-KEY", key);
    }
    builder.body(body.to_string()).unwrap()
}

// --- api key ---

#[tokio::test]
async fn missing_api_key_returns_403() {
    let app = app(backend_with("ABC").await);
    let resp = app.oneshot(validate_request("ABC", None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_text(resp).await, "Invalid or missing API key");
}

#[tokio::test]
async fn wrong_api_key_returns_403() {
    let app = app(backend_with("ABC").await);
    let resp = app
        .oneshot(generate_request(
            r#"{"name":"A","email":"a@b.com","code":"ABC"}"#,
            Some("other-key"),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// --- validate ---

#[tokio::test]
async fn validate_known_code_returns_entry() {
    let app = app(backend_with("ABC123").await);
    let resp = app.oneshot(validate_request("ABC123", Some(KEY))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let entry: CodeEntry = body_json(resp).await;
    assert_eq!(entry.code, "ABC123");
    assert_eq!(entry.kind, "standard");
    assert_eq!(entry.tags, "event");
    assert!(!entry.generated);
}

#[tokio::test]
async fn validate_decodes_percent_encoded_code() {
    let app = app(backend_with("a b&c").await);
    let resp = app.oneshot(validate_request("a%20b%26c", Some(KEY))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let entry: CodeEntry = body_json(resp).await;
    assert_eq!(entry.code, "a b&c");
}

#[tokio::test]
async fn validate_unknown_code_returns_404() {
    let app = app(backend_with("ABC").await);
    let resp = app.oneshot(validate_request("BAD", Some(KEY))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "Invalid or used code");
}

// --- generate ---

#[tokio::test]
async fn generate_returns_201_with_links() {
    let backend = backend_with("ABC").await;
    let app = app(backend.clone());
    let resp = app
        .oneshot(generate_request(
            r#"{"name":"Ada","email":"ada@example.com","code":"ABC"}"#,
            Some(KEY),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let issued: IssuedCertificate = body_json(resp).await;
    assert_eq!(issued.message, "success");
    assert_eq!(issued.code, "ABC");
    assert_eq!(issued.pdf_url, "https://certs.example/img/ABC.pdf");
    assert_eq!(issued.png_url, "https://certs.example/img/ABC.png");

    let entry = backend.entry("ABC").await.unwrap();
    assert_eq!(entry.name, "Ada");
    assert_eq!(entry.email, "ada@example.com");
    assert!(entry.generated);
}

#[tokio::test]
async fn generate_unknown_code_returns_404() {
    let app = app(backend_with("ABC").await);
    let resp = app
        .oneshot(generate_request(
            r#"{"name":"A","email":"a@b.com","code":"NOPE"}"#,
            Some(KEY),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn generate_malformed_json_is_rejected() {
    let app = app(backend_with("ABC").await);
    let resp = app
        .oneshot(generate_request(r#"{"name":"A"}"#, Some(KEY)))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

// --- single-use lifecycle ---

#[tokio::test]
async fn code_is_single_use() {
    use tower::Service;

    let mut app = app(backend_with("ONCE").await).into_service();

    // validate before use
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(validate_request("ONCE", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // generate
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(generate_request(
            r#"{"name":"A","email":"a@b.com","code":"ONCE"}"#,
            Some(KEY),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // validate after use — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(validate_request("ONCE", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // generate again — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(generate_request(
            r#"{"name":"B","email":"b@b.com","code":"ONCE"}"#,
            Some(KEY),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
