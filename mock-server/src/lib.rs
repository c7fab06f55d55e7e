use axum::{
    body::Body,
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Body returned by `/echo`: what the server actually received.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub content_type: Option<String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/json", get(json_fixture))
        .route("/text", get(text_fixture))
        .route("/malformed", get(malformed_fixture))
        .route("/bare", get(bare_fixture))
        .route("/echo", any(echo))
        .route("/status/{code}", get(status_fixture))
        .route("/large/{bytes}", get(large_fixture))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn json_fixture() -> Json<Value> {
    Json(json!({ "a": 1, "items": ["x", "y"], "nested": { "ok": true } }))
}

async fn text_fixture() -> &'static str {
    "hello"
}

async fn malformed_fixture() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        "{not json",
    )
}

/// A body with no content-type header at all.
async fn bare_fixture() -> Response {
    Response::new(Body::from("raw body"))
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    tracing::debug!(%method, ?content_type, "echoing request");
    Json(Echo {
        method: method.to_string(),
        content_type,
        body,
    })
}

async fn status_fixture(Path(code): Path<u16>) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(json!({ "status": code }))))
}

/// A `text/plain` body of exactly `bytes` bytes.
async fn large_fixture(Path(bytes): Path<usize>) -> String {
    "a".repeat(bytes)
}
