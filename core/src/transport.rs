//! Executes an `HttpRequest` and returns the raw `HttpResponse`.
//!
//! The pipeline never performs I/O itself; whatever implements `Transport`
//! owns connections and timing. `UreqTransport` is the default. Closures
//! implement the trait too, which is how tests fake the network.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

/// Response bodies are read in full unless a transport sets a lower cap.
pub const UNLIMITED_BODY: u64 = u64::MAX;

/// Blocking transport backed by a `ureq::Agent`.
///
/// Status codes are never treated as transport errors: 4xx/5xx responses
/// come back as data and reach the response interpreter like any other.
/// Bodies are read without a size cap by default; `with_body_limit` sets one.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            body_limit: UNLIMITED_BODY,
        }
    }

    /// Cap response bodies at `bytes`. Larger bodies fail with
    /// `ApiError::Transport` before interpretation.
    pub fn with_body_limit(mut self, bytes: u64) -> Self {
        self.body_limit = bytes;
        self
    }

    pub fn body_limit(&self) -> u64 {
        self.body_limit
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "executing request");
        let url = request.url.as_str();
        let headers = &request.headers;

        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, None) => with_headers(self.agent.get(url), headers).call(),
            (HttpMethod::Get, Some(body)) => with_headers(self.agent.get(url), headers)
                .force_send_body()
                .send(body),
            (HttpMethod::Delete, None) => with_headers(self.agent.delete(url), headers).call(),
            (HttpMethod::Delete, Some(body)) => with_headers(self.agent.delete(url), headers)
                .force_send_body()
                .send(body),
            (HttpMethod::Post, Some(body)) => with_headers(self.agent.post(url), headers).send(body),
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(self.agent.put(url), headers).send(body),
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), headers).send_empty(),
            (HttpMethod::Patch, Some(body)) => {
                with_headers(self.agent.patch(url), headers).send(body)
            }
            (HttpMethod::Patch, None) => with_headers(self.agent.patch(url), headers).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
