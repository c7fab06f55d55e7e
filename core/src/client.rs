//! Preconfigured API client.
//!
//! # Design
//! `ApiClient` holds an immutable `ClientConfig` and a `Transport`. Every call
//! runs the same three steps: `build_request` serializes the payload and
//! merges headers, the transport performs the round-trip, and
//! `parse_response` interprets the body. The first and last steps never touch
//! the network and can be called on their own.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{set_header, HttpMethod, HttpRequest, HttpResponse};
use crate::pipeline::{interpret_response, serialize_request};
use crate::transport::{Transport, UreqTransport};
use crate::types::ApiResponse;

/// Client with the request serializer and response interpreter applied to
/// every call.
///
/// Cloning shares the configuration. Concurrent calls share no mutable state.
#[derive(Clone)]
pub struct ApiClient<T = UreqTransport> {
    config: Arc<ClientConfig>,
    transport: T,
}

impl<T> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Build a client whose base URL comes from `API_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Describe a request as data: resolved URL, default headers overlaid
    /// with `headers`, and the serialized payload.
    pub fn build_request<P>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&P>,
        headers: &[(&str, &str)],
    ) -> Result<HttpRequest, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let body = serialize_request(payload)?;
        let mut merged = self.config.default_headers().to_vec();
        for (name, value) in headers {
            set_header(&mut merged, name, value);
        }
        let url = self.config.resolve_url(path);
        debug!(%method, %url, has_body = body.is_some(), "built request");
        Ok(HttpRequest {
            method,
            url,
            headers: merged,
            body,
        })
    }

    pub fn parse_response(&self, response: HttpResponse) -> Result<ApiResponse, ApiError> {
        let data = interpret_response(&response)?;
        Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            data,
        })
    }

    /// Execute a prebuilt request and interpret its response.
    pub fn send(&self, request: HttpRequest) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(request)?;
        self.parse_response(response)
    }

    pub fn request<P>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&P>,
        headers: &[(&str, &str)],
    ) -> Result<ApiResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, payload, headers)?;
        self.send(request)
    }

    pub fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.request::<()>(HttpMethod::Get, path, None, &[])
    }

    pub fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.request::<()>(HttpMethod::Delete, path, None, &[])
    }

    pub fn post<P>(&self, path: &str, payload: &P) -> Result<ApiResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.request(HttpMethod::Post, path, Some(payload), &[])
    }

    pub fn put<P>(&self, path: &str, payload: &P) -> Result<ApiResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.request(HttpMethod::Put, path, Some(payload), &[])
    }

    pub fn patch<P>(&self, path: &str, payload: &P) -> Result<ApiResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.request(HttpMethod::Patch, path, Some(payload), &[])
    }
}
