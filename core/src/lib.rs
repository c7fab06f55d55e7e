//! Preconfigured JSON API client.
//!
//! # Overview
//! One client configuration (base URL from `API_URL`, default
//! `Content-Type: application/json`) with two transforms applied to every
//! call: payloads are serialized to JSON text before sending, and response
//! bodies are decoded as JSON only when the server declares a JSON content
//! type.
//!
//! # Design
//! - The transforms in `pipeline` are pure functions; `ApiClient` composes
//!   them around a `Transport` call, so both are testable without a network.
//! - Requests and responses are plain data (`http`), executed by the
//!   caller-supplied or default `UreqTransport`.
//! - Configuration is immutable once a client is built; `shared` exposes a
//!   single process-wide instance.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod shared;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::{ClientConfig, BASE_URL_VAR};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pipeline::{interpret_response, serialize_request};
pub use shared::{install_shared, shared};
pub use transport::{Transport, UreqTransport, UNLIMITED_BODY};
pub use types::{ApiResponse, ResponseData};
