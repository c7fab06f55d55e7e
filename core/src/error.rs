//! Error types for the API client.
//!
//! # Design
//! The two transform failures carry the underlying cause as text and render
//! with a fixed prefix, so callers and logs see which side of the exchange
//! broke. `NotFound` and `HttpError` only appear when the caller opts into
//! status checking via `ApiResponse::error_for_status`; the client itself
//! hands back every status as data.

use thiserror::Error;

/// Errors returned by the request pipeline and the client built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The outgoing payload could not be encoded as JSON.
    #[error("Error stringifying request:\n {0}")]
    SerializationError(String),

    /// A body declared as JSON could not be decoded.
    #[error("Error parsing response:\n {0}")]
    DeserializationError(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The transport could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),

    /// Required configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),
}
