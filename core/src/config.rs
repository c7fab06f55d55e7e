//! Client configuration: base URL and default headers.
//!
//! # Design
//! A `ClientConfig` is built once, usually from the environment, and then
//! shared read-only by every request. `from_lookup` takes the variable
//! source as a closure so tests can supply values without mutating the
//! process environment.

use crate::error::ApiError;
use crate::http::set_header;
use crate::pipeline::JSON_MEDIA_TYPE;

/// Environment variable holding the API base URL.
pub const BASE_URL_VAR: &str = "API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Config for `base_url` with the default `Content-Type: application/json`
    /// header. Trailing slashes are stripped.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers: vec![("Content-Type".to_string(), JSON_MEDIA_TYPE.to_string())],
        }
    }

    /// Read the base URL from `API_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::Config(format!("{BASE_URL_VAR} is not set")))?;
        Ok(Self::new(&base_url))
    }

    /// Add a default header, replacing any existing one with the same name.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        set_header(&mut self.default_headers, name, value);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    /// Resolve a request path against the base URL.
    ///
    /// Absolute URLs are returned unchanged; relative paths are joined with
    /// exactly one `/`.
    pub fn resolve_url(&self, path: &str) -> String {
        if is_absolute_url(path) {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return self.base_url.clone();
        }
        format!("{}/{}", self.base_url, path)
    }
}

/// `scheme://...` or protocol-relative `//host/...`.
fn is_absolute_url(url: &str) -> bool {
    if url.starts_with("//") {
        return true;
    }
    match url.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}
