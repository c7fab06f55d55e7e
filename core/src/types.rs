//! Values handed back to callers after the response has been interpreted.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::find_header;

/// A response body after interpretation: decoded JSON, or the raw text when
/// the response did not declare a JSON content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseData {
    pub fn is_json(&self) -> bool {
        matches!(self, ResponseData::Json(_))
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            ResponseData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Text(text) => Some(text),
            ResponseData::Json(_) => None,
        }
    }
}

impl fmt::Display for ResponseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseData::Json(value) => write!(f, "{value}"),
            ResponseData::Text(text) => f.write_str(text),
        }
    }
}

/// A completed exchange as seen by the caller.
///
/// The status is carried through untouched; use `error_for_status` to turn
/// non-2xx responses into errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub data: ResponseData,
}

impl ApiResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Map non-success status codes to the appropriate `ApiError` variant.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            return Ok(self);
        }
        if self.status == 404 {
            return Err(ApiError::NotFound);
        }
        Err(ApiError::HttpError {
            status: self.status,
            body: self.data.to_string(),
        })
    }

    /// Convert a JSON body into `T`.
    ///
    /// A text body is an error: the server did not declare JSON, so there
    /// is nothing structured to convert.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let ApiResponse { headers, data, .. } = self;
        match data {
            ResponseData::Json(value) => serde_json::from_value(value)
                .map_err(|e| ApiError::DeserializationError(e.to_string())),
            ResponseData::Text(_) => Err(ApiError::DeserializationError(format!(
                "expected a JSON body, got content-type {:?}",
                find_header(&headers, "content-type").unwrap_or("<none>")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn response(status: u16, data: ResponseData) -> ApiResponse {
        ApiResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            data,
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
        name: String,
    }

    #[test]
    fn error_for_status_passes_success_through() {
        let resp = response(201, ResponseData::Json(json!({"ok": true})));
        assert_eq!(resp.clone().error_for_status().unwrap(), resp);
    }

    #[test]
    fn error_for_status_maps_404() {
        let err = response(404, ResponseData::Text(String::new()))
            .error_for_status()
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn error_for_status_keeps_body_of_other_failures() {
        let err = response(500, ResponseData::Json(json!({"error": "boom"})))
            .error_for_status()
            .unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, r#"{"error":"boom"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn json_converts_structured_body() {
        let item: Item = response(200, ResponseData::Json(json!({"id": 7, "name": "bolt"})))
            .json()
            .unwrap();
        assert_eq!(
            item,
            Item {
                id: 7,
                name: "bolt".to_string()
            }
        );
    }

    #[test]
    fn json_rejects_shape_mismatch() {
        let err = response(200, ResponseData::Json(json!({"id": "seven"})))
            .json::<Item>()
            .unwrap_err();
        assert!(err.to_string().starts_with("Error parsing response:\n "));
    }

    #[test]
    fn json_rejects_text_body() {
        let resp = ApiResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "text/html".to_string())],
            data: ResponseData::Text("<p>hi</p>".to_string()),
        };
        let err = resp.json::<Item>().unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(ref msg) if msg.contains("text/html")));
    }

    #[test]
    fn text_display_is_verbatim() {
        assert_eq!(ResponseData::Text("a\nb".to_string()).to_string(), "a\nb");
        assert_eq!(ResponseData::Text("x".to_string()).as_text(), Some("x"));
        assert!(ResponseData::Json(json!(null)).is_json());
    }
}
