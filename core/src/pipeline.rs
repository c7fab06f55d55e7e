//! Request serializer and response interpreter.
//!
//! # Design
//! Both stages are pure functions with no I/O and no shared state, so the
//! client composes them around the transport call and tests drive them
//! directly. Failures are wrapped with a fixed prefix and returned; nothing
//! is retried or replaced with a fallback value.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::types::ResponseData;

/// Media type that switches the interpreter into JSON decoding.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Encode an outgoing payload as JSON text.
///
/// An absent payload produces no body at all.
pub fn serialize_request<P>(payload: Option<&P>) -> Result<Option<String>, ApiError>
where
    P: Serialize + ?Sized,
{
    let Some(payload) = payload else {
        return Ok(None);
    };
    match serde_json::to_string(payload) {
        Ok(body) => Ok(Some(body)),
        Err(e) => {
            warn!(error = %e, "failed to serialize request payload");
            Err(ApiError::SerializationError(e.to_string()))
        }
    }
}

/// Decode the body when the response declares JSON, otherwise pass it
/// through unchanged.
///
/// The `content-type` match is a substring test, so parameters such as
/// `; charset=utf-8` still qualify. A response without that header, or
/// without any headers, is treated as text.
pub fn interpret_response(response: &HttpResponse) -> Result<ResponseData, ApiError> {
    let content_type = response.header("content-type");
    if !content_type.is_some_and(|value| value.contains(JSON_MEDIA_TYPE)) {
        debug!(?content_type, "passing response body through as text");
        return Ok(ResponseData::Text(response.body.clone()));
    }
    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(ResponseData::Json(value)),
        Err(e) => {
            warn!(error = %e, status = response.status, "failed to parse JSON response");
            Err(ApiError::DeserializationError(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;
    use serde::ser::Error as _;
    use serde::{Deserialize, Serializer};
    use serde_json::{json, Value};

    use super::*;

    fn response(headers: &[(&str, &str)], body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_string(),
        }
    }

    /// Stands in for a graph that refers back to itself.
    struct SelfReferencing;

    impl Serialize for SelfReferencing {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("cyclic reference detected"))
        }
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Order {
        id: u64,
        sku: String,
        quantity: i32,
        note: Option<String>,
        tags: Vec<String>,
    }

    #[test]
    fn absent_payload_has_no_body() {
        assert_eq!(serialize_request::<Value>(None).unwrap(), None);
    }

    #[test]
    fn null_payload_is_encoded() {
        assert_eq!(
            serialize_request(Some(&Value::Null)).unwrap().as_deref(),
            Some("null")
        );
    }

    #[test]
    fn struct_payload_round_trips() {
        let order = Order {
            id: 42,
            sku: "A-1".to_string(),
            quantity: -3,
            note: None,
            tags: vec!["rush".to_string()],
        };
        let body = serialize_request(Some(&order)).unwrap().unwrap();
        let back: Order = serde_json::from_str(&body).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn cyclic_payload_fails_with_context() {
        let err = serialize_request(Some(&SelfReferencing)).unwrap_err();
        assert!(matches!(err, ApiError::SerializationError(_)));
        assert_eq!(
            err.to_string(),
            "Error stringifying request:\n cyclic reference detected"
        );
    }

    #[test]
    fn non_string_map_keys_fail_with_context() {
        let mut payload = BTreeMap::new();
        payload.insert((1, 2), "pair");
        let err = serialize_request(Some(&payload)).unwrap_err();
        assert!(err.to_string().starts_with("Error stringifying request:\n "));
    }

    #[test]
    fn json_content_type_is_decoded() {
        let resp = response(&[("content-type", "application/json")], r#"{"a":1}"#);
        assert_eq!(
            interpret_response(&resp).unwrap(),
            ResponseData::Json(json!({"a": 1}))
        );
    }

    #[test]
    fn json_content_type_with_parameters_is_decoded() {
        let resp = response(
            &[("Content-Type", "application/json; charset=utf-8")],
            "[1,2,3]",
        );
        assert_eq!(
            interpret_response(&resp).unwrap(),
            ResponseData::Json(json!([1, 2, 3]))
        );
    }

    #[test]
    fn text_content_type_is_passed_through() {
        let resp = response(&[("content-type", "text/plain")], "hello");
        assert_eq!(
            interpret_response(&resp).unwrap(),
            ResponseData::Text("hello".to_string())
        );
    }

    #[test]
    fn json_looking_text_is_not_decoded() {
        let resp = response(&[("content-type", "text/plain")], r#"{"a":1}"#);
        assert_eq!(
            interpret_response(&resp).unwrap(),
            ResponseData::Text(r#"{"a":1}"#.to_string())
        );
    }

    #[test]
    fn malformed_json_fails_with_context() {
        let resp = response(
            &[("content-type", "application/json; charset=utf-8")],
            "{not json",
        );
        let err = interpret_response(&resp).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
        assert!(err.to_string().starts_with("Error parsing response:\n "));
    }

    #[test]
    fn empty_json_body_is_a_parse_error() {
        let resp = response(&[("content-type", "application/json")], "");
        assert!(matches!(
            interpret_response(&resp),
            Err(ApiError::DeserializationError(_))
        ));
    }

    #[test]
    fn missing_headers_return_raw_body() {
        let resp = response(&[], "{not json");
        assert_eq!(
            interpret_response(&resp).unwrap(),
            ResponseData::Text("{not json".to_string())
        );
    }

    #[test]
    fn missing_content_type_returns_raw_body() {
        let resp = response(&[("x-request-id", "abc")], "raw");
        assert_eq!(
            interpret_response(&resp).unwrap(),
            ResponseData::Text("raw".to_string())
        );
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            ".*".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::btree_map(".*", inner, 0..8)
                    .prop_map(|map| Value::Object(map.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn serialized_payload_decodes_to_same_value(value in arb_json()) {
            let body = serialize_request(Some(&value)).unwrap().unwrap();
            let back: Value = serde_json::from_str(&body).unwrap();
            prop_assert_eq!(back, value);
        }
    }
}
