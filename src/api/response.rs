//! Uniform response envelope.
//!
//! Every operation answers with the same shape: a status code, fixed JSON +
//! CORS headers, and an optional JSON-serialized body.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

const CONTENT_TYPE_JSON: &str = "application/json";
const ALLOW_ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: ResponseHeaders,
    /// JSON-encoded body, present iff a body value was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: &'static str,
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub access_control_allow_origin: &'static str,
}

impl Default for ResponseHeaders {
    fn default() -> Self {
        Self {
            content_type: CONTENT_TYPE_JSON,
            access_control_allow_origin: ALLOW_ANY_ORIGIN,
        }
    }
}

impl ResponseEnvelope {
    pub fn new(status_code: u16, body: Option<Value>) -> Self {
        let body = body.map(|value| {
            serde_json::to_string(&value).unwrap_or_else(|_| "null".to_string())
        });

        Self {
            status_code,
            headers: ResponseHeaders::default(),
            body,
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, Some(body))
    }

    pub fn not_found(body: Value) -> Self {
        Self::new(404, Some(body))
    }

    /// 500 with a short generic message; the underlying error never crosses
    /// the response boundary.
    pub fn server_error(message: &str) -> Self {
        Self::new(500, Some(Value::String(message.to_string())))
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = match self.body {
            Some(body) => (status, body).into_response(),
            None => status.into_response(),
        };

        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CONTENT_TYPE_JSON),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ANY_ORIGIN),
        );

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_is_serialized_to_a_json_string() {
        let envelope = ResponseEnvelope::ok(json!({ "products": [] }));
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body.as_deref(), Some(r#"{"products":[]}"#));
    }

    #[test]
    fn string_bodies_keep_their_quotes() {
        let envelope = ResponseEnvelope::not_found(json!("Not Found"));
        assert_eq!(envelope.body.as_deref(), Some(r#""Not Found""#));
    }

    #[test]
    fn missing_body_is_omitted_from_the_envelope() {
        let envelope = ResponseEnvelope::new(200, None);
        assert_eq!(envelope.body, None);

        let wire = serde_json::to_value(&envelope).unwrap();
        assert!(wire.get("body").is_none());
        assert_eq!(wire["statusCode"], json!(200));
        assert_eq!(wire["headers"]["Content-Type"], json!("application/json"));
        assert_eq!(wire["headers"]["Access-Control-Allow-Origin"], json!("*"));
    }

    #[test]
    fn numbers_render_as_plain_json_numbers() {
        let envelope = ResponseEnvelope::ok(json!({ "price": 19.99, "stock": 42 }));
        assert_eq!(envelope.body.as_deref(), Some(r#"{"price":19.99,"stock":42}"#));
    }
}
