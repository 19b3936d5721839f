//! Inbound request event model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The trigger record every invocation starts from: method, path, optional
/// query parameters, and an optional raw JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl RequestEvent {
    pub fn new(http_method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            path: path.into(),
            query_string_parameters: None,
            body: None,
        }
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    /// Parses the body as a JSON object, `None` when the body is absent,
    /// malformed, or not an object.
    pub fn json_body(&self) -> Option<Map<String, Value>> {
        let body = self.body.as_deref()?;
        match serde_json::from_str(body) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_the_wire_shape() {
        let event: RequestEvent = serde_json::from_value(json!({
            "httpMethod": "GET",
            "path": "/product",
            "queryStringParameters": { "productId": "a" },
        }))
        .unwrap();

        assert_eq!(event.http_method, "GET");
        assert_eq!(event.path, "/product");
        assert_eq!(event.query_param("productId"), Some("a"));
        assert_eq!(event.body, None);
    }

    #[test]
    fn json_body_rejects_non_objects() {
        let event = RequestEvent::new("POST", "/product").with_body("[1, 2]");
        assert!(event.json_body().is_none());

        let event = RequestEvent::new("POST", "/product").with_body("{not json");
        assert!(event.json_body().is_none());

        let event = RequestEvent::new("POST", "/product").with_body(r#"{"productId":"a"}"#);
        assert_eq!(
            event.json_body().unwrap().get("productId"),
            Some(&json!("a"))
        );
    }
}
