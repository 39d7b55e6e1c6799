//! Structured HTTP response.

use serde::{Deserialize, Serialize};

use crate::message::body::Body;
use crate::message::headers::Headers;

/// Response in the axios response shape: `{status, statusText, headers, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredResponse {
    pub status: u16,

    /// Reason phrase; may contain spaces and punctuation.
    #[serde(default)]
    pub status_text: String,

    #[serde(default)]
    pub headers: Headers,

    #[serde(default, rename = "data")]
    pub body: Body,
}

impl StructuredResponse {
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers: Headers::new(),
            body: Body::Empty,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_axios_shape() {
        let res = StructuredResponse::new(404, "Not Found")
            .header("content-type", "application/json")
            .body(json!({"error": "missing"}));

        let value = serde_json::to_value(&res).unwrap();
        assert_eq!(
            value,
            json!({
                "status": 404,
                "statusText": "Not Found",
                "headers": {"content-type": "application/json"},
                "data": {"error": "missing"}
            })
        );
    }

    #[test]
    fn test_missing_data_is_empty() {
        let res: StructuredResponse =
            serde_json::from_value(json!({"status": 204, "statusText": "No Content"})).unwrap();
        assert!(res.body.is_empty());
        assert!(res.headers.is_empty());
    }
}
