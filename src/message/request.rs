//! Structured HTTP request.

use serde::{Deserialize, Serialize};

use crate::message::body::Body;
use crate::message::headers::Headers;

/// Request in the axios configuration shape: `{method, url, headers, data}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredRequest {
    /// Verb; lowercase after decode. Encode upper-cases it and defaults to `GET` when empty.
    #[serde(default)]
    pub method: String,

    /// Request target, passed through verbatim.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub headers: Headers,

    #[serde(default, rename = "data")]
    pub body: Body,
}

impl StructuredRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Self::default()
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
