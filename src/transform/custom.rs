//! Caller-supplied response body transforms.
//!
//! # Design Decisions
//! - Transforms run in order after the built-in dispatch
//! - A failing transform is logged and skipped; the previous body is kept
//! - Later transforms still run after a failure

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::message::{Body, Headers};

/// Error type returned by transforms.
pub type TransformError = Box<dyn Error + Send + Sync>;

/// A post-dispatch response body transform.
pub trait ResponseTransform: Send + Sync {
    /// Produce a replacement for `body`.
    fn transform(&self, body: &Body, headers: &Headers) -> Result<Body, TransformError>;

    /// Name used in log events.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> ResponseTransform for F
where
    F: Fn(&Body, &Headers) -> Result<Body, TransformError> + Send + Sync,
{
    fn transform(&self, body: &Body, headers: &Headers) -> Result<Body, TransformError> {
        self(body, headers)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Ordered list of transforms shared by a codec instance.
#[derive(Clone, Default)]
pub struct TransformChain {
    transforms: Vec<Arc<dyn ResponseTransform>>,
}

impl fmt::Debug for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.transforms.iter().map(|t| t.name()))
            .finish()
    }
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transform: Arc<dyn ResponseTransform>) {
        self.transforms.push(transform);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Run every transform in order, best effort.
    pub fn apply(&self, mut body: Body, headers: &Headers) -> Body {
        for (index, transform) in self.transforms.iter().enumerate() {
            match transform.transform(&body, headers) {
                Ok(next) => body = next,
                Err(err) => {
                    tracing::warn!(
                        index,
                        transform = transform.name(),
                        error = %err,
                        "Response transform failed, keeping previous body"
                    );
                }
            }
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upper(body: &Body, _: &Headers) -> Result<Body, TransformError> {
        match body {
            Body::Text(text) => Ok(Body::Text(text.to_uppercase())),
            other => Ok(other.clone()),
        }
    }

    fn failing(_: &Body, _: &Headers) -> Result<Body, TransformError> {
        Err("boom".into())
    }

    fn exclaim(body: &Body, _: &Headers) -> Result<Body, TransformError> {
        match body {
            Body::Text(text) => Ok(Body::Text(format!("{}!", text))),
            other => Ok(other.clone()),
        }
    }

    #[test]
    fn test_transforms_run_in_order() {
        let mut chain = TransformChain::new();
        chain.push(Arc::new(upper));
        chain.push(Arc::new(exclaim));

        let body = chain.apply(Body::Text("hi".into()), &Headers::new());
        assert_eq!(body.as_text(), Some("HI!"));
    }

    #[test]
    fn test_failure_keeps_previous_body_and_continues() {
        let mut chain = TransformChain::new();
        chain.push(Arc::new(upper));
        chain.push(Arc::new(failing));
        chain.push(Arc::new(exclaim));

        let body = chain.apply(Body::Text("hi".into()), &Headers::new());
        assert_eq!(body.as_text(), Some("HI!"));
    }

    #[test]
    fn test_transform_sees_headers() {
        let wrap = |body: &Body, headers: &Headers| -> Result<Body, TransformError> {
            let tag = headers.get("x-tag").unwrap_or("none");
            Ok(Body::Json(json!({"tag": tag, "kind": body.kind()})))
        };
        let mut chain = TransformChain::new();
        chain.push(Arc::new(wrap));

        let headers: Headers = [("x-tag", "v1")].into_iter().collect();
        let body = chain.apply(Body::Empty, &headers);
        assert_eq!(body.as_json(), Some(&json!({"tag": "v1", "kind": "empty"})));
    }
}
