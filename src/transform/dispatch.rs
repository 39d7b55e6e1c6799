//! Content-type driven body transformation for decoded responses.
//!
//! | content type                         | body                                  |
//! |--------------------------------------|---------------------------------------|
//! | `application/json`, `application/*+json` | JSON value, raw bytes if unparseable |
//! | `text/*`, form-urlencoded, XML       | UTF-8 text                            |
//! | `application/octet-stream`           | strict UTF-8 text, else raw bytes     |
//! | `multipart/form-data`                | decoded form                          |
//! | anything else                        | strict UTF-8 text, else raw bytes     |
//!
//! An empty body always stays `Body::Empty`.

use crate::error::CodecResult;
use crate::message::Body;
use crate::multipart::{extract_boundary, read_form};

/// The transformation selected for a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Text,
    Multipart,
    /// Strict UTF-8, raw bytes on failure.
    TextOrBytes,
}

/// Classify a `content-type` header value.
pub fn classify(content_type: Option<&str>) -> BodyKind {
    let Some(content_type) = content_type else {
        return BodyKind::TextOrBytes;
    };
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if is_json(&media_type) {
        BodyKind::Json
    } else if media_type == "multipart/form-data" {
        BodyKind::Multipart
    } else if media_type.starts_with("text/")
        || media_type == "application/x-www-form-urlencoded"
        || media_type == "application/xml"
    {
        BodyKind::Text
    } else {
        BodyKind::TextOrBytes
    }
}

fn is_json(media_type: &str) -> bool {
    media_type == "application/json"
        || media_type
            .strip_prefix("application/")
            .is_some_and(|subtype| subtype.ends_with("+json"))
}

/// Apply the built-in dispatch table to a decoded response body.
pub fn dispatch_body(body: &[u8], content_type: Option<&str>) -> CodecResult<Body> {
    if body.is_empty() {
        return Ok(Body::Empty);
    }

    let kind = classify(content_type);
    let decoded = match kind {
        BodyKind::Json => match serde_json::from_slice(body) {
            Ok(value) => Body::Json(value),
            Err(err) => {
                tracing::debug!(error = %err, "JSON body did not parse, keeping raw bytes");
                Body::Bytes(body.to_vec())
            }
        },
        BodyKind::Text => Body::Text(String::from_utf8_lossy(body).into_owned()),
        BodyKind::Multipart => {
            let boundary = extract_boundary(content_type.unwrap_or_default())?;
            Body::Form(read_form(body, &boundary))
        }
        BodyKind::TextOrBytes => match std::str::from_utf8(body) {
            Ok(text) => Body::Text(text.to_string()),
            Err(_) => {
                tracing::debug!(len = body.len(), "Body is not valid UTF-8, keeping raw bytes");
                Body::Bytes(body.to_vec())
            }
        },
    };
    Ok(decoded)
}
