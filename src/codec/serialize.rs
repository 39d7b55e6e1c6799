//! Shared message serialization for both encode directions.
//!
//! # Design Decisions
//! - Headers are emitted in insertion order, after case normalization
//! - Form bodies replace caller `content-type`/`content-length` with computed ones
//! - JSON bodies get `content-type: application/json` only when none is present
//! - `content-length` is added for non-empty bodies unless already present

use crate::codec::HttpConverter;
use crate::error::{CodecError, CodecResult};
use crate::message::{Body, Headers};
use crate::multipart::write_form;

const CONTENT_TYPE: &str = "Content-Type";
const CONTENT_LENGTH: &str = "Content-Length";

/// Serialized body plus the headers it implies.
#[derive(Debug)]
pub(crate) struct EncodedBody {
    pub bytes: Vec<u8>,
    /// Content type forced by the body kind (multipart).
    pub forced_content_type: Option<String>,
    /// Content type to add when the caller did not supply one (JSON).
    pub default_content_type: Option<&'static str>,
}

impl HttpConverter {
    /// Serialize a body according to its variant.
    pub(crate) async fn encode_body(&self, body: &Body) -> CodecResult<EncodedBody> {
        let mut encoded = EncodedBody {
            bytes: Vec::new(),
            forced_content_type: None,
            default_content_type: None,
        };
        match body {
            Body::Empty => {}
            Body::Bytes(bytes) => encoded.bytes = bytes.clone(),
            Body::Text(text) => encoded.bytes = text.as_bytes().to_vec(),
            Body::Json(value) => {
                encoded.bytes = serde_json::to_vec(value)?;
                encoded.default_content_type = Some("application/json");
            }
            Body::Form(form) => {
                encoded.bytes = write_form(form, &self.boundary).await?;
                encoded.forced_content_type =
                    Some(format!("multipart/form-data; boundary={}", self.boundary));
            }
        }
        self.check_body_size(encoded.bytes.len())?;
        Ok(encoded)
    }

    /// Assemble start line, headers, blank line and body.
    pub(crate) fn write_message(
        &self,
        start_line: &str,
        headers: &Headers,
        body: EncodedBody,
    ) -> Vec<u8> {
        let preserve = self.options.preserve_header_case;
        let mut headers: Headers = headers
            .iter()
            .map(|(name, value)| (self.header_name(name), value))
            .collect();

        if let Some(content_type) = body.forced_content_type {
            headers.remove_ignore_case(CONTENT_TYPE);
            headers.remove_ignore_case(CONTENT_LENGTH);
            headers.insert(self.header_name(CONTENT_TYPE), content_type);
        } else if let Some(content_type) = body.default_content_type {
            if !headers.contains_ignore_case(CONTENT_TYPE) {
                headers.insert(self.header_name(CONTENT_TYPE), content_type);
            }
        }
        if !body.bytes.is_empty() && !headers.contains_ignore_case(CONTENT_LENGTH) {
            headers.insert(self.header_name(CONTENT_LENGTH), body.bytes.len().to_string());
        }

        tracing::trace!(start_line, preserve, headers = headers.len(), "Writing message head");

        let mut out = Vec::with_capacity(start_line.len() + 256 + body.bytes.len());
        out.extend_from_slice(start_line.as_bytes());
        out.extend_from_slice(b"\r\n");
        for (name, value) in headers.iter() {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&body.bytes);
        out
    }

    fn header_name(&self, name: &str) -> String {
        if self.options.preserve_header_case {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }
}

/// Reject header names that are not tokens and values that would end the line.
pub(crate) fn check_headers(headers: &Headers) -> CodecResult<()> {
    for (name, value) in headers.iter() {
        if !is_token(name) {
            return Err(CodecError::invalid_format(format!(
                "invalid header name {:?}",
                name
            )));
        }
        if value.bytes().any(|b| b == b'\r' || b == b'\n' || b == 0) {
            return Err(CodecError::invalid_format(format!(
                "header {:?} has a value containing CR, LF or NUL",
                name
            )));
        }
    }
    Ok(())
}

/// Token characters allowed in a method (RFC 9110 `tchar`).
pub(crate) fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

/// Reject values that would break the start line.
pub(crate) fn check_start_line_field(value: &str) -> bool {
    !value.bytes().any(|b| b == b' ' || b.is_ascii_control())
}
