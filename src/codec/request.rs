//! Request decode and encode.
//!
//! # Responsibilities
//! - Decode: request line → lowercase method + verbatim url, headers, raw or multipart body
//! - Encode: `<METHOD> <url> HTTP/1.1`, headers, body by variant
//!
//! # Design Decisions
//! - No content-type transform on the request path except multipart
//! - Method defaults to `GET`, url defaults to `/` when empty

use crate::codec::serialize::{check_headers, check_start_line_field, is_token};
use crate::codec::HttpConverter;
use crate::error::{CodecError, CodecResult};
use crate::message::{Body, StructuredRequest};
use crate::multipart::{extract_boundary, is_multipart_form, read_form};
use crate::parser::parse_request_line;

impl HttpConverter {
    /// Decode a complete request message.
    pub fn decode_request(&self, input: &[u8]) -> CodecResult<StructuredRequest> {
        let head = self.decode_head(input)?;
        let line = parse_request_line(&head.start_line)?;
        if !is_token(line.method) {
            return Err(CodecError::UnsupportedMethod {
                method: line.method.to_string(),
            });
        }

        let content_type = head.headers.get_ignore_case("content-type");
        let body = match content_type {
            Some(content_type) if is_multipart_form(content_type) => {
                let boundary = extract_boundary(content_type)?;
                Body::Form(read_form(head.body, &boundary))
            }
            _ if head.body.is_empty() => Body::Empty,
            _ => Body::Bytes(head.body.to_vec()),
        };

        let request = StructuredRequest {
            method: line.method.to_lowercase(),
            url: line.target.to_string(),
            headers: head.headers,
            body,
        };

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            version = line.version,
            headers = request.headers.len(),
            body = request.body.kind(),
            body_len = head.body.len(),
            "Decoded request"
        );
        Ok(request)
    }

    /// Encode a request into message bytes.
    pub async fn encode_request(&self, request: &StructuredRequest) -> CodecResult<Vec<u8>> {
        let method = if request.method.is_empty() {
            "GET".to_string()
        } else {
            request.method.to_uppercase()
        };
        if !is_token(&method) {
            return Err(CodecError::UnsupportedMethod { method });
        }

        let url = if request.url.is_empty() {
            "/"
        } else {
            request.url.as_str()
        };
        if !check_start_line_field(url) {
            return Err(CodecError::InvalidUrl {
                url: url.to_string(),
            });
        }

        check_headers(&request.headers)?;
        let body = self.encode_body(&request.body).await?;
        let body_len = body.bytes.len();
        let start_line = format!("{} {} HTTP/1.1", method, url);
        let message = self.write_message(&start_line, &request.headers, body);

        tracing::debug!(
            method = %method,
            url,
            body = request.body.kind(),
            body_len,
            len = message.len(),
            "Encoded request"
        );
        Ok(message)
    }
}
