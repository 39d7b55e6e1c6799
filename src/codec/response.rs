//! Response decode and encode.
//!
//! # Responsibilities
//! - Decode: status line, headers, content-type dispatch, then custom transforms
//! - Encode: `HTTP/1.1 <status> <statusText>`, headers, body by variant
//!
//! # Design Decisions
//! - Soft failures in dispatch and transforms never fail the decode
//! - Form bodies are encoded as multipart, same as on the request path

use crate::codec::serialize::check_headers;
use crate::codec::HttpConverter;
use crate::error::{CodecError, CodecResult};
use crate::message::StructuredResponse;
use crate::parser::parse_status_line;
use crate::transform::dispatch_body;

impl HttpConverter {
    /// Decode a complete response message.
    pub fn decode_response(&self, input: &[u8]) -> CodecResult<StructuredResponse> {
        let head = self.decode_head(input)?;
        let line = parse_status_line(&head.start_line)?;

        let content_type = head.headers.get_ignore_case("content-type");
        let body = dispatch_body(head.body, content_type)?;
        let body = self
            .options
            .transform_response
            .apply(body, &head.headers);

        let response = StructuredResponse {
            status: line.status,
            status_text: line.reason.to_string(),
            headers: head.headers,
            body,
        };

        tracing::debug!(
            status = response.status,
            status_text = %response.status_text,
            version = line.version,
            headers = response.headers.len(),
            body = response.body.kind(),
            body_len = head.body.len(),
            "Decoded response"
        );
        Ok(response)
    }

    /// Encode a response into message bytes.
    pub async fn encode_response(&self, response: &StructuredResponse) -> CodecResult<Vec<u8>> {
        if response.status_text.contains(['\r', '\n']) {
            return Err(CodecError::invalid_format(
                "status text must not contain line terminators",
            ));
        }

        check_headers(&response.headers)?;
        let body = self.encode_body(&response.body).await?;
        let body_len = body.bytes.len();
        let start_line = format!("HTTP/1.1 {} {}", response.status, response.status_text);
        let message = self.write_message(&start_line, &response.headers, body);

        tracing::debug!(
            status = response.status,
            body = response.body.kind(),
            body_len,
            len = message.len(),
            "Encoded response"
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ConverterOptions;
    use crate::error::ErrorCode;
    use crate::message::{Body, Headers};
    use crate::transform::TransformError;
    use serde_json::json;

    #[test]
    fn test_decode_json_response() {
        let input = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"message\":\"Hello World\"}";
        let res = HttpConverter::default().decode_response(input).unwrap();
        assert_eq!(res.status, 200);
        assert_eq!(res.status_text, "OK");
        assert_eq!(res.body.as_json(), Some(&json!({"message": "Hello World"})));
    }

    #[test]
    fn test_decode_status_text_with_punctuation() {
        let input = b"HTTP/1.1 503 Service Unavailable (maintenance)\r\n\r\n";
        let res = HttpConverter::default().decode_response(input).unwrap();
        assert_eq!(res.status, 503);
        assert_eq!(res.status_text, "Service Unavailable (maintenance)");
        assert!(res.body.is_empty());
    }

    #[test]
    fn test_decode_invalid_status_line() {
        let err = HttpConverter::default().decode_response(b"HTTP/1.1\r\n\r\n").unwrap_err();
        assert!(matches!(err, CodecError::InvalidStatusLine { .. }));
        assert_eq!(err.code(), ErrorCode::InvalidHttpFormat);
    }

    #[test]
    fn test_custom_transforms() {
        let add_flag = |body: &Body, _: &Headers| -> Result<Body, TransformError> {
            let mut value = body.as_json().cloned().ok_or("not json")?;
            value["seen"] = json!(true);
            Ok(Body::Json(value))
        };
        let converter = HttpConverter::new(ConverterOptions::new().with_transform(add_flag));

        let res = converter
            .decode_response(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"a\":1}")
            .unwrap();
        assert_eq!(res.body.as_json(), Some(&json!({"a": 1, "seen": true})));

        let res = converter
            .decode_response(b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nplain")
            .unwrap();
        assert_eq!(res.body.as_text(), Some("plain"));
    }

    #[tokio::test]
    async fn test_encode_response() {
        let res = StructuredResponse::new(201, "Created").body(json!({"id": 7}));
        let message = HttpConverter::default().encode_response(&res).await.unwrap();
        assert_eq!(
            String::from_utf8(message).unwrap(),
            "HTTP/1.1 201 Created\r\n\
             content-type: application/json\r\n\
             content-length: 8\r\n\
             \r\n\
             {\"id\":7}"
        );
    }

    #[tokio::test]
    async fn test_encode_rejects_header_value_with_crlf() {
        let res = StructuredResponse::new(200, "OK").header("Set-Cookie", "a=1\r\nX-Injected: yes");
        let err = HttpConverter::default().encode_response(&res).await.unwrap_err();
        assert!(matches!(err, CodecError::InvalidHttpFormat { .. }));
    }

    #[tokio::test]
    async fn test_encode_rejects_status_text_with_crlf() {
        let res = StructuredResponse::new(200, "OK\r\nX-Injected: 1");
        let err = HttpConverter::default().encode_response(&res).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidHttpFormat);
    }
}
