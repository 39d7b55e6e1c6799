//! HTTP/1.x wire-format codec.
//!
//! Converts complete, buffered HTTP request and response messages to and from
//! structured values (method/url/status, headers, and a typed body), with
//! multipart/form-data support and content-type driven response decoding.

pub mod codec;
pub mod config;
pub mod error;
pub mod message;
pub mod multipart;
pub mod parser;
pub mod transform;

pub use codec::{ConverterOptions, HttpConverter};
pub use config::CodecConfig;
pub use error::{CodecError, CodecResult, ErrorCode};
pub use message::{
    AttachmentSource, Body, FileAttachment, FileField, FileSource, FormData, FormEntry, Headers,
    StructuredRequest, StructuredResponse,
};
pub use transform::{ResponseTransform, TransformError};

/// Decode a request with default options.
pub fn decode_request(input: &[u8]) -> CodecResult<StructuredRequest> {
    HttpConverter::default().decode_request(input)
}

/// Encode a request with default options.
pub async fn encode_request(request: &StructuredRequest) -> CodecResult<Vec<u8>> {
    HttpConverter::default().encode_request(request).await
}

/// Decode a response with default options.
pub fn decode_response(input: &[u8]) -> CodecResult<StructuredResponse> {
    HttpConverter::default().decode_response(input)
}

/// Encode a response with default options.
pub async fn encode_response(response: &StructuredResponse) -> CodecResult<Vec<u8>> {
    HttpConverter::default().encode_response(response).await
}
