//! The request/response codec.
//!
//! # Data Flow
//! ```text
//! decode_request:  bytes → converter.rs (head split, limits) → request.rs → StructuredRequest
//! decode_response: bytes → converter.rs → response.rs → transform dispatch + chain → StructuredResponse
//! encode_*:        Structured* → serialize.rs (body by variant, headers) → bytes
//! ```
//!
//! # Design Decisions
//! - A converter holds only immutable options and its multipart boundary
//! - Every call either returns a complete value or fails with a typed error
//! - Encoding is async only because lazy attachments may need to be read

pub mod converter;
pub mod options;
mod request;
mod response;
mod serialize;

pub use converter::HttpConverter;
pub use options::ConverterOptions;
