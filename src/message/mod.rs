//! Structured message model.
//!
//! # Data Flow
//! ```text
//! decode: bytes → parser → Headers + Body → StructuredRequest / StructuredResponse
//! encode: StructuredRequest / StructuredResponse → Headers + Body → bytes
//! ```
//!
//! # Design Decisions
//! - `Body` is a closed sum type; every consumer matches it exhaustively
//! - Form entries are text or file by construction, never inferred
//! - Request/response serialize in the axios shape for direct hand-off to clients

pub mod body;
pub mod form;
pub mod headers;
pub mod request;
pub mod response;

pub use body::Body;
pub use form::{AttachmentSource, FileAttachment, FileField, FileSource, FormData, FormEntry};
pub use headers::Headers;
pub use request::StructuredRequest;
pub use response::StructuredResponse;
