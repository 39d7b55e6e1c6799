//! Error taxonomy for the codec.
//!
//! # Design Decisions
//! - Every hard failure is a `CodecError` carrying one of the fixed `ErrorCode`s
//! - Request/status line failures keep their own variants but report `INVALID_HTTP_FORMAT`
//! - Soft anomalies (bad JSON, bad UTF-8, failing transforms) never reach this type

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Stable, caller-inspectable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidHttpFormat,
    UnsupportedMethod,
    BodyTooLarge,
    InvalidMultipart,
    InvalidUrl,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidHttpFormat => "INVALID_HTTP_FORMAT",
            ErrorCode::UnsupportedMethod => "UNSUPPORTED_METHOD",
            ErrorCode::BodyTooLarge => "BODY_TOO_LARGE",
            ErrorCode::InvalidMultipart => "INVALID_MULTIPART",
            ErrorCode::InvalidUrl => "INVALID_URL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Errors raised while decoding or encoding a message.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input too short or otherwise missing a start line.
    #[error("Invalid HTTP format: {message}")]
    InvalidHttpFormat { message: String },

    /// Request line without method, target and version.
    #[error("Invalid HTTP format: invalid request line {line:?}")]
    InvalidRequestLine { line: String },

    /// Status line without protocol, numeric code and reason.
    #[error("Invalid HTTP format: invalid status line {line:?}")]
    InvalidStatusLine { line: String },

    /// Method that is not an HTTP token.
    #[error("Unsupported method: {method}")]
    UnsupportedMethod { method: String },

    /// Body exceeds the configured `max_body_size`.
    #[error("Body too large: {size} bytes exceeds limit of {limit} bytes")]
    BodyTooLarge { size: usize, limit: usize },

    /// Multipart body that cannot be read or written.
    #[error("Invalid multipart body: {message}")]
    InvalidMultipart { message: String },

    /// Url that would corrupt the request line on encode.
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// A lazily-read attachment failed to produce its bytes.
    #[error("Failed to read attachment for field {name:?}: {source}")]
    Attachment {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A JSON body could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn invalid_format(message: impl Into<String>) -> Self {
        CodecError::InvalidHttpFormat {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_multipart(message: impl Into<String>) -> Self {
        CodecError::InvalidMultipart {
            message: message.into(),
        }
    }

    /// The stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CodecError::InvalidHttpFormat { .. }
            | CodecError::InvalidRequestLine { .. }
            | CodecError::InvalidStatusLine { .. }
            | CodecError::Json(_) => ErrorCode::InvalidHttpFormat,
            CodecError::UnsupportedMethod { .. } => ErrorCode::UnsupportedMethod,
            CodecError::BodyTooLarge { .. } => ErrorCode::BodyTooLarge,
            CodecError::InvalidMultipart { .. } | CodecError::Attachment { .. } => {
                ErrorCode::InvalidMultipart
            }
            CodecError::InvalidUrl { .. } => ErrorCode::InvalidUrl,
        }
    }

    /// Optional extra context: the offending line, value or limit.
    pub fn details(&self) -> Option<String> {
        match self {
            CodecError::InvalidRequestLine { line } | CodecError::InvalidStatusLine { line } => {
                Some(line.clone())
            }
            CodecError::UnsupportedMethod { method } => Some(method.clone()),
            CodecError::BodyTooLarge { size, limit } => {
                Some(format!("size={} limit={}", size, limit))
            }
            CodecError::InvalidUrl { url } => Some(url.clone()),
            CodecError::Attachment { name, .. } => Some(name.clone()),
            CodecError::InvalidHttpFormat { .. }
            | CodecError::InvalidMultipart { .. }
            | CodecError::Json(_) => None,
        }
    }
}

/// Result alias used across the crate.
pub type CodecResult<T> = Result<T, CodecError>;
