//! Multipart boundary tokens.
//!
//! # Responsibilities
//! - Generate a boundary once per codec instance
//! - Extract the boundary parameter from a `content-type` value
//! - Validate configured boundaries against RFC 2046

use uuid::Uuid;

use crate::error::{CodecError, CodecResult};

/// Maximum boundary length allowed by RFC 2046.
pub const MAX_BOUNDARY_LEN: usize = 70;

/// Fresh boundary of the form `----HttpWireCodecBoundary<32 hex digits>`.
pub fn generate_boundary() -> String {
    format!("----HttpWireCodecBoundary{}", Uuid::new_v4().simple())
}

/// True when the media type of `content_type` is `multipart/form-data`.
pub fn is_multipart_form(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .contains("multipart/form-data")
}

/// Extract `boundary=...` up to the next `;` or the end of the value.
///
/// Surrounding quotes are stripped. A missing or empty boundary is an error.
pub fn extract_boundary(content_type: &str) -> CodecResult<String> {
    let lower = content_type.to_ascii_lowercase();
    let start = lower
        .find("boundary=")
        .map(|at| at + "boundary=".len())
        .ok_or_else(|| CodecError::invalid_multipart("missing boundary in content-type"))?;

    let rest = &content_type[start..];
    let value = rest.split(';').next().unwrap_or_default().trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);

    if value.is_empty() {
        return Err(CodecError::invalid_multipart("empty boundary in content-type"));
    }
    Ok(value.to_string())
}

/// Reason a boundary is not valid per RFC 2046, if any.
pub fn boundary_problem(boundary: &str) -> Option<&'static str> {
    const SPECIALS: &str = "'()+_,-./:=? ";

    if boundary.is_empty() {
        return Some("boundary must not be empty");
    }
    if boundary.len() > MAX_BOUNDARY_LEN {
        return Some("boundary must be at most 70 characters");
    }
    if boundary.ends_with(' ') {
        return Some("boundary must not end with a space");
    }
    if !boundary
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c))
    {
        return Some("boundary contains characters outside the RFC 2046 set");
    }
    None
}
