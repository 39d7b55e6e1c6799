//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (body limit > 0)
//! - Validate a configured multipart boundary against RFC 2046
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CodecConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::schema::CodecConfig;
use crate::multipart::boundary::boundary_problem;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check every field and collect all problems.
pub fn validate_config(config: &CodecConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.max_body_size == Some(0) {
        errors.push(ValidationError {
            field: "max_body_size",
            message: "must be greater than zero".to_string(),
        });
    }

    if let Some(boundary) = &config.multipart_boundary {
        if let Some(problem) = boundary_problem(boundary) {
            errors.push(ValidationError {
                field: "multipart_boundary",
                message: problem.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
