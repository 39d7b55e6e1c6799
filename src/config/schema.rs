//! Configuration schema definitions.
//!
//! The file-backed part of the converter options. Response transforms are
//! code-only and are attached through `ConverterOptions::with_transform`.

use serde::{Deserialize, Serialize};

/// Root configuration for a converter.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// Maximum body size in bytes (unset = unbounded).
    pub max_body_size: Option<usize>,

    /// Keep header names as written instead of lowercasing them.
    pub preserve_header_case: bool,

    /// Fixed multipart boundary (generated per converter when unset).
    pub multipart_boundary: Option<String>,
}
