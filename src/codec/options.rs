//! Converter options.
//!
//! Fixed for the lifetime of one converter; calls only read them.

use std::sync::Arc;

use crate::config::CodecConfig;
use crate::transform::{ResponseTransform, TransformChain};

/// Options captured when a converter is constructed.
#[derive(Debug, Clone, Default)]
pub struct ConverterOptions {
    /// Upper bound on body bytes, enforced on decode and encode. `None` = unbounded.
    pub max_body_size: Option<usize>,

    /// Keep header names as written instead of lowercasing them.
    pub preserve_header_case: bool,

    /// Boundary used for every multipart encode. Generated when unset.
    pub multipart_boundary: Option<String>,

    /// Applied in order to decoded response bodies after content-type dispatch.
    pub transform_response: TransformChain,
}

impl ConverterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = Some(limit);
        self
    }

    pub fn with_preserve_header_case(mut self, preserve: bool) -> Self {
        self.preserve_header_case = preserve;
        self
    }

    pub fn with_multipart_boundary(mut self, boundary: impl Into<String>) -> Self {
        self.multipart_boundary = Some(boundary.into());
        self
    }

    pub fn with_transform<T>(mut self, transform: T) -> Self
    where
        T: ResponseTransform + 'static,
    {
        self.transform_response.push(Arc::new(transform));
        self
    }
}

impl From<CodecConfig> for ConverterOptions {
    fn from(config: CodecConfig) -> Self {
        Self {
            max_body_size: config.max_body_size,
            preserve_header_case: config.preserve_header_case,
            multipart_boundary: config.multipart_boundary,
            transform_response: TransformChain::new(),
        }
    }
}
