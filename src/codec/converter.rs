//! The converter instance shared across calls.

use crate::codec::options::ConverterOptions;
use crate::error::{CodecError, CodecResult};
use crate::message::Headers;
use crate::multipart::generate_boundary;
use crate::parser::{lines, parse_header_lines, split_message};

/// Start line, headers and body slice of a buffered message.
#[derive(Debug)]
pub(crate) struct DecodedHead<'a> {
    pub start_line: String,
    pub headers: Headers,
    pub body: &'a [u8],
}

/// Bidirectional codec between wire-format messages and structured values.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// callers. Decode methods live in `codec::request` / `codec::response`.
#[derive(Debug, Clone)]
pub struct HttpConverter {
    pub(crate) options: ConverterOptions,
    pub(crate) boundary: String,
}

impl HttpConverter {
    /// Build a converter, generating a multipart boundary if none is configured.
    pub fn new(options: ConverterOptions) -> Self {
        let boundary = options
            .multipart_boundary
            .clone()
            .unwrap_or_else(generate_boundary);
        tracing::debug!(
            boundary = %boundary,
            max_body_size = ?options.max_body_size,
            preserve_header_case = options.preserve_header_case,
            transforms = options.transform_response.len(),
            "Converter created"
        );
        Self { options, boundary }
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Boundary used for every multipart encode from this instance.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Split a message into start line, parsed headers and body.
    ///
    /// The body limit is checked here, before the body is copied anywhere.
    pub(crate) fn decode_head<'a>(&self, input: &'a [u8]) -> CodecResult<DecodedHead<'a>> {
        if !input.contains(&b'\n') {
            return Err(CodecError::invalid_format(
                "message must contain a start line terminated by CRLF",
            ));
        }

        let parts = split_message(input);
        self.check_body_size(parts.body.len())?;

        let head = String::from_utf8_lossy(parts.head);
        let mut head_lines = lines(&head);
        let start_line = head_lines.next().unwrap_or_default().to_string();
        let headers = parse_header_lines(head_lines, self.options.preserve_header_case);

        Ok(DecodedHead {
            start_line,
            headers,
            body: parts.body,
        })
    }

    /// Fail with `BodyTooLarge` when `size` exceeds the configured limit.
    pub(crate) fn check_body_size(&self, size: usize) -> CodecResult<()> {
        match self.options.max_body_size {
            Some(limit) if size > limit => Err(CodecError::BodyTooLarge { size, limit }),
            _ => Ok(()),
        }
    }
}

impl Default for HttpConverter {
    fn default() -> Self {
        Self::new(ConverterOptions::default())
    }
}
