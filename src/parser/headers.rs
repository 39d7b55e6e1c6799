//! Header block parsing.
//!
//! # Design Decisions
//! - A line without a colon is dropped, not an error
//! - Name: text before the first colon, trimmed, lowercased unless case is preserved
//! - Value: text after the first colon, trimmed at both ends only
//! - Repeated names collapse to the last value (single-valued mapping)

use crate::message::Headers;
use crate::parser::lines;

/// Parse a CRLF-delimited header block.
pub fn parse_header_block(block: &str, preserve_case: bool) -> Headers {
    parse_header_lines(lines(block), preserve_case)
}

/// Parse already-split header lines.
pub fn parse_header_lines<'a, I>(lines: I, preserve_case: bool) -> Headers
where
    I: IntoIterator<Item = &'a str>,
{
    let mut headers = Headers::new();
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let name = if preserve_case {
            name.to_string()
        } else {
            name.to_lowercase()
        };
        headers.insert(name, value.trim());
    }
    headers
}
