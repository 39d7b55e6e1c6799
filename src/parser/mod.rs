//! Line-oriented HTTP/1.x message parsing.
//!
//! # Data Flow
//! ```text
//! message bytes
//!     → split_message (head | body at the first blank line)
//!     → start_line.rs (request line / status line)
//!     → headers.rs (remaining head lines → Headers)
//! ```
//!
//! # Design Decisions
//! - Operates on a complete, buffered message; no incremental state
//! - The head is decoded lossily as UTF-8; the body is never touched here
//! - CRLF is the terminator; a bare LF is tolerated

pub mod headers;
pub mod start_line;

pub use headers::{parse_header_block, parse_header_lines};
pub use start_line::{parse_request_line, parse_status_line, RequestLine, StatusLine};

const CRLF_CRLF: &[u8] = b"\r\n\r\n";
const LF_LF: &[u8] = b"\n\n";

/// Head and body of a buffered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageParts<'a> {
    /// Start line plus header lines, without the blank separator line.
    pub head: &'a [u8],
    /// Everything after the separator; empty if there is none.
    pub body: &'a [u8],
}

/// Split a message at its first blank line.
pub fn split_message(input: &[u8]) -> MessageParts<'_> {
    let crlf = find(input, CRLF_CRLF).map(|at| (at, CRLF_CRLF.len()));
    let lf = find(input, LF_LF).map(|at| (at, LF_LF.len()));
    let separator = match (crlf, lf) {
        (Some(crlf), Some(lf)) => Some(if lf.0 < crlf.0 { lf } else { crlf }),
        (crlf, lf) => crlf.or(lf),
    };

    match separator {
        Some((at, len)) => MessageParts {
            head: &input[..at],
            body: &input[at + len..],
        },
        None => MessageParts {
            head: input,
            body: &[],
        },
    }
}

/// Split a text block into lines on `\n`, dropping a trailing `\r` from each.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Split bytes on CRLF. Joining the result with CRLF restores the input exactly.
pub fn split_crlf(bytes: &[u8]) -> Vec<&[u8]> {
    let mut out = Vec::new();
    let mut rest = bytes;
    while let Some(at) = find(rest, b"\r\n") {
        out.push(&rest[..at]);
        rest = &rest[at + 2..];
    }
    out.push(rest);
    out
}

pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
