//! Request line and status line parsing.

use crate::error::{CodecError, CodecResult};

/// `METHOD target VERSION`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    pub target: &'a str,
    pub version: &'a str,
}

/// `VERSION code reason`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine<'a> {
    pub version: &'a str,
    pub status: u16,
    pub reason: &'a str,
}

/// Parse a request line; the target is returned verbatim.
pub fn parse_request_line(line: &str) -> CodecResult<RequestLine<'_>> {
    let mut tokens = line.split(' ').filter(|t| !t.is_empty());
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(method), Some(target), Some(version)) => Ok(RequestLine {
            method,
            target,
            version,
        }),
        _ => Err(CodecError::InvalidRequestLine {
            line: line.to_string(),
        }),
    }
}

/// Parse a status line: protocol, whitespace, digits, whitespace, reason.
///
/// Runs of whitespace between the parts are skipped; the reason may be empty
/// but its separator may not. Codes must fit the `u16` status field.
pub fn parse_status_line(line: &str) -> CodecResult<StatusLine<'_>> {
    let invalid = || CodecError::InvalidStatusLine {
        line: line.to_string(),
    };

    let (version, rest) = line.split_once(char::is_whitespace).ok_or_else(invalid)?;
    let (code, reason) = rest
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or_else(invalid)?;
    if version.is_empty() || code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let status = code.parse::<u16>().map_err(|_| invalid())?;

    Ok(StatusLine {
        version,
        status,
        reason: reason.trim_start(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_request_line() {
        let line = parse_request_line("POST /api/users?id=1#top HTTP/1.1").unwrap();
        assert_eq!(line.method, "POST");
        assert_eq!(line.target, "/api/users?id=1#top");
        assert_eq!(line.version, "HTTP/1.1");
    }

    #[test]
    fn test_request_line_missing_tokens() {
        let err = parse_request_line("GET").unwrap_err();
        assert!(matches!(err, CodecError::InvalidRequestLine { .. }));
        assert_eq!(err.code(), ErrorCode::InvalidHttpFormat);
        assert!(parse_request_line("GET /").is_err());
        assert!(parse_request_line("").is_err());
    }

    #[test]
    fn test_status_line_reason_with_spaces() {
        let line = parse_status_line("HTTP/1.1 418 I'm a teapot (really)").unwrap();
        assert_eq!(line.version, "HTTP/1.1");
        assert_eq!(line.status, 418);
        assert_eq!(line.reason, "I'm a teapot (really)");
    }

    #[test]
    fn test_status_line_empty_reason() {
        let line = parse_status_line("HTTP/1.1 204 ").unwrap();
        assert_eq!(line.status, 204);
        assert_eq!(line.reason, "");
    }

    #[test]
    fn test_status_line_extra_whitespace() {
        let line = parse_status_line("HTTP/1.1   200  OK then").unwrap();
        assert_eq!(line.status, 200);
        assert_eq!(line.reason, "OK then");

        let line = parse_status_line("HTTP/1.1 200\tOK").unwrap();
        assert_eq!(line.reason, "OK");
    }

    #[test]
    fn test_status_line_invalid() {
        assert!(matches!(
            parse_status_line("HTTP/1.1"),
            Err(CodecError::InvalidStatusLine { .. })
        ));
        assert!(parse_status_line("HTTP/1.1 OK fine").is_err());
        assert!(parse_status_line("HTTP/1.1 200").is_err());
        assert!(parse_status_line("HTTP/1.1 99999 Big").is_err());
    }
}
