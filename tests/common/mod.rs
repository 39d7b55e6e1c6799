//! Shared fixtures for integration tests.

#![allow(dead_code)]

use http_wire_codec::{ConverterOptions, HttpConverter};

/// Converter with a fixed boundary so encoded output is predictable.
pub fn converter() -> HttpConverter {
    HttpConverter::new(ConverterOptions::new().with_multipart_boundary("TestBoundary42"))
}

/// Build a raw response with the given content type and body.
pub fn response_with(content_type: &str, body: &[u8]) -> Vec<u8> {
    let mut message = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n",
        content_type,
        body.len()
    )
    .into_bytes();
    message.extend_from_slice(body);
    message
}

/// Split an encoded message into its head text and body bytes.
pub fn split(message: &[u8]) -> (String, Vec<u8>) {
    let at = message
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("message has no header terminator");
    (
        String::from_utf8_lossy(&message[..at]).into_owned(),
        message[at + 4..].to_vec(),
    )
}
