//! Multipart/form-data reader.
//!
//! # Algorithm
//! - Split the body on CRLF and scan for lines equal to `--<boundary>`
//! - `--<boundary>--` ends scanning
//! - Within a part, the first blank line ends the part's header block
//! - Content is the remaining lines rejoined with CRLF
//!
//! # Design Decisions
//! - Parts without a header/body separator or without a `name` are skipped
//! - A `filename` parameter makes the part a file; otherwise it is a text field

use crate::message::form::DEFAULT_FILE_CONTENT_TYPE;
use crate::message::{FileField, FormData};
use crate::parser::{parse_header_lines, split_crlf};

/// Decode a multipart body. Tolerates zero parts and unnamed parts.
pub fn read_form(body: &[u8], boundary: &str) -> FormData {
    let delimiter = format!("--{}", boundary);
    let terminator = format!("--{}--", boundary);

    let mut form = FormData::new();
    let mut part: Option<Vec<&[u8]>> = None;

    for line in split_crlf(body) {
        if line == terminator.as_bytes() {
            break;
        }
        if line == delimiter.as_bytes() {
            if let Some(lines) = part.take() {
                read_part(&lines, &mut form);
            }
            part = Some(Vec::new());
            continue;
        }
        if let Some(lines) = part.as_mut() {
            lines.push(line);
        }
    }
    if let Some(lines) = part {
        read_part(&lines, &mut form);
    }

    form
}

fn read_part(lines: &[&[u8]], form: &mut FormData) {
    let Some(blank) = lines.iter().position(|line| line.is_empty()) else {
        tracing::debug!("Skipping multipart part without header separator");
        return;
    };

    let header_lines: Vec<String> = lines[..blank]
        .iter()
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect();
    let headers = parse_header_lines(header_lines.iter().map(String::as_str), false);
    let content = lines[blank + 1..].join(&b"\r\n"[..]);

    let disposition = headers.get("content-disposition").unwrap_or_default();
    let Some(name) = disposition_param(disposition, "name") else {
        tracing::debug!(disposition, "Skipping multipart part without name");
        return;
    };

    match disposition_param(disposition, "filename") {
        Some(filename) => {
            let content_type = headers
                .get("content-type")
                .unwrap_or(DEFAULT_FILE_CONTENT_TYPE)
                .to_string();
            form.append_file(FileField::from_bytes(
                name,
                filename,
                Some(content_type),
                content,
            ));
        }
        None => {
            form.append_text(name, String::from_utf8_lossy(&content).into_owned());
        }
    }
}

/// Value of a `Content-Disposition` parameter, unquoted.
pub fn disposition_param(disposition: &str, key: &str) -> Option<String> {
    split_params(disposition).into_iter().skip(1).find_map(|param| {
        let (k, v) = param.split_once('=')?;
        if !k.trim().eq_ignore_ascii_case(key) {
            return None;
        }
        Some(unquote(v.trim()))
    })
}

/// Split on `;` outside of quoted strings.
fn split_params(value: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (at, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                params.push(&value[start..at]);
                start = at + 1;
            }
            _ => {}
        }
    }
    params.push(&value[start..]);
    params
}

/// Strip surrounding quotes and resolve backslash escapes inside them.
fn unquote(value: &str) -> String {
    let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) else {
        return value.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "--XyZ\r\n\
        Content-Disposition: form-data; name=\"title\"\r\n\
        \r\n\
        Hello World\r\n\
        --XyZ\r\n\
        Content-Disposition: form-data; name=\"upload\"; filename=\"a.txt\"\r\n\
        Content-Type: text/plain\r\n\
        \r\n\
        line one\r\nline two\r\n\
        --XyZ--\r\n";

    #[test]
    fn test_text_and_file_parts() {
        let form = read_form(BODY.as_bytes(), "XyZ");
        assert_eq!(form.len(), 2);
        assert_eq!(form.text("title"), Some("Hello World"));

        let file = form.file("upload").unwrap();
        assert_eq!(file.filename, "a.txt");
        assert_eq!(file.content_type(), "text/plain");
        assert_eq!(file.bytes(), Some(&b"line one\r\nline two"[..]));
    }

    #[test]
    fn test_file_without_content_type_defaults() {
        let body = "--b\r\n\
            Content-Disposition: form-data; name=\"f\"; filename=\"x.bin\"\r\n\
            \r\n\
            \r\n\
            --b--";
        let form = read_form(body.as_bytes(), "b");
        let file = form.file("f").unwrap();
        assert_eq!(file.content_type(), DEFAULT_FILE_CONTENT_TYPE);
        assert_eq!(file.bytes(), Some(&b""[..]));
    }

    #[test]
    fn test_skips_unnamed_and_headerless_parts() {
        let body = "--b\r\n\
            Content-Disposition: form-data\r\n\
            \r\n\
            nameless\r\n\
            --b\r\n\
            no separator here\r\n\
            --b\r\n\
            Content-Disposition: form-data; name=\"empty\"\r\n\
            \r\n\
            \r\n\
            --b--\r\n";
        let form = read_form(body.as_bytes(), "b");
        assert_eq!(form.len(), 1);
        assert_eq!(form.text("empty"), Some(""));
    }

    #[test]
    fn test_empty_form() {
        assert!(read_form(b"", "b").is_empty());
        assert!(read_form(b"--b--\r\n", "b").is_empty());
    }

    #[test]
    fn test_terminator_ends_scanning() {
        let body = "--b\r\n\
            Content-Disposition: form-data; name=\"a\"\r\n\
            \r\n\
            1\r\n\
            --b--\r\n\
            --b\r\n\
            Content-Disposition: form-data; name=\"ignored\"\r\n\
            \r\n\
            2\r\n";
        let form = read_form(body.as_bytes(), "b");
        assert_eq!(form.len(), 1);
        assert_eq!(form.text("a"), Some("1"));
    }

    #[test]
    fn test_disposition_params() {
        let d = "form-data; name=\"field\"; filename=\"my file.txt\"";
        assert_eq!(disposition_param(d, "name").as_deref(), Some("field"));
        assert_eq!(disposition_param(d, "filename").as_deref(), Some("my file.txt"));
        assert_eq!(disposition_param("form-data; name=plain", "name").as_deref(), Some("plain"));
        assert_eq!(disposition_param("form-data; filename=\"x\"", "name"), None);
    }

    #[test]
    fn test_quoted_params_keep_separators_and_escapes() {
        let d = r#"form-data; name="doc"; filename="q1;q2 report.txt""#;
        assert_eq!(disposition_param(d, "name").as_deref(), Some("doc"));
        assert_eq!(disposition_param(d, "filename").as_deref(), Some("q1;q2 report.txt"));

        let d = r#"form-data; name="a\"b"; filename="c\\d""#;
        assert_eq!(disposition_param(d, "name").as_deref(), Some("a\"b"));
        assert_eq!(disposition_param(d, "filename").as_deref(), Some("c\\d"));
    }

    #[test]
    fn test_file_name_with_semicolon() {
        let body = "--b\r\n\
            Content-Disposition: form-data; name=\"f\"; filename=\"x;y.txt\"\r\n\
            \r\n\
            data\r\n\
            --b--\r\n";
        let form = read_form(body.as_bytes(), "b");
        assert_eq!(form.file("f").unwrap().filename, "x;y.txt");
    }
}
